// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

pub mod command;
pub mod commands;
pub mod config;
pub mod error;
pub mod journal;
pub mod ops;
#[cfg(feature = "rados")]
pub mod rados;
pub mod reply;
pub mod schema;
pub mod session;
pub mod test_env;
pub mod transport;

pub use command::build;
pub use error::{Error, Result};
pub use reply::Reply;
pub use session::{ImageSession, ReleasePolicy, Session, Volume};

pub fn default_config_path() -> String {
    match std::env::var("CEPHCTL_CONFIG") {
        Ok(conf) => conf,
        Err(_) => "/etc/cephctl/cephctl.conf".to_string(),
    }
}

/// The cluster configuration file that the control channel reads.
pub fn default_ceph_conf() -> String {
    match std::env::var("CEPH_CONF") {
        Ok(conf) => conf,
        Err(_) => "/etc/ceph/ceph.conf".to_string(),
    }
}

/// The connector that reaches the cluster named in `config`.
#[cfg(feature = "rados")]
pub fn connector(config: &config::Config) -> Box<dyn transport::Connector> {
    Box::new(rados::RadosConnector::new(config))
}

/// The connector that reaches the cluster named in `config`. Without the `rados` feature there
/// is no control channel, so connecting always fails.
#[cfg(not(feature = "rados"))]
pub fn connector(_config: &config::Config) -> Box<dyn transport::Connector> {
    Box::new(session::Unavailable)
}
