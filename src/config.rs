// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::{fmt, io};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::session::ReleasePolicy;

/// Config is the model of the cephctl configuration file. Every key is optional; a missing key
/// takes the value from `Config::default()`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path of the cluster configuration passed to the control channel.
    pub ceph_conf: String,
    /// Client name to authenticate as, without the `client.` prefix.
    pub client: String,
    pub release: ReleasePolicy,
    /// If set, every dispatched operation is appended to this file.
    pub journal: Option<String>,
    pub executables: Executables,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ceph_conf: crate::default_ceph_conf(),
            client: "admin".to_string(),
            release: ReleasePolicy::default(),
            journal: None,
            executables: Executables::default(),
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load the configuration file.
    ///
    /// The path is `explicit` if given, otherwise `CEPHCTL_CONFIG`, otherwise the default path.
    /// Only a missing file at the default path is tolerated.
    pub fn load(explicit: Option<&str>) -> Result<Self, ConfigError> {
        let required = explicit.is_some() || std::env::var_os("CEPHCTL_CONFIG").is_some();
        let path = match explicit {
            Some(path) => path.to_string(),
            None => crate::default_config_path(),
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => Self::from_toml(&text).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
                debug!("no config file at '{path}', using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io { path, source }),
        }
    }
}

/// Paths of the external programs that process operations run. A bare name is looked up on
/// `PATH`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Executables {
    pub ceph: String,
    pub rbd: String,
    #[serde(rename = "ceph-volume")]
    pub ceph_volume: String,
    pub ssh: String,
    /// Checks that a host answers before a command is sent to it through ssh.
    pub ping: String,
}

impl Default for Executables {
    fn default() -> Self {
        Executables {
            ceph: "ceph".to_string(),
            rbd: "rbd".to_string(),
            ceph_volume: "ceph-volume".to_string(),
            ssh: "ssh".to_string(),
            ping: "ping".to_string(),
        }
    }
}

impl Executables {
    /// The executable to run for `program`. Unknown programs are run by name.
    pub fn resolve<'a>(&'a self, program: &'a str) -> &'a str {
        match program {
            "ceph" => &self.ceph,
            "rbd" => &self.rbd,
            "ceph-volume" => &self.ceph_volume,
            "ssh" => &self.ssh,
            "ping" => &self.ping,
            other => other,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: String, source: io::Error },
    Parse { path: String, source: toml::de::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "could not open config file \"{path}\": {source}")
            }
            ConfigError::Parse { path, source } => {
                write!(f, "could not parse config file \"{path}\": {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn full_file() {
        let config = Config::from_toml(
            r#"
ceph_conf = "/srv/ceph.conf"
client = "ops"
release = "per-operation"
journal = "/var/log/cephctl.journal"

[executables]
rbd = "/opt/ceph/bin/rbd"
ceph-volume = "/opt/ceph/bin/ceph-volume"
"#,
        )
        .unwrap();

        assert_eq!(config.ceph_conf, "/srv/ceph.conf");
        assert_eq!(config.client, "ops");
        assert_eq!(config.release, ReleasePolicy::PerOperation);
        assert_eq!(config.journal.as_deref(), Some("/var/log/cephctl.journal"));
        assert_eq!(config.executables.resolve("rbd"), "/opt/ceph/bin/rbd");
        assert_eq!(
            config.executables.resolve("ceph-volume"),
            "/opt/ceph/bin/ceph-volume"
        );
        assert_eq!(config.executables.resolve("ceph"), "ceph");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml("clinet = \"admin\"").is_err());
        assert!(Config::from_toml("release = \"sometimes\"").is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = Config::load(Some("/nonexistent/cephctl.conf"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
