// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! One typed method per catalog operation.
//!
//! Control-channel operations and the `ceph` process operations are methods on
//! [`Session`](crate::session::Session), block image operations are methods on
//! [`ImageSession`](crate::session::ImageSession) and `ceph-volume` operations are methods on
//! [`Volume`](crate::session::Volume). Every method builds [`Args`] and hands them to the
//! command builder, so the arguments are validated against the catalog exactly as for a call
//! by name.

mod auth;
mod ceph;
mod cluster;
mod crash;
mod crush;
mod erasure;
mod mon;
mod osd;
mod pg;
mod pool;
mod rbd;
mod tier;
mod volume;

pub use osd::ReweightLimits;
pub use pool::PoolType;
pub use volume::{Activate, ObjectStore};

use crate::command::Remote;
use crate::schema::Args;

/// `Some(items)` unless `items` is empty, for optional list parameters.
fn list<'a>(items: &[&'a str]) -> Option<Vec<&'a str>> {
    if items.is_empty() {
        None
    } else {
        Some(items.to_vec())
    }
}

/// Add the ssh parameters of `remote`, if the command should run on another host.
fn on_host(args: Args, remote: Option<&Remote>) -> Args {
    match remote {
        Some(remote) => args
            .set("host", remote.host.as_str())
            .set("port", remote.port)
            .set("user", remote.user.as_str()),
        None => args,
    }
}
