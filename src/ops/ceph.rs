// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! Operations that run the `ceph` program instead of going through the control channel.

use crate::command::Remote;
use crate::error::Result;
use crate::ops::on_host;
use crate::reply::Reply;
use crate::schema::Args;
use crate::session::Session;

impl Session {
    /// Remove OSD `id` from the CRUSH map, the auth database and the OSD map in one step.
    pub fn osd_purge(
        &mut self,
        id: i64,
        force: bool,
        yes_i_really_mean_it: bool,
    ) -> Result<Reply> {
        let args = Args::new()
            .set("id", id)
            .set("force", force)
            .set("yes_i_really_mean_it", yes_i_really_mean_it);
        self.run("osd.purge", &args)
    }

    /// Send `args` to a daemon such as `osd.3`, or to a placement group.
    pub fn tell(&mut self, target: &str, args: &[&str]) -> Result<Reply> {
        let args = Args::new().set("target", target).set("args", args);
        self.run("tell", &args)
    }

    /// The running configuration of `daemon`, read through its admin socket. The socket is
    /// local to the daemon's host, so `remote` names that host unless it is this one.
    pub fn daemon_config_show(&mut self, daemon: &str, remote: Option<&Remote>) -> Result<Reply> {
        let args = on_host(Args::new().set("daemon", daemon), remote);
        self.run("daemon.config.show", &args)
    }
}
