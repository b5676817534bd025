// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use crate::error::Result;
use crate::reply::Reply;
use crate::schema::Args;
use crate::session::Session;

impl Session {
    pub fn health(&mut self, detail: bool) -> Result<Reply> {
        self.run("health", &Args::new().opt("detail", detail.then_some("detail")))
    }

    /// List nodes running daemons of `daemon_type` (`all`, `osd`, `mon`, `mds` or `mgr`).
    pub fn node_ls(&mut self, daemon_type: Option<&str>) -> Result<Reply> {
        self.run("node.ls", &Args::new().opt("type", daemon_type))
    }

    pub fn status(&mut self) -> Result<Reply> {
        self.run("status", &Args::new())
    }

    pub fn version(&mut self) -> Result<Reply> {
        self.run("version", &Args::new())
    }

    pub fn versions(&mut self) -> Result<Reply> {
        self.run("versions", &Args::new())
    }
}
