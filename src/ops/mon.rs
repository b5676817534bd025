// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use crate::error::Result;
use crate::reply::Reply;
use crate::schema::Args;
use crate::session::Session;

impl Session {
    /// Dump the monitor map, at `epoch` if given.
    pub fn mon_dump(&mut self, epoch: Option<i64>) -> Result<Reply> {
        self.run("mon.dump", &Args::new().opt("epoch", epoch))
    }

    pub fn mon_stat(&mut self) -> Result<Reply> {
        self.run("mon.stat", &Args::new())
    }
}
