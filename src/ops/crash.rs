// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use crate::error::Result;
use crate::reply::Reply;
use crate::schema::Args;
use crate::session::Session;

impl Session {
    pub fn crash_ls(&mut self) -> Result<Reply> {
        self.run("crash.ls", &Args::new())
    }

    pub fn crash_info(&mut self, id: &str) -> Result<Reply> {
        self.run("crash.info", &Args::new().set("id", id))
    }

    pub fn crash_archive(&mut self, id: &str) -> Result<Reply> {
        self.run("crash.archive", &Args::new().set("id", id))
    }

    pub fn crash_archive_all(&mut self) -> Result<Reply> {
        self.run("crash.archive-all", &Args::new())
    }
}
