// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use crate::error::Result;
use crate::ops::list;
use crate::reply::Reply;
use crate::schema::Args;
use crate::session::Session;

impl Session {
    pub fn osd_erasure_code_profile_get(&mut self, name: &str) -> Result<Reply> {
        self.run("osd.erasure-code-profile.get", &Args::new().set("name", name))
    }

    pub fn osd_erasure_code_profile_ls(&mut self) -> Result<Reply> {
        self.run("osd.erasure-code-profile.ls", &Args::new())
    }

    pub fn osd_erasure_code_profile_rm(&mut self, name: &str) -> Result<Reply> {
        self.run("osd.erasure-code-profile.rm", &Args::new().set("name", name))
    }

    /// Create or, with `force`, overwrite a profile. `profile` holds `key=value` pairs such as
    /// `k=4` and `m=2`.
    pub fn osd_erasure_code_profile_set(
        &mut self,
        name: &str,
        profile: &[&str],
        force: bool,
    ) -> Result<Reply> {
        let args = Args::new()
            .set("name", name)
            .opt("profile", list(profile))
            .set("force", force);
        self.run("osd.erasure-code-profile.set", &args)
    }
}
