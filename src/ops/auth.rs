// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use crate::error::Result;
use crate::ops::list;
use crate::reply::Reply;
use crate::schema::Args;
use crate::session::Session;

impl Session {
    /// Add auth info for `entity` from the given caps, e.g. `["mon", "allow r"]`.
    pub fn auth_add(&mut self, entity: &str, caps: &[&str]) -> Result<Reply> {
        let args = Args::new().set("entity", entity).opt("caps", list(caps));
        self.run("auth.add", &args)
    }

    /// Replace the caps of `entity`.
    pub fn auth_caps(&mut self, entity: &str, caps: &[&str]) -> Result<Reply> {
        let args = Args::new().set("entity", entity).opt("caps", list(caps));
        self.run("auth.caps", &args)
    }

    pub fn auth_get_or_create(&mut self, entity: &str, caps: &[&str]) -> Result<Reply> {
        let args = Args::new().set("entity", entity).opt("caps", list(caps));
        self.run("auth.get-or-create", &args)
    }

    pub fn auth_del(&mut self, entity: &str) -> Result<Reply> {
        self.run("auth.del", &Args::new().set("entity", entity))
    }

    pub fn auth_rm(&mut self, entity: &str) -> Result<Reply> {
        self.run("auth.rm", &Args::new().set("entity", entity))
    }

    /// Export the keyring of `entity`, or the master keyring if no entity is given.
    pub fn auth_export(&mut self, entity: Option<&str>) -> Result<Reply> {
        self.run("auth.export", &Args::new().opt("entity", entity))
    }

    pub fn auth_get(&mut self, entity: &str) -> Result<Reply> {
        self.run("auth.get", &Args::new().set("entity", entity))
    }

    pub fn auth_get_key(&mut self, entity: &str) -> Result<Reply> {
        self.run("auth.get-key", &Args::new().set("entity", entity))
    }

    pub fn auth_print_key(&mut self, entity: &str) -> Result<Reply> {
        self.run("auth.print-key", &Args::new().set("entity", entity))
    }

    /// The older spelling of [`Session::auth_print_key`], still accepted by the monitors.
    pub fn auth_print_key_legacy(&mut self, entity: &str) -> Result<Reply> {
        self.run("auth.print_key", &Args::new().set("entity", entity))
    }

    pub fn auth_list(&mut self) -> Result<Reply> {
        self.run("auth.list", &Args::new())
    }

    pub fn auth_ls(&mut self) -> Result<Reply> {
        self.run("auth.ls", &Args::new())
    }
}
