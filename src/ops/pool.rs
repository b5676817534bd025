// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use crate::error::Result;
use crate::reply::Reply;
use crate::schema::Args;
use crate::session::Session;

/// How a new pool stores its data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoolType<'a> {
    Replicated,
    /// Erasure coded with the named profile, or the cluster default profile.
    Erasure(Option<&'a str>),
}

impl Session {
    pub fn osd_pool_application_disable(
        &mut self,
        pool: &str,
        app: &str,
        yes_i_really_mean_it: bool,
    ) -> Result<Reply> {
        let args = Args::new()
            .set("pool", pool)
            .set("app", app)
            .set("yes_i_really_mean_it", yes_i_really_mean_it);
        self.run("osd.pool.application.disable", &args)
    }

    pub fn osd_pool_application_enable(&mut self, pool: &str, app: &str) -> Result<Reply> {
        let args = Args::new().set("pool", pool).set("app", app);
        self.run("osd.pool.application.enable", &args)
    }

    /// Create a pool. Without a `pool_type` the cluster default is used.
    pub fn osd_pool_create(
        &mut self,
        pool: &str,
        pg_num: i64,
        pgp_num: i64,
        pool_type: Option<PoolType>,
        rule: Option<&str>,
    ) -> Result<Reply> {
        let mut args = Args::new()
            .set("pool", pool)
            .set("pg_num", pg_num)
            .set("pgp_num", pgp_num)
            .opt("rule", rule);
        match pool_type {
            Some(PoolType::Replicated) => args = args.set("pool_type", "replicated"),
            Some(PoolType::Erasure(profile)) => {
                args = args
                    .set("pool_type", "erasure")
                    .opt("erasure_code_profile", profile)
            }
            None => {}
        }
        self.run("osd.pool.create", &args)
    }

    /// Delete `pool`. The monitors want the name twice and the confirmation flag.
    pub fn osd_pool_delete(
        &mut self,
        pool: &str,
        pool2: Option<&str>,
        yes_i_really_really_mean_it: bool,
    ) -> Result<Reply> {
        let args = Args::new()
            .set("pool", pool)
            .opt("pool2", pool2)
            .set("yes_i_really_really_mean_it", yes_i_really_really_mean_it);
        self.run("osd.pool.delete", &args)
    }

    pub fn osd_pool_rm(
        &mut self,
        pool: &str,
        pool2: Option<&str>,
        yes_i_really_really_mean_it: bool,
    ) -> Result<Reply> {
        let args = Args::new()
            .set("pool", pool)
            .opt("pool2", pool2)
            .set("yes_i_really_really_mean_it", yes_i_really_really_mean_it);
        self.run("osd.pool.rm", &args)
    }

    /// Get the pool variable `var`, or every variable with `all`.
    pub fn osd_pool_get(&mut self, pool: &str, var: &str) -> Result<Reply> {
        let args = Args::new().set("pool", pool).set("var", var);
        self.run("osd.pool.get", &args)
    }

    pub fn osd_pool_ls(&mut self, detail: bool) -> Result<Reply> {
        let args = Args::new().opt("detail", detail.then_some("detail"));
        self.run("osd.pool.ls", &args)
    }

    pub fn osd_pool_rename(&mut self, srcpool: &str, destpool: &str) -> Result<Reply> {
        let args = Args::new().set("srcpool", srcpool).set("destpool", destpool);
        self.run("osd.pool.rename", &args)
    }

    pub fn osd_pool_repair(&mut self, who: &[&str]) -> Result<Reply> {
        self.run("osd.pool.repair", &Args::new().set("who", who))
    }

    pub fn osd_pool_set(&mut self, pool: &str, var: &str, val: &str) -> Result<Reply> {
        let args = Args::new().set("pool", pool).set("var", var).set("val", val);
        self.run("osd.pool.set", &args)
    }

    /// I/O rates of `pool_name`, or of every pool.
    pub fn osd_pool_stats(&mut self, pool_name: Option<&str>) -> Result<Reply> {
        self.run("osd.pool.stats", &Args::new().opt("pool_name", pool_name))
    }
}
