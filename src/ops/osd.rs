// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use crate::error::Result;
use crate::ops::list;
use crate::reply::Reply;
use crate::schema::Args;
use crate::session::Session;

/// Optional limits shared by the `reweight-by-*` operations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReweightLimits {
    /// Only reweight OSDs above this percentage of the average, at least 100.
    pub oload: Option<i64>,
    pub max_change: Option<f64>,
    pub max_osds: Option<i64>,
}

impl ReweightLimits {
    fn args(&self) -> Args {
        Args::new()
            .opt("oload", self.oload)
            .opt("max_change", self.max_change)
            .opt("max_osds", self.max_osds)
    }
}

impl Session {
    /// Scrub the OSD `who` (`osd.N` or `N`).
    pub fn osd_scrub(&mut self, who: &str) -> Result<Reply> {
        self.run("osd.scrub", &Args::new().set("who", who))
    }

    pub fn osd_deep_scrub(&mut self, who: &str) -> Result<Reply> {
        self.run("osd.deep-scrub", &Args::new().set("who", who))
    }

    pub fn osd_repair(&mut self, who: &str) -> Result<Reply> {
        self.run("osd.repair", &Args::new().set("who", who))
    }

    pub fn osd_down(&mut self, ids: &[&str]) -> Result<Reply> {
        self.run("osd.down", &Args::new().set("ids", ids))
    }

    pub fn osd_in(&mut self, ids: &[&str]) -> Result<Reply> {
        self.run("osd.in", &Args::new().set("ids", ids))
    }

    pub fn osd_out(&mut self, ids: &[&str]) -> Result<Reply> {
        self.run("osd.out", &Args::new().set("ids", ids))
    }

    pub fn osd_rm(&mut self, ids: &[&str]) -> Result<Reply> {
        self.run("osd.rm", &Args::new().set("ids", ids))
    }

    pub fn osd_pause(&mut self) -> Result<Reply> {
        self.run("osd.pause", &Args::new())
    }

    pub fn osd_unpause(&mut self) -> Result<Reply> {
        self.run("osd.unpause", &Args::new())
    }

    /// Set a cluster flag such as `noout`.
    pub fn osd_set(&mut self, key: &str) -> Result<Reply> {
        self.run("osd.set", &Args::new().set("key", key))
    }

    pub fn osd_unset(&mut self, key: &str) -> Result<Reply> {
        self.run("osd.unset", &Args::new().set("key", key))
    }

    pub fn osd_getcrushmap(&mut self, epoch: Option<i64>) -> Result<Reply> {
        self.run("osd.getcrushmap", &Args::new().opt("epoch", epoch))
    }

    pub fn osd_getmap(&mut self, epoch: Option<i64>) -> Result<Reply> {
        self.run("osd.getmap", &Args::new().opt("epoch", epoch))
    }

    pub fn osd_getmaxosd(&mut self) -> Result<Reply> {
        self.run("osd.getmaxosd", &Args::new())
    }

    pub fn osd_ls(&mut self, epoch: Option<i64>) -> Result<Reply> {
        self.run("osd.ls", &Args::new().opt("epoch", epoch))
    }

    pub fn osd_ls_tree(&mut self, name: &str, epoch: Option<i64>) -> Result<Reply> {
        let args = Args::new().set("name", name).opt("epoch", epoch);
        self.run("osd.ls-tree", &args)
    }

    pub fn osd_dump(&mut self, epoch: Option<i64>) -> Result<Reply> {
        self.run("osd.dump", &Args::new().opt("epoch", epoch))
    }

    pub fn osd_tree(&mut self, epoch: Option<i64>) -> Result<Reply> {
        self.run("osd.tree", &Args::new().opt("epoch", epoch))
    }

    pub fn osd_lspools(&mut self) -> Result<Reply> {
        self.run("osd.lspools", &Args::new())
    }

    /// Set the override weight of OSD `id`, between 0 and 1.
    pub fn osd_reweight(&mut self, id: i64, weight: f64) -> Result<Reply> {
        let args = Args::new().set("id", id).set("weight", weight);
        self.run("osd.reweight", &args)
    }

    pub fn osd_primary_affinity(&mut self, id: i64, weight: f64) -> Result<Reply> {
        let args = Args::new().set("id", id).set("weight", weight);
        self.run("osd.primary-affinity", &args)
    }

    pub fn osd_reweight_by_pg(
        &mut self,
        limits: ReweightLimits,
        pools: &[&str],
    ) -> Result<Reply> {
        let args = limits.args().opt("pools", list(pools));
        self.run("osd.reweight-by-pg", &args)
    }

    /// Dry run of [`Session::osd_reweight_by_pg`].
    pub fn osd_test_reweight_by_pg(
        &mut self,
        limits: ReweightLimits,
        pools: &[&str],
    ) -> Result<Reply> {
        let args = limits.args().opt("pools", list(pools));
        self.run("osd.test-reweight-by-pg", &args)
    }

    pub fn osd_reweight_by_utilization(
        &mut self,
        limits: ReweightLimits,
        no_increasing: bool,
    ) -> Result<Reply> {
        let args = limits.args().set("no_increasing", no_increasing);
        self.run("osd.reweight-by-utilization", &args)
    }

    pub fn osd_test_reweight_by_utilization(
        &mut self,
        limits: ReweightLimits,
        no_increasing: bool,
    ) -> Result<Reply> {
        let args = limits.args().set("no_increasing", no_increasing);
        self.run("osd.test-reweight-by-utilization", &args)
    }

    pub fn osd_blocked_by(&mut self) -> Result<Reply> {
        self.run("osd.blocked-by", &Args::new())
    }

    /// Show utilization, as a plain list or a tree, optionally filtered by device class or
    /// bucket name. `filter` is ignored unless `filter_by` is given.
    pub fn osd_df(
        &mut self,
        output_method: Option<&str>,
        filter_by: Option<&str>,
        filter: Option<&str>,
    ) -> Result<Reply> {
        let args = Args::new()
            .opt("output_method", output_method)
            .opt("filter_by", filter_by)
            .opt("filter", filter);
        self.run("osd.df", &args)
    }

    pub fn osd_find(&mut self, id: i64) -> Result<Reply> {
        self.run("osd.find", &Args::new().set("id", id))
    }

    /// Where `object` in `pool` is placed.
    pub fn osd_map(&mut self, pool: &str, object: &str, nspace: Option<&str>) -> Result<Reply> {
        let args = Args::new()
            .set("pool", pool)
            .set("object", object)
            .opt("nspace", nspace);
        self.run("osd.map", &args)
    }

    pub fn osd_metadata(&mut self, id: Option<i64>) -> Result<Reply> {
        self.run("osd.metadata", &Args::new().opt("id", id))
    }

    pub fn osd_perf(&mut self) -> Result<Reply> {
        self.run("osd.perf", &Args::new())
    }

    pub fn osd_stat(&mut self) -> Result<Reply> {
        self.run("osd.stat", &Args::new())
    }

    pub fn osd_utilization(&mut self) -> Result<Reply> {
        self.run("osd.utilization", &Args::new())
    }
}
