// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use crate::error::Result;
use crate::ops::list;
use crate::reply::Reply;
use crate::schema::Args;
use crate::session::Session;

impl Session {
    /// Scrub placement group `pgid`, e.g. `1.2f`.
    pub fn pg_scrub(&mut self, pgid: &str) -> Result<Reply> {
        self.run("pg.scrub", &Args::new().set("pgid", pgid))
    }

    pub fn pg_deep_scrub(&mut self, pgid: &str) -> Result<Reply> {
        self.run("pg.deep-scrub", &Args::new().set("pgid", pgid))
    }

    pub fn pg_repair(&mut self, pgid: &str) -> Result<Reply> {
        self.run("pg.repair", &Args::new().set("pgid", pgid))
    }

    pub fn pg_map(&mut self, pgid: &str) -> Result<Reply> {
        self.run("pg.map", &Args::new().set("pgid", pgid))
    }

    pub fn pg_repeer(&mut self, pgid: &str) -> Result<Reply> {
        self.run("pg.repeer", &Args::new().set("pgid", pgid))
    }

    pub fn pg_dump(&mut self, dumpcontents: &[&str]) -> Result<Reply> {
        self.run("pg.dump", &Args::new().opt("dumpcontents", list(dumpcontents)))
    }

    pub fn pg_dump_json(&mut self, dumpcontents: &[&str]) -> Result<Reply> {
        let args = Args::new().opt("dumpcontents", list(dumpcontents));
        self.run("pg.dump_json", &args)
    }

    pub fn pg_dump_pools_json(&mut self) -> Result<Reply> {
        self.run("pg.dump_pools_json", &Args::new())
    }

    /// Placement groups stuck in any of `stuckops`, e.g. `inactive` or `stale`.
    pub fn pg_dump_stuck(&mut self, stuckops: &[&str]) -> Result<Reply> {
        self.run("pg.dump_stuck", &Args::new().opt("stuckops", list(stuckops)))
    }

    /// Placement groups, optionally only those of pool id `pool` and in any of `states`.
    pub fn pg_ls(&mut self, pool: Option<i64>, states: &[&str]) -> Result<Reply> {
        let args = Args::new().opt("pool", pool).opt("states", list(states));
        self.run("pg.ls", &args)
    }

    pub fn pg_ls_by_osd(
        &mut self,
        osd: &str,
        pool: Option<i64>,
        states: &[&str],
    ) -> Result<Reply> {
        let args = Args::new()
            .set("osd", osd)
            .opt("pool", pool)
            .opt("states", list(states));
        self.run("pg.ls-by-osd", &args)
    }

    pub fn pg_ls_by_primary(
        &mut self,
        osd: &str,
        pool: Option<i64>,
        states: &[&str],
    ) -> Result<Reply> {
        let args = Args::new()
            .set("osd", osd)
            .opt("pool", pool)
            .opt("states", list(states));
        self.run("pg.ls-by-primary", &args)
    }

    pub fn pg_ls_by_pool(&mut self, poolstr: &str, states: &[&str]) -> Result<Reply> {
        let args = Args::new()
            .set("poolstr", poolstr)
            .opt("states", list(states));
        self.run("pg.ls-by-pool", &args)
    }

    pub fn pg_getmap(&mut self) -> Result<Reply> {
        self.run("pg.getmap", &Args::new())
    }

    pub fn pg_stat(&mut self) -> Result<Reply> {
        self.run("pg.stat", &Args::new())
    }
}
