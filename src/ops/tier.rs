// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use crate::error::Result;
use crate::reply::Reply;
use crate::schema::Args;
use crate::session::Session;

impl Session {
    pub fn osd_tier_add(
        &mut self,
        pool: &str,
        tierpool: &str,
        force_nonempty: bool,
    ) -> Result<Reply> {
        let args = Args::new()
            .set("pool", pool)
            .set("tierpool", tierpool)
            .set("force_nonempty", force_nonempty);
        self.run("osd.tier.add", &args)
    }

    /// Add `tierpool` as a writeback cache of `size` bytes in front of `pool`.
    pub fn osd_tier_add_cache(&mut self, pool: &str, tierpool: &str, size: i64) -> Result<Reply> {
        let args = Args::new()
            .set("pool", pool)
            .set("tierpool", tierpool)
            .set("size", size);
        self.run("osd.tier.add-cache", &args)
    }

    /// Some transitions, e.g. to `forward`, are refused without `yes_i_really_mean_it`.
    pub fn osd_tier_cache_mode(
        &mut self,
        pool: &str,
        mode: &str,
        yes_i_really_mean_it: bool,
    ) -> Result<Reply> {
        let args = Args::new()
            .set("pool", pool)
            .set("mode", mode)
            .set("yes_i_really_mean_it", yes_i_really_mean_it);
        self.run("osd.tier.cache-mode", &args)
    }

    pub fn osd_tier_remove(&mut self, pool: &str, tierpool: &str) -> Result<Reply> {
        let args = Args::new().set("pool", pool).set("tierpool", tierpool);
        self.run("osd.tier.remove", &args)
    }

    pub fn osd_tier_rm(&mut self, pool: &str, tierpool: &str) -> Result<Reply> {
        let args = Args::new().set("pool", pool).set("tierpool", tierpool);
        self.run("osd.tier.rm", &args)
    }

    pub fn osd_tier_remove_overlay(&mut self, pool: &str) -> Result<Reply> {
        self.run("osd.tier.remove-overlay", &Args::new().set("pool", pool))
    }

    pub fn osd_tier_rm_overlay(&mut self, pool: &str) -> Result<Reply> {
        self.run("osd.tier.rm-overlay", &Args::new().set("pool", pool))
    }

    pub fn osd_tier_set_overlay(&mut self, pool: &str, overlaypool: &str) -> Result<Reply> {
        let args = Args::new().set("pool", pool).set("overlaypool", overlaypool);
        self.run("osd.tier.set-overlay", &args)
    }
}
