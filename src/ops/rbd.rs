// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! Block image operations, run through the `rbd` program.
//!
//! The whole-pool operations (create, list, remove, rename and clone) work in the pools the
//! [`ImageSession`] bound; the rest name their pool in the image spec.

use crate::command::Remote;
use crate::error::Result;
use crate::ops::on_host;
use crate::reply::Reply;
use crate::schema::Args;
use crate::session::ImageSession;

fn image(pool: &str, image: &str) -> Args {
    Args::new().set("pool", pool).set("image", image)
}

fn snapshot(pool: &str, name: &str, snap: &str) -> Args {
    image(pool, name).set("snap", snap)
}

impl ImageSession {
    /// Create image `name` of `size` units (bytes if `unit` is not given) in the first bound
    /// pool.
    pub fn rbd_create(&mut self, name: &str, size: i64, unit: Option<&str>) -> Result<Reply> {
        let args = Args::new()
            .set("pool", self.bound_pool(0)?)
            .set("size", size)
            .opt("unit", unit)
            .set("name", name);
        self.run("rbd.create", &args)
    }

    pub fn rbd_ls(&mut self) -> Result<Reply> {
        let args = Args::new().set("pool", self.bound_pool(0)?);
        self.run("rbd.ls", &args)
    }

    /// Like [`ImageSession::rbd_ls`], but a JSON list with the size and parent of each image.
    pub fn rbd_ls_long(&mut self) -> Result<Reply> {
        let args = Args::new().set("pool", self.bound_pool(0)?);
        self.run("rbd.ls-long", &args)
    }

    pub fn rbd_rm(&mut self, name: &str) -> Result<Reply> {
        let args = Args::new().set("pool", self.bound_pool(0)?).set("name", name);
        self.run("rbd.rm", &args)
    }

    pub fn rbd_rename(&mut self, src: &str, dest: &str) -> Result<Reply> {
        let args = Args::new()
            .set("pool", self.bound_pool(0)?)
            .set("src", src)
            .set("dest", dest);
        self.run("rbd.rename", &args)
    }

    /// Clone snapshot `snap` of `parent` in the first bound pool into image `child` in the
    /// second bound pool. The snapshot must be protected.
    pub fn rbd_clone(&mut self, parent: &str, snap: &str, child: &str) -> Result<Reply> {
        let args = Args::new()
            .set("pool", self.bound_pool(0)?)
            .set("image", parent)
            .set("snap", snap)
            .set("dest_pool", self.bound_pool(1)?)
            .set("dest", child);
        self.run("rbd.clone", &args)
    }

    pub fn rbd_feature_enable(
        &mut self,
        pool: &str,
        name: &str,
        features: &[&str],
    ) -> Result<Reply> {
        let args = image(pool, name).set("features", features);
        self.run("rbd.feature.enable", &args)
    }

    pub fn rbd_feature_disable(
        &mut self,
        pool: &str,
        name: &str,
        features: &[&str],
    ) -> Result<Reply> {
        let args = image(pool, name).set("features", features);
        self.run("rbd.feature.disable", &args)
    }

    /// Copy the parent's data into a clone so that it no longer depends on the parent. Blocks
    /// until the whole image has been copied.
    pub fn rbd_flatten(&mut self, pool: &str, name: &str) -> Result<Reply> {
        self.run("rbd.flatten", &image(pool, name))
    }

    pub fn rbd_info(&mut self, pool: &str, name: &str) -> Result<Reply> {
        self.run("rbd.info", &image(pool, name))
    }

    pub fn rbd_status(&mut self, pool: &str, name: &str) -> Result<Reply> {
        self.run("rbd.status", &image(pool, name))
    }

    pub fn rbd_snap_ls(&mut self, pool: &str, name: &str) -> Result<Reply> {
        self.run("rbd.snap.ls", &image(pool, name))
    }

    pub fn rbd_snap_purge(&mut self, pool: &str, name: &str) -> Result<Reply> {
        self.run("rbd.snap.purge", &image(pool, name))
    }

    pub fn rbd_snap_create(&mut self, pool: &str, name: &str, snap: &str) -> Result<Reply> {
        self.run("rbd.snap.create", &snapshot(pool, name, snap))
    }

    pub fn rbd_snap_protect(&mut self, pool: &str, name: &str, snap: &str) -> Result<Reply> {
        self.run("rbd.snap.protect", &snapshot(pool, name, snap))
    }

    pub fn rbd_snap_unprotect(&mut self, pool: &str, name: &str, snap: &str) -> Result<Reply> {
        self.run("rbd.snap.unprotect", &snapshot(pool, name, snap))
    }

    pub fn rbd_snap_rm(&mut self, pool: &str, name: &str, snap: &str) -> Result<Reply> {
        self.run("rbd.snap.rm", &snapshot(pool, name, snap))
    }

    pub fn rbd_snap_rollback(&mut self, pool: &str, name: &str, snap: &str) -> Result<Reply> {
        self.run("rbd.snap.rollback", &snapshot(pool, name, snap))
    }

    /// Resize to `size` units. Shrinking is refused unless `allow_shrink` is set.
    pub fn rbd_resize(
        &mut self,
        pool: &str,
        name: &str,
        size: i64,
        unit: Option<&str>,
        allow_shrink: bool,
    ) -> Result<Reply> {
        let args = image(pool, name)
            .set("size", size)
            .opt("unit", unit)
            .set("allow_shrink", allow_shrink);
        self.run("rbd.resize", &args)
    }

    /// Map an image to a block device on this host, or on `remote`.
    pub fn rbd_map(&mut self, pool: &str, name: &str, remote: Option<&Remote>) -> Result<Reply> {
        self.run("rbd.map", &on_host(image(pool, name), remote))
    }

    pub fn rbd_unmap(&mut self, pool: &str, name: &str, remote: Option<&Remote>) -> Result<Reply> {
        self.run("rbd.unmap", &on_host(image(pool, name), remote))
    }

    pub fn rbd_showmapped(&mut self, remote: Option<&Remote>) -> Result<Reply> {
        self.run("rbd.showmapped", &on_host(Args::new(), remote))
    }
}
