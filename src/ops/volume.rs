// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use crate::error::Result;
use crate::reply::Reply;
use crate::schema::Args;
use crate::session::Volume;

/// The backing store of a new OSD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectStore<'a> {
    Filestore,
    /// BlueStore, optionally with separate write-ahead log and database devices.
    Bluestore {
        wal: Option<&'a str>,
        db: Option<&'a str>,
    },
}

impl ObjectStore<'_> {
    fn args(&self, data: &str) -> Args {
        let args = Args::new().set("data", data);
        match self {
            ObjectStore::Filestore => args.set("objectstore", "filestore"),
            ObjectStore::Bluestore { wal, db } => args
                .set("objectstore", "bluestore")
                .opt("wal", *wal)
                .opt("db", *db),
        }
    }
}

/// Which OSDs to activate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activate<'a> {
    All,
    One { id: i64, fsid: &'a str },
}

impl Volume {
    /// Prepare and activate a new OSD on `data`.
    pub fn lvm_create(&mut self, data: &str, store: ObjectStore) -> Result<Reply> {
        self.run("volume.lvm.create", &store.args(data))
    }

    /// Prepare `data` for a new OSD without activating it.
    pub fn lvm_prepare(&mut self, data: &str, store: ObjectStore) -> Result<Reply> {
        self.run("volume.lvm.prepare", &store.args(data))
    }

    pub fn lvm_list(&mut self) -> Result<Reply> {
        self.run("volume.lvm.list", &Args::new())
    }

    /// Wipe `devices`. With `destroy` the volume groups and logical volumes are removed too.
    pub fn lvm_zap(&mut self, devices: &[&str], destroy: bool) -> Result<Reply> {
        let args = Args::new().set("devices", devices).set("destroy", destroy);
        self.run("volume.lvm.zap", &args)
    }

    /// Wipe every device that belongs to OSD `osd_id`.
    pub fn lvm_zap_osd(&mut self, osd_id: i64, osd_fsid: Option<&str>) -> Result<Reply> {
        let args = Args::new().set("osd_id", osd_id).opt("osd_fsid", osd_fsid);
        self.run("volume.lvm.zap-osd", &args)
    }

    pub fn lvm_activate(&mut self, which: Activate) -> Result<Reply> {
        let args = match which {
            Activate::All => Args::new().set("all", true),
            Activate::One { id, fsid } => Args::new().set("id", id).set("fsid", fsid),
        };
        self.run("volume.lvm.activate", &args)
    }
}
