// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use crate::error::Result;
use crate::reply::Reply;
use crate::schema::Args;
use crate::session::Session;

impl Session {
    /// The device class of each OSD in `ids` (`osd.N`, `N`, `all` or `any`).
    pub fn osd_crush_get_device_class(&mut self, ids: &[&str]) -> Result<Reply> {
        self.run("osd.crush.get-device-class", &Args::new().set("ids", ids))
    }

    pub fn osd_crush_rm_device_class(&mut self, ids: &[&str]) -> Result<Reply> {
        self.run("osd.crush.rm-device-class", &Args::new().set("ids", ids))
    }

    pub fn osd_crush_set_device_class(&mut self, class: &str, ids: &[&str]) -> Result<Reply> {
        let args = Args::new().set("class", class).set("ids", ids);
        self.run("osd.crush.set-device-class", &args)
    }

    /// Create a replicated rule that places replicas across buckets of `failure_domain` type
    /// below `root`, optionally restricted to one device class.
    pub fn osd_crush_rule_create_replicated(
        &mut self,
        name: &str,
        root: &str,
        failure_domain: &str,
        class: Option<&str>,
    ) -> Result<Reply> {
        let args = Args::new()
            .set("name", name)
            .set("root", root)
            .set("type", failure_domain)
            .opt("class", class);
        self.run("osd.crush.rule.create-replicated", &args)
    }

    pub fn osd_crush_rule_dump(&mut self, name: Option<&str>) -> Result<Reply> {
        self.run("osd.crush.rule.dump", &Args::new().opt("name", name))
    }

    pub fn osd_crush_rule_list(&mut self) -> Result<Reply> {
        self.run("osd.crush.rule.list", &Args::new())
    }

    pub fn osd_crush_rule_ls(&mut self) -> Result<Reply> {
        self.run("osd.crush.rule.ls", &Args::new())
    }

    pub fn osd_crush_rule_ls_by_class(&mut self, class: &str) -> Result<Reply> {
        self.run("osd.crush.rule.ls-by-class", &Args::new().set("class", class))
    }

    pub fn osd_crush_rule_rename(&mut self, srcname: &str, dstname: &str) -> Result<Reply> {
        let args = Args::new().set("srcname", srcname).set("dstname", dstname);
        self.run("osd.crush.rule.rename", &args)
    }

    pub fn osd_crush_rule_rm(&mut self, name: &str) -> Result<Reply> {
        self.run("osd.crush.rule.rm", &Args::new().set("name", name))
    }

    pub fn osd_crush_add_bucket(&mut self, name: &str, bucket_type: &str) -> Result<Reply> {
        let args = Args::new().set("name", name).set("type", bucket_type);
        self.run("osd.crush.add-bucket", &args)
    }

    pub fn osd_crush_dump(&mut self) -> Result<Reply> {
        self.run("osd.crush.dump", &Args::new())
    }

    pub fn osd_crush_ls(&mut self, node: &str) -> Result<Reply> {
        self.run("osd.crush.ls", &Args::new().set("node", node))
    }

    /// Remove `name` from the map, or only from beneath `ancestor`.
    pub fn osd_crush_remove(&mut self, name: &str, ancestor: Option<&str>) -> Result<Reply> {
        let args = Args::new().set("name", name).opt("ancestor", ancestor);
        self.run("osd.crush.remove", &args)
    }

    pub fn osd_crush_rm(&mut self, name: &str, ancestor: Option<&str>) -> Result<Reply> {
        let args = Args::new().set("name", name).opt("ancestor", ancestor);
        self.run("osd.crush.rm", &args)
    }

    pub fn osd_crush_rename_bucket(&mut self, srcname: &str, dstname: &str) -> Result<Reply> {
        let args = Args::new().set("srcname", srcname).set("dstname", dstname);
        self.run("osd.crush.rename-bucket", &args)
    }

    pub fn osd_crush_reweight(&mut self, name: &str, weight: f64) -> Result<Reply> {
        let args = Args::new().set("name", name).set("weight", weight);
        self.run("osd.crush.reweight", &args)
    }

    pub fn osd_crush_reweight_all(&mut self) -> Result<Reply> {
        self.run("osd.crush.reweight-all", &Args::new())
    }

    pub fn osd_crush_reweight_subtree(&mut self, name: &str, weight: f64) -> Result<Reply> {
        let args = Args::new().set("name", name).set("weight", weight);
        self.run("osd.crush.reweight-subtree", &args)
    }
}
