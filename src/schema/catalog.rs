// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! The static table of every operation cephctl knows how to dispatch.

use crate::schema::spec::{
    Arg, Bounds, Charset, Condition, IdentifierKind, ImagePart, Kind, OperationSpec, ParamSpec,
    RemotePart,
};

/// Names of CRUSH rules, buckets, device classes, applications and erasure code profiles.
pub const NAME_CHARS: Charset = Charset::Only("A-Za-z0-9-_.");

pub const FSID_CHARS: Charset = Charset::Only("A-Fa-f0-9-");

pub const OSD_FLAGS: &[&str] = &[
    "full",
    "pause",
    "noup",
    "nodown",
    "noout",
    "noin",
    "nobackfill",
    "norebalance",
    "norecover",
    "noscrub",
    "nodeep-scrub",
    "notieragent",
    "nosnaptrim",
    "pglog_hardlimit",
];

/// `pglog_hardlimit` cannot be unset once set.
pub const OSD_UNSETTABLE_FLAGS: &[&str] = &[
    "full",
    "pause",
    "noup",
    "nodown",
    "noout",
    "noin",
    "nobackfill",
    "norebalance",
    "norecover",
    "noscrub",
    "nodeep-scrub",
    "notieragent",
    "nosnaptrim",
];

pub const POOL_GET_VARS: &[&str] = &[
    "size",
    "min_size",
    "pg_num",
    "pgp_num",
    "crush_rule",
    "hashpspool",
    "nodelete",
    "nopgchange",
    "nosizechange",
    "write_fadvise_dontneed",
    "noscrub",
    "nodeep-scrub",
    "hit_set_type",
    "hit_set_period",
    "hit_set_count",
    "hit_set_fpp",
    "use_gmt_hitset",
    "target_max_objects",
    "target_max_bytes",
    "cache_target_dirty_ratio",
    "cache_target_dirty_high_ratio",
    "cache_target_full_ratio",
    "cache_min_flush_age",
    "cache_min_evict_age",
    "erasure_code_profile",
    "min_read_recency_for_promote",
    "all",
    "min_write_recency_for_promote",
    "fast_read",
    "hit_set_grade_decay_rate",
    "hit_set_search_last_n",
    "scrub_min_interval",
    "scrub_max_interval",
    "deep_scrub_interval",
    "recovery_priority",
    "recovery_op_priority",
    "scrub_priority",
    "compression_mode",
    "compression_algorithm",
    "compression_required_ratio",
    "compression_max_blob_size",
    "compression_min_blob_size",
    "csum_type",
    "csum_min_block",
    "csum_max_block",
    "allow_ec_overwrites",
    "fingerprint_algorithm",
    "pg_autoscale_mode",
    "pg_autoscale_bias",
    "pg_num_min",
    "target_size_bytes",
    "target_size_ratio",
];

pub const POOL_SET_VARS: &[&str] = &[
    "size",
    "min_size",
    "pg_num",
    "pgp_num",
    "pgp_num_actual",
    "crush_rule",
    "hashpspool",
    "nodelete",
    "nopgchange",
    "nosizechange",
    "write_fadvise_dontneed",
    "noscrub",
    "nodeep-scrub",
    "hit_set_type",
    "hit_set_period",
    "hit_set_count",
    "hit_set_fpp",
    "use_gmt_hitset",
    "target_max_bytes",
    "target_max_objects",
    "cache_target_dirty_ratio",
    "cache_target_dirty_high_ratio",
    "cache_target_full_ratio",
    "cache_min_flush_age",
    "cache_min_evict_age",
    "min_read_recency_for_promote",
    "min_write_recency_for_promote",
    "fast_read",
    "hit_set_grade_decay_rate",
    "hit_set_search_last_n",
    "scrub_min_interval",
    "scrub_max_interval",
    "deep_scrub_interval",
    "recovery_priority",
    "recovery_op_priority",
    "scrub_priority",
    "compression_mode",
    "compression_algorithm",
    "compression_required_ratio",
    "compression_max_blob_size",
    "compression_min_blob_size",
    "csum_type",
    "csum_min_block",
    "csum_max_block",
    "allow_ec_overwrites",
    "fingerprint_algorithm",
    "pg_autoscale_mode",
    "pg_autoscale_bias",
    "pg_num_min",
    "target_size_bytes",
    "target_size_ratio",
];

pub const PG_STATES: &[&str] = &[
    "stale",
    "creating",
    "active",
    "activating",
    "clean",
    "recovery_wait",
    "recovery_toofull",
    "recovering",
    "forced_recovery",
    "down",
    "recovery_unfound",
    "backfill_unfound",
    "undersized",
    "degraded",
    "remapped",
    "premerge",
    "scrubbing",
    "deep",
    "inconsistent",
    "peering",
    "repair",
    "backfill_wait",
    "backfilling",
    "forced_backfill",
    "backfill_toofull",
    "incomplete",
    "peered",
    "snaptrim",
    "snaptrim_wait",
    "snaptrim_error",
];

pub const PG_DUMP_CONTENTS: &[&str] = &[
    "all",
    "summary",
    "sum",
    "delta",
    "pools",
    "osds",
    "pgs",
    "pgs_brief",
];

pub const PG_DUMP_JSON_CONTENTS: &[&str] = &["all", "summary", "sum", "pools", "osds", "pgs"];

pub const PG_STUCK_STATES: &[&str] = &["inactive", "unclean", "stale", "undersized", "degraded"];

pub const CACHE_MODES: &[&str] = &[
    "none",
    "writeback",
    "forward",
    "readonly",
    "readforward",
    "proxy",
    "readproxy",
];

pub const IMAGE_FEATURES: &[&str] = &[
    "layering",
    "striping",
    "exclusive-lock",
    "object-map",
    "fast-diff",
    "deep-flatten",
    "journaling",
];

pub const SIZE_UNITS: &[&str] = &["B", "K", "M", "G", "T", "P", "E"];

pub const OBJECTSTORES: &[&str] = &["filestore", "bluestore"];

fn string(name: &'static str) -> ParamSpec {
    ParamSpec::new(name, Kind::String(Charset::Any))
}

fn named(name: &'static str) -> ParamSpec {
    ParamSpec::new(name, Kind::String(NAME_CHARS))
}

fn int(name: &'static str, min: i64) -> ParamSpec {
    ParamSpec::new(name, Kind::Integer(Bounds::at_least(min)))
}

fn any_int(name: &'static str) -> ParamSpec {
    ParamSpec::new(name, Kind::Integer(Bounds::any()))
}

fn float(name: &'static str, bounds: Bounds<f64>) -> ParamSpec {
    ParamSpec::new(name, Kind::Float(bounds))
}

fn flag(name: &'static str) -> ParamSpec {
    ParamSpec::new(name, Kind::Boolean)
}

fn choice(name: &'static str, choices: &'static [&'static str]) -> ParamSpec {
    ParamSpec::new(name, Kind::Enum(choices))
}

fn list(name: &'static str, element: Kind) -> ParamSpec {
    ParamSpec::new(name, Kind::StringList(Box::new(element)))
}

fn ident(name: &'static str, id: IdentifierKind) -> ParamSpec {
    ParamSpec::new(name, Kind::Identifier(id))
}

fn epoch() -> ParamSpec {
    int("epoch", 0)
}

fn osd_ids() -> ParamSpec {
    list("ids", Kind::Identifier(IdentifierKind::OsdSelector)).required()
}

fn entity() -> ParamSpec {
    ident("entity", IdentifierKind::EntityName).required()
}

fn caps() -> ParamSpec {
    list("caps", Kind::String(Charset::Any))
}

fn pgid() -> ParamSpec {
    ident("pgid", IdentifierKind::Pgid).required()
}

fn pg_states() -> ParamSpec {
    list("states", Kind::Enum(PG_STATES))
}

fn reweight_common() -> Vec<ParamSpec> {
    vec![
        int("oload", 100),
        float("max_change", Bounds::at_least(0.0)),
        int("max_osds", 0),
    ]
}

fn ssh() -> Vec<ParamSpec> {
    vec![
        ident("host", IdentifierKind::Argument).arg(Arg::Remote(RemotePart::Host)),
        ParamSpec::new("port", Kind::Integer(Bounds::between(1, 65535)))
            .default(22)
            .arg(Arg::Remote(RemotePart::Port))
            .when(Condition::Present("host")),
        ident("user", IdentifierKind::Argument)
            .default("root")
            .arg(Arg::Remote(RemotePart::User))
            .when(Condition::Present("host")),
    ]
}

fn image_part(name: &'static str, part: ImagePart) -> ParamSpec {
    ident(name, IdentifierKind::SpecComponent)
        .required()
        .arg(Arg::Image(part))
}

fn image() -> Vec<ParamSpec> {
    vec![
        image_part("pool", ImagePart::Pool),
        image_part("image", ImagePart::Image),
    ]
}

fn snapshot() -> Vec<ParamSpec> {
    vec![
        image_part("pool", ImagePart::Pool),
        image_part("image", ImagePart::Image),
        image_part("snap", ImagePart::Snap),
    ]
}

fn bound_pool() -> ParamSpec {
    ident("pool", IdentifierKind::SpecComponent)
        .required()
        .arg(Arg::Flag("--pool"))
}

fn lvm_deploy(
    name: &str,
    subcommand: &'static [&'static str],
    summary: &'static str,
) -> OperationSpec {
    OperationSpec::process(
        name,
        "ceph-volume",
        subcommand,
        summary,
        vec![
            ident("data", IdentifierKind::Argument)
                .required()
                .arg(Arg::Flag("--data")),
            choice("objectstore", OBJECTSTORES)
                .required()
                .arg(Arg::Choice),
            ident("wal", IdentifierKind::Argument)
                .arg(Arg::Flag("--block.wal"))
                .when(Condition::Equals("objectstore", "bluestore")),
            ident("db", IdentifierKind::Argument)
                .arg(Arg::Flag("--block.db"))
                .when(Condition::Equals("objectstore", "bluestore")),
        ],
    )
}

fn control(prefix: &'static str, summary: &'static str, params: Vec<ParamSpec>) -> OperationSpec {
    OperationSpec::control(prefix, summary, params)
}

fn auth() -> Vec<OperationSpec> {
    vec![
        control("auth add", "add auth info for an entity", vec![entity(), caps()]),
        control("auth caps", "update caps for an entity", vec![entity(), caps()]),
        control(
            "auth get-or-create",
            "add auth info for an entity unless it exists, then print it",
            vec![entity(), caps()],
        ),
        control("auth del", "delete all caps for an entity", vec![entity()]),
        control("auth rm", "remove all caps for an entity", vec![entity()]),
        control(
            "auth export",
            "write keyring for an entity, or the master keyring",
            vec![ident("entity", IdentifierKind::EntityName)],
        ),
        control("auth get", "print the keyring of an entity", vec![entity()]),
        control("auth get-key", "print the key of an entity", vec![entity()]),
        control("auth print-key", "print the key of an entity", vec![entity()]),
        control("auth print_key", "print the key of an entity", vec![entity()]),
        control("auth list", "list authentication state", vec![]),
        control("auth ls", "list authentication state", vec![]),
    ]
}

fn crash() -> Vec<OperationSpec> {
    vec![
        control("crash ls", "list crash reports", vec![]),
        control("crash info", "show a crash report", vec![string("id").required()]),
        control(
            "crash archive",
            "acknowledge a crash report",
            vec![string("id").required()],
        ),
        control("crash archive-all", "acknowledge all crash reports", vec![]),
    ]
}

fn mon() -> Vec<OperationSpec> {
    vec![
        control("mon dump", "dump the monitor map", vec![epoch()]),
        control("mon stat", "summarize monitor status", vec![]),
    ]
}

fn crush() -> Vec<OperationSpec> {
    let class_ids = || list("ids", Kind::Identifier(IdentifierKind::OsdSelector)).required();
    vec![
        control(
            "osd crush get-device-class",
            "get the device class of OSDs",
            vec![class_ids()],
        ),
        control(
            "osd crush rm-device-class",
            "remove the device class of OSDs",
            vec![class_ids()],
        ),
        control(
            "osd crush set-device-class",
            "set the device class of OSDs",
            vec![named("class").required(), class_ids()],
        ),
        control(
            "osd crush rule create-replicated",
            "create a replicated CRUSH rule",
            vec![
                named("name").required(),
                named("root").required(),
                named("type").required(),
                named("class"),
            ],
        ),
        control("osd crush rule dump", "dump CRUSH rules", vec![named("name")]),
        control("osd crush rule list", "list CRUSH rules", vec![]),
        control("osd crush rule ls", "list CRUSH rules", vec![]),
        control(
            "osd crush rule ls-by-class",
            "list CRUSH rules that use a device class",
            vec![named("class").required()],
        ),
        control(
            "osd crush rule rename",
            "rename a CRUSH rule",
            vec![named("srcname").required(), named("dstname").required()],
        ),
        control("osd crush rule rm", "remove a CRUSH rule", vec![named("name").required()]),
        control(
            "osd crush add-bucket",
            "add a bucket to the CRUSH map",
            vec![named("name").required(), named("type").required()],
        ),
        control("osd crush dump", "dump the CRUSH map", vec![]),
        control(
            "osd crush ls",
            "list the items beneath a CRUSH node",
            vec![named("node").required()],
        ),
        control(
            "osd crush remove",
            "remove an item from the CRUSH map",
            vec![named("name").required(), named("ancestor")],
        ),
        control(
            "osd crush rm",
            "remove an item from the CRUSH map",
            vec![named("name").required(), named("ancestor")],
        ),
        control(
            "osd crush rename-bucket",
            "rename a CRUSH bucket",
            vec![named("srcname").required(), named("dstname").required()],
        ),
        control(
            "osd crush reweight",
            "change the CRUSH weight of an item",
            vec![
                named("name").required(),
                float("weight", Bounds::at_least(0.0)).required(),
            ],
        ),
        control("osd crush reweight-all", "recalculate the weights of the tree", vec![]),
        control(
            "osd crush reweight-subtree",
            "change the CRUSH weight of every item below a node",
            vec![
                named("name").required(),
                float("weight", Bounds::at_least(0.0)).required(),
            ],
        ),
    ]
}

fn osd() -> Vec<OperationSpec> {
    let who = || ident("who", IdentifierKind::OsdName).required();
    let mut ops = vec![
        control("osd scrub", "scrub an OSD", vec![who()]),
        control("osd deep-scrub", "deep scrub an OSD", vec![who()]),
        control("osd repair", "repair an OSD", vec![who()]),
        control("osd down", "mark OSDs down", vec![osd_ids()]),
        control("osd in", "mark OSDs in", vec![osd_ids()]),
        control("osd out", "mark OSDs out", vec![osd_ids()]),
        control("osd rm", "remove OSDs", vec![osd_ids()]),
        control("osd pause", "pause client reads and writes", vec![]),
        control("osd unpause", "resume client reads and writes", vec![]),
        control(
            "osd set",
            "set a cluster-wide OSD flag",
            vec![choice("key", OSD_FLAGS).required()],
        ),
        control(
            "osd unset",
            "clear a cluster-wide OSD flag",
            vec![choice("key", OSD_UNSETTABLE_FLAGS).required()],
        ),
        control("osd getcrushmap", "get the compiled CRUSH map", vec![epoch()]),
        control("osd getmap", "get the compiled OSD map", vec![epoch()]),
        control("osd getmaxosd", "show the largest OSD id", vec![]),
        control("osd ls", "list OSD ids", vec![epoch()]),
        control(
            "osd ls-tree",
            "list the OSDs beneath a CRUSH bucket",
            vec![named("name").required(), epoch()],
        ),
        control("osd dump", "dump the OSD map", vec![epoch()]),
        control("osd tree", "print the OSD tree", vec![epoch()]),
        control("osd lspools", "list pools", vec![]),
        control(
            "osd reweight",
            "set the override weight of an OSD",
            vec![
                int("id", 0).required(),
                float("weight", Bounds::between(0.0, 1.0)).required(),
            ],
        ),
        control(
            "osd primary-affinity",
            "set the primary affinity of an OSD",
            vec![
                int("id", 0).required(),
                float("weight", Bounds::between(0.0, 1.0)).required(),
            ],
        ),
        control("osd blocked-by", "print the OSDs blocking peering", vec![]),
        control(
            "osd df",
            "show OSD utilization",
            vec![
                choice("output_method", &["plain", "tree"]),
                choice("filter_by", &["class", "name"]),
                string("filter").when(Condition::Present("filter_by")),
            ],
        ),
        control("osd find", "find the location of an OSD", vec![int("id", 0).required()]),
        control(
            "osd map",
            "find the placement of an object",
            vec![
                string("pool").required(),
                string("object").required(),
                string("nspace"),
            ],
        ),
        control("osd metadata", "fetch OSD metadata", vec![int("id", 0)]),
        control("osd perf", "print OSD commit and apply latencies", vec![]),
        control("osd stat", "summarize OSD map status", vec![]),
        control("osd utilization", "summarize OSD utilization", vec![]),
    ];

    for prefix in ["osd reweight-by-pg", "osd test-reweight-by-pg"] {
        let mut params = reweight_common();
        params.push(list("pools", Kind::String(Charset::Any)));
        ops.push(control(prefix, "reweight OSDs by placement group distribution", params));
    }
    for prefix in [
        "osd reweight-by-utilization",
        "osd test-reweight-by-utilization",
    ] {
        let mut params = reweight_common();
        params.push(flag("no_increasing"));
        ops.push(control(prefix, "reweight OSDs by utilization", params));
    }
    ops
}

fn erasure() -> Vec<OperationSpec> {
    vec![
        control(
            "osd erasure-code-profile get",
            "show an erasure code profile",
            vec![named("name").required()],
        ),
        control("osd erasure-code-profile ls", "list erasure code profiles", vec![]),
        control(
            "osd erasure-code-profile rm",
            "remove an erasure code profile",
            vec![named("name").required()],
        ),
        control(
            "osd erasure-code-profile set",
            "create an erasure code profile",
            vec![
                named("name").required(),
                list("profile", Kind::String(Charset::Any)),
                flag("force"),
            ],
        ),
    ]
}

fn pool() -> Vec<OperationSpec> {
    let pool = || string("pool").required();
    let delete = || {
        vec![
            pool(),
            string("pool2"),
            flag("yes_i_really_really_mean_it"),
        ]
    };
    vec![
        control(
            "osd pool application disable",
            "disable an application on a pool",
            vec![pool(), named("app").required(), flag("yes_i_really_mean_it")],
        ),
        control(
            "osd pool application enable",
            "enable an application on a pool",
            vec![pool(), named("app").required()],
        ),
        control(
            "osd pool create",
            "create a pool",
            vec![
                pool(),
                int("pg_num", 0).required(),
                int("pgp_num", 0).required(),
                choice("pool_type", &["replicated", "erasure"]),
                named("erasure_code_profile").when(Condition::Equals("pool_type", "erasure")),
                string("rule"),
            ],
        ),
        control("osd pool delete", "delete a pool", delete()),
        control("osd pool rm", "remove a pool", delete()),
        control(
            "osd pool get",
            "get a pool parameter",
            vec![pool(), choice("var", POOL_GET_VARS).required()],
        ),
        control("osd pool ls", "list pools", vec![choice("detail", &["detail"])]),
        control(
            "osd pool rename",
            "rename a pool",
            vec![string("srcpool").required(), string("destpool").required()],
        ),
        control(
            "osd pool repair",
            "repair pools",
            vec![list("who", Kind::String(Charset::Any)).required()],
        ),
        control(
            "osd pool set",
            "set a pool parameter",
            vec![
                pool(),
                choice("var", POOL_SET_VARS).required(),
                string("val").required(),
            ],
        ),
        control("osd pool stats", "show pool I/O rates", vec![string("pool_name")]),
    ]
}

fn tier() -> Vec<OperationSpec> {
    let pool = || string("pool").required();
    let tierpool = || string("tierpool").required();
    vec![
        control(
            "osd tier add",
            "add a tier to a base pool",
            vec![pool(), tierpool(), flag("force_nonempty")],
        ),
        control(
            "osd tier add-cache",
            "add a cache tier to a base pool",
            vec![pool(), tierpool(), int("size", 0).required()],
        ),
        control(
            "osd tier cache-mode",
            "set the cache mode of a cache tier",
            vec![
                pool(),
                choice("mode", CACHE_MODES).required(),
                flag("yes_i_really_mean_it"),
            ],
        ),
        control("osd tier remove", "remove a tier from a base pool", vec![pool(), tierpool()]),
        control("osd tier rm", "remove a tier from a base pool", vec![pool(), tierpool()]),
        control(
            "osd tier remove-overlay",
            "remove the overlay pool of a base pool",
            vec![pool()],
        ),
        control(
            "osd tier rm-overlay",
            "remove the overlay pool of a base pool",
            vec![pool()],
        ),
        control(
            "osd tier set-overlay",
            "set the overlay pool of a base pool",
            vec![pool(), string("overlaypool").required()],
        ),
    ]
}

fn pg() -> Vec<OperationSpec> {
    let by_osd = || {
        vec![
            ident("osd", IdentifierKind::OsdName).required(),
            any_int("pool"),
            pg_states(),
        ]
    };
    vec![
        control("pg scrub", "scrub a placement group", vec![pgid()]),
        control("pg deep-scrub", "deep scrub a placement group", vec![pgid()]),
        control("pg repair", "repair a placement group", vec![pgid()]),
        control("pg map", "show the mapping of a placement group", vec![pgid()]),
        control("pg repeer", "force a placement group to repeer", vec![pgid()]),
        control(
            "pg dump",
            "dump placement group state",
            vec![list("dumpcontents", Kind::Enum(PG_DUMP_CONTENTS))],
        ),
        control(
            "pg dump_json",
            "dump placement group state as json",
            vec![list("dumpcontents", Kind::Enum(PG_DUMP_JSON_CONTENTS))],
        ),
        control("pg dump_pools_json", "dump pool statistics as json", vec![]),
        control(
            "pg dump_stuck",
            "show stuck placement groups",
            vec![list("stuckops", Kind::Enum(PG_STUCK_STATES))],
        ),
        control(
            "pg ls",
            "list placement groups",
            vec![any_int("pool"), pg_states()],
        ),
        control("pg ls-by-osd", "list placement groups on an OSD", by_osd()),
        control(
            "pg ls-by-primary",
            "list placement groups with an OSD as primary",
            by_osd(),
        ),
        control(
            "pg ls-by-pool",
            "list placement groups in a pool",
            vec![string("poolstr").required(), pg_states()],
        ),
        control("pg getmap", "get the binary placement group map", vec![]),
        control("pg stat", "summarize placement group status", vec![]),
    ]
}

fn cluster() -> Vec<OperationSpec> {
    vec![
        control("health", "show cluster health", vec![choice("detail", &["detail"])]),
        control(
            "node ls",
            "list cluster nodes by daemon type",
            vec![choice("type", &["all", "osd", "mon", "mds", "mgr"])],
        ),
        control("status", "show cluster status", vec![]),
        control("version", "show the monitor version", vec![]),
        control("versions", "show the versions of all daemons", vec![]),
    ]
}

fn ceph_process() -> Vec<OperationSpec> {
    let mut daemon = vec![ident("daemon", IdentifierKind::DaemonName).required()];
    daemon.extend(ssh());
    vec![
        OperationSpec::process(
            "osd.purge",
            "ceph",
            &["osd", "purge"],
            "remove an OSD from the CRUSH map, auth and the OSD map",
            vec![
                int("id", 0).required(),
                flag("force").arg(Arg::Switch("--force")),
                flag("yes_i_really_mean_it").arg(Arg::Switch("--yes-i-really-mean-it")),
            ],
        ),
        OperationSpec::process(
            "tell",
            "ceph",
            &["tell"],
            "send a command to a daemon or placement group",
            vec![
                ident("target", IdentifierKind::TellTarget).required(),
                list("args", Kind::String(Charset::Any)).required(),
            ],
        ),
        OperationSpec::process(
            "daemon.config.show",
            "ceph",
            &["daemon"],
            "show the running configuration of a daemon through its admin socket",
            daemon,
        )
        .trailer(&["config", "show"]),
    ]
}

fn image_op(
    name: &str,
    subcommand: &'static [&'static str],
    summary: &'static str,
) -> OperationSpec {
    OperationSpec::process(name, "rbd", subcommand, summary, image())
}

fn snap_op(
    name: &str,
    subcommand: &'static [&'static str],
    summary: &'static str,
) -> OperationSpec {
    OperationSpec::process(name, "rbd", subcommand, summary, snapshot())
}

fn rbd() -> Vec<OperationSpec> {
    let image_name = |name: &'static str| ident(name, IdentifierKind::SpecComponent).required();
    let features = || {
        let mut params = image();
        params.push(list("features", Kind::Enum(IMAGE_FEATURES)).required());
        params
    };
    let mut mapped = image();
    mapped.extend(ssh());

    vec![
        OperationSpec::process(
            "rbd.create",
            "rbd",
            &["create"],
            "create an image",
            vec![
                bound_pool(),
                int("size", 0).required().arg(Arg::Flag("--size")),
                choice("unit", SIZE_UNITS)
                    .default("B")
                    .arg(Arg::SuffixOf("size")),
                image_name("name"),
            ],
        ),
        OperationSpec::process("rbd.ls", "rbd", &["ls"], "list images", vec![bound_pool()]),
        OperationSpec::process(
            "rbd.ls-long",
            "rbd",
            &["ls", "--long", "--format", "json"],
            "list images with their size and parent",
            vec![bound_pool()],
        ),
        OperationSpec::process(
            "rbd.rm",
            "rbd",
            &["rm"],
            "remove an image",
            vec![bound_pool(), image_name("name")],
        ),
        OperationSpec::process(
            "rbd.rename",
            "rbd",
            &["rename"],
            "rename an image",
            vec![bound_pool(), image_name("src"), image_name("dest")],
        ),
        OperationSpec::process(
            "rbd.clone",
            "rbd",
            &["clone"],
            "clone a protected snapshot into a new image",
            vec![
                bound_pool(),
                image_name("image").arg(Arg::Flag("--image")),
                image_name("snap").arg(Arg::Flag("--snap")),
                ident("dest_pool", IdentifierKind::SpecComponent)
                    .required()
                    .arg(Arg::Flag("--dest-pool")),
                image_name("dest").arg(Arg::Flag("--dest")),
            ],
        ),
        OperationSpec::process(
            "rbd.feature.enable",
            "rbd",
            &["feature", "enable"],
            "enable image features",
            features(),
        ),
        OperationSpec::process(
            "rbd.feature.disable",
            "rbd",
            &["feature", "disable"],
            "disable image features",
            features(),
        ),
        image_op("rbd.flatten", &["flatten"], "detach a clone from its parent"),
        image_op("rbd.info", &["info"], "show image information"),
        image_op("rbd.status", &["status"], "show the watchers of an image"),
        image_op("rbd.snap.ls", &["snap", "ls"], "list snapshots of an image"),
        image_op("rbd.snap.purge", &["snap", "purge"], "remove all unprotected snapshots"),
        snap_op("rbd.snap.create", &["snap", "create"], "create a snapshot"),
        snap_op("rbd.snap.protect", &["snap", "protect"], "protect a snapshot from removal"),
        snap_op("rbd.snap.unprotect", &["snap", "unprotect"], "allow a snapshot to be removed"),
        snap_op("rbd.snap.rm", &["snap", "rm"], "remove a snapshot"),
        snap_op("rbd.snap.rollback", &["snap", "rollback"], "roll an image back to a snapshot"),
        OperationSpec::process(
            "rbd.resize",
            "rbd",
            &["resize"],
            "resize an image",
            vec![
                image_part("pool", ImagePart::Pool),
                image_part("image", ImagePart::Image),
                int("size", 0).required().arg(Arg::Flag("--size")),
                choice("unit", SIZE_UNITS)
                    .default("B")
                    .arg(Arg::SuffixOf("size")),
                flag("allow_shrink").arg(Arg::Switch("--allow-shrink")),
            ],
        ),
        OperationSpec::process(
            "rbd.map",
            "rbd",
            &["map"],
            "map an image to a block device",
            mapped.clone(),
        ),
        OperationSpec::process("rbd.unmap", "rbd", &["unmap"], "unmap an image", mapped),
        OperationSpec::process(
            "rbd.showmapped",
            "rbd",
            &["showmapped"],
            "show mapped images",
            ssh(),
        ),
    ]
}

fn volume() -> Vec<OperationSpec> {
    vec![
        lvm_deploy(
            "volume.lvm.create",
            &["lvm", "create"],
            "prepare and activate a new OSD",
        ),
        lvm_deploy(
            "volume.lvm.prepare",
            &["lvm", "prepare"],
            "prepare a device for a new OSD",
        ),
        OperationSpec::process(
            "volume.lvm.list",
            "ceph-volume",
            &["lvm", "list"],
            "list the devices backing OSDs",
            vec![],
        ),
        OperationSpec::process(
            "volume.lvm.zap",
            "ceph-volume",
            &["lvm", "zap"],
            "wipe devices for reuse",
            vec![
                list("devices", Kind::Identifier(IdentifierKind::Argument)).required(),
                flag("destroy").arg(Arg::Switch("--destroy")),
            ],
        ),
        OperationSpec::process(
            "volume.lvm.zap-osd",
            "ceph-volume",
            &["lvm", "zap"],
            "wipe the devices of an OSD",
            vec![
                int("osd_id", 0).required().arg(Arg::Flag("--osd-id")),
                ParamSpec::new("osd_fsid", Kind::String(FSID_CHARS)).arg(Arg::Flag("--osd-fsid")),
            ],
        ),
        OperationSpec::process(
            "volume.lvm.activate",
            "ceph-volume",
            &["lvm", "activate"],
            "activate one prepared OSD, or all of them",
            vec![
                flag("all").arg(Arg::Switch("--all")),
                int("id", 0).required().when(Condition::Absent("all")),
                ParamSpec::new("fsid", Kind::String(FSID_CHARS))
                    .required()
                    .when(Condition::Absent("all")),
            ],
        ),
    ]
}

/// Every operation, in no particular order.
pub fn operations() -> Vec<OperationSpec> {
    let groups = [
        auth(),
        crash(),
        mon(),
        crush(),
        osd(),
        erasure(),
        pool(),
        tier(),
        pg(),
        cluster(),
        ceph_process(),
        rbd(),
        volume(),
    ];
    groups.into_iter().flatten().collect()
}
