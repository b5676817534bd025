// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use cephctl_lib::build;
    use cephctl_lib::command::{ArgVector, Command};
    use cephctl_lib::error::ValidationError;
    use cephctl_lib::schema::{Args, Registry, Value};

    fn argv(command: &Command) -> Vec<String> {
        command.argv().unwrap().to_argv()
    }

    fn words(s: &str) -> Vec<String> {
        s.split(' ').map(String::from).collect()
    }

    /// Parse the command line of `command` back into arguments and build it again.
    fn rebuild(command: &Command) -> Command {
        let args = ArgVector::parse(command.operation(), &argv(command)).unwrap();
        build(command.name(), &args).unwrap()
    }

    #[test]
    fn optional_parameters_without_defaults_are_omitted() {
        let args = Args::new()
            .set("pool", "rbd")
            .set("pg_num", 32)
            .set("pgp_num", 32);
        let command = build("osd.pool.create", &args).unwrap();

        let fields: Vec<_> = command.fields().collect();
        assert_eq!(
            fields,
            vec![
                ("pg_num", &Value::Int(32)),
                ("pgp_num", &Value::Int(32)),
                ("pool", &Value::Str("rbd".to_string())),
            ]
        );
        assert!(command.get("pool_type").is_none());
    }

    #[test]
    fn mon_command_carries_prefix_and_format() {
        let args = Args::new()
            .set("pool", "rbd")
            .set("pg_num", 32)
            .set("pgp_num", 32)
            .set("pool_type", "erasure")
            .set("erasure_code_profile", "k4m2");
        let command = build("osd.pool.create", &args).unwrap();

        assert_eq!(
            command.mon_command().unwrap(),
            json!({
                "prefix": "osd pool create",
                "format": "json",
                "pool": "rbd",
                "pg_num": 32,
                "pgp_num": 32,
                "pool_type": "erasure",
                "erasure_code_profile": "k4m2",
            })
        );
        assert!(command.argv().is_none());
    }

    #[test]
    fn dependent_parameter_is_dropped_when_condition_fails() {
        let args = Args::new()
            .set("pool", "rbd")
            .set("pg_num", 32)
            .set("pgp_num", 32)
            .set("pool_type", "replicated")
            .set("erasure_code_profile", "k4m2");
        let command = build("osd.pool.create", &args).unwrap();
        assert!(command.get("erasure_code_profile").is_none());
    }

    #[test]
    fn missing_required_parameter_is_named() {
        let args = Args::new().set("pool", "rbd").set("pg_num", 32);
        assert_eq!(
            build("osd.pool.create", &args).unwrap_err(),
            ValidationError::MissingRequiredParameter {
                operation: "osd.pool.create".to_string(),
                param: "pgp_num".to_string(),
            }
        );

        // Reported even when a later argument is also invalid.
        let args = Args::new().set("pool", "rbd").set("pgp_num", -1);
        assert_eq!(
            build("osd.pool.create", &args).unwrap_err().param(),
            Some("pg_num")
        );
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            build("osd.pool.frobnicate", &Args::new()).unwrap_err(),
            ValidationError::UnknownOperation {
                operation: "osd.pool.frobnicate".to_string()
            }
        );

        let args = Args::new().set("key", "full").set("value", "on");
        assert!(matches!(
            build("osd.set", &args),
            Err(ValidationError::UnknownParameter { param, .. }) if param == "value"
        ));
    }

    #[test]
    fn build_is_repeatable() {
        let args = Args::new()
            .set("entity", "client.rbd")
            .set("caps", vec!["mon", "allow r", "osd", "allow rwx pool=rbd"]);
        assert_eq!(
            build("auth.get-or-create", &args).unwrap(),
            build("auth.get-or-create", &args).unwrap()
        );
    }

    #[test]
    fn osd_flag_key_is_lowercase() {
        let command = build("osd.set", &Args::new().set("key", "noout")).unwrap();
        assert_eq!(
            command.mon_command().unwrap(),
            json!({"prefix": "osd set", "format": "json", "key": "noout"})
        );
    }

    #[test]
    fn every_operation_is_registered_once() {
        let registry = Registry::global();
        assert!(registry.len() > 50);
        for name in ["status", "osd.pool.create", "rbd.map", "volume.lvm.zap", "tell"] {
            assert_eq!(registry.lookup(name).unwrap().name, name);
        }
    }

    #[test]
    fn rbd_create_appends_unit_to_size() {
        let args = Args::new()
            .set("pool", "rbd")
            .set("size", 10)
            .set("unit", "G")
            .set("name", "disk");
        let command = build("rbd.create", &args).unwrap();
        assert_eq!(argv(&command), words("rbd create --pool rbd --size 10G disk"));
        assert_eq!(rebuild(&command), command);

        // Bytes unless told otherwise.
        let args = Args::new()
            .set("pool", "rbd")
            .set("size", 4096)
            .set("name", "disk");
        let command = build("rbd.create", &args).unwrap();
        assert_eq!(
            argv(&command),
            words("rbd create --pool rbd --size 4096B disk")
        );
    }

    #[test]
    fn rbd_resize() {
        let args = Args::new()
            .set("pool", "rbd")
            .set("image", "disk")
            .set("size", 2)
            .set("unit", "T")
            .set("allow_shrink", true);
        let command = build("rbd.resize", &args).unwrap();
        assert_eq!(
            argv(&command),
            words("rbd resize rbd/disk --size 2T --allow-shrink")
        );
        assert_eq!(rebuild(&command), command);

        let args = args.set("allow_shrink", false);
        let command = build("rbd.resize", &args).unwrap();
        assert_eq!(argv(&command), words("rbd resize rbd/disk --size 2T"));
    }

    #[test]
    fn snapshot_spec() {
        let args = Args::new()
            .set("pool", "rbd")
            .set("image", "disk")
            .set("snap", "before-upgrade");
        let command = build("rbd.snap.create", &args).unwrap();
        assert_eq!(
            argv(&command),
            words("rbd snap create rbd/disk@before-upgrade")
        );
        assert_eq!(rebuild(&command), command);
    }

    #[test]
    fn rbd_clone() {
        let args = Args::new()
            .set("pool", "gold")
            .set("image", "base")
            .set("snap", "v1")
            .set("dest_pool", "vms")
            .set("dest", "vm1");
        let command = build("rbd.clone", &args).unwrap();
        assert_eq!(
            argv(&command),
            words("rbd clone --pool gold --image base --snap v1 --dest-pool vms --dest vm1")
        );
        assert_eq!(rebuild(&command), command);
    }

    #[test]
    fn map_through_ssh() {
        let args = Args::new()
            .set("pool", "rbd")
            .set("image", "disk")
            .set("host", "node1");
        let command = build("rbd.map", &args).unwrap();
        assert_eq!(argv(&command), words("ssh root@node1 rbd map rbd/disk"));
        assert_eq!(rebuild(&command), command);

        let args = args.set("port", 2222).set("user", "admin");
        let command = build("rbd.map", &args).unwrap();
        assert_eq!(
            argv(&command),
            words("ssh -p 2222 admin@node1 rbd map rbd/disk")
        );
        assert_eq!(rebuild(&command), command);
    }

    #[test]
    fn remote_names_are_plain_words() {
        for pool in ["rbd;reboot;x", "rbd reboot", "rbd`reboot`", "rbd&&reboot"] {
            let args = Args::new()
                .set("pool", pool)
                .set("image", "disk")
                .set("host", "node1");
            assert!(
                matches!(
                    build("rbd.map", &args),
                    Err(ValidationError::Format { param, .. }) if param.name == "pool"
                ),
                "{pool}"
            );
        }
    }

    #[test]
    fn ssh_options_need_a_host() {
        let args = Args::new()
            .set("pool", "rbd")
            .set("image", "disk")
            .set("user", "admin");
        let command = build("rbd.map", &args).unwrap();
        assert!(command.get("user").is_none());
        assert_eq!(argv(&command), words("rbd map rbd/disk"));
    }

    #[test]
    fn daemon_config_show_has_trailing_words() {
        let args = Args::new().set("daemon", "osd.4").set("host", "node2");
        let command = build("daemon.config.show", &args).unwrap();
        assert_eq!(
            argv(&command),
            words("ssh root@node2 ceph daemon osd.4 config show")
        );
        assert_eq!(rebuild(&command), command);
    }

    #[test]
    fn purge_needs_confirmation_switch() {
        let args = Args::new()
            .set("id", 3)
            .set("force", true)
            .set("yes_i_really_mean_it", true);
        let command = build("osd.purge", &args).unwrap();
        assert_eq!(
            argv(&command),
            words("ceph osd purge 3 --force --yes-i-really-mean-it")
        );
        assert_eq!(rebuild(&command), command);
    }

    #[test]
    fn tell_passes_arguments_through() {
        let args = Args::new()
            .set("target", "osd.1")
            .set("args", vec!["injectargs", "--debug-osd", "0/5"]);
        let command = build("tell", &args).unwrap();
        assert_eq!(argv(&command), words("ceph tell osd.1 injectargs --debug-osd 0/5"));
        assert_eq!(rebuild(&command), command);
    }

    #[test]
    fn zap_expands_device_list() {
        let args = Args::new()
            .set("devices", vec!["/dev/sdb", "/dev/sdc"])
            .set("destroy", true);
        let command = build("volume.lvm.zap", &args).unwrap();
        assert_eq!(
            argv(&command),
            words("ceph-volume lvm zap /dev/sdb /dev/sdc --destroy")
        );
        assert_eq!(rebuild(&command), command);
    }

    #[test]
    fn filestore_ignores_bluestore_devices() {
        let args = Args::new()
            .set("data", "/dev/sdb")
            .set("objectstore", "filestore")
            .set("wal", "/dev/nvme0n1p1");
        let command = build("volume.lvm.create", &args).unwrap();
        assert!(command.get("wal").is_none());
        assert_eq!(
            argv(&command),
            words("ceph-volume lvm create --data /dev/sdb --filestore")
        );

        let args = args.set("objectstore", "bluestore");
        let command = build("volume.lvm.create", &args).unwrap();
        assert_eq!(
            argv(&command),
            words("ceph-volume lvm create --data /dev/sdb --bluestore --block.wal /dev/nvme0n1p1")
        );
        assert_eq!(rebuild(&command), command);
    }

    #[test]
    fn activate_all_or_one() {
        let command = build("volume.lvm.activate", &Args::new().set("all", true)).unwrap();
        assert_eq!(argv(&command), words("ceph-volume lvm activate --all"));
        assert_eq!(rebuild(&command), command);

        let args = Args::new().set("id", 3).set("fsid", "0b1e-77fa");
        let command = build("volume.lvm.activate", &args).unwrap();
        assert_eq!(argv(&command), words("ceph-volume lvm activate 3 0b1e-77fa"));
        assert_eq!(rebuild(&command), command);

        // Without --all, the OSD must be named.
        assert!(matches!(
            build("volume.lvm.activate", &Args::new()),
            Err(ValidationError::MissingRequiredParameter { param, .. }) if param == "id"
        ));
    }

    #[test]
    fn parse_rejects_other_programs() {
        let op = Registry::global().lookup("rbd.info").unwrap();
        assert!(ArgVector::parse(op, &words("rbd ls rbd")).is_err());
        assert!(ArgVector::parse(op, &words("ceph info rbd/disk")).is_err());

        let op = Registry::global().lookup("status").unwrap();
        assert!(ArgVector::parse(op, &words("ceph status")).is_err());
    }

    #[test]
    fn render_is_what_was_sent() {
        let command = build("status", &Args::new()).unwrap();
        let sent: serde_json::Value = serde_json::from_str(&command.render()).unwrap();
        assert_eq!(sent, json!({"prefix": "status", "format": "json"}));

        let args = Args::new().set("pool", "rbd").set("image", "disk");
        let command = build("rbd.info", &args).unwrap();
        assert_eq!(command.render(), "rbd info rbd/disk");
    }
}
