// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

#[cfg(test)]
mod tests {
    use nix::errno::Errno;
    use serde_json::json;

    use cephctl_lib::command::Remote;
    use cephctl_lib::config::Config;
    use cephctl_lib::error::Error;
    use cephctl_lib::journal::{Journal, Outcome};
    use cephctl_lib::ops::{Activate, ObjectStore, PoolType};
    use cephctl_lib::schema::Args;
    use cephctl_lib::session::State;
    use cephctl_lib::test_env::*;
    use cephctl_lib::{ImageSession, ReleasePolicy, Session, Volume};

    fn session(cluster: &FakeCluster, policy: ReleasePolicy) -> Session {
        let config = Config {
            release: policy,
            executables: fake_executables(),
            ..Config::default()
        };
        Session::connect(cluster.connector(), &config).unwrap()
    }

    #[test]
    fn success_returns_remote_output() {
        let cluster = FakeCluster::new();
        cluster.reply(0, r#"{"health":{"status":"HEALTH_OK"}}"#, "");
        let mut session = session(&cluster, ReleasePolicy::PerSession);

        let reply = session.status().unwrap();
        assert_eq!(reply.status, 0);
        assert_eq!(reply.payload, br#"{"health":{"status":"HEALTH_OK"}}"#);
        assert_eq!(reply.diagnostic, "");
        assert_eq!(
            reply.json().unwrap()["health"]["status"],
            json!("HEALTH_OK")
        );
        assert_eq!(
            cluster.commands(),
            vec![json!({"prefix": "status", "format": "json"})]
        );
    }

    #[test]
    fn failure_carries_errno_description() {
        let cluster = FakeCluster::new();
        cluster.reply(2, "", "pool 'nope' does not exist");
        cluster.reply(-2, "", "");
        let mut session = session(&cluster, ReleasePolicy::PerSession);

        for expected in [2, -2] {
            match session.osd_pool_get("nope", "size") {
                Err(Error::Remote(e)) => {
                    assert_eq!(e.status, expected);
                    assert_eq!(e.diagnostic, Errno::ENOENT.desc());
                    assert_eq!(e.operation, "osd.pool.get");
                }
                other => panic!("expected a remote error, got {other:?}"),
            }
        }
    }

    #[test]
    fn failed_connect_means_no_session() {
        let cluster = FakeCluster::new();
        cluster.refuse_connections(true);
        let config = Config::default();

        let err = Session::connect(cluster.connector(), &config).err().unwrap();
        assert_eq!(err.action, "connect to cluster");
        assert!(cluster.commands().is_empty());
        assert_eq!(cluster.connects(), 0);
    }

    #[test]
    fn invalid_arguments_send_nothing() {
        let cluster = FakeCluster::new();
        let mut session = session(&cluster, ReleasePolicy::PerOperation);

        let err = session
            .osd_pool_create("rbd", -1, 32, None, None)
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(cluster.commands().is_empty());
        // Connected once by construction, never again.
        assert_eq!(cluster.connects(), 1);
    }

    #[test]
    fn per_session_holds_the_connection() {
        let cluster = FakeCluster::new();
        let mut session = session(&cluster, ReleasePolicy::PerSession);

        session.health(false).unwrap();
        session.osd_set("noout").unwrap();
        session.osd_unset("noout").unwrap();
        assert_eq!(cluster.connects(), 1);
        assert_eq!(cluster.shutdowns(), 0);
        assert_eq!(session.state(), State::Connected);

        session.close();
        assert_eq!(cluster.shutdowns(), 1);
        assert_eq!(session.state(), State::Closed);
    }

    #[test]
    fn per_operation_reconnects() {
        let cluster = FakeCluster::new();
        let mut session = session(&cluster, ReleasePolicy::PerOperation);
        assert_eq!(session.policy(), ReleasePolicy::PerOperation);

        session.health(true).unwrap();
        assert_eq!(session.state(), State::Released);
        assert_eq!(cluster.shutdowns(), 1);

        session.osd_pool_ls(false).unwrap();
        assert_eq!(cluster.connects(), 2);
        assert_eq!(cluster.shutdowns(), 2);

        assert_eq!(
            cluster.commands(),
            vec![
                json!({"prefix": "health", "format": "json", "detail": "detail"}),
                json!({"prefix": "osd pool ls", "format": "json"}),
            ]
        );
    }

    #[test]
    fn per_operation_releases_after_failure() {
        let cluster = FakeCluster::new();
        cluster.reply(-1, "", "");
        let mut session = session(&cluster, ReleasePolicy::PerOperation);

        assert!(matches!(
            session.osd_pool_create("rbd", 32, 32, Some(PoolType::Replicated), None),
            Err(Error::Remote(_))
        ));
        assert_eq!(session.state(), State::Released);
        assert_eq!(cluster.shutdowns(), 1);
    }

    #[test]
    fn dropped_connection_is_a_connection_error() {
        let cluster = FakeCluster::new();
        cluster.drop_next();
        let mut session = session(&cluster, ReleasePolicy::PerSession);

        assert!(matches!(session.status(), Err(Error::Connection(_))));
        // The next command goes through on the same connection.
        session.status().unwrap();
        assert_eq!(cluster.connects(), 1);
    }

    #[test]
    fn drop_releases() {
        let cluster = FakeCluster::new();
        {
            let mut session = session(&cluster, ReleasePolicy::PerSession);
            session.version().unwrap();
        }
        assert_eq!(cluster.shutdowns(), 1);
    }

    #[test]
    fn closed_session_refuses_operations() {
        let cluster = FakeCluster::new();
        let mut session = session(&cluster, ReleasePolicy::PerSession);
        session.close();

        assert!(matches!(session.status(), Err(Error::Connection(_))));
        assert!(cluster.commands().is_empty());
        assert_eq!(cluster.connects(), 1);
    }

    #[test]
    fn typed_operations_send_declared_keys() {
        let cluster = FakeCluster::new();
        let mut session = session(&cluster, ReleasePolicy::PerSession);

        session
            .osd_pool_create("ec", 64, 64, Some(PoolType::Erasure(Some("k4m2"))), None)
            .unwrap();
        session
            .auth_get_or_create("client.rbd", &["mon", "profile rbd"])
            .unwrap();
        session.osd_crush_reweight("osd.3", 1.5).unwrap();

        assert_eq!(
            cluster.commands(),
            vec![
                json!({
                    "prefix": "osd pool create",
                    "format": "json",
                    "pool": "ec",
                    "pg_num": 64,
                    "pgp_num": 64,
                    "pool_type": "erasure",
                    "erasure_code_profile": "k4m2",
                }),
                json!({
                    "prefix": "auth get-or-create",
                    "format": "json",
                    "entity": "client.rbd",
                    "caps": ["mon", "profile rbd"],
                }),
                json!({
                    "prefix": "osd crush reweight",
                    "format": "json",
                    "name": "osd.3",
                    "weight": 1.5,
                }),
            ]
        );
    }

    #[test]
    fn image_session_binds_pools() {
        let cluster = FakeCluster::new();
        cluster.set_pools(&["rbd", "vms"]);
        let config = Config {
            executables: fake_executables(),
            ..Config::default()
        };

        let mut images =
            ImageSession::connect(cluster.connector(), &config, &["rbd", "vms"]).unwrap();
        assert_eq!(cluster.open_pools(), vec!["rbd", "vms"]);
        assert_eq!(images.bound_pool(1).unwrap(), "vms");
        assert!(images.bound_pool(2).is_err());

        let reply = images.rbd_create("disk", 10, Some("G")).unwrap();
        assert_eq!(reply.text(), "rbd create --pool rbd --size 10G disk\n");

        let reply = images.rbd_clone("disk", "base", "vm1").unwrap();
        assert_eq!(
            reply.text(),
            "rbd clone --pool rbd --image disk --snap base --dest-pool vms --dest vm1\n"
        );

        drop(images);
        assert!(cluster.open_pools().is_empty());
        assert_eq!(cluster.closed_pools(), vec!["vms", "rbd"]);
        assert_eq!(cluster.shutdowns(), 1);
    }

    #[test]
    fn image_session_bind_failure_releases_everything() {
        let cluster = FakeCluster::new();
        cluster.set_pools(&["rbd"]);
        let config = Config::default();

        let result = ImageSession::connect(cluster.connector(), &config, &["rbd", "missing"]);
        assert!(result.is_err());
        assert!(cluster.open_pools().is_empty());
        assert_eq!(cluster.closed_pools(), vec!["rbd"]);
        assert_eq!(cluster.connects(), 1);
        assert_eq!(cluster.shutdowns(), 1);
    }

    #[test]
    fn image_session_needs_a_pool() {
        let cluster = FakeCluster::new();
        assert!(ImageSession::connect(cluster.connector(), &Config::default(), &[]).is_err());
        assert_eq!(cluster.connects(), 0);
    }

    #[test]
    fn clone_needs_a_destination_pool() {
        let cluster = FakeCluster::new();
        let config = Config {
            executables: fake_executables(),
            ..Config::default()
        };
        let mut images = ImageSession::connect(cluster.connector(), &config, &["rbd"]).unwrap();
        assert!(matches!(
            images.rbd_clone("disk", "base", "vm1"),
            Err(Error::Connection(_))
        ));
    }

    #[test]
    fn per_operation_rebinds_pools() {
        let cluster = FakeCluster::new();
        let config = Config {
            release: ReleasePolicy::PerOperation,
            executables: fake_executables(),
            ..Config::default()
        };
        let mut images = ImageSession::connect(cluster.connector(), &config, &["rbd"]).unwrap();

        images.rbd_ls().unwrap();
        images.rbd_ls().unwrap();
        assert_eq!(cluster.connects(), 2);
        assert_eq!(cluster.closed_pools(), vec!["rbd", "rbd"]);
        assert!(cluster.open_pools().is_empty());
    }

    #[test]
    fn process_failure_keeps_program_output() {
        let cluster = FakeCluster::new();
        let mut session = session(&cluster, ReleasePolicy::PerSession);

        match session.rbd_info("rbd", "missing") {
            Err(Error::Remote(e)) => {
                assert_eq!(e.status, 2);
                assert_eq!(e.command, "rbd info rbd/missing");
                assert!(String::from_utf8_lossy(&e.output).contains("error opening image"));
                assert!(e.diagnostic.is_empty());
            }
            other => panic!("expected a remote error, got {other:?}"),
        }
    }

    #[test]
    fn process_through_ssh() {
        let cluster = FakeCluster::new();
        let mut session = session(&cluster, ReleasePolicy::PerSession);
        let remote = Remote {
            host: "node1".to_string(),
            port: 2222,
            user: "admin".to_string(),
        };

        let reply = session.rbd_map("rbd", "disk", Some(&remote)).unwrap();
        assert_eq!(reply.text(), "ssh -p 2222 admin@node1 rbd map rbd/disk\n");
        assert!(cluster.commands().is_empty());
    }

    #[test]
    fn remote_shell_sees_one_word_per_argument() {
        let cluster = FakeCluster::new();
        let mut session = session(&cluster, ReleasePolicy::PerSession);
        let remote = Remote {
            host: "node1".to_string(),
            port: 22,
            user: "root".to_string(),
        };

        let reply = session
            .daemon_config_show("client.x;reboot", Some(&remote))
            .unwrap();
        assert_eq!(
            reply.text(),
            "ssh root@node1 ceph daemon 'client.x;reboot' config show\n"
        );
    }

    #[test]
    fn unreachable_host_is_not_contacted() {
        let env = TestEnvironment::new("unreachable_host_is_not_contacted");
        let config = env.config(ReleasePolicy::PerSession);
        let journal_path = config.journal.clone().unwrap();
        let cluster = FakeCluster::new();
        let mut session = Session::connect(cluster.connector(), &config)
            .unwrap()
            .with_journal(Journal::open(&journal_path).unwrap());
        let remote = Remote {
            host: "down1".to_string(),
            port: 22,
            user: "root".to_string(),
        };

        match session.rbd_showmapped(Some(&remote)) {
            Err(Error::Connection(e)) => {
                assert!(e.to_string().contains("down1"), "{e}");
                assert!(e.to_string().contains("unreachable"), "{e}");
            }
            other => panic!("expected a connection error, got {other:?}"),
        }
        drop(session);

        let records = Journal::read_all(&journal_path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].outcome, Outcome::Unreachable);
        assert_eq!(records[0].operation, "rbd.showmapped");
    }

    #[test]
    fn run_by_name() {
        let cluster = FakeCluster::new();
        let mut session = session(&cluster, ReleasePolicy::PerSession);

        let args = Args::new().set("id", 7).set("yes_i_really_mean_it", true);
        let reply = session.run("osd.purge", &args).unwrap();
        assert_eq!(reply.text(), "ceph osd purge 7 --yes-i-really-mean-it\n");
    }

    #[test]
    fn volume_runs_without_a_cluster() {
        let config = Config {
            executables: fake_executables(),
            ..Config::default()
        };
        let mut volume = Volume::new(&config);

        let store = ObjectStore::Bluestore {
            wal: None,
            db: Some("/dev/nvme0n1p2"),
        };
        let reply = volume.lvm_create("/dev/sdb", store).unwrap();
        assert_eq!(
            reply.text(),
            "ceph-volume lvm create --data /dev/sdb --bluestore --block.db /dev/nvme0n1p2\n"
        );

        let reply = volume.lvm_activate(Activate::All).unwrap();
        assert_eq!(reply.text(), "ceph-volume lvm activate --all\n");

        assert!(matches!(
            volume.run("status", &Args::new()),
            Err(Error::Connection(_))
        ));
    }

    #[test]
    fn journal_records_every_dispatch() {
        let env = TestEnvironment::new("journal_records_every_dispatch");
        let config = env.config(ReleasePolicy::PerSession);
        let journal_path = config.journal.clone().unwrap();

        let cluster = FakeCluster::new();
        cluster.reply(0, "[]", "");
        cluster.reply(-2, "", "");
        cluster.drop_next();

        let mut session = Session::connect(cluster.connector(), &config)
            .unwrap()
            .with_journal(Journal::open(&journal_path).unwrap());
        session.osd_lspools().unwrap();
        session.osd_pool_get("nope", "size").unwrap_err();
        session.status().unwrap_err();
        session.rbd_info("rbd", "missing").unwrap_err();
        // Rejected before dispatch, so not journaled.
        session.osd_set("bogus").unwrap_err();
        drop(session);

        let records = Journal::read_all(&journal_path).unwrap();
        let summary: Vec<_> = records
            .iter()
            .map(|r| (r.outcome, r.status, r.operation.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Outcome::Success, 0, "osd.lspools"),
                (Outcome::Failure, -2, "osd.pool.get"),
                (Outcome::Unreachable, 0, "status"),
                (Outcome::Failure, 2, "rbd.info"),
            ]
        );
        assert_eq!(records[3].command, "rbd info rbd/missing");
    }

    #[test]
    fn journal_keeps_multiline_commands_whole() {
        let env = TestEnvironment::new("journal_keeps_multiline_commands_whole");
        let config = env.config(ReleasePolicy::PerSession);
        let journal_path = config.journal.clone().unwrap();
        let cluster = FakeCluster::new();
        cluster.reply(0, "{}", "");

        let mut session = Session::connect(cluster.connector(), &config)
            .unwrap()
            .with_journal(Journal::open(&journal_path).unwrap());
        session.tell("osd.1", &["config", "set\nx"]).unwrap();
        session.status().unwrap();
        drop(session);

        let records = Journal::read_all(&journal_path).unwrap();
        let commands: Vec<_> = records.iter().map(|r| r.operation.as_str()).collect();
        assert_eq!(commands, vec!["tell", "status"]);
        assert_eq!(records[0].command, "ceph tell osd.1 config set\nx");
    }
}
