// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! Helpers for the integration tests: an in-memory control channel and fake executables.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use crate::config::{Config, Executables};
use crate::error::ConnectionError;
use crate::session::ReleasePolicy;
use crate::transport::{ClusterHandle, Connector, PoolContext};

/// Given a relative `path` in the test directory, prepend the
/// full path to the test directory.
pub fn test_path(path: &str) -> String {
    std::env::var("CARGO_MANIFEST_DIR").unwrap() + "/tests/" + path
}

trait IgnoreEexist {
    fn ignore_eexist(self) -> Self;
}

impl IgnoreEexist for io::Result<()> {
    fn ignore_eexist(self) -> Self {
        match self {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// A TestEnvironment holds a "private" working directory for one test, where the journal and
/// any other files the test produces are kept.
pub struct TestEnvironment {
    private_dir_path: String,
}

impl TestEnvironment {
    /// Set up an environment for a test named `test_id`, emptying out anything left over from
    /// a previous run.
    pub fn new(test_id: &str) -> Self {
        let private_dir_path = test_path(&format!("test_output/{test_id}"));
        match std::fs::remove_dir_all(&private_dir_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => panic!("Could not clean up test directory: {e}"),
        };

        std::fs::create_dir(test_path("test_output"))
            .ignore_eexist()
            .unwrap();
        std::fs::create_dir(&private_dir_path).unwrap();

        Self { private_dir_path }
    }

    /// The path of `name` inside this test's private directory.
    pub fn path(&self, name: &str) -> String {
        format!("{}/{name}", self.private_dir_path)
    }

    /// A configuration that runs the fake executables under `tests/bin/` and keeps its journal
    /// in the private directory.
    pub fn config(&self, release: ReleasePolicy) -> Config {
        Config {
            release,
            journal: Some(self.path("journal")),
            executables: fake_executables(),
            ..Config::default()
        }
    }
}

/// The fake `ceph`, `rbd`, `ceph-volume` and `ssh` scripts. Each prints its name and its
/// arguments; `rbd` fails for any image named `missing`. The fake `ping` fails for hosts whose
/// name starts with `down`.
pub fn fake_executables() -> Executables {
    Executables {
        ceph: test_path("bin/ceph"),
        rbd: test_path("bin/rbd"),
        ceph_volume: test_path("bin/ceph-volume"),
        ssh: test_path("bin/ssh"),
        ping: test_path("bin/ping"),
    }
}

enum Scripted {
    Reply(i32, Vec<u8>, String),
    Unreachable,
}

#[derive(Default)]
struct FakeState {
    replies: VecDeque<Scripted>,
    commands: Vec<String>,
    refuse_connections: bool,
    /// If set, only these pools exist.
    pools: Option<Vec<String>>,
    connects: usize,
    shutdowns: usize,
    open_pools: Vec<String>,
    closed_pools: Vec<String>,
}

/// An in-memory cluster. Every monitor command it receives is recorded; replies are taken from
/// a script, and default to success with empty output once the script runs out.
///
/// Clones share the same state, so a test can keep one and hand a connector to a session.
#[derive(Clone, Default)]
pub struct FakeCluster {
    state: Arc<Mutex<FakeState>>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connector(&self) -> Box<dyn Connector> {
        Box::new(FakeConnector {
            state: Arc::clone(&self.state),
        })
    }

    /// Queue the reply to the next unanswered monitor command.
    pub fn reply(&self, status: i32, output: &str, message: &str) {
        self.state.lock().unwrap().replies.push_back(Scripted::Reply(
            status,
            output.as_bytes().to_vec(),
            message.to_string(),
        ));
    }

    /// Make the next monitor command fail as if the connection had dropped.
    pub fn drop_next(&self) {
        self.state
            .lock()
            .unwrap()
            .replies
            .push_back(Scripted::Unreachable);
    }

    pub fn refuse_connections(&self, refuse: bool) {
        self.state.lock().unwrap().refuse_connections = refuse;
    }

    /// Only the given pools can be opened from now on.
    pub fn set_pools(&self, pools: &[&str]) {
        self.state.lock().unwrap().pools = Some(pools.iter().map(|p| p.to_string()).collect());
    }

    /// The monitor commands received so far, parsed.
    pub fn commands(&self) -> Vec<serde_json::Value> {
        self.state
            .lock()
            .unwrap()
            .commands
            .iter()
            .map(|c| serde_json::from_str(c).unwrap())
            .collect()
    }

    pub fn connects(&self) -> usize {
        self.state.lock().unwrap().connects
    }

    pub fn shutdowns(&self) -> usize {
        self.state.lock().unwrap().shutdowns
    }

    /// Names of the pool contexts that are currently open.
    pub fn open_pools(&self) -> Vec<String> {
        self.state.lock().unwrap().open_pools.clone()
    }

    /// Names of the pool contexts closed so far, in the order they were closed.
    pub fn closed_pools(&self) -> Vec<String> {
        self.state.lock().unwrap().closed_pools.clone()
    }
}

struct FakeConnector {
    state: Arc<Mutex<FakeState>>,
}

impl Connector for FakeConnector {
    fn connect(&self) -> Result<Box<dyn ClusterHandle>, ConnectionError> {
        let mut state = self.state.lock().unwrap();
        if state.refuse_connections {
            return Err(ConnectionError::new(
                "connect to cluster",
                "Connection refused",
            ));
        }
        state.connects += 1;
        Ok(Box::new(FakeHandle {
            state: Arc::clone(&self.state),
            shut_down: false,
        }))
    }
}

struct FakeHandle {
    state: Arc<Mutex<FakeState>>,
    shut_down: bool,
}

impl ClusterHandle for FakeHandle {
    fn mon_command(
        &mut self,
        cmd: &str,
        _inbuf: &[u8],
    ) -> Result<(i32, Vec<u8>, String), ConnectionError> {
        assert!(!self.shut_down, "monitor command on a shut down handle");
        let mut state = self.state.lock().unwrap();
        state.commands.push(cmd.to_string());
        match state.replies.pop_front() {
            Some(Scripted::Reply(status, output, message)) => Ok((status, output, message)),
            Some(Scripted::Unreachable) => Err(ConnectionError::new(
                "submit monitor command",
                "connection reset",
            )),
            None => Ok((0, Vec::new(), String::new())),
        }
    }

    fn open_pool(&mut self, name: &str) -> Result<Box<dyn PoolContext>, ConnectionError> {
        let mut state = self.state.lock().unwrap();
        if let Some(pools) = &state.pools {
            if !pools.iter().any(|p| p == name) {
                return Err(ConnectionError::new(
                    format!("open pool '{name}'"),
                    "No such file or directory",
                ));
            }
        }
        state.open_pools.push(name.to_string());
        Ok(Box::new(FakePool {
            state: Arc::clone(&self.state),
            name: name.to_string(),
            closed: false,
        }))
    }

    fn shutdown(&mut self) {
        let mut state = self.state.lock().unwrap();
        assert!(
            state.open_pools.is_empty(),
            "connection shut down with pool contexts still open"
        );
        if !self.shut_down {
            self.shut_down = true;
            state.shutdowns += 1;
        }
    }
}

struct FakePool {
    state: Arc<Mutex<FakeState>>,
    name: String,
    closed: bool,
}

impl PoolContext for FakePool {
    fn name(&self) -> &str {
        &self.name
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let mut state = self.state.lock().unwrap();
        if let Some(i) = state.open_pools.iter().position(|p| *p == self.name) {
            state.open_pools.remove(i);
        }
        state.closed_pools.push(self.name.clone());
    }
}
