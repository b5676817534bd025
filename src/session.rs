// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! Sessions own the connection to the cluster and release it on every exit path.
//!
//! A [`Session`] is connected when it is created; if the cluster cannot be reached there is no
//! session. After each operation it releases according to its [`ReleasePolicy`]. Whatever the
//! policy, dropping or closing the session closes its pool contexts and then shuts the
//! connection down.

use std::ops::{Deref, DerefMut};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::command::{self, Command};
use crate::config::Config;
use crate::error::{ConnectionError, Error, Result};
use crate::journal::{Journal, Outcome, Record};
use crate::reply::{self, Reply};
use crate::schema::{Args, Family};
use crate::transport::{
    ClusterHandle, Connector, ControlTransport, PoolContext, ProcessTransport, RawOutcome,
    Transport,
};

/// When a session gives its connection back.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReleasePolicy {
    /// Hold the connection and pool contexts until the session is closed or dropped.
    #[default]
    PerSession,
    /// Release after every operation and reconnect on the next one.
    PerOperation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Connected,
    /// Released after an operation under [`ReleasePolicy::PerOperation`]; the next operation
    /// reconnects.
    Released,
    Closed,
}

pub struct Session {
    connector: Box<dyn Connector>,
    handle: Option<Box<dyn ClusterHandle>>,
    pools: Vec<Box<dyn PoolContext>>,
    pool_names: Vec<String>,
    policy: ReleasePolicy,
    processes: ProcessTransport,
    journal: Option<Journal>,
    closed: bool,
}

impl Session {
    /// Connect to the cluster.
    pub fn connect(
        connector: Box<dyn Connector>,
        config: &Config,
    ) -> std::result::Result<Self, ConnectionError> {
        Self::open(connector, config, Vec::new())
    }

    fn open(
        connector: Box<dyn Connector>,
        config: &Config,
        pool_names: Vec<String>,
    ) -> std::result::Result<Self, ConnectionError> {
        let mut session = Session {
            connector,
            handle: None,
            pools: Vec::new(),
            pool_names,
            policy: config.release,
            processes: ProcessTransport::new(config.executables.clone()),
            journal: None,
            closed: false,
        };
        session.ensure_connected()?;
        Ok(session)
    }

    /// Append a record of every dispatched operation to `journal`.
    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn policy(&self) -> ReleasePolicy {
        self.policy
    }

    pub fn state(&self) -> State {
        if self.closed {
            State::Closed
        } else if self.handle.is_some() {
            State::Connected
        } else {
            State::Released
        }
    }

    /// Names of the pools this session binds, in the order they were given.
    pub fn pool_names(&self) -> &[String] {
        &self.pool_names
    }

    /// Build the named operation from `args` and execute it.
    ///
    /// Validation happens before anything is sent, so an invalid call leaves the session exactly
    /// as it was.
    pub fn run(&mut self, name: &str, args: &Args) -> Result<Reply> {
        let command = command::build(name, args)?;
        self.execute(&command)
    }

    /// Send one command through the transport its operation is declared for.
    pub fn execute(&mut self, command: &Command) -> Result<Reply> {
        if self.closed {
            return Err(closed(command).into());
        }

        let mut guard = ReleaseGuard(self);
        let raw = guard.deliver(command);
        settle(&mut guard.journal, command, raw)
    }

    fn deliver(&mut self, command: &Command) -> std::result::Result<RawOutcome, ConnectionError> {
        match command.operation().family {
            Family::Control { .. } => {
                self.ensure_connected()?;
                let Some(handle) = self.handle.as_deref_mut() else {
                    return Err(ConnectionError::new("submit command", "not connected"));
                };
                ControlTransport::new(handle).execute(command)
            }
            Family::Process { .. } => {
                if !self.pool_names.is_empty() {
                    self.ensure_connected()?;
                }
                self.processes.execute(command)
            }
        }
    }

    fn ensure_connected(&mut self) -> std::result::Result<(), ConnectionError> {
        if self.handle.is_some() {
            return Ok(());
        }

        let mut handle = self.connector.connect()?;
        info!("connected to cluster");
        match bind_pools(handle.as_mut(), &self.pool_names) {
            Ok(pools) => self.pools = pools,
            Err(e) => {
                handle.shutdown();
                return Err(e);
            }
        }
        self.handle = Some(handle);
        Ok(())
    }

    /// Close the pool contexts and shut the connection down. Does nothing if already released.
    pub fn release(&mut self) {
        while let Some(mut pool) = self.pools.pop() {
            debug!("closing pool context '{}'", pool.name());
            pool.close();
        }
        if let Some(mut handle) = self.handle.take() {
            handle.shutdown();
            info!("disconnected from cluster");
        }
    }

    /// Release everything and refuse further operations.
    pub fn close(&mut self) {
        self.release();
        self.closed = true;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.release();
    }
}

/// Releases the session at the end of an operation if its policy asks for it, including when
/// the operation unwinds.
struct ReleaseGuard<'a>(&'a mut Session);

impl Deref for ReleaseGuard<'_> {
    type Target = Session;

    fn deref(&self) -> &Session {
        self.0
    }
}

impl DerefMut for ReleaseGuard<'_> {
    fn deref_mut(&mut self) -> &mut Session {
        self.0
    }
}

impl Drop for ReleaseGuard<'_> {
    fn drop(&mut self) {
        if self.0.policy == ReleasePolicy::PerOperation {
            self.0.release();
        }
    }
}

/// Normalize the outcome of a delivery, journal it, and turn a failure status into an error.
fn settle(
    journal: &mut Option<Journal>,
    command: &Command,
    raw: std::result::Result<RawOutcome, ConnectionError>,
) -> Result<Reply> {
    let reply = match raw {
        Ok(raw) => reply::normalize(raw),
        Err(e) => {
            record(journal, Outcome::Unreachable, 0, command);
            return Err(Error::Connection(e));
        }
    };

    let outcome = if reply.is_success() {
        Outcome::Success
    } else {
        Outcome::Failure
    };
    record(journal, outcome, reply.status, command);
    Ok(reply.into_result(command)?)
}

fn record(journal: &mut Option<Journal>, outcome: Outcome, status: i32, command: &Command) {
    let Some(journal) = journal.as_mut() else {
        return;
    };
    let record = Record::new(outcome, status, command.name(), command.render());
    if let Err(e) = journal.write_record(&record) {
        warn!("could not write to journal '{}': {e}", journal.path());
    }
}

fn closed(command: &Command) -> ConnectionError {
    ConnectionError::new(format!("run '{}'", command.name()), "the session is closed")
}

/// Open a context for each pool. On failure the contexts opened so far are closed again.
fn bind_pools(
    handle: &mut dyn ClusterHandle,
    names: &[String],
) -> std::result::Result<Vec<Box<dyn PoolContext>>, ConnectionError> {
    let mut pools: Vec<Box<dyn PoolContext>> = Vec::with_capacity(names.len());
    for name in names {
        match handle.open_pool(name) {
            Ok(pool) => {
                debug!("bound pool context '{name}'");
                pools.push(pool);
            }
            Err(e) => {
                while let Some(mut pool) = pools.pop() {
                    pool.close();
                }
                return Err(e);
            }
        }
    }
    Ok(pools)
}

/// A session with one or more pools bound, for the block image operations.
///
/// Image operations that name a pool take it from the bound contexts: index 0 is the pool the
/// operation works in, index 1 is the destination pool of a clone.
pub struct ImageSession {
    session: Session,
}

impl ImageSession {
    /// Connect and bind a context for each of `pools`. If any pool cannot be bound, everything
    /// acquired so far is released and the error is returned.
    pub fn connect(
        connector: Box<dyn Connector>,
        config: &Config,
        pools: &[&str],
    ) -> std::result::Result<Self, ConnectionError> {
        if pools.is_empty() {
            return Err(ConnectionError::new(
                "bind pool contexts",
                "an image session needs at least one pool",
            ));
        }
        let names = pools.iter().map(|p| p.to_string()).collect();
        Ok(ImageSession {
            session: Session::open(connector, config, names)?,
        })
    }

    /// The name of the pool bound at `index`.
    pub fn bound_pool(&self, index: usize) -> std::result::Result<&str, ConnectionError> {
        self.session
            .pool_names
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| {
                ConnectionError::new(
                    "use pool context",
                    format!(
                        "no pool is bound at position {index}, the session has {}",
                        self.session.pool_names.len()
                    ),
                )
            })
    }

    pub fn into_session(self) -> Session {
        self.session
    }
}

impl Deref for ImageSession {
    type Target = Session;

    fn deref(&self) -> &Session {
        &self.session
    }
}

impl DerefMut for ImageSession {
    fn deref_mut(&mut self) -> &mut Session {
        &mut self.session
    }
}

/// Runs `ceph-volume` operations. These act on local devices and need no cluster connection.
#[derive(Debug, Default)]
pub struct Volume {
    processes: ProcessTransport,
    journal: Option<Journal>,
}

impl Volume {
    pub fn new(config: &Config) -> Self {
        Volume {
            processes: ProcessTransport::new(config.executables.clone()),
            journal: None,
        }
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn run(&mut self, name: &str, args: &Args) -> Result<Reply> {
        let command = command::build(name, args)?;
        self.execute(&command)
    }

    pub fn execute(&mut self, command: &Command) -> Result<Reply> {
        if command.operation().family.is_control() {
            return Err(ConnectionError::new(
                format!("run '{}'", command.name()),
                "it needs a cluster connection",
            )
            .into());
        }
        let raw = self.processes.execute(command);
        settle(&mut self.journal, command, raw)
    }
}

/// The connector used when no control channel was compiled in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl Connector for Unavailable {
    fn connect(&self) -> std::result::Result<Box<dyn ClusterHandle>, ConnectionError> {
        Err(ConnectionError::new(
            "connect to cluster",
            "cephctl was built without the 'rados' feature",
        ))
    }
}
