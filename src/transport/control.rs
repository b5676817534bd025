// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use log::debug;

use crate::command::Command;
use crate::error::ConnectionError;
use crate::transport::{RawOutcome, Transport};

/// An open connection to the cluster's monitors.
pub trait ClusterHandle {
    /// Submit one monitor command, returning `(status, output buffer, status string)`.
    fn mon_command(
        &mut self,
        cmd: &str,
        inbuf: &[u8],
    ) -> Result<(i32, Vec<u8>, String), ConnectionError>;

    /// Bind a context for the named pool. Fails if the pool does not exist.
    fn open_pool(&mut self, name: &str) -> Result<Box<dyn PoolContext>, ConnectionError>;

    fn shutdown(&mut self);
}

/// A per-pool binding owned by a session. It must be closed before the connection it was opened
/// from is shut down.
pub trait PoolContext {
    fn name(&self) -> &str;

    fn close(&mut self);
}

/// Produces connections. A session keeps its connector so that it can reconnect.
pub trait Connector {
    fn connect(&self) -> Result<Box<dyn ClusterHandle>, ConnectionError>;
}

/// Submits monitor commands over an open connection.
pub struct ControlTransport<'a> {
    handle: &'a mut dyn ClusterHandle,
}

impl<'a> ControlTransport<'a> {
    pub fn new(handle: &'a mut dyn ClusterHandle) -> Self {
        ControlTransport { handle }
    }
}

impl Transport for ControlTransport<'_> {
    fn execute(&mut self, command: &Command) -> Result<RawOutcome, ConnectionError> {
        let Some(cmd) = command.mon_command() else {
            return Err(ConnectionError::new(
                format!("submit '{}'", command.name()),
                "it is not a control-channel operation",
            ));
        };
        let cmd = cmd.to_string();
        debug!("mon_command {cmd}");

        let (status, output, message) = self.handle.mon_command(&cmd, &[])?;
        Ok(RawOutcome::Control {
            status,
            output,
            message,
        })
    }
}
