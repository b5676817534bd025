// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! The two ways a command reaches the cluster.
//!
//! Both strategies make exactly one attempt per call. They report only whether the command
//! could be delivered; interpreting the status is left to [`crate::reply::normalize`].

pub mod control;
pub mod process;

pub use control::{ClusterHandle, Connector, ControlTransport, PoolContext};
pub use process::ProcessTransport;

use crate::command::Command;
use crate::error::ConnectionError;

/// What came back from a single delivery, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawOutcome {
    /// The `(status, output buffer, status string)` triple of a monitor command. A negative
    /// status is an errno value.
    Control {
        status: i32,
        output: Vec<u8>,
        message: String,
    },
    /// The exit code and combined stdout and stderr of a process.
    Process { code: i32, output: Vec<u8> },
}

pub trait Transport {
    fn execute(&mut self, command: &Command) -> Result<RawOutcome, ConnectionError>;
}
