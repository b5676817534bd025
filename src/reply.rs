// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use nix::errno::Errno;

use crate::command::Command;
use crate::error::RemoteCommandError;
use crate::transport::RawOutcome;

/// What the cluster or the external program said, in one shape for both families.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// 0 on success. For control commands a failure is a negated errno value, for processes the
    /// exit code.
    pub status: i32,
    pub payload: Vec<u8>,
    pub diagnostic: String,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        self.status == 0
    }

    /// The payload as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }

    /// Parse the payload as JSON. Control commands are always sent with `format: json`.
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.payload)
    }

    /// Turn a failure reply into an error that names the command that produced it.
    pub fn into_result(self, command: &Command) -> Result<Reply, RemoteCommandError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(RemoteCommandError {
            operation: command.name().to_string(),
            command: command.render(),
            status: self.status,
            diagnostic: self.diagnostic,
            output: self.payload,
        })
    }
}

/// Interpret a raw outcome.
///
/// A failed control command gets the platform's description of its errno as the diagnostic;
/// the monitor's own status string is only kept on success. Process replies never carry a
/// diagnostic because whatever the program printed is already in the payload.
pub fn normalize(raw: RawOutcome) -> Reply {
    match raw {
        RawOutcome::Control {
            status: 0,
            output,
            message,
        } => Reply {
            status: 0,
            payload: output,
            diagnostic: message,
        },
        RawOutcome::Control { status, output, .. } => Reply {
            status,
            payload: output,
            diagnostic: Errno::from_raw(status.saturating_abs()).desc().to_string(),
        },
        RawOutcome::Process { code, output } => Reply {
            status: code,
            payload: output,
            diagnostic: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_success_keeps_status_string() {
        let reply = normalize(RawOutcome::Control {
            status: 0,
            output: b"[]".to_vec(),
            message: "dumped all".to_string(),
        });
        assert!(reply.is_success());
        assert_eq!(reply.payload, b"[]");
        assert_eq!(reply.diagnostic, "dumped all");
        assert_eq!(reply.json().unwrap(), serde_json::json!([]));
    }

    #[test]
    fn control_failure_uses_errno_description() {
        for status in [2, -2] {
            let reply = normalize(RawOutcome::Control {
                status,
                output: Vec::new(),
                message: "ignored".to_string(),
            });
            assert!(!reply.is_success());
            assert_eq!(reply.status, status);
            assert_eq!(reply.diagnostic, Errno::ENOENT.desc());
        }
    }

    #[test]
    fn process_failure_keeps_output() {
        let reply = normalize(RawOutcome::Process {
            code: 1,
            output: b"rbd: error opening image".to_vec(),
        });
        assert_eq!(reply.status, 1);
        assert_eq!(reply.text(), "rbd: error opening image");
        assert!(reply.diagnostic.is_empty());
    }
}
