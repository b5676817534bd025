// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::os::unix::process::ExitStatusExt;
use std::process::{self, Stdio};

use log::{debug, warn};
use nix::fcntl::OFlag;
use shell_escape::unix::escape;

use crate::command::{ArgVector, Command};
use crate::config::Executables;
use crate::error::ConnectionError;
use crate::transport::{RawOutcome, Transport};

/// Runs the argument vector of a command as a child process.
#[derive(Debug, Clone, Default)]
pub struct ProcessTransport {
    executables: Executables,
}

impl ProcessTransport {
    pub fn new(executables: Executables) -> Self {
        ProcessTransport { executables }
    }

    /// The executable and arguments to spawn. For a remote command the local executable is
    /// `ssh`, and the program name is passed through unresolved for the remote shell to find.
    /// ssh joins everything after the destination into one shell command line, so each of those
    /// words is quoted.
    pub fn command_line(&self, argv: &ArgVector) -> (String, Vec<String>) {
        match &argv.remote {
            Some(remote) => {
                let mut args = remote.ssh_args();
                args.extend(
                    std::iter::once(&argv.program)
                        .chain(&argv.args)
                        .map(|word| escape(Cow::Borrowed(word.as_str())).into_owned()),
                );
                (self.executables.resolve("ssh").to_string(), args)
            }
            None => (
                self.executables.resolve(&argv.program).to_string(),
                argv.args.clone(),
            ),
        }
    }
}

impl ProcessTransport {
    /// Ping `host` before handing a command to ssh, so that a down host is reported as such
    /// instead of as a failure of the remote program.
    fn check_reachable(&self, host: &str) -> Result<(), ConnectionError> {
        let ping = self.executables.resolve("ping");
        let action = format!("reach host '{host}'");
        let args = ["-c".to_string(), "2".to_string(), host.to_string()];

        match run_combined(ping, &args) {
            Ok((0, _)) => Ok(()),
            Ok((code, output)) => {
                warn!("{ping} {host} exited with {code}");
                let output = String::from_utf8_lossy(&output);
                let reason = match output.trim() {
                    "" => "host is unreachable".to_string(),
                    output => format!("host is unreachable: {output}"),
                };
                Err(ConnectionError::new(action, reason))
            }
            Err(RunError::Io(e)) => Err(ConnectionError::io(action, e)),
            Err(RunError::Signal(signal)) => Err(ConnectionError::new(
                action,
                format!("{ping} terminated by signal {signal}"),
            )),
        }
    }
}

impl Transport for ProcessTransport {
    fn execute(&mut self, command: &Command) -> Result<RawOutcome, ConnectionError> {
        let Some(argv) = command.argv() else {
            return Err(ConnectionError::new(
                format!("run '{}'", command.name()),
                "it is not a process operation",
            ));
        };
        if let Some(remote) = &argv.remote {
            self.check_reachable(&remote.host)?;
        }

        let (program, args) = self.command_line(&argv);
        let action = format!("run '{program}'");
        debug!("running {program} {}", args.join(" "));

        let (code, output) = run_combined(&program, &args).map_err(|e| match e {
            RunError::Io(e) => ConnectionError::io(action.clone(), e),
            RunError::Signal(signal) => {
                ConnectionError::new(action.clone(), format!("terminated by signal {signal}"))
            }
        })?;
        debug!("{program} exited with {code}");

        Ok(RawOutcome::Process { code, output })
    }
}

enum RunError {
    Io(std::io::Error),
    Signal(i32),
}

/// Run `program` to completion with stdout and stderr sharing one pipe, so that the output
/// keeps the interleaving the program produced.
fn run_combined(program: &str, args: &[String]) -> Result<(i32, Vec<u8>), RunError> {
    let (reader, writer) =
        nix::unistd::pipe2(OFlag::O_CLOEXEC).map_err(|e| RunError::Io(e.into()))?;
    let stderr = writer.try_clone().map_err(RunError::Io)?;

    let mut child = {
        let mut command = process::Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(writer))
            .stderr(Stdio::from(stderr));
        command.spawn().map_err(RunError::Io)?
        // The write ends held by `command` are closed here, so the read below sees EOF once the
        // child exits.
    };

    let mut output = Vec::new();
    let read = File::from(reader).read_to_end(&mut output);
    let status = child.wait().map_err(RunError::Io)?;
    read.map_err(RunError::Io)?;

    match status.code() {
        Some(code) => Ok((code, output)),
        None => Err(RunError::Signal(status.signal().unwrap_or_default())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Remote;

    #[test]
    fn stdout_and_stderr_are_combined() {
        let args = vec!["-c".to_string(), "echo out; echo err >&2; exit 3".to_string()];
        let (code, output) = match run_combined("sh", &args) {
            Ok(result) => result,
            Err(_) => panic!("sh did not run"),
        };
        assert_eq!(code, 3);
        assert_eq!(String::from_utf8_lossy(&output), "out\nerr\n");
    }

    #[test]
    fn signal_is_an_error() {
        let args = vec!["-c".to_string(), "kill -9 $$".to_string()];
        assert!(matches!(run_combined("sh", &args), Err(RunError::Signal(9))));
    }

    fn remote_argv(program: &str, args: &[&str]) -> ArgVector {
        ArgVector {
            remote: Some(Remote {
                host: "node1".to_string(),
                port: 22,
                user: "root".to_string(),
            }),
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn remote_words_are_quoted() {
        let transport = ProcessTransport::default();

        let (program, args) =
            transport.command_line(&remote_argv("ceph", &["daemon", "client.x;reboot", "config"]));
        assert_eq!(program, "ssh");
        assert_eq!(
            args,
            vec!["root@node1", "ceph", "daemon", "'client.x;reboot'", "config"]
        );

        let (_, args) = transport.command_line(&remote_argv("rbd", &["map", "rbd/disk"]));
        assert_eq!(args, vec!["root@node1", "rbd", "map", "rbd/disk"]);
    }

    #[test]
    fn local_words_are_not_quoted() {
        let transport = ProcessTransport::default();
        let argv = ArgVector {
            remote: None,
            program: "ceph".to_string(),
            args: vec!["daemon".to_string(), "client.x;y".to_string()],
        };
        let (program, args) = transport.command_line(&argv);
        assert_eq!(program, "ceph");
        assert_eq!(args, vec!["daemon", "client.x;y"]);
    }

    #[test]
    fn missing_program_is_an_error() {
        let result = run_combined("/nonexistent/cephctl-test", &[]);
        assert!(matches!(result, Err(RunError::Io(_))));
    }
}
