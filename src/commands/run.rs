// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::io::Write;

use clap::Args;
use log::debug;

use crate::command;
use crate::commands::{
    handled_error, load_config, lookup, parse_params, Cli, Handle, HandledResult,
};
use crate::config::Config;
use crate::error::Error;
use crate::journal::Journal;
use crate::reply::Reply;
use crate::schema::Family;
use crate::session::{ImageSession, Session, Volume};

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Operation name, e.g. osd.pool.create
    operation: String,

    /// Parameters as key=value; lists are comma separated
    params: Vec<String>,

    /// Bind a context for this pool before running; may be repeated
    #[arg(long)]
    pool: Vec<String>,
}

pub fn run(cli: &Cli, args: &RunArgs) -> HandledResult<()> {
    let config = load_config(cli)?;
    let operation = lookup(&args.operation)?;
    let params = parse_params(operation, &args.params)?;
    let command = command::build(&operation.name, &params)
        .handle_err(|e| eprintln!("invalid arguments: {e}"))?;

    if cli.verbose {
        eprintln!("{}", command.render());
    }

    let journal = open_journal(&config)?;
    let result = match operation.family {
        Family::Process { program, .. } if program == "ceph-volume" => {
            let mut volume = Volume::new(&config);
            if let Some(journal) = journal {
                volume = volume.with_journal(journal);
            }
            volume.execute(&command)
        }
        _ => {
            let mut session = connect(&config, &args.pool)?;
            if let Some(journal) = journal {
                session = session.with_journal(journal);
            }
            let result = session.execute(&command);
            session.close();
            result
        }
    };

    report(result, &mut std::io::stdout().lock(), &mut std::io::stderr())
}

fn open_journal(config: &Config) -> HandledResult<Option<Journal>> {
    match &config.journal {
        Some(path) => Journal::open(path)
            .map(Some)
            .handle_err(|e| eprintln!("could not open journal '{path}': {e}")),
        None => Ok(None),
    }
}

fn connect(config: &Config, pools: &[String]) -> HandledResult<Session> {
    let connector = crate::connector(config);
    let session = if pools.is_empty() {
        Session::connect(connector, config)
    } else {
        let pools: Vec<&str> = pools.iter().map(String::as_str).collect();
        ImageSession::connect(connector, config, &pools).map(ImageSession::into_session)
    };
    session.handle_err(|e| eprintln!("{e}"))
}

/// Print the payload of a reply to `out`. On failure the error goes to stderr, followed by
/// whatever output the command produced on `err`.
fn report(
    result: crate::Result<Reply>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> HandledResult<()> {
    match result {
        Ok(reply) => {
            out.write_all(&reply.payload)
                .and_then(|_| out.flush())
                .handle_err(|e| eprintln!("could not write output: {e}"))?;
            if !reply.diagnostic.is_empty() {
                eprintln!("{}", reply.diagnostic);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{e}");
            if let Error::Remote(remote) = &e {
                debug!("failed command: {}", remote.command);
                err.write_all(&remote.output)
                    .handle_err(|e| eprintln!("could not write output: {e}"))?;
            }
            handled_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::commands::HandledError;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn reply(payload: &str) -> crate::Result<Reply> {
        Ok(Reply {
            status: 0,
            payload: payload.as_bytes().to_vec(),
            diagnostic: String::new(),
        })
    }

    #[test]
    fn payload_is_written_to_stdout() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        assert_eq!(report(reply("[]"), &mut out, &mut err), Ok(()));
        assert_eq!(out, b"[]");
        assert!(err.is_empty());
    }

    #[test]
    fn closed_stdout_is_a_failure() {
        let mut err = Vec::new();
        assert_eq!(
            report(reply("[]"), &mut ClosedPipe, &mut err),
            Err(HandledError {})
        );
    }
}
