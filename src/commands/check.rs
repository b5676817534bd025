// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use clap::Args;

use crate::command;
use crate::commands::{lookup, parse_params, Handle, HandledResult};

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Operation name, e.g. osd.pool.create
    operation: String,

    /// Parameters as key=value; lists are comma separated
    params: Vec<String>,
}

/// Validate the arguments and print the command that `run` would send, without sending it.
pub fn check(args: &CheckArgs) -> HandledResult<()> {
    let operation = lookup(&args.operation)?;
    let params = parse_params(operation, &args.params)?;
    let command = command::build(&operation.name, &params)
        .handle_err(|e| eprintln!("invalid arguments: {e}"))?;

    println!("{}", command.render());
    Ok(())
}
