// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use clap::Args;

use crate::commands::{handled_error, load_config, Cli, Handle, HandledResult};
use crate::journal::{Journal, Outcome};

#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// Only show the last N records
    #[arg(short = 'n', long)]
    last: Option<usize>,

    /// Only show operations that did not succeed
    #[arg(long)]
    failed: bool,
}

pub fn history(cli: &Cli, args: &HistoryArgs) -> HandledResult<()> {
    let config = load_config(cli)?;
    let Some(path) = &config.journal else {
        eprintln!("no journal is configured; set 'journal' in the config file");
        return handled_error();
    };

    let records = Journal::read_all(path).handle_err(|e| eprintln!("{e}"))?;
    let records: Vec<_> = records
        .into_iter()
        .filter(|r| !args.failed || r.outcome != Outcome::Success)
        .collect();
    let skip = match args.last {
        Some(n) => records.len().saturating_sub(n),
        None => 0,
    };

    for record in &records[skip..] {
        println!("{}", record.as_string());
    }
    Ok(())
}
