// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

pub mod check;
pub mod describe;
pub mod history;
pub mod list;
pub mod run;
pub mod validate;

use {
    check::CheckArgs, describe::DescribeArgs, history::HistoryArgs, list::ListArgs,
    run::RunArgs,
};

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::schema::{Args, OperationSpec, Registry, Value};

/// A `HandledError` represents an error that has already been handled. When you call a function
/// that returns a `HandledError` or `HandledResult`, you don't need to do anything with that error,
/// other than just be aware that it happened, and return it on to your caller.
///
/// `main()` has a special responsibility: since its "caller" is, in a certain sense, the operating
/// system, `main()` must return a nonzero exit status when it gets a `HandledError`.
///
/// The primary way to construct a `HandledError` is with the `handle_err()` function, which turns a
/// generic error into a `HandledError`, and also runs some caller-provided code to handle the
/// error. That provided code would normally do something like report the error to stderr.
#[derive(Debug, PartialEq)]
pub struct HandledError {}

pub type HandledResult<T> = std::result::Result<T, HandledError>;

pub fn handled_error<T>() -> HandledResult<T> {
    HandledResult::Err(HandledError {})
}

pub trait Handle<T, F> {
    fn handle_err(self, handler: F) -> HandledResult<T>;
}

impl<T, E, F: FnOnce(E)> Handle<T, F> for std::result::Result<T, E> {
    /// Handle an error by running the provided `handler` code, giving it the error.
    ///
    /// Then, return a `HandledResult`, so that transitive callers of this function know that they
    /// do not need to do anything further to handle the error.
    fn handle_err(self, handler: F) -> HandledResult<T> {
        self.map_err(|e| {
            handler(e);
            HandledError {}
        })
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Print the command before sending it.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the operations cephctl can dispatch
    List(ListArgs),
    /// Show the parameters of an operation
    Describe(DescribeArgs),
    /// Validate arguments and print the command without sending it
    Check(CheckArgs),
    /// Run an operation
    Run(RunArgs),
    /// Show the operations recorded in the journal
    History(HistoryArgs),
    /// Check the configuration file
    Validate,
}

pub fn main(cli: &Cli) -> HandledResult<()> {
    match &cli.command {
        Commands::List(args) => list::list(args),
        Commands::Describe(args) => describe::describe(args),
        Commands::Check(args) => check::check(args),
        Commands::Run(args) => run::run(cli, args),
        Commands::History(args) => history::history(cli, args),
        Commands::Validate => validate::validate(cli),
    }
}

fn load_config(cli: &Cli) -> HandledResult<Config> {
    Config::load(cli.config.as_deref()).handle_err(|e| eprintln!("{e}"))
}

fn lookup(name: &str) -> HandledResult<&'static OperationSpec> {
    Registry::global()
        .lookup(name)
        .handle_err(|e| eprintln!("{e}; try 'cephctl list'"))
}

/// Turn `key=value` words into arguments for `operation`, coercing each value to the kind its
/// parameter declares. Keys the operation does not declare are kept as strings, so that the
/// command builder reports them.
fn parse_params(operation: &OperationSpec, params: &[String]) -> HandledResult<Args> {
    let mut args = Args::new();
    for param in params {
        let Some((key, text)) = param.split_once('=') else {
            eprintln!("expected key=value, got '{param}'");
            return handled_error();
        };
        let value = match operation.param(key) {
            Some(spec) => Value::from_text(&spec.kind, text),
            None => Value::Str(text.to_string()),
        };
        args.insert(key, value);
    }
    Ok(args)
}
