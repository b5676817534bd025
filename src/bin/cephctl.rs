// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use clap::Parser;

use cephctl_lib::commands::{self, Cli};

/// The cephctl binary validates and dispatches administrative commands to the cluster.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("CEPHCTL_LOG", "warn"))
        .init();

    let args = Cli::parse();

    if commands::main(&args).is_err() {
        std::process::exit(1);
    }
}
