// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use crate::commands::{load_config, Cli, HandledResult};
use crate::schema::Registry;

/// Load the configuration file and print the settings that take effect.
pub fn validate(cli: &Cli) -> HandledResult<()> {
    let config = load_config(cli)?;

    println!("ceph_conf: {}", config.ceph_conf);
    println!("client: client.{}", config.client);
    println!("release: {:?}", config.release);
    match &config.journal {
        Some(journal) => println!("journal: {journal}"),
        None => println!("journal: none"),
    }
    for program in ["ceph", "rbd", "ceph-volume", "ssh"] {
        println!("{program}: {}", config.executables.resolve(program));
    }
    println!("{} operations in the catalog", Registry::global().len());

    Ok(())
}
