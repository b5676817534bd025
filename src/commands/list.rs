// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use clap::{Args, ValueEnum};

use crate::commands::HandledResult;
use crate::schema::{Family, Registry};

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Only list operations of this family
    #[arg(long, value_enum)]
    family: Option<FamilyFilter>,

    /// Only list operations whose name starts with this prefix
    prefix: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
enum FamilyFilter {
    Control,
    Process,
}

pub fn list(args: &ListArgs) -> HandledResult<()> {
    let operations = Registry::global().operations().filter(|op| {
        let family = match (&args.family, &op.family) {
            (None, _) => true,
            (Some(FamilyFilter::Control), Family::Control { .. }) => true,
            (Some(FamilyFilter::Process), Family::Process { .. }) => true,
            _ => false,
        };
        let prefix = match &args.prefix {
            Some(prefix) => op.name.starts_with(prefix.as_str()),
            None => true,
        };
        family && prefix
    });

    let operations: Vec<_> = operations.collect();
    let width = operations.iter().map(|op| op.name.len()).max().unwrap_or(0);
    for op in operations {
        println!("{:width$}  {}", op.name, op.summary);
    }
    Ok(())
}
