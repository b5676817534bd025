// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use clap::Args;

use crate::commands::{lookup, HandledResult};
use crate::schema::{OperationSpec, ParamSpec};

#[derive(Args, Debug, Clone)]
pub struct DescribeArgs {
    /// Operation name, e.g. osd.pool.create
    operation: String,
}

pub fn describe(args: &DescribeArgs) -> HandledResult<()> {
    let operation = lookup(&args.operation)?;
    print!("{}", description(operation));
    Ok(())
}

fn description(operation: &OperationSpec) -> String {
    let mut out = format!(
        "{}: {}\n  sent as {}\n",
        operation.name, operation.summary, operation.family
    );
    if operation.params.is_empty() {
        out.push_str("  no parameters\n");
    }
    for param in &operation.params {
        out.push_str(&format!("  {}\n", param_line(param)));
    }
    out
}

fn param_line(param: &ParamSpec) -> String {
    let mut line = format!("{}: {}", param.name, param.kind);
    if param.required {
        line.push_str(", required");
    }
    if let Some(default) = &param.default {
        line.push_str(&format!(", default {default}"));
    }
    if let Some(condition) = param.when {
        line.push_str(&format!(", only {condition}"));
    }
    if param.key != param.name {
        line.push_str(&format!(", sent as '{}'", param.key));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Registry;

    #[test]
    fn describes_conditions_and_defaults() {
        let op = Registry::global().lookup("volume.lvm.create").unwrap();
        let text = description(op);
        assert!(text.starts_with("volume.lvm.create: "));
        assert!(text.contains("objectstore: filestore|bluestore, required"));
        assert!(text.contains("wal: "));
        assert!(text.contains("only when objectstore=bluestore"));

        let op = Registry::global().lookup("rbd.resize").unwrap();
        assert!(description(op).contains("unit: B|K|M|G|T|P|E, default 'B'"));
    }
}
