// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use crate::error::ValidationError;
use crate::schema::{catalog, validate};
use crate::schema::spec::{Arg, Condition, Family, ImagePart, OperationSpec, RemotePart};

/// The closed set of operations, keyed by name.
#[derive(Debug)]
pub struct Registry {
    operations: BTreeMap<String, OperationSpec>,
}

impl Registry {
    /// The registry built from the static catalog. It is built on first use and never changes
    /// afterwards.
    pub fn global() -> &'static Registry {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            Registry::from_operations(catalog::operations())
                .unwrap_or_else(|e| panic!("invalid operation catalog: {e}"))
        })
    }

    /// Build a registry, checking the table for internal consistency.
    pub fn from_operations(operations: Vec<OperationSpec>) -> Result<Registry, String> {
        let mut map = BTreeMap::new();
        for op in operations {
            check_operation(&op)?;
            if map.contains_key(&op.name) {
                return Err(format!("operation '{}' is declared twice", op.name));
            }
            map.insert(op.name.clone(), op);
        }
        Ok(Registry { operations: map })
    }

    pub fn lookup(&self, name: &str) -> Result<&OperationSpec, ValidationError> {
        self.operations
            .get(name)
            .ok_or_else(|| ValidationError::UnknownOperation {
                operation: name.to_string(),
            })
    }

    /// All operations in name order.
    pub fn operations(&self) -> impl Iterator<Item = &OperationSpec> {
        self.operations.values()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

fn check_operation(op: &OperationSpec) -> Result<(), String> {
    let mut seen = HashSet::new();
    for param in &op.params {
        if !seen.insert(param.name) {
            return Err(format!(
                "operation '{}' declares parameter '{}' twice",
                op.name, param.name
            ));
        }

        // Conditions are evaluated while the command is assembled in declaration order, so they
        // may only refer to parameters declared earlier.
        if let Some(condition) = param.when {
            let target = match condition {
                Condition::Present(p) | Condition::Absent(p) | Condition::Equals(p, _) => p,
            };
            if !op.params.iter().take_while(|p| p.name != param.name).any(|p| p.name == target) {
                return Err(format!(
                    "parameter '{}' of '{}' depends on '{target}', which is not declared before it",
                    param.name, op.name
                ));
            }
        }

        if let Some(default) = &param.default {
            if let Err(e) = validate::validate(param, default) {
                return Err(format!("default of '{}' in '{}' is invalid: {e}", param.name, op.name));
            }
        }

        if let Arg::SuffixOf(target) = param.arg {
            if op.param(target).is_none() {
                return Err(format!(
                    "parameter '{}' of '{}' is a suffix of unknown parameter '{target}'",
                    param.name, op.name
                ));
            }
        }
    }

    if let Family::Process { .. } = op.family {
        let has = |arg: Arg| op.params.iter().any(|p| p.arg == arg);
        if has(Arg::Image(ImagePart::Snap)) && !has(Arg::Image(ImagePart::Image)) {
            return Err(format!("operation '{}' has a snapshot without an image", op.name));
        }
        if has(Arg::Image(ImagePart::Image)) && !has(Arg::Image(ImagePart::Pool)) {
            return Err(format!("operation '{}' has an image without a pool", op.name));
        }
        let remote = op.params.iter().any(|p| matches!(p.arg, Arg::Remote(_)));
        if remote && !has(Arg::Remote(RemotePart::Host)) {
            return Err(format!("operation '{}' has ssh options without a host", op.name));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::spec::{Kind, ParamSpec};

    #[test]
    fn catalog_is_consistent() {
        let registry = Registry::from_operations(catalog::operations()).unwrap();
        assert!(registry.len() > 100);
        assert!(registry.lookup("osd.pool.create").is_ok());
        assert!(registry.lookup("rbd.snap.create").is_ok());
        assert!(registry.lookup("volume.lvm.zap").is_ok());
        assert!(registry.lookup("volume.lvm.zap-osd").is_ok());
    }

    #[test]
    fn operations_are_in_name_order() {
        let names: Vec<&str> = Registry::global()
            .operations()
            .map(|op| op.name.as_str())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn duplicate_operation_is_rejected() {
        let op = OperationSpec::control("status", "", vec![]);
        assert!(Registry::from_operations(vec![op.clone(), op]).is_err());
    }

    #[test]
    fn duplicate_parameter_is_rejected() {
        let op = OperationSpec::control(
            "osd find",
            "",
            vec![
                ParamSpec::new("id", Kind::Boolean),
                ParamSpec::new("id", Kind::Boolean),
            ],
        );
        assert!(Registry::from_operations(vec![op]).is_err());
    }

    #[test]
    fn forward_condition_is_rejected() {
        let op = OperationSpec::control(
            "osd df",
            "",
            vec![
                ParamSpec::new("filter", Kind::Boolean).when(Condition::Present("filter_by")),
                ParamSpec::new("filter_by", Kind::Boolean),
            ],
        );
        assert!(Registry::from_operations(vec![op]).is_err());
    }
}
