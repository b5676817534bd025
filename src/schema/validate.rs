// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! Checks a single caller-supplied value against the declared kind of a parameter.
//!
//! The representation is always checked first, so a string given for an integer parameter is a
//! type mismatch and never a range error. Every function here is pure.

use crate::error::{ParamPath, ValidationError};
use crate::schema::spec::{Bounds, Charset, IdentifierKind, Kind, ParamSpec};
use crate::schema::value::Value;

/// Characters allowed in a piece of an image spec. These also reach a remote shell through ssh.
const SPEC_CHARS: Charset = Charset::Only("A-Za-z0-9-_.");

/// Entity types accepted in `<type>.<id>` names.
pub const ENTITY_TYPES: &[&str] = &["mon", "osd", "mds", "mgr", "client"];

/// Validate `value` for `param`, returning the value to place in the command.
pub fn validate(param: &ParamSpec, value: &Value) -> Result<Value, ValidationError> {
    validate_kind(&param.kind, &ParamPath::new(param.name), value)
}

pub fn validate_kind(
    kind: &Kind,
    path: &ParamPath,
    value: &Value,
) -> Result<Value, ValidationError> {
    match (kind, value) {
        (Kind::Integer(bounds), Value::Int(i)) => {
            check_bounds(bounds, *i, path).map(|_| value.clone())
        }
        (Kind::Float(bounds), Value::Float(f)) => {
            check_finite(bounds, *f, path)?;
            check_bounds(bounds, *f, path).map(|_| value.clone())
        }
        // An integer literal is an acceptable float.
        (Kind::Float(bounds), Value::Int(i)) => {
            let f = *i as f64;
            check_bounds(bounds, f, path).map(|_| Value::Float(f))
        }
        (Kind::Boolean, Value::Bool(_)) => Ok(value.clone()),
        (Kind::String(charset), Value::Str(s)) => {
            check_charset(charset, s, path).map(|_| value.clone())
        }
        (Kind::Enum(choices), Value::Str(s)) => {
            if choices.contains(&s.as_str()) {
                Ok(value.clone())
            } else {
                Err(ValidationError::InvalidChoice {
                    param: path.clone(),
                    value: s.clone(),
                    choices: choices.to_vec(),
                })
            }
        }
        (Kind::Identifier(id), Value::Str(s)) => check_identifier(*id, s)
            .map(|_| value.clone())
            .map_err(|reason| ValidationError::Format {
                param: path.clone(),
                value: s.clone(),
                reason,
            }),
        (Kind::StringList(element), Value::List(items)) => {
            let mut checked = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                checked.push(validate_kind(element, &path.element(i), item)?);
            }
            Ok(Value::List(checked))
        }
        (kind, value) => Err(ValidationError::TypeMismatch {
            param: path.clone(),
            expected: kind.type_name(),
            found: value.type_name(),
        }),
    }
}

fn check_bounds<T>(bounds: &Bounds<T>, v: T, path: &ParamPath) -> Result<(), ValidationError>
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    if bounds.contains(v) {
        Ok(())
    } else {
        Err(ValidationError::Range {
            param: path.clone(),
            value: v.to_string(),
            bounds: bounds.to_string(),
        })
    }
}

/// An unbounded side still excludes infinities, which have no JSON representation.
fn check_finite(bounds: &Bounds<f64>, f: f64, path: &ParamPath) -> Result<(), ValidationError> {
    if f.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::Range {
            param: path.clone(),
            value: f.to_string(),
            bounds: bounds.to_string(),
        })
    }
}

fn check_charset(charset: &Charset, s: &str, path: &ParamPath) -> Result<(), ValidationError> {
    match s.chars().find(|c| !charset.allows(*c)) {
        None => Ok(()),
        Some(c) => Err(ValidationError::Format {
            param: path.clone(),
            value: s.to_string(),
            reason: format!("character '{c}' is not allowed"),
        }),
    }
}

/// Check an identifier grammar, returning a reason on failure.
pub fn check_identifier(id: IdentifierKind, s: &str) -> Result<(), String> {
    match id {
        IdentifierKind::Pgid => check_pgid(s),
        IdentifierKind::OsdName => check_osd_name(s),
        IdentifierKind::OsdSelector => match s {
            "all" | "any" => Ok(()),
            _ => check_osd_name(s),
        },
        IdentifierKind::EntityName => check_entity_name(s, ENTITY_TYPES),
        IdentifierKind::DaemonName => {
            if s.split_once('.').map(|(t, _)| t) == Some("auth") {
                check_entity_name(s, &["auth"])
            } else {
                check_entity_name(s, ENTITY_TYPES)
            }
        }
        IdentifierKind::TellTarget => {
            if s.starts_with(|c: char| c.is_ascii_digit()) {
                check_pgid(s)
            } else {
                check_entity_name(s, ENTITY_TYPES)
            }
        }
        IdentifierKind::SpecComponent => {
            check_argument(s)?;
            match s.chars().find(|c| !SPEC_CHARS.allows(*c)) {
                Some(c) => Err(format!("'{c}' is not allowed in a name")),
                None => Ok(()),
            }
        }
        IdentifierKind::Argument => check_argument(s),
    }
}

fn check_argument(s: &str) -> Result<(), String> {
    if s.is_empty() {
        Err("must not be empty".to_string())
    } else if s.starts_with('-') {
        Err("must not start with '-'".to_string())
    } else {
        Ok(())
    }
}

fn check_pgid(s: &str) -> Result<(), String> {
    let Some((pool, pg)) = s.split_once('.') else {
        return Err("expected <pool id>.<pg number>".to_string());
    };
    if pool.is_empty() || !pool.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("pool id '{pool}' is not a number"));
    }
    if pg.is_empty() || !pg.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("pg number '{pg}' is not hexadecimal"));
    }
    Ok(())
}

fn check_osd_name(s: &str) -> Result<(), String> {
    let id = s.strip_prefix("osd.").unwrap_or(s);
    match id.parse::<u32>() {
        Ok(_) if !id.starts_with('+') => Ok(()),
        _ => Err("expected osd.<n> or <n>".to_string()),
    }
}

fn check_entity_name(s: &str, types: &[&str]) -> Result<(), String> {
    let Some((kind, id)) = s.split_once('.') else {
        return Err("expected <type>.<id>".to_string());
    };
    if !types.contains(&kind) {
        return Err(format!("type '{kind}' is not one of: {}", types.join("|")));
    }
    if id.is_empty() {
        return Err("id must not be empty".to_string());
    }
    if kind == "osd" && id != "*" && (id.parse::<u32>().is_err() || id.starts_with('+')) {
        return Err(format!("osd id '{id}' is not a number"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> ParamPath {
        ParamPath::new("p")
    }

    #[test]
    fn charset_ranges_and_literals() {
        let good = Charset::Only("A-Za-z0-9-_.");
        for c in ['a', 'Z', '5', '-', '_', '.'] {
            assert!(good.allows(c), "{c}");
        }
        for c in ['/', ' ', '@', ':'] {
            assert!(!good.allows(c), "{c}");
        }

        let fsid = Charset::Only("A-Fa-f0-9-");
        assert!(fsid.allows('-'));
        assert!(fsid.allows('e'));
        assert!(!fsid.allows('g'));
    }

    #[test]
    fn identifiers() {
        assert!(check_identifier(IdentifierKind::Pgid, "1.2f").is_ok());
        assert!(check_identifier(IdentifierKind::Pgid, "1.xyz").is_err());
        assert!(check_identifier(IdentifierKind::Pgid, "12").is_err());

        assert!(check_identifier(IdentifierKind::OsdName, "osd.3").is_ok());
        assert!(check_identifier(IdentifierKind::OsdName, "3").is_ok());
        assert!(check_identifier(IdentifierKind::OsdName, "mon.a").is_err());

        assert!(check_identifier(IdentifierKind::EntityName, "client.admin").is_ok());
        assert!(check_identifier(IdentifierKind::EntityName, "osd.*").is_ok());
        assert!(check_identifier(IdentifierKind::EntityName, "osd.x").is_err());
        assert!(check_identifier(IdentifierKind::EntityName, "auth.x").is_err());
        assert!(check_identifier(IdentifierKind::DaemonName, "auth.x").is_ok());

        assert!(check_identifier(IdentifierKind::TellTarget, "2.1a").is_ok());
        assert!(check_identifier(IdentifierKind::TellTarget, "mon.*").is_ok());

        assert!(check_identifier(IdentifierKind::SpecComponent, "img").is_ok());
        assert!(check_identifier(IdentifierKind::SpecComponent, "a/b").is_err());
        assert!(check_identifier(IdentifierKind::SpecComponent, "a@b").is_err());
        assert!(check_identifier(IdentifierKind::SpecComponent, "--x").is_err());
        assert!(check_identifier(IdentifierKind::SpecComponent, "vm-1_disk.0").is_ok());
        for bad in ["a;b", "a b", "$(id)", "a'b", "a|b"] {
            assert!(check_identifier(IdentifierKind::SpecComponent, bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn nan_is_out_of_range() {
        let err = validate_kind(&Kind::Float(Bounds::any()), &path(), &Value::Float(f64::NAN));
        assert!(matches!(err, Err(ValidationError::Range { .. })));
    }

    #[test]
    fn infinity_is_out_of_range() {
        for f in [f64::INFINITY, f64::NEG_INFINITY] {
            let err = validate_kind(&Kind::Float(Bounds::any()), &path(), &Value::Float(f));
            assert!(matches!(err, Err(ValidationError::Range { .. })), "{f}");
        }
    }

    #[test]
    fn type_checked_before_range() {
        let err = validate_kind(
            &Kind::Integer(Bounds::at_least(0)),
            &path(),
            &Value::Str("-1".to_string()),
        );
        assert!(matches!(err, Err(ValidationError::TypeMismatch { .. })));
    }
}
