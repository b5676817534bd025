// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! Turning a named operation and its arguments into a validated, canonical command.
//!
//! A [`Command`] is only ever produced by [`build`], so every field it holds has passed
//! validation. It renders to the monitor command JSON for control-channel operations, or to an
//! [`ArgVector`] for operations that run an external program.

use std::collections::BTreeMap;
use std::fmt;

use log::warn;

use crate::error::{ParamPath, ValidationError};
use crate::schema::{
    validate, Arg, Args, Condition, Family, ImagePart, Kind, OperationSpec, ParamSpec, Registry,
    RemotePart, Value,
};

/// The default ssh port; `-p` is only passed for other ports.
pub const SSH_PORT: i64 = 22;

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    operation: &'static OperationSpec,
    fields: BTreeMap<&'static str, Value>,
}

/// Look up `name`, validate `args` against it, and assemble the command.
///
/// Parameters are visited in declaration order and the first problem found is returned. Nothing
/// outside this function is touched, so calling it twice with the same arguments yields equal
/// commands.
pub fn build(name: &str, args: &Args) -> Result<Command, ValidationError> {
    let operation = Registry::global().lookup(name)?;

    for key in args.names() {
        if operation.param(key).is_none() {
            return Err(ValidationError::UnknownParameter {
                operation: operation.name.clone(),
                param: key.to_string(),
            });
        }
    }

    let mut fields = BTreeMap::new();
    for param in &operation.params {
        let supplied = args.get(param.name).filter(|v| !v.is_unset_flag());

        if let Some(condition) = param.when {
            if !condition_holds(condition, &fields) {
                if supplied.is_some() {
                    warn!(
                        "{}: ignoring '{}', it only applies {condition}",
                        operation.name, param.name
                    );
                }
                continue;
            }
        }

        match (supplied, &param.default) {
            (Some(value), _) => {
                fields.insert(param.name, validate::validate(param, value)?);
            }
            (None, _) if param.required => {
                return Err(ValidationError::MissingRequiredParameter {
                    operation: operation.name.clone(),
                    param: param.name.to_string(),
                });
            }
            (None, Some(default)) => {
                fields.insert(param.name, default.clone());
            }
            (None, None) => {}
        }
    }

    Ok(Command { operation, fields })
}

fn condition_holds(condition: Condition, fields: &BTreeMap<&'static str, Value>) -> bool {
    match condition {
        Condition::Present(p) => fields.contains_key(p),
        Condition::Absent(p) => !fields.contains_key(p),
        Condition::Equals(p, expected) => fields.get(p).and_then(|v| v.as_str()) == Some(expected),
    }
}

impl Command {
    pub fn operation(&self) -> &'static OperationSpec {
        self.operation
    }

    pub fn name(&self) -> &str {
        &self.operation.name
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    /// The monitor command object: `prefix`, `format` and one key per field. `None` for
    /// operations that run an external program.
    pub fn mon_command(&self) -> Option<serde_json::Value> {
        let Family::Control { prefix } = self.operation.family else {
            return None;
        };

        let mut cmd = serde_json::Map::new();
        cmd.insert("prefix".to_string(), prefix.into());
        cmd.insert("format".to_string(), "json".into());
        for param in &self.operation.params {
            if let Some(value) = self.fields.get(param.name) {
                let value = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
                cmd.insert(param.key.to_string(), value);
            }
        }
        Some(serde_json::Value::Object(cmd))
    }

    /// The argument vector to run. `None` for control-channel operations.
    pub fn argv(&self) -> Option<ArgVector> {
        let Family::Process {
            program,
            subcommand,
            trailer,
        } = self.operation.family
        else {
            return None;
        };

        let mut args: Vec<String> = subcommand.iter().map(|s| s.to_string()).collect();
        for param in &self.operation.params {
            let Some(value) = self.fields.get(param.name) else {
                continue;
            };
            match param.arg {
                Arg::Positional => match value {
                    Value::List(items) => args.extend(items.iter().map(|v| v.to_token())),
                    _ => args.push(self.token(param, value)),
                },
                Arg::Flag(flag) => {
                    args.push(flag.to_string());
                    args.push(self.token(param, value));
                }
                Arg::Switch(flag) => {
                    if value == &Value::Bool(true) {
                        args.push(flag.to_string());
                    }
                }
                Arg::Choice => args.push(format!("--{}", value.to_token())),
                Arg::Image(ImagePart::Pool) => args.push(self.image_spec()),
                Arg::Image(_) | Arg::SuffixOf(_) | Arg::Remote(_) => {}
            }
        }
        args.extend(trailer.iter().map(|s| s.to_string()));

        Some(ArgVector {
            remote: self.remote(),
            program: program.to_string(),
            args,
        })
    }

    /// The value's token, with any suffix declared for it appended.
    fn token(&self, param: &ParamSpec, value: &Value) -> String {
        let mut token = value.to_token();
        for other in &self.operation.params {
            if other.arg == Arg::SuffixOf(param.name) {
                if let Some(suffix) = self.fields.get(other.name) {
                    token.push_str(&suffix.to_token());
                }
            }
        }
        token
    }

    fn part(&self, arg: Arg) -> Option<String> {
        self.operation
            .params
            .iter()
            .find(|p| p.arg == arg)
            .and_then(|p| self.fields.get(p.name))
            .map(|v| v.to_token())
    }

    fn image_spec(&self) -> String {
        let mut spec = self.part(Arg::Image(ImagePart::Pool)).unwrap_or_default();
        if let Some(image) = self.part(Arg::Image(ImagePart::Image)) {
            spec.push('/');
            spec.push_str(&image);
        }
        if let Some(snap) = self.part(Arg::Image(ImagePart::Snap)) {
            spec.push('@');
            spec.push_str(&snap);
        }
        spec
    }

    fn remote(&self) -> Option<Remote> {
        let host = self.part(Arg::Remote(RemotePart::Host))?;
        let port = match self
            .operation
            .params
            .iter()
            .find(|p| p.arg == Arg::Remote(RemotePart::Port))
            .and_then(|p| self.fields.get(p.name))
        {
            Some(Value::Int(port)) => *port,
            _ => SSH_PORT,
        };
        Some(Remote {
            host,
            port,
            user: self
                .part(Arg::Remote(RemotePart::User))
                .unwrap_or_else(|| "root".to_string()),
        })
    }

    /// The command as sent: the JSON object, or the joined argument vector.
    pub fn render(&self) -> String {
        if let Some(json) = self.mon_command() {
            json.to_string()
        } else if let Some(argv) = self.argv() {
            argv.to_argv().join(" ")
        } else {
            self.operation.name.clone()
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Where to run a process command through ssh.
#[derive(Debug, Clone, PartialEq)]
pub struct Remote {
    pub host: String,
    pub port: i64,
    pub user: String,
}

impl Remote {
    /// The ssh arguments that precede the remote command.
    pub fn ssh_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.port != SSH_PORT {
            args.push("-p".to_string());
            args.push(self.port.to_string());
        }
        args.push(format!("{}@{}", self.user, self.host));
        args
    }
}

/// A process command: the program name as the catalog knows it, its arguments, and whether it
/// runs through ssh. The program is resolved to an executable path by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgVector {
    pub remote: Option<Remote>,
    pub program: String,
    pub args: Vec<String>,
}

impl ArgVector {
    /// The full command line, including the `ssh` prefix if there is one.
    pub fn to_argv(&self) -> Vec<String> {
        let mut argv = Vec::new();
        if let Some(remote) = &self.remote {
            argv.push("ssh".to_string());
            argv.extend(remote.ssh_args());
        }
        argv.push(self.program.clone());
        argv.extend(self.args.iter().cloned());
        argv
    }

    /// Recover the arguments of `operation` from a full command line as produced by
    /// [`ArgVector::to_argv`]. The result can be passed back to [`build`].
    pub fn parse(operation: &OperationSpec, argv: &[String]) -> Result<Args, ValidationError> {
        let Family::Process {
            program,
            subcommand,
            trailer,
        } = operation.family
        else {
            return Err(malformed(&operation.name, "not a process operation"));
        };

        let mut args = Args::new();
        let mut tokens = argv;

        if tokens.first().map(String::as_str) == Some("ssh") {
            tokens = &tokens[1..];
            if tokens.first().map(String::as_str) == Some("-p") {
                let port = tokens.get(1).ok_or_else(|| malformed("-p", "missing port"))?;
                set_part(&mut args, operation, RemotePart::Port, port);
                tokens = &tokens[2..];
            }
            let destination = tokens.first().ok_or_else(|| malformed("ssh", "missing host"))?;
            let (user, host) = destination
                .split_once('@')
                .ok_or_else(|| malformed(destination, "expected user@host"))?;
            set_part(&mut args, operation, RemotePart::User, user);
            set_part(&mut args, operation, RemotePart::Host, host);
            tokens = &tokens[1..];
        }

        let expected: Vec<&str> = std::iter::once(program)
            .chain(subcommand.iter().copied())
            .collect();
        if tokens.len() < expected.len() || tokens[..expected.len()] != expected[..] {
            let reason = format!("expected '{}'", expected.join(" "));
            return Err(malformed(&tokens.join(" "), &reason));
        }
        tokens = &tokens[expected.len()..];

        if !trailer.is_empty() {
            let split = tokens.len().checked_sub(trailer.len());
            match split {
                Some(at) if tokens[at..] == trailer[..] => tokens = &tokens[..at],
                _ => return Err(malformed(&tokens.join(" "), "missing trailing words")),
            }
        }

        let flag_of = |token: &str| {
            operation.params.iter().find(|p| match p.arg {
                Arg::Flag(f) | Arg::Switch(f) => f == token,
                _ => false,
            })
        };
        let mut positional = operation
            .params
            .iter()
            .filter(|p| matches!(p.arg, Arg::Positional | Arg::Image(ImagePart::Pool)));

        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i].as_str();
            i += 1;

            if let Some(param) = flag_of(token) {
                match param.arg {
                    Arg::Switch(_) => args.insert(param.name, Value::Bool(true)),
                    _ => {
                        let text = tokens
                            .get(i)
                            .ok_or_else(|| malformed(token, "missing value"))?;
                        i += 1;
                        insert_with_suffix(&mut args, operation, param, text);
                    }
                }
                continue;
            }

            if let Some(mode) = token.strip_prefix("--") {
                if let Some(param) = operation.params.iter().find(|p| p.arg == Arg::Choice) {
                    args.insert(param.name, Value::Str(mode.to_string()));
                    continue;
                }
            }

            let param = positional
                .next()
                .ok_or_else(|| malformed(token, "unexpected argument"))?;
            match param.arg {
                Arg::Image(_) => parse_image_spec(&mut args, operation, token),
                _ if matches!(param.kind, Kind::StringList(_)) => {
                    // A list takes every remaining token up to the next declared flag.
                    let mut items = vec![token.to_string()];
                    while i < tokens.len() && flag_of(tokens[i].as_str()).is_none() {
                        items.push(tokens[i].clone());
                        i += 1;
                    }
                    let element = match &param.kind {
                        Kind::StringList(element) => element.as_ref(),
                        kind => kind,
                    };
                    let values = items.iter().map(|t| Value::from_text(element, t)).collect();
                    args.insert(param.name, Value::List(values));
                }
                _ => insert_with_suffix(&mut args, operation, param, token),
            }
        }

        Ok(args)
    }
}

fn malformed(value: &str, reason: &str) -> ValidationError {
    ValidationError::Format {
        param: ParamPath::new("argv"),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn set_part(args: &mut Args, operation: &OperationSpec, part: RemotePart, text: &str) {
    if let Some(param) = operation.params.iter().find(|p| p.arg == Arg::Remote(part)) {
        args.insert(param.name, Value::from_text(&param.kind, text));
    }
}

/// Insert a token, first splitting off a trailing choice of the parameter's suffix, if it has
/// one (`10G` becomes `size = 10` and `unit = "G"`).
fn insert_with_suffix(args: &mut Args, operation: &OperationSpec, param: &ParamSpec, text: &str) {
    let suffix = operation
        .params
        .iter()
        .find(|p| p.arg == Arg::SuffixOf(param.name));

    let mut text = text;
    if let Some(suffix) = suffix {
        if let Kind::Enum(choices) = suffix.kind {
            if let Some(choice) = choices.iter().find(|c| text.ends_with(**c)) {
                text = &text[..text.len() - choice.len()];
                args.insert(suffix.name, Value::Str(choice.to_string()));
            }
        }
    }
    args.insert(param.name, Value::from_text(&param.kind, text));
}

fn parse_image_spec(args: &mut Args, operation: &OperationSpec, token: &str) {
    let (pool, rest) = token.split_once('/').unwrap_or((token, ""));
    let (image, snap) = match rest.split_once('@') {
        Some((image, snap)) => (image, Some(snap)),
        None => (rest, None),
    };

    let mut set = |part: ImagePart, text: &str| {
        if let Some(param) = operation.params.iter().find(|p| p.arg == Arg::Image(part)) {
            args.insert(param.name, Value::from_text(&param.kind, text));
        }
    };
    set(ImagePart::Pool, pool);
    if !rest.is_empty() {
        set(ImagePart::Image, image);
    }
    if let Some(snap) = snap {
        set(ImagePart::Snap, snap);
    }
}
