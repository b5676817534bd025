// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::fmt;

use crate::schema::value::Value;

/// Inclusive numeric bounds. Either side may be open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn any() -> Self {
        Bounds {
            min: None,
            max: None,
        }
    }

    pub fn at_least(min: T) -> Self {
        Bounds {
            min: Some(min),
            max: None,
        }
    }

    pub fn between(min: T, max: T) -> Self {
        Bounds {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Written so that incomparable values (NaN) are rejected.
    pub fn contains(&self, v: T) -> bool {
        let above_min = match self.min {
            Some(min) => v >= min,
            None => v.partial_cmp(&v).is_some(),
        };
        let below_max = match self.max {
            Some(max) => v <= max,
            None => v.partial_cmp(&v).is_some(),
        };
        above_min && below_max
    }
}

impl<T: fmt::Display> fmt::Display for Bounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.min, &self.max) {
            (Some(min), Some(max)) => write!(f, "[{min}, {max}]"),
            (Some(min), None) => write!(f, "[{min}, inf)"),
            (None, Some(max)) => write!(f, "(-inf, {max}]"),
            (None, None) => write!(f, "(-inf, inf)"),
        }
    }
}

/// A whitelist of characters, written the way a regex character class body is written, e.g.
/// `"A-Za-z0-9-_."`. A `-` that does not sit between two characters is literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Charset {
    Any,
    Only(&'static str),
}

impl Charset {
    pub fn allows(&self, c: char) -> bool {
        let class = match self {
            Charset::Any => return true,
            Charset::Only(class) => class,
        };
        if class.is_empty() {
            return true;
        }

        let chars: Vec<char> = class.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            if i + 2 < chars.len() && chars[i + 1] == '-' {
                if (chars[i]..=chars[i + 2]).contains(&c) {
                    return true;
                }
                i += 3;
            } else {
                if chars[i] == c {
                    return true;
                }
                i += 1;
            }
        }
        false
    }
}

/// Strings with a grammar beyond a character whitelist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IdentifierKind {
    /// `<pool id>.<pg number in hex>`, e.g. `1.2f`.
    Pgid,
    /// `osd.<n>` or `<n>`.
    OsdName,
    /// An OSD name, or `all`/`any` to select every OSD.
    OsdSelector,
    /// `<type>.<id>` for a cluster entity such as `osd.3` or `client.admin`.
    EntityName,
    /// Like `EntityName`, also accepting the `auth` type of the admin socket.
    DaemonName,
    /// An entity name or a placement group id.
    TellTarget,
    /// A pool, image or snapshot name placed into an `rbd` image spec. Must not contain `/` or
    /// `@` and must not look like an option.
    SpecComponent,
    /// A free-form value passed to an external program. Must not be empty or look like an
    /// option.
    Argument,
}

/// The declared type of a parameter, along with its constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    Integer(Bounds<i64>),
    Float(Bounds<f64>),
    Boolean,
    String(Charset),
    StringList(Box<Kind>),
    Enum(&'static [&'static str]),
    Identifier(IdentifierKind),
}

impl Kind {
    /// Human readable name for error messages and `describe` output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Kind::Integer(_) => "an integer",
            Kind::Float(_) => "a float",
            Kind::Boolean => "a boolean",
            Kind::String(_) | Kind::Enum(_) | Kind::Identifier(_) => "a string",
            Kind::StringList(_) => "a list",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Integer(b) => write!(f, "int {b}"),
            Kind::Float(b) => write!(f, "float {b}"),
            Kind::Boolean => write!(f, "bool"),
            Kind::String(Charset::Any) => write!(f, "string"),
            Kind::String(Charset::Only(class)) => write!(f, "string [{class}]"),
            Kind::StringList(element) => write!(f, "list of {element}"),
            Kind::Enum(choices) => write!(f, "{}", choices.join("|")),
            Kind::Identifier(id) => write!(f, "{id:?}"),
        }
    }
}

/// Which piece of an `rbd` image spec (`pool/image@snap`) a parameter provides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImagePart {
    Pool,
    Image,
    Snap,
}

/// Which piece of an `ssh [-p port] user@host` prefix a parameter provides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RemotePart {
    Host,
    Port,
    User,
}

/// How a parameter is placed on the command line of an external program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg {
    /// The value itself; lists contribute one token per element.
    Positional,
    /// `<flag> <value>`.
    Flag(&'static str),
    /// `<flag>` alone when the boolean is set.
    Switch(&'static str),
    /// `--<value>`, for choices that select a mode flag such as `--bluestore`.
    Choice,
    /// One part of the single `pool/image[@snap]` token.
    Image(ImagePart),
    /// Appended to the token of the named parameter, e.g. a size unit.
    SuffixOf(&'static str),
    /// Part of the `ssh` prefix; when no host is given the prefix is omitted entirely.
    Remote(RemotePart),
}

/// A condition on another parameter under which a parameter takes part in a command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    Present(&'static str),
    Absent(&'static str),
    Equals(&'static str, &'static str),
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Present(p) => write!(f, "with {p}"),
            Condition::Absent(p) => write!(f, "without {p}"),
            Condition::Equals(p, v) => write!(f, "when {p}={v}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: Kind,
    pub required: bool,
    pub default: Option<Value>,
    /// The key used in a control-channel command.
    pub key: &'static str,
    /// The encoding used in an external-process command.
    pub arg: Arg,
    pub when: Option<Condition>,
}

impl ParamSpec {
    pub fn new(name: &'static str, kind: Kind) -> Self {
        ParamSpec {
            name,
            kind,
            required: false,
            default: None,
            key: name,
            arg: Arg::Positional,
            when: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn key(mut self, key: &'static str) -> Self {
        self.key = key;
        self
    }

    pub fn arg(mut self, arg: Arg) -> Self {
        self.arg = arg;
        self
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.when = Some(condition);
        self
    }
}

/// How an operation reaches the cluster.
#[derive(Debug, Clone, PartialEq)]
pub enum Family {
    /// A monitor command submitted over the control channel, e.g. `"osd pool create"`.
    Control { prefix: &'static str },
    /// An external program, e.g. `rbd` with subcommand `["snap", "create"]`. The trailer follows
    /// the encoded parameters, as in `ceph daemon <name> config show`.
    Process {
        program: &'static str,
        subcommand: &'static [&'static str],
        trailer: &'static [&'static str],
    },
}

impl Family {
    pub fn is_control(&self) -> bool {
        matches!(self, Family::Control { .. })
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Control { prefix } => write!(f, "control '{prefix}'"),
            Family::Process {
                program,
                subcommand,
                trailer,
            } => {
                write!(f, "process '{program}")?;
                for word in subcommand.iter() {
                    write!(f, " {word}")?;
                }
                if !trailer.is_empty() {
                    write!(f, " ... {}", trailer.join(" "))?;
                }
                write!(f, "'")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperationSpec {
    pub name: String,
    pub family: Family,
    pub params: Vec<ParamSpec>,
    pub summary: &'static str,
}

impl OperationSpec {
    /// A control-channel operation. The name is the prefix with spaces replaced by dots.
    pub fn control(prefix: &'static str, summary: &'static str, params: Vec<ParamSpec>) -> Self {
        OperationSpec {
            name: prefix.replace(' ', "."),
            family: Family::Control { prefix },
            params,
            summary,
        }
    }

    pub fn process(
        name: &str,
        program: &'static str,
        subcommand: &'static [&'static str],
        summary: &'static str,
        params: Vec<ParamSpec>,
    ) -> Self {
        OperationSpec {
            name: name.to_string(),
            family: Family::Process {
                program,
                subcommand,
                trailer: &[],
            },
            params,
            summary,
        }
    }

    /// Words placed after the encoded parameters of a process operation.
    pub fn trailer(mut self, words: &'static [&'static str]) -> Self {
        if let Family::Process { trailer, .. } = &mut self.family {
            *trailer = words;
        }
        self
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}
