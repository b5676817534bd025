// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::{error, fmt, io};

/// Identifies the argument a validation error refers to. For list arguments, `index` names the
/// first offending element.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamPath {
    pub name: String,
    pub index: Option<usize>,
}

impl ParamPath {
    pub fn new(name: &str) -> Self {
        ParamPath {
            name: name.to_string(),
            index: None,
        }
    }

    pub fn element(&self, index: usize) -> Self {
        ParamPath {
            name: self.name.clone(),
            index: Some(index),
        }
    }
}

impl fmt::Display for ParamPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}[{i}]", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A caller-supplied argument was rejected before anything was sent anywhere.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The value has the wrong representation, e.g. a string where an integer was declared.
    TypeMismatch {
        param: ParamPath,
        expected: &'static str,
        found: &'static str,
    },

    /// A numeric value is outside its declared inclusive bounds.
    Range {
        param: ParamPath,
        value: String,
        bounds: String,
    },

    /// A string is not a member of the declared set of choices.
    InvalidChoice {
        param: ParamPath,
        value: String,
        choices: Vec<&'static str>,
    },

    /// A string contains characters outside its whitelist, or does not follow the grammar of an
    /// identifier.
    Format {
        param: ParamPath,
        value: String,
        reason: String,
    },

    MissingRequiredParameter {
        operation: String,
        param: String,
    },

    UnknownOperation {
        operation: String,
    },

    /// An argument was given that the operation does not declare.
    UnknownParameter {
        operation: String,
        param: String,
    },
}

impl ValidationError {
    /// The name of the parameter this error is about, if any.
    pub fn param(&self) -> Option<&str> {
        match self {
            ValidationError::TypeMismatch { param, .. }
            | ValidationError::Range { param, .. }
            | ValidationError::InvalidChoice { param, .. }
            | ValidationError::Format { param, .. } => Some(&param.name),
            ValidationError::MissingRequiredParameter { param, .. }
            | ValidationError::UnknownParameter { param, .. } => Some(param),
            ValidationError::UnknownOperation { .. } => None,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::TypeMismatch {
                param,
                expected,
                found,
            } => write!(f, "'{param}' must be {expected}, got {found}"),
            ValidationError::Range {
                param,
                value,
                bounds,
            } => write!(f, "'{param}' value {value} is outside {bounds}"),
            ValidationError::InvalidChoice {
                param,
                value,
                choices,
            } => write!(
                f,
                "'{param}' value '{value}' is not one of: {}",
                choices.join("|")
            ),
            ValidationError::Format {
                param,
                value,
                reason,
            } => write!(f, "'{param}' value '{value}' is malformed: {reason}"),
            ValidationError::MissingRequiredParameter { operation, param } => {
                write!(f, "'{operation}' requires parameter '{param}'")
            }
            ValidationError::UnknownOperation { operation } => {
                write!(f, "unknown operation '{operation}'")
            }
            ValidationError::UnknownParameter { operation, param } => {
                write!(f, "'{operation}' has no parameter '{param}'")
            }
        }
    }
}

impl error::Error for ValidationError {}

/// The control channel could not be reached, or a child process could not be run.
#[derive(Debug)]
pub struct ConnectionError {
    /// What was being attempted, e.g. "connect to cluster" or "run 'rbd'".
    pub action: String,
    pub reason: String,
    pub source: Option<io::Error>,
}

impl ConnectionError {
    pub fn new(action: impl Into<String>, reason: impl Into<String>) -> Self {
        ConnectionError {
            action: action.into(),
            reason: reason.into(),
            source: None,
        }
    }

    pub fn io(action: impl Into<String>, e: io::Error) -> Self {
        ConnectionError {
            action: action.into(),
            reason: e.to_string(),
            source: Some(e),
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not {}: {}", self.action, self.reason)
    }
}

impl error::Error for ConnectionError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn error::Error + 'static))
    }
}

/// The command reached the cluster (or the process ran), but it reported a non-zero status.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCommandError {
    pub operation: String,
    /// The command as it was sent: JSON for control-channel commands, the joined argument vector
    /// for processes.
    pub command: String,
    pub status: i32,
    pub diagnostic: String,
    pub output: Vec<u8>,
}

impl fmt::Display for RemoteCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' failed with status {}", self.operation, self.status)?;
        if !self.diagnostic.is_empty() {
            write!(f, ": {}", self.diagnostic)?;
        }
        Ok(())
    }
}

impl error::Error for RemoteCommandError {}

#[derive(Debug)]
pub enum Error {
    Validation(ValidationError),
    Connection(ConnectionError),
    Remote(RemoteCommandError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(e) => write!(f, "invalid arguments: {e}"),
            Error::Connection(e) => write!(f, "{e}"),
            Error::Remote(e) => write!(f, "{e}"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Validation(e) => Some(e),
            Error::Connection(e) => Some(e),
            Error::Remote(e) => Some(e),
        }
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

impl From<ConnectionError> for Error {
    fn from(e: ConnectionError) -> Self {
        Error::Connection(e)
    }
}

impl From<RemoteCommandError> for Error {
    fn from(e: RemoteCommandError) -> Self {
        Error::Remote(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
