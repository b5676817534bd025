// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! An append-only log of the operations a session dispatched.
//!
//! Each line is one [`Record`] with tab separated fields. Backslashes, tabs and line breaks
//! inside a field are written as `\\`, `\t`, `\n` and `\r`. The journal is for auditing only;
//! nothing reads it back to decide what to do.

use std::{
    fmt,
    fs::{File, OpenOptions},
    io::{self, BufRead, BufReader, Write},
};

use chrono::{Local, NaiveDateTime};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%f";

#[derive(Debug)]
pub struct Journal {
    path: String,
    file: File,
}

impl Journal {
    /// Open the journal for appending, creating it if needed.
    pub fn open(path: &str) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).create(true).open(path)?;
        Ok(Journal {
            path: path.to_string(),
            file,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn write_record(&mut self, record: &Record) -> io::Result<()> {
        self.file
            .write_all(&[record.as_string().as_bytes(), b"\n"].concat())
    }

    /// Read every record in the journal at `path`, oldest first.
    pub fn read_all(path: &str) -> Result<Vec<Record>, JournalError> {
        let file = File::open(path).map_err(JournalError::Io)?;
        Record::get_all_from_file(&file)
    }
}

/// One dispatched operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub timestamp: NaiveDateTime,
    pub outcome: Outcome,
    /// The reply status, or 0 if the command never got a reply.
    pub status: i32,
    pub operation: String,
    /// The rendered command.
    pub command: String,
}

impl Record {
    pub fn new(outcome: Outcome, status: i32, operation: &str, command: String) -> Self {
        Record {
            timestamp: Local::now().naive_local(),
            outcome,
            status,
            operation: operation.to_string(),
            command,
        }
    }

    /// Get all Records from a File, sorted by timestamp in ascending order.
    pub fn get_all_from_file(file: &File) -> Result<Vec<Record>, JournalError> {
        let mut records = BufReader::new(file)
            .lines()
            .map(|line| {
                let line = line.map_err(JournalError::Io)?;
                Record::from_string(&line)
            })
            .collect::<Result<Vec<Record>, JournalError>>()?;
        records.sort_by_key(|record| record.timestamp);

        Ok(records)
    }

    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.outcome,
            self.status,
            escape(&self.operation),
            escape(&self.command),
        )
    }

    pub fn from_string(record: &str) -> Result<Self, JournalError> {
        let malformed = |reason: &str| JournalError::Malformed {
            line: record.to_string(),
            reason: reason.to_string(),
        };

        let mut fields = record.split('\t');
        let timestamp = fields.next().ok_or_else(|| malformed("missing timestamp"))?;
        let outcome = fields.next().ok_or_else(|| malformed("missing outcome"))?;
        let status = fields.next().ok_or_else(|| malformed("missing status"))?;
        let operation = fields.next().ok_or_else(|| malformed("missing operation"))?;
        let command = fields.next().unwrap_or("");
        if fields.next().is_some() {
            return Err(malformed("too many fields"));
        }

        let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| malformed(&format!("bad timestamp: {e}")))?;
        let status = status
            .parse::<i32>()
            .map_err(|e| malformed(&format!("bad status: {e}")))?;

        Ok(Record {
            timestamp,
            outcome: Outcome::try_from(outcome).map_err(|_| malformed("unknown outcome"))?,
            status,
            operation: unescape(operation).ok_or_else(|| malformed("bad escape in operation"))?,
            command: unescape(command).ok_or_else(|| malformed("bad escape in command"))?,
        })
    }
}

fn escape(field: &str) -> String {
    let mut escaped = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Undo [`escape`], or `None` if `field` holds an unknown or unfinished escape.
fn unescape(field: &str) -> Option<String> {
    let mut unescaped = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        unescaped.push(match chars.next()? {
            '\\' => '\\',
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            _ => return None,
        });
    }
    Some(unescaped)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The command ran and reported success.
    Success,
    /// The command ran and reported a non-zero status.
    Failure,
    /// The cluster could not be reached or the program could not be run.
    Unreachable,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Success => "ok",
                Self::Failure => "failed",
                Self::Unreachable => "unreachable",
            }
        )
    }
}

impl TryFrom<&str> for Outcome {
    type Error = ();
    fn try_from(val: &str) -> Result<Self, Self::Error> {
        Ok(match val {
            "ok" => Self::Success,
            "failed" => Self::Failure,
            "unreachable" => Self::Unreachable,
            _ => return Err(()),
        })
    }
}

#[derive(Debug)]
pub enum JournalError {
    Io(io::Error),
    Malformed { line: String, reason: String },
}

impl fmt::Display for JournalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JournalError::Io(e) => write!(f, "could not read journal: {e}"),
            JournalError::Malformed { line, reason } => {
                write!(f, "malformed journal line '{line}': {reason}")
            }
        }
    }
}

impl std::error::Error for JournalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JournalError::Io(e) => Some(e),
            JournalError::Malformed { .. } => None,
        }
    }
}
