// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! The typed description of every operation: parameter kinds, their validators, and the static
//! catalog they are registered from.

pub mod catalog;
pub mod registry;
pub mod spec;
pub mod validate;
pub mod value;

pub use registry::Registry;
pub use spec::{
    Arg, Bounds, Charset, Condition, Family, IdentifierKind, ImagePart, Kind, OperationSpec,
    ParamSpec, RemotePart,
};
pub use value::{Args, Value};
