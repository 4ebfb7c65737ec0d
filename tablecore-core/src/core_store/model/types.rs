/*
    types.rs - Schema types for core_store models

    Defines:
    - Row handles
    - Value kinds and column types
    - Column definitions
*/

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::value::ParseValueError;

/// Stable identifier of a row within its table.
///
/// Handles are assigned in insertion order starting at 0 and are never
/// reused or renumbered for the lifetime of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowHandle(pub u64);

impl RowHandle {
    /// Handle of the first row inserted into a table
    pub const FIRST: RowHandle = RowHandle(0);

    /// Position of the row in its table's row vector
    pub(crate) fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }

    /// Get the raw handle value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for RowHandle {
    fn from(value: u64) -> Self {
        RowHandle(value)
    }
}

impl fmt::Display for RowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of primitive kinds a column can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Bool,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    String,
    Binary,
}

impl ValueKind {
    /// All supported kinds, in a stable order
    pub const ALL: [ValueKind; 8] = [
        ValueKind::Bool,
        ValueKind::Int16,
        ValueKind::Int32,
        ValueKind::Int64,
        ValueKind::Float,
        ValueKind::Double,
        ValueKind::String,
        ValueKind::Binary,
    ];

    /// Name used in scripts, config and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int16 => "int16",
            ValueKind::Int32 => "int32",
            ValueKind::Int64 => "int64",
            ValueKind::Float => "float",
            ValueKind::Double => "double",
            ValueKind::String => "string",
            ValueKind::Binary => "binary",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValueKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseValueError::UnknownType(s.to_string()))
    }
}

/// Declared type of a column: a value kind plus optional nullability.
///
/// Two column types are identical only when both the kind and the
/// nullability agree, so `int32` and `int32?` are distinct types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnType {
    pub kind: ValueKind,
    pub nullable: bool,
}

impl ColumnType {
    /// Non-nullable column of the given kind
    pub const fn required(kind: ValueKind) -> Self {
        ColumnType { kind, nullable: false }
    }

    /// Nullable column of the given kind
    pub const fn nullable(kind: ValueKind) -> Self {
        ColumnType { kind, nullable: true }
    }

    /// Same kind with nullability enabled
    pub const fn to_nullable(self) -> Self {
        ColumnType::nullable(self.kind)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl FromStr for ColumnType {
    type Err = ParseValueError;

    /// Parse `int32`, `string?` and the like
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_suffix('?') {
            Some(kind) => Ok(ColumnType::nullable(kind.parse()?)),
            None => Ok(ColumnType::required(s.parse()?)),
        }
    }
}

/// A named, typed column declared on a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Column {
            name: name.into(),
            column_type,
        }
    }
}
