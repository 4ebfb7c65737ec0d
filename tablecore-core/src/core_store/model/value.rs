/*
    value.rs - Cell values and typed access

    A cell stores a `Value`, a tagged union over the supported kinds.
    Typed callers go through `CellValue`, which ties a Rust type to the
    exact `ColumnType` it reads and writes.
*/

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::types::{ColumnType, ValueKind};

/// Errors produced while parsing type names or value literals
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseValueError {
    /// Type name is not one of the supported kinds
    #[error("Unknown column type: {0}")]
    UnknownType(String),

    /// Literal cannot be read as a value of the column type
    #[error("Invalid {column_type} literal: {literal}")]
    InvalidLiteral {
        literal: String,
        column_type: ColumnType,
    },
}

/// The content of a single cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    String(String),
    Binary(Vec<u8>),
}

impl Value {
    /// Value an unset cell of the given column type holds
    pub fn default_for(column_type: ColumnType) -> Value {
        if column_type.nullable {
            return Value::Null;
        }
        match column_type.kind {
            ValueKind::Bool => Value::Bool(false),
            ValueKind::Int16 => Value::Int16(0),
            ValueKind::Int32 => Value::Int32(0),
            ValueKind::Int64 => Value::Int64(0),
            ValueKind::Float => Value::Float(0.0),
            ValueKind::Double => Value::Double(0.0),
            ValueKind::String => Value::String(String::new()),
            ValueKind::Binary => Value::Binary(Vec::new()),
        }
    }

    /// Kind of a non-null value
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(ValueKind::Bool),
            Value::Int16(_) => Some(ValueKind::Int16),
            Value::Int32(_) => Some(ValueKind::Int32),
            Value::Int64(_) => Some(ValueKind::Int64),
            Value::Float(_) => Some(ValueKind::Float),
            Value::Double(_) => Some(ValueKind::Double),
            Value::String(_) => Some(ValueKind::String),
            Value::Binary(_) => Some(ValueKind::Binary),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this value may be stored in a column of the given type
    pub fn fits(&self, column_type: ColumnType) -> bool {
        match self.kind() {
            None => column_type.nullable,
            Some(kind) => kind == column_type.kind,
        }
    }

    /// Narrowest column type describing this value, relative to a target
    /// column. Null only exists in the nullable variant of the target kind.
    pub(crate) fn describe_against(&self, column_type: ColumnType) -> ColumnType {
        match self.kind() {
            None => column_type.to_nullable(),
            Some(kind) => ColumnType::required(kind),
        }
    }

    /// Parse a textual literal as a value of the given column type.
    ///
    /// `null` is only accepted by nullable columns. Binary literals are
    /// hex with a `0x` prefix. A string literal starting with `"` is a JSON
    /// string, the same form `Display` writes; any other string literal is
    /// taken verbatim, surrounding whitespace included.
    pub fn parse(literal: &str, column_type: ColumnType) -> Result<Value, ParseValueError> {
        let text = literal.trim();
        if column_type.nullable && text == "null" {
            return Ok(Value::Null);
        }

        let invalid = || ParseValueError::InvalidLiteral {
            literal: literal.to_string(),
            column_type,
        };

        let value = match column_type.kind {
            ValueKind::Bool => Value::Bool(text.parse().map_err(|_| invalid())?),
            ValueKind::Int16 => Value::Int16(text.parse().map_err(|_| invalid())?),
            ValueKind::Int32 => Value::Int32(text.parse().map_err(|_| invalid())?),
            ValueKind::Int64 => Value::Int64(text.parse().map_err(|_| invalid())?),
            ValueKind::Float => Value::Float(text.parse().map_err(|_| invalid())?),
            ValueKind::Double => Value::Double(text.parse().map_err(|_| invalid())?),
            ValueKind::String if text.starts_with('"') => {
                Value::String(serde_json::from_str(text).map_err(|_| invalid())?)
            }
            ValueKind::String => Value::String(literal.to_string()),
            ValueKind::Binary => {
                let digits = text
                    .strip_prefix("0x")
                    .or_else(|| text.strip_prefix("0X"))
                    .ok_or_else(invalid)?;
                Value::Binary(hex::decode(digits).map_err(|_| invalid())?)
            }
        };
        Ok(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int16(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::String(v) => {
                let quoted = serde_json::to_string(v).map_err(|_| fmt::Error)?;
                f.write_str(&quoted)
            }
            Value::Binary(v) => write!(f, "0x{}", hex::encode(v)),
        }
    }
}

/// Rust types that can be read from and written to a cell.
///
/// Each implementation maps to exactly one `ColumnType`; the store checks
/// that type against the column's declared type on every access.
pub trait CellValue: Sized {
    /// The column type this Rust type reads and writes
    fn column_type() -> ColumnType;

    /// Convert into the stored representation
    fn into_value(self) -> Value;

    /// Convert from the stored representation, `None` on a kind mismatch
    fn from_value(value: Value) -> Option<Self>;
}

/// Non-nullable cell types. `Option<T>` is a cell type for each of them.
pub trait PrimitiveCell: CellValue + private::Sealed {}

mod private {
    pub trait Sealed {}
}

macro_rules! impl_primitive_cell {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl private::Sealed for $ty {}

            impl PrimitiveCell for $ty {}

            impl CellValue for $ty {
                fn column_type() -> ColumnType {
                    ColumnType::required(ValueKind::$variant)
                }

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_primitive_cell! {
    bool => Bool,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float,
    f64 => Double,
    String => String,
    Vec<u8> => Binary,
}

impl<T: PrimitiveCell> CellValue for Option<T> {
    fn column_type() -> ColumnType {
        T::column_type().to_nullable()
    }

    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}
