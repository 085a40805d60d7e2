// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};

use crate::datetime::Datetime;
use crate::error::ConversionError;
use crate::key::write_segment;

/// A table of values. Keys are unique and iterate in insertion order.
pub type Table = IndexMap<String, Value>;

/// Any node of a document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Datetime(Datetime),
    Array(Vec<Value>),
    Table(Table),
}

/// The tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Integer,
    Float,
    Boolean,
    Datetime,
    Array,
    Table,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Boolean => "boolean",
            Kind::Datetime => "datetime",
            Kind::Array => "array",
            Kind::Table => "table",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn mismatch(expected: Kind, found: &Value) -> ConversionError {
    ConversionError::Mismatch {
        expected,
        found: found.kind(),
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Integer(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::Boolean(_) => Kind::Boolean,
            Value::Datetime(_) => Kind::Datetime,
            Value::Array(_) => Kind::Array,
            Value::Table(_) => Kind::Table,
        }
    }

    /// The tag shared by the elements of an array. `None` for an empty
    /// array or for any value that is not an array.
    pub fn array_kind(&self) -> Option<Kind> {
        match self {
            Value::Array(items) => items.first().map(Value::kind),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Result<&str, ConversionError> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(mismatch(Kind::String, other)),
        }
    }

    pub fn as_integer(&self) -> Result<i64, ConversionError> {
        match self {
            Value::Integer(n) => Ok(*n),
            other => Err(mismatch(Kind::Integer, other)),
        }
    }

    pub fn as_float(&self) -> Result<f64, ConversionError> {
        match self {
            Value::Float(n) => Ok(*n),
            other => Err(mismatch(Kind::Float, other)),
        }
    }

    pub fn as_bool(&self) -> Result<bool, ConversionError> {
        match self {
            Value::Boolean(b) => Ok(*b),
            other => Err(mismatch(Kind::Boolean, other)),
        }
    }

    pub fn as_datetime(&self) -> Result<&Datetime, ConversionError> {
        match self {
            Value::Datetime(dt) => Ok(dt),
            other => Err(mismatch(Kind::Datetime, other)),
        }
    }

    pub fn as_array(&self) -> Result<&[Value], ConversionError> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(mismatch(Kind::Array, other)),
        }
    }

    pub fn as_table(&self) -> Result<&Table, ConversionError> {
        match self {
            Value::Table(table) => Ok(table),
            other => Err(mismatch(Kind::Table, other)),
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n as i64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Datetime> for Value {
    fn from(dt: Datetime) -> Self {
        Value::Datetime(dt)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Table> for Value {
    fn from(table: Table) -> Self {
        Value::Table(table)
    }
}

pub(crate) fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{08}' => f.write_str("\\b")?,
            '\u{0C}' => f.write_str("\\f")?,
            c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

fn write_float(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("nan")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "inf" } else { "-inf" })
    } else if n.fract() == 0.0 {
        // `{}` never uses an exponent, so whole floats of any size need `.0`.
        write!(f, "{:.1}", n)
    } else {
        write!(f, "{}", n)
    }
}

/// Inline rendering used by diagnostics. Not a serializer for the
/// configuration format.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write_escaped(f, s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write_float(f, *n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Datetime(dt) => write!(f, "{}", dt),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Table(table) => {
                if table.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, (key, value)) in table.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_segment(f, key)?;
                    write!(f, " = {}", value)?;
                }
                f.write_str(" }")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Datetime(dt) => dt.serialize(serializer),
            Value::Array(items) => items.serialize(serializer),
            Value::Table(table) => table.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_narrowing() {
        let value = Value::from("localhost");
        assert_eq!(value.kind(), Kind::String);
        assert_eq!(value.as_str(), Ok("localhost"));
        assert_eq!(
            value.as_integer(),
            Err(ConversionError::Mismatch {
                expected: Kind::Integer,
                found: Kind::String,
            })
        );
    }

    #[test]
    fn test_integer_is_not_a_float() {
        let value = Value::Integer(3);
        assert!(value.as_float().is_err());
        assert_eq!(value.as_integer(), Ok(3));
    }

    #[test]
    fn test_array_kind() {
        let ports = Value::from(vec![Value::from(80), Value::from(443)]);
        assert_eq!(ports.array_kind(), Some(Kind::Integer));
        assert_eq!(Value::Array(vec![]).array_kind(), None);
        assert_eq!(Value::from(true).array_kind(), None);
    }

    #[test]
    fn test_display_inline() {
        let mut table = Table::new();
        table.insert("name".into(), Value::from("a \"b\""));
        table.insert("ratio".into(), Value::Float(2.0));
        table.insert("my key".into(), Value::Boolean(false));
        let value = Value::Array(vec![Value::Table(table)]);
        assert_eq!(
            value.to_string(),
            r#"[{ name = "a \"b\"", ratio = 2.0, "my key" = false }]"#
        );
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_string(), "-inf");
        assert_eq!(Value::Float(0.25).to_string(), "0.25");
        assert_eq!(Value::Float(1e20).to_string(), "100000000000000000000.0");
        assert_eq!(Value::Float(-3e17).to_string(), "-300000000000000000.0");
        assert_eq!(Value::Table(Table::new()).to_string(), "{}");
    }
}
