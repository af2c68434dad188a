use std::fmt::Display;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Literals accepted as `true` for bool columns (compared lowercased)
const TRUTHY: [&str; 4] = ["true", "1", "yes", "да"];
/// Literals accepted as `false` for bool columns (compared lowercased)
const FALSY: [&str; 4] = ["false", "0", "no", "нет"];

/// Supported column types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Integer,
    String,
    Boolean,
}

impl DataType {
    /// Parses the type part of a `name:type` column spec
    pub fn from_name(name: &str) -> Option<DataType> {
        Some(match name {
            "int" => DataType::Integer,
            "str" | "string" => DataType::String,
            "bool" => DataType::Boolean,
            _ => return None,
        })
    }

    pub fn to_str(&self) -> &str {
        match self {
            DataType::Integer => "int",
            DataType::String => "str",
            DataType::Boolean => "bool",
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// A typed cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Integer(i64),
    String(String),
    Boolean(bool),
}

impl Value {
    /// Converts a literal token into a value of the given column type
    pub fn convert(literal: &str, datatype: DataType) -> Result<Value> {
        match datatype {
            DataType::Integer => literal.parse::<i64>().map(Value::Integer).map_err(|_| {
                Error::Validation(format!("cannot convert '{}' to int", literal))
            }),
            DataType::Boolean => {
                let lower = literal.to_lowercase();
                if TRUTHY.contains(&lower.as_str()) {
                    Ok(Value::Boolean(true))
                } else if FALSY.contains(&lower.as_str()) {
                    Ok(Value::Boolean(false))
                } else {
                    Err(Error::Validation(format!("cannot convert '{}' to bool", literal)))
                }
            }
            DataType::String => Ok(Value::String(unquote(literal).to_string())),
        }
    }

    /// Renders the value as a literal that `convert` maps back to it
    pub fn to_literal(&self) -> String {
        match self {
            Value::Integer(v) => v.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::String(s) => s.clone(),
        }
    }

    pub fn datatype(&self) -> DataType {
        match self {
            Value::Integer(_) => DataType::Integer,
            Value::String(_) => DataType::String,
            Value::Boolean(_) => DataType::Boolean,
        }
    }
}

/// Strips one matching pair of outer quotes, no escape processing
fn unquote(literal: &str) -> &str {
    for quote in ['"', '\''] {
        if literal.len() >= 2 && literal.starts_with(quote) && literal.ends_with(quote) {
            return &literal[1..literal.len() - 1];
        }
    }
    literal
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
        }
    }
}

/// A record maps column names to values, in schema order
pub type Record = IndexMap<String, Value>;
