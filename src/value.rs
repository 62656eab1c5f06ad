use std::fmt;

use rust_decimal::Decimal;

/// A typed constant carried by [`Directive::Constant`](crate::Directive::Constant).
///
/// Both the notation and the relational rendering of a constant are its
/// canonical text, produced by the [`Display`](fmt::Display) impl below.
///
/// # Text forms
///
/// - Integers render in base 10
/// - Floats render as the shortest decimal that reads back to the same value
///   (`100.0` renders as `100`, `2.5` as `2.5`)
/// - Decimals render in their canonical `rust_decimal` form
/// - Strings render verbatim, without quotes
/// - Booleans render as `true` / `false`
///
/// # Examples
///
/// ```
/// use dataquery::Value;
///
/// assert_eq!(Value::from(100).to_string(), "100");
/// assert_eq!(Value::from(100.0).to_string(), "100");
/// assert_eq!(Value::from(0.25).to_string(), "0.25");
/// assert_eq!(Value::from("north").to_string(), "north");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer number
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// Exact decimal number
    Decimal(Decimal),

    /// UTF-8 string, rendered unquoted
    String(String),

    /// Boolean
    Boolean(bool),
}

impl Value {
    /// Returns a human-readable type name, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Decimal(d) => write!(f, "{}", d.normalize()),
            // Strings are not quoted in either rendering
            Value::String(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
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
