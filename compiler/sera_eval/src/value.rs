//! Runtime values.
//!
//! The subset of the embedding language's values this engine exercises:
//! scalar primitives plus the mutable string. Strings are owned directly
//! by their `Value` — no shared heap — so in-place indexed mutation never
//! observes an alias.

use std::fmt;

use crate::StrValue;

/// Runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Character (single scalar) value.
    Char(char),
    /// String value.
    Str(StrValue),
    /// Void (unit) value.
    Void,
}

impl Value {
    /// Construct a string value.
    pub fn string(text: impl Into<StrValue>) -> Self {
        Value::Str(text.into())
    }

    /// User-friendly type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Void => "void",
        }
    }

    /// Display coercion: the textual representation used when a value is
    /// spliced into a string (interpolation or heterogeneous `+`).
    ///
    /// Integers render as decimal text; a string renders as its own
    /// contents (no quoting).
    pub fn display_value(&self) -> StrValue {
        match self {
            Value::Int(n) => StrValue::from(n.to_string()),
            Value::Float(f) => StrValue::from(f.to_string()),
            Value::Bool(b) => StrValue::from(if *b { "true" } else { "false" }),
            Value::Char(c) => StrValue::from(*c),
            Value::Str(s) => s.clone(),
            Value::Void => StrValue::from("void"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_coercion_renders_decimal_ints() {
        assert_eq!(Value::Int(42).display_value(), StrValue::from("42"));
        assert_eq!(Value::Int(-7).display_value(), StrValue::from("-7"));
    }

    #[test]
    fn display_coercion_of_other_primitives() {
        assert_eq!(Value::Bool(true).display_value(), StrValue::from("true"));
        assert_eq!(Value::Char('é').display_value(), StrValue::from("é"));
        assert_eq!(Value::Void.display_value(), StrValue::from("void"));
    }

    #[test]
    fn string_displays_its_contents_unquoted() {
        let v = Value::string("hi there");
        assert_eq!(v.to_string(), "hi there");
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Int(1).type_name(), "int");
        assert_eq!(Value::string("x").type_name(), "string");
        assert_eq!(Value::Void.type_name(), "void");
    }
}
