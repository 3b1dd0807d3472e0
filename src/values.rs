use std::fmt;
use std::fmt::Formatter;
use std::rc::Rc;

use crate::objects::{Object, StrObj};

/// All types of values in TripleS. Heap-allocated values are reached
/// through an `Object` handle; everything else is stored inline.
#[derive(Clone)]
pub enum Value {
    Bool(bool),
    Null,
    Number(f64),
    Obj(Object),
}

impl Value {
    /// Checks that this value is a number.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Checks that this value is a heap string.
    pub fn is_str(&self) -> bool {
        matches!(self, Value::Obj(Object::Str(_)))
    }

    /// Tries to convert this value to a Rust f64 float.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Tries to get the string handle held by this value.
    pub fn as_str(&self) -> Option<&Rc<StrObj>> {
        match self {
            Value::Obj(Object::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Checks that this value is falsy. The falsy values are `null`,
    /// `false`, and the number zero.
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(val) => !val,
            Value::Number(x) => *x == 0f64,
            _ => false,
        }
    }
}

/// Values of different kinds are never equal; there is no coercion.
/// Numbers compare by IEEE-754 equality, strings by interned identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Obj(a), Value::Obj(b)) => a.equals(b),
            _ => false,
        }
    }
}

/// Implements the `Display` trait so that values can be printed in a
/// console-friendly way.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Value::Bool(inner) => write!(f, "{}", if *inner { "true" } else { "false" }),
            Value::Null => f.write_str("null"),
            Value::Number(inner) => write!(f, "{}", inner),
            Value::Obj(inner) => write!(f, "{}", inner),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        fmt::Display::fmt(self, f)
    }
}
