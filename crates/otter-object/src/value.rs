//! Dynamically typed values
//!
//! Values stored in properties and backing slots. Primitives compare
//! structurally, objects by identity.

use crate::object::JsObject;
use std::sync::Arc;

/// A JavaScript-like value
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// `undefined`
    #[default]
    Undefined,
    /// `null`
    Null,
    /// Boolean
    Boolean(bool),
    /// IEEE 754 number
    Number(f64),
    /// Immutable string
    String(Arc<str>),
    /// Object reference
    Object(Arc<JsObject>),
}

impl Value {
    /// Create undefined value
    pub const fn undefined() -> Self {
        Self::Undefined
    }

    /// Create null value
    pub const fn null() -> Self {
        Self::Null
    }

    /// Create boolean value
    pub const fn boolean(b: bool) -> Self {
        Self::Boolean(b)
    }

    /// Create number value
    pub const fn number(n: f64) -> Self {
        Self::Number(n)
    }

    /// Create string value
    pub fn string(s: &str) -> Self {
        Self::String(Arc::from(s))
    }

    /// Create object value
    pub fn object(obj: Arc<JsObject>) -> Self {
        Self::Object(obj)
    }

    /// Check if undefined
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Check if null or undefined
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Get as boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as object
    pub fn as_object(&self) -> Option<&Arc<JsObject>> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// `typeof` result
    pub fn type_of(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null | Self::Object(_) => "object",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(Arc::from(s))
    }
}

impl From<Arc<JsObject>> for Value {
    fn from(obj: Arc<JsObject>) -> Self {
        Self::Object(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined() {
        let v = Value::undefined();
        assert!(v.is_undefined());
        assert!(v.is_nullish());
        assert_eq!(v.type_of(), "undefined");
    }

    #[test]
    fn test_null() {
        let v = Value::null();
        assert!(!v.is_undefined());
        assert!(v.is_nullish());
        assert_eq!(v.type_of(), "object");
    }

    #[test]
    fn test_boolean() {
        let t = Value::boolean(true);
        assert_eq!(t.as_boolean(), Some(true));
        assert_eq!(Value::from(false).as_boolean(), Some(false));
        assert_eq!(Value::from(1).as_boolean(), None);
        assert_eq!(t.type_of(), "boolean");
    }

    #[test]
    fn test_number() {
        let v = Value::from(42);
        assert_eq!(v.as_number(), Some(42.0));
        assert_eq!(v.type_of(), "number");
        assert_eq!(v, Value::number(42.0));
    }

    #[test]
    fn test_object_identity() {
        let a = Arc::new(JsObject::new());
        let b = Arc::new(JsObject::new());
        assert_eq!(Value::object(a.clone()), Value::object(a));
        assert_ne!(Value::object(b), Value::from("b"));
    }
}
