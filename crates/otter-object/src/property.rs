//! Native property descriptors
//!
//! A property is either a data slot or an accessor pair. Accessors hold
//! native callbacks that receive the object the property lives on.

use crate::error::ObjectResult;
use crate::object::JsObject;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

type GetterFn = dyn Fn(&JsObject) -> ObjectResult<Value> + Send + Sync;
type SetterFn = dyn Fn(&JsObject, Value) -> ObjectResult<()> + Send + Sync;

/// Native getter callback
#[derive(Clone)]
pub struct Getter(Arc<GetterFn>);

impl Getter {
    /// Wrap a closure as a getter
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&JsObject) -> ObjectResult<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the getter
    pub fn call(&self, object: &JsObject) -> ObjectResult<Value> {
        (self.0)(object)
    }

    /// Check if both handles share the same closure
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Getter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Getter({:p})", Arc::as_ptr(&self.0) as *const ())
    }
}

/// Native setter callback
#[derive(Clone)]
pub struct Setter(Arc<SetterFn>);

impl Setter {
    /// Wrap a closure as a setter
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&JsObject, Value) -> ObjectResult<()> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the setter
    pub fn call(&self, object: &JsObject, value: Value) -> ObjectResult<()> {
        (self.0)(object, value)
    }

    /// Check if both handles share the same closure
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Setter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Setter({:p})", Arc::as_ptr(&self.0) as *const ())
    }
}

/// Property attributes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyAttributes {
    /// Property is writable (data properties only)
    pub writable: bool,
    /// Property is enumerable
    pub enumerable: bool,
    /// Property is configurable
    pub configurable: bool,
}

impl PropertyAttributes {
    /// Default data property attributes
    pub const fn data() -> Self {
        Self {
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// Non-writable, non-enumerable, non-configurable
    pub const fn frozen() -> Self {
        Self {
            writable: false,
            enumerable: false,
            configurable: false,
        }
    }
}

impl Default for PropertyAttributes {
    fn default() -> Self {
        Self::data()
    }
}

/// Property descriptor
#[derive(Clone, Debug)]
pub enum PropertyDescriptor {
    /// Data property
    Data {
        /// The value
        value: Value,
        /// Attributes
        attributes: PropertyAttributes,
    },
    /// Accessor property
    Accessor {
        /// Getter function
        get: Option<Getter>,
        /// Setter function
        set: Option<Setter>,
        /// Attributes (`writable` is ignored)
        attributes: PropertyAttributes,
    },
}

impl PropertyDescriptor {
    /// Create a data property
    pub fn data(value: Value) -> Self {
        Self::Data {
            value,
            attributes: PropertyAttributes::data(),
        }
    }

    /// Create a data property with specific attributes
    pub fn data_with_attrs(value: Value, attributes: PropertyAttributes) -> Self {
        Self::Data { value, attributes }
    }

    /// Create an accessor property
    pub fn accessor(
        get: Option<Getter>,
        set: Option<Setter>,
        attributes: PropertyAttributes,
    ) -> Self {
        Self::Accessor {
            get,
            set,
            attributes,
        }
    }

    /// Attributes of either kind
    pub fn attributes(&self) -> PropertyAttributes {
        match self {
            Self::Data { attributes, .. } | Self::Accessor { attributes, .. } => *attributes,
        }
    }

    /// Check if this is an accessor property
    pub fn is_accessor(&self) -> bool {
        matches!(self, Self::Accessor { .. })
    }

    /// Get the value (for data properties)
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Data { value, .. } => Some(value),
            Self::Accessor { .. } => None,
        }
    }

    /// Check if writable
    pub fn is_writable(&self) -> bool {
        match self {
            Self::Data { attributes, .. } => attributes.writable,
            Self::Accessor { set, .. } => set.is_some(),
        }
    }

    /// Check if enumerable
    pub fn is_enumerable(&self) -> bool {
        self.attributes().enumerable
    }

    /// Check if configurable
    pub fn is_configurable(&self) -> bool {
        self.attributes().configurable
    }
}
