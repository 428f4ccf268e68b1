//! Object model error types

use crate::key::PropertyKey;
use thiserror::Error;

/// Errors raised by object operations and native accessors
#[derive(Debug, Error)]
pub enum ObjectError {
    /// Type error (e.g., invalid operand for an accessor)
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Attempt to redefine a non-configurable property
    #[error("TypeError: Cannot redefine property: {0}")]
    NotConfigurable(PropertyKey),

    /// Attempt to add a property to a non-extensible object
    #[error("TypeError: Cannot define property {0}, object is not extensible")]
    NotExtensible(PropertyKey),

    /// Failure reported by a user getter or setter
    #[error("Callback error: {0}")]
    Callback(String),

    /// Error raised by a layer built on top of the object model
    #[error(transparent)]
    Extension(Box<dyn std::error::Error + Send + Sync>),
}

impl ObjectError {
    /// Create a type error
    pub fn type_error(msg: impl Into<String>) -> Self {
        Self::TypeError(msg.into())
    }

    /// Create a callback error
    pub fn callback(msg: impl Into<String>) -> Self {
        Self::Callback(msg.into())
    }

    /// Wrap an error coming from a higher layer
    pub fn extension(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Extension(Box::new(err))
    }

    /// Downcast an [`ObjectError::Extension`] payload
    pub fn downcast_extension<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Self::Extension(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

/// Result type for object operations
pub type ObjectResult<T> = std::result::Result<T, ObjectError>;
