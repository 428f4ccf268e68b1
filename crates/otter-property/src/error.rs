//! Property controller error types

use otter_object::{ObjectError, PrivateKey};
use thiserror::Error;

/// Property controller errors
#[derive(Debug, Error)]
pub enum PropertyError {
    /// No layer at the given chain position
    #[error("RangeError: no descriptor at index {index} (chain length {len})")]
    InvalidIndex {
        /// Requested index
        index: usize,
        /// Chain length at the time of the call
        len: usize,
    },

    /// Operation needs a current layer but the chain is empty
    #[error("RangeError: descriptor chain is empty")]
    EmptyChain,

    /// Backing slot was never initialized on the object being accessed
    #[error("InternalError: missing backing slot {0}")]
    MissingBackingSlot(PrivateKey),

    /// Chain mutation attempted from inside one of the controller's callbacks
    #[error("InternalError: descriptor chain mutated during dispatch")]
    Reentrant,

    /// Host object failure
    #[error(transparent)]
    Object(#[from] ObjectError),
}

impl PropertyError {
    /// Create an invalid index error
    pub fn invalid_index(index: usize, len: usize) -> Self {
        Self::InvalidIndex { index, len }
    }

    /// Check if this error breaks a controller invariant
    ///
    /// Such errors are not recoverable: the controller was used outside its
    /// contract.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingBackingSlot(_) | Self::Reentrant)
    }
}

// Errors crossing a native accessor boundary travel as `ObjectError`.
// Host errors are unwrapped so callers see what the user callback returned.
impl From<PropertyError> for ObjectError {
    fn from(err: PropertyError) -> Self {
        match err {
            PropertyError::Object(inner) => inner,
            other => ObjectError::extension(other),
        }
    }
}

/// Result type for property controller operations
pub type PropertyResult<T> = std::result::Result<T, PropertyError>;
