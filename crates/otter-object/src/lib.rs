//! # Otter Object
//!
//! Minimal host object model used by the Otter property controllers.
//!
//! ## Design Principles
//!
//! - **Thread-safe**: Objects and values are `Send + Sync`; storage sits behind `RwLock`
//! - **Ordered**: Own keys enumerate in insertion order, like JavaScript objects
//! - **Native descriptors**: Properties are either data slots or accessor pairs
//! - **Private side-table**: Hidden per-object slots addressed by unique private keys

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod key;
pub mod object;
pub mod property;
pub mod value;

pub use error::{ObjectError, ObjectResult};
pub use key::{PrivateKey, PropertyKey, Symbol};
pub use object::JsObject;
pub use property::{Getter, PropertyAttributes, PropertyDescriptor, Setter};
pub use value::Value;
