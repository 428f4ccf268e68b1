//! # Otter Property
//!
//! Layered getter/setter interception for a single property of a
//! [`JsObject`](otter_object::JsObject).
//!
//! A [`PropertyController`] owns a [`DescriptorChain`] for one (object, key)
//! pair. Layers stack, the most recent one wins, and removing or disabling a
//! layer falls back to the layer below or to a hidden backing slot.
//!
//! ```ignore
//! let obj = Arc::new(JsObject::new());
//! let mut ctl = PropertyController::new(obj.clone(), "x");
//! ctl.add_descriptor(DescriptorRecord::new().getter(Getter::new(|_| Ok(Value::from(42)))))?;
//! ctl.attach()?;
//! assert_eq!(obj.get(&"x".into())?, Value::from(42));
//! ```

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod chain;
pub mod controller;
pub mod error;
mod mediator;
pub mod options;
pub mod record;

pub use chain::DescriptorChain;
pub use controller::{Attach, ControllerState, PropertyController};
pub use error::{PropertyError, PropertyResult};
pub use options::ControllerOptions;
pub use record::{Active, Activity, Callback, DescriptorRecord, LayerState};
