//! Property controller
//!
//! Owns the descriptor chain for one (object, key) pair and keeps the native
//! descriptor on the object in sync with the chain's current layer:
//!
//! - enabled (or empty) top: a single native accessor routing through the
//!   mediator
//! - disabled top: a plain data property holding the backing slot's value
//!
//! Every mutation is staged on a copy of the chain, the native descriptor is
//! updated if its shape changes, and only then is the copy committed. A
//! failure at any step leaves both the chain and the object untouched.

use otter_object::{
    Getter, JsObject, ObjectError, PrivateKey, PropertyAttributes, PropertyDescriptor,
    PropertyKey, Setter, Value,
};
use parking_lot::RwLockReadGuard;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::chain::DescriptorChain;
use crate::error::{PropertyError, PropertyResult};
use crate::mediator::{self, Shared};
use crate::options::ControllerOptions;
use crate::record::{Activity, Callback, DescriptorRecord};

/// Outcome of [`PropertyController::attach`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attach {
    /// The native accessor was installed by this call
    Installed,
    /// The controller was already attached; nothing changed
    AlreadyAttached,
}

/// Observable state of the controller's current layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    /// `attach` has not run yet
    Detached,
    /// Installed and at least one callback fires
    InstalledActive,
    /// Installed; reads and writes pass through to the backing slot
    InstalledInactive,
    /// The current layer is disabled; the key is a plain data property
    InstalledDisabled,
}

/// Shape of the native descriptor a chain top requires
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NativeShape {
    accessor: bool,
    read_only: bool,
    attributes: PropertyAttributes,
}

/// Layered getter/setter controller for one property
///
/// User callbacks must not call mutating methods of the same controller;
/// such calls fail with [`PropertyError::Reentrant`].
pub struct PropertyController {
    object: Arc<JsObject>,
    shared: Arc<Shared>,
    options: ControllerOptions,
    attached: bool,
}

impl PropertyController {
    /// Create a detached controller for `key` on `object`
    pub fn new(object: Arc<JsObject>, key: impl Into<PropertyKey>) -> Self {
        Self::with_options(object, key, ControllerOptions::default())
    }

    /// Create a detached controller with custom options
    pub fn with_options(
        object: Arc<JsObject>,
        key: impl Into<PropertyKey>,
        options: ControllerOptions,
    ) -> Self {
        let shared = Arc::new(Shared::new(key.into(), options.trace_dispatch));
        Self {
            object,
            shared,
            options,
            attached: false,
        }
    }

    // ==================== Views ====================

    /// The instrumented object
    pub fn object(&self) -> &Arc<JsObject> {
        &self.object
    }

    /// The intercepted key
    pub fn key(&self) -> &PropertyKey {
        &self.shared.key
    }

    /// Key of the backing slot
    pub fn private_key(&self) -> &PrivateKey {
        &self.shared.private_key
    }

    /// Options in effect
    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    /// Check if `attach` has run
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Read access to the whole chain
    ///
    /// Do not hold the guard across a read or write of the property.
    pub fn descriptor_chain(&self) -> RwLockReadGuard<'_, DescriptorChain> {
        self.shared.chain.read()
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.shared.chain.read().len()
    }

    /// Check if the chain is empty
    pub fn is_empty(&self) -> bool {
        self.shared.chain.read().is_empty()
    }

    /// Current layer
    pub fn descriptor(&self) -> Option<DescriptorRecord> {
        self.shared.chain.read().current().cloned()
    }

    /// Layer below the current one
    pub fn previous_descriptor(&self) -> Option<DescriptorRecord> {
        self.shared.chain.read().previous().cloned()
    }

    /// Layer at `index`, `None` out of range
    pub fn get_descriptor(&self, index: usize) -> Option<DescriptorRecord> {
        self.shared.chain.read().get(index).cloned()
    }

    /// Live activity of the current layer
    pub fn active(&self) -> Option<Activity> {
        self.shared.chain.read().current().map(DescriptorRecord::activity)
    }

    /// Getter of the current layer, active or not
    pub fn get(&self) -> Option<Getter> {
        self.shared.chain.read().current().and_then(|layer| layer.get.clone())
    }

    /// Setter of the current layer, active or not
    pub fn set(&self) -> Option<Setter> {
        self.shared.chain.read().current().and_then(|layer| layer.set.clone())
    }

    /// Getter that fires on the next read
    pub fn on_get(&self) -> Option<Getter> {
        if !self.attached {
            return None;
        }
        self.shared
            .chain
            .read()
            .current()
            .and_then(DescriptorRecord::effective_getter)
            .cloned()
    }

    /// Setter that fires on the next write
    pub fn on_set(&self) -> Option<Setter> {
        if !self.attached {
            return None;
        }
        self.shared
            .chain
            .read()
            .current()
            .and_then(DescriptorRecord::effective_setter)
            .cloned()
    }

    /// Raw value of the backing slot
    ///
    /// While the current layer is disabled the value lives in the plain data
    /// property instead, and is copied back on `enable`.
    pub fn backing_value(&self) -> Option<Value> {
        self.object.private_get(&self.shared.private_key)
    }

    /// Tagged state of the current layer
    pub fn state(&self) -> ControllerState {
        if !self.attached {
            return ControllerState::Detached;
        }
        match self.shared.chain.read().current() {
            Some(layer) if !layer.is_enabled() => ControllerState::InstalledDisabled,
            Some(layer) if layer.activity().any() => ControllerState::InstalledActive,
            _ => ControllerState::InstalledInactive,
        }
    }

    /// Check if the callbacks of the layer at `index` currently fire
    ///
    /// Only the current layer of an attached controller can be active.
    pub fn is_active(&self, index: usize) -> bool {
        if !self.attached {
            return false;
        }
        let chain = self.shared.chain.read();
        chain.last_index() == Some(index)
            && chain
                .current()
                .is_some_and(|layer| layer.activity().any())
    }

    /// Check if `callback` of the current layer fires
    pub fn is_callback_active(&self, callback: Callback) -> bool {
        self.attached
            && self
                .shared
                .chain
                .read()
                .current()
                .is_some_and(|layer| layer.activity().get(callback))
    }

    // ==================== Lifecycle ====================

    /// Install the native accessor on the object
    ///
    /// The first call adopts the previous property (see
    /// [`ControllerOptions::seed_from_existing`]), synthesizes a plain layer
    /// if the chain is still empty, initializes the backing slot and installs
    /// the accessor. Later calls return [`Attach::AlreadyAttached`].
    pub fn attach(&mut self) -> PropertyResult<Attach> {
        if self.attached {
            debug!(key = %self.shared.key, "property controller already attached");
            return Ok(Attach::AlreadyAttached);
        }
        self.ensure_idle()?;

        let key = self.shared.key.clone();
        let existing = self.object.get_own_property(&key);
        match &existing {
            Some(desc) if !desc.is_configurable() => {
                return Err(ObjectError::NotConfigurable(key).into());
            }
            None if !self.object.is_extensible() => {
                return Err(ObjectError::NotExtensible(key).into());
            }
            _ => {}
        }

        let mut staged = self.shared.chain.read().clone();
        let mut seed = Value::undefined();
        let mut plain_attributes = self.options.default_attributes;
        if self.options.seed_from_existing {
            match existing {
                Some(PropertyDescriptor::Data { value, attributes }) => {
                    seed = value;
                    plain_attributes = attributes;
                }
                Some(desc @ PropertyDescriptor::Accessor { .. }) => {
                    staged.insert(0, DescriptorRecord::from_native(&desc))?;
                }
                None => {}
            }
        }
        if staged.is_empty() {
            staged.push(DescriptorRecord::plain(plain_attributes));
        }

        let private_key = self.shared.private_key.clone();
        self.object.init_private(private_key.clone(), seed);
        if let Err(err) = self.install(self.native_shape(&staged)) {
            self.object.remove_private(&private_key);
            return Err(err);
        }

        let layers = staged.len();
        *self.shared.chain.write() = staged;
        self.attached = true;
        debug!(key = %key, private = %private_key, layers, "attached property controller");
        Ok(Attach::Installed)
    }

    // ==================== Descriptors ====================

    /// Push a layer; it becomes the interception target
    pub fn add_descriptor(&mut self, record: DescriptorRecord) -> PropertyResult<&mut Self> {
        self.ensure_idle()?;
        let mut staged = self.shared.chain.read().clone();
        staged.push(record);
        self.commit(staged)?;
        debug!(key = %self.shared.key, layers = self.len(), "added descriptor");
        Ok(self)
    }

    /// Remove the layer at `index`
    ///
    /// Removing the current layer makes the next access route through the
    /// new top, or the backing slot if the chain is now empty.
    pub fn remove_descriptor(&mut self, index: usize) -> PropertyResult<&mut Self> {
        self.ensure_idle()?;
        let mut staged = self.shared.chain.read().clone();
        staged.remove_at(index)?;
        self.commit(staged)?;
        debug!(key = %self.shared.key, index, layers = self.len(), "removed descriptor");
        Ok(self)
    }

    // ==================== Activation ====================

    /// Set both callbacks of the layer at `index` on or off
    ///
    /// Has no observable effect until that layer is the current one. On a
    /// disabled layer this changes the activity restored by `enable`.
    pub fn set_active(&mut self, index: usize, active: bool) -> PropertyResult<&mut Self> {
        self.ensure_idle()?;
        let mut staged = self.shared.chain.read().clone();
        let len = staged.len();
        let layer = staged
            .get_mut(index)
            .ok_or_else(|| PropertyError::invalid_index(index, len))?;
        layer.set_state(layer.state().with_activity(Activity::all(active)));
        self.commit(staged)?;
        Ok(self)
    }

    /// Turn `callback` of the current layer on
    pub fn activate(&mut self, callback: Callback) -> PropertyResult<&mut Self> {
        self.toggle(callback, true)
    }

    /// Turn `callback` of the current layer off
    pub fn deactivate(&mut self, callback: Callback) -> PropertyResult<&mut Self> {
        self.toggle(callback, false)
    }

    /// Uninstall the current layer, leaving a plain data property
    ///
    /// The chain is preserved; `enable` restores the same activity.
    pub fn disable(&mut self) -> PropertyResult<&mut Self> {
        self.update_current(|layer| layer.set_state(layer.state().disable()))?;
        debug!(key = %self.shared.key, "disabled descriptor");
        Ok(self)
    }

    /// Reinstall the current layer
    pub fn enable(&mut self) -> PropertyResult<&mut Self> {
        self.update_current(|layer| layer.set_state(layer.state().enable()))?;
        debug!(key = %self.shared.key, "enabled descriptor");
        Ok(self)
    }

    fn toggle(&mut self, callback: Callback, active: bool) -> PropertyResult<&mut Self> {
        self.update_current(|layer| {
            let activity = layer.state().stored_activity().with(callback, active);
            layer.set_state(layer.state().with_activity(activity));
        })
    }

    fn update_current(
        &mut self,
        update: impl FnOnce(&mut DescriptorRecord),
    ) -> PropertyResult<&mut Self> {
        self.ensure_idle()?;
        let mut staged = self.shared.chain.read().clone();
        update(staged.current_mut().ok_or(PropertyError::EmptyChain)?);
        self.commit(staged)?;
        Ok(self)
    }

    // ==================== Internals ====================

    fn ensure_idle(&self) -> PropertyResult<()> {
        if self.shared.is_dispatching() {
            warn!(key = %self.shared.key, "refused descriptor chain mutation during dispatch");
            return Err(PropertyError::Reentrant);
        }
        Ok(())
    }

    fn native_shape(&self, chain: &DescriptorChain) -> NativeShape {
        match chain.current() {
            Some(layer) => NativeShape {
                accessor: layer.is_enabled(),
                read_only: layer.is_enabled() && !layer.accepts_writes(),
                attributes: layer.attributes(),
            },
            None => NativeShape {
                accessor: true,
                read_only: false,
                attributes: self.options.default_attributes,
            },
        }
    }

    /// Swap in `staged`, reinstalling the native descriptor if its shape changed
    ///
    /// A non-configurable accessor cannot be redefined; it already routes
    /// through the chain, so accessor-to-accessor changes keep its attributes
    /// and only swap the chain. Leaving accessor mode still fails.
    fn commit(&mut self, staged: DescriptorChain) -> PropertyResult<()> {
        if self.attached {
            let before = self.native_shape(&self.shared.chain.read());
            let after = self.native_shape(&staged);
            if before != after {
                if after.accessor && self.accessor_locked() {
                    debug!(key = %self.shared.key, "native accessor is locked, keeping its attributes");
                } else {
                    self.install(after)?;
                }
            }
        }
        *self.shared.chain.write() = staged;
        Ok(())
    }

    /// Check if the installed accessor is non-configurable
    fn accessor_locked(&self) -> bool {
        matches!(
            self.object.get_own_property(&self.shared.key),
            Some(PropertyDescriptor::Accessor { attributes, .. }) if !attributes.configurable
        )
    }

    /// Put the native descriptor for `shape` on the object
    ///
    /// Leaving data mode copies the data property's value back into the
    /// backing slot so writes made while disabled are kept.
    fn install(&self, shape: NativeShape) -> PropertyResult<()> {
        let key = self.shared.key.clone();
        let carried = match self.object.get_own_property(&key) {
            Some(PropertyDescriptor::Data { value, .. }) if self.attached => Some(value),
            _ => None,
        };

        let desc = if shape.accessor {
            mediator::native_accessor(&self.shared, shape.attributes, shape.read_only)
        } else {
            let value = match &carried {
                Some(value) => value.clone(),
                None => self.shared.read_slot(&self.object)?,
            };
            PropertyDescriptor::data_with_attrs(value, shape.attributes)
        };

        self.object.define_property(key, desc)?;
        if let Some(value) = carried {
            self.shared.write_slot(&self.object, value)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for PropertyController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyController")
            .field("key", &self.shared.key)
            .field("private_key", &self.shared.private_key)
            .field("layers", &self.len())
            .field("state", &self.state())
            .finish()
    }
}
