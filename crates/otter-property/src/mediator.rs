//! Callback mediator
//!
//! The native accessor installed by a controller routes every read and write
//! through [`Shared`]. The current layer is snapshotted under the chain lock
//! and the lock is released before any user callback runs; while a callback
//! runs the dispatch depth is non-zero and chain mutations are refused.

use otter_object::{
    Getter, JsObject, PrivateKey, PropertyAttributes, PropertyDescriptor, PropertyKey, Setter,
    Value,
};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::trace;

use crate::chain::DescriptorChain;
use crate::error::{PropertyError, PropertyResult};

/// State shared between a controller and the accessor it installs
///
/// Holds no reference to the object, so the object owning the accessor and
/// the accessor owning this state do not form a cycle.
pub(crate) struct Shared {
    pub(crate) key: PropertyKey,
    pub(crate) private_key: PrivateKey,
    pub(crate) chain: RwLock<DescriptorChain>,
    depth: AtomicUsize,
    trace_dispatch: bool,
}

/// Marks a user callback as running until dropped
struct DispatchGuard<'a> {
    depth: &'a AtomicUsize,
}

impl<'a> DispatchGuard<'a> {
    fn enter(depth: &'a AtomicUsize) -> Self {
        depth.fetch_add(1, Ordering::AcqRel);
        Self { depth }
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.depth.fetch_sub(1, Ordering::AcqRel);
    }
}

impl Shared {
    pub(crate) fn new(key: PropertyKey, trace_dispatch: bool) -> Self {
        Self {
            private_key: PrivateKey::new(key.clone()),
            key,
            chain: RwLock::new(DescriptorChain::new()),
            depth: AtomicUsize::new(0),
            trace_dispatch,
        }
    }

    /// Check if a user callback of this controller is running
    pub(crate) fn is_dispatching(&self) -> bool {
        self.depth.load(Ordering::Acquire) > 0
    }

    /// Intercepted read
    pub(crate) fn dispatch_get(&self, object: &JsObject) -> PropertyResult<Value> {
        let getter = self
            .chain
            .read()
            .current()
            .and_then(|layer| layer.effective_getter())
            .cloned();

        if self.trace_dispatch {
            trace!(key = %self.key, intercepted = getter.is_some(), "property get");
        }

        match getter {
            Some(getter) => {
                let _guard = DispatchGuard::enter(&self.depth);
                Ok(getter.call(object)?)
            }
            None => self.read_slot(object),
        }
    }

    /// Intercepted write
    ///
    /// Without a firing setter the value goes to the backing slot, unless the
    /// current layer is read-only, in which case the write is dropped.
    pub(crate) fn dispatch_set(&self, object: &JsObject, value: Value) -> PropertyResult<()> {
        let (setter, writable) = {
            let chain = self.chain.read();
            match chain.current() {
                Some(layer) => (layer.effective_setter().cloned(), layer.writable),
                None => (None, true),
            }
        };

        if self.trace_dispatch {
            trace!(key = %self.key, intercepted = setter.is_some(), writable, "property set");
        }

        match setter {
            Some(setter) => {
                let _guard = DispatchGuard::enter(&self.depth);
                Ok(setter.call(object, value)?)
            }
            None if writable => self.write_slot(object, value),
            None => Ok(()),
        }
    }

    pub(crate) fn read_slot(&self, object: &JsObject) -> PropertyResult<Value> {
        object
            .private_get(&self.private_key)
            .ok_or_else(|| PropertyError::MissingBackingSlot(self.private_key.clone()))
    }

    pub(crate) fn write_slot(&self, object: &JsObject, value: Value) -> PropertyResult<()> {
        if object.private_set(&self.private_key, value) {
            Ok(())
        } else {
            Err(PropertyError::MissingBackingSlot(self.private_key.clone()))
        }
    }
}

/// Build the native accessor that routes through `shared`
///
/// A read-only accessor has no setter, so host writes report `false`.
pub(crate) fn native_accessor(
    shared: &Arc<Shared>,
    attributes: PropertyAttributes,
    read_only: bool,
) -> PropertyDescriptor {
    let on_get = Arc::clone(shared);
    let on_set = Arc::clone(shared);
    let setter = (!read_only).then(|| {
        Setter::new(move |object, value| Ok(on_set.dispatch_set(object, value)?))
    });
    PropertyDescriptor::accessor(
        Some(Getter::new(move |object| Ok(on_get.dispatch_get(object)?))),
        setter,
        attributes,
    )
}
