//! Plain objects with ordered properties
//!
//! Own properties live in an insertion-ordered table so enumeration matches
//! JavaScript `Object.keys` order. Hidden backing slots live in a separate
//! side-table keyed by [`PrivateKey`] and never show up in enumeration.

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{ObjectError, ObjectResult};
use crate::key::{PrivateKey, PropertyKey};
use crate::property::PropertyDescriptor;
use crate::value::Value;

/// A plain object
///
/// Thread-safe with interior mutability. Locks are never held while a
/// native getter or setter runs, so accessors may freely read and write
/// other properties of the same object.
pub struct JsObject {
    /// Own properties in insertion order
    properties: RwLock<IndexMap<PropertyKey, PropertyDescriptor, FxBuildHasher>>,
    /// Hidden backing slots
    private: RwLock<FxHashMap<PrivateKey, Value>>,
    /// Whether new properties may be added
    extensible: AtomicBool,
}

impl JsObject {
    /// Create a new empty object
    pub fn new() -> Self {
        Self {
            properties: RwLock::new(IndexMap::default()),
            private: RwLock::new(FxHashMap::default()),
            extensible: AtomicBool::new(true),
        }
    }

    /// Get property by key
    ///
    /// Absent properties and accessors without a getter read as `undefined`.
    pub fn get(&self, key: &PropertyKey) -> ObjectResult<Value> {
        let getter = {
            let props = self.properties.read();
            match props.get(key) {
                None => return Ok(Value::undefined()),
                Some(PropertyDescriptor::Data { value, .. }) => return Ok(value.clone()),
                Some(PropertyDescriptor::Accessor { get, .. }) => get.clone(),
            }
        };

        match getter {
            Some(getter) => getter.call(self),
            None => Ok(Value::undefined()),
        }
    }

    /// Set property by key
    ///
    /// Returns `false` when the write is silently rejected (non-writable data
    /// property, accessor without setter, non-extensible object).
    pub fn set(&self, key: PropertyKey, value: Value) -> ObjectResult<bool> {
        let setter = {
            let mut props = self.properties.write();
            match props.get_mut(&key) {
                Some(PropertyDescriptor::Data {
                    value: slot,
                    attributes,
                }) => {
                    if !attributes.writable {
                        return Ok(false);
                    }
                    *slot = value;
                    return Ok(true);
                }
                Some(PropertyDescriptor::Accessor { set, .. }) => set.clone(),
                None => {
                    if !self.is_extensible() {
                        return Ok(false);
                    }
                    props.insert(key, PropertyDescriptor::data(value));
                    return Ok(true);
                }
            }
        };

        match setter {
            Some(setter) => {
                setter.call(self, value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Define a property with descriptor
    ///
    /// Redefining keeps the key's enumeration position.
    pub fn define_property(&self, key: PropertyKey, desc: PropertyDescriptor) -> ObjectResult<()> {
        let mut props = self.properties.write();
        let configurable = props.get(&key).map(PropertyDescriptor::is_configurable);
        match configurable {
            Some(false) => Err(ObjectError::NotConfigurable(key)),
            None if !self.is_extensible() => Err(ObjectError::NotExtensible(key)),
            _ => {
                props.insert(key, desc);
                Ok(())
            }
        }
    }

    /// Get own property descriptor
    pub fn get_own_property(&self, key: &PropertyKey) -> Option<PropertyDescriptor> {
        self.properties.read().get(key).cloned()
    }

    /// Check if object has own property
    pub fn has_own(&self, key: &PropertyKey) -> bool {
        self.properties.read().contains_key(key)
    }

    /// Delete property
    pub fn delete(&self, key: &PropertyKey) -> bool {
        let mut props = self.properties.write();
        match props.get(key).map(PropertyDescriptor::is_configurable) {
            Some(false) => false,
            Some(true) => props.shift_remove(key).is_some(),
            None => true,
        }
    }

    /// Get own property keys, enumerable or not
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        self.properties.read().keys().cloned().collect()
    }

    /// Get own enumerable keys (`Object.keys`)
    pub fn keys(&self) -> Vec<PropertyKey> {
        self.properties
            .read()
            .iter()
            .filter(|(_, desc)| desc.is_enumerable())
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Check if new properties may be added
    pub fn is_extensible(&self) -> bool {
        self.extensible.load(Ordering::Acquire)
    }

    /// Forbid adding new properties
    pub fn prevent_extensions(&self) {
        self.extensible.store(false, Ordering::Release);
    }

    /// Create or overwrite a hidden slot
    pub fn init_private(&self, key: PrivateKey, value: Value) {
        self.private.write().insert(key, value);
    }

    /// Read a hidden slot
    pub fn private_get(&self, key: &PrivateKey) -> Option<Value> {
        self.private.read().get(key).cloned()
    }

    /// Write an existing hidden slot
    ///
    /// Returns `false` if the slot was never initialized.
    pub fn private_set(&self, key: &PrivateKey, value: Value) -> bool {
        match self.private.write().get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Check if a hidden slot exists
    pub fn has_private(&self, key: &PrivateKey) -> bool {
        self.private.read().contains_key(key)
    }

    /// Remove a hidden slot, returning its value
    pub fn remove_private(&self, key: &PrivateKey) -> Option<Value> {
        self.private.write().remove(key)
    }
}

impl Default for JsObject {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for JsObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsObject")
            .field("properties", &self.properties.read().len())
            .field("private", &self.private.read().len())
            .field("extensible", &self.is_extensible())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyAttributes;

    #[test]
    fn test_object_get_set() {
        let obj = JsObject::new();

        assert!(obj.set(PropertyKey::string("foo"), Value::from(42)).unwrap());
        assert_eq!(obj.get(&PropertyKey::string("foo")).unwrap(), Value::from(42));
        assert!(obj.get(&PropertyKey::string("bar")).unwrap().is_undefined());
    }

    #[test]
    fn test_non_writable_rejects_write() {
        let obj = JsObject::new();
        let key = PropertyKey::string("k");
        let attrs = PropertyAttributes {
            writable: false,
            ..PropertyAttributes::data()
        };
        obj.define_property(key.clone(), PropertyDescriptor::data_with_attrs(Value::from(1), attrs))
            .unwrap();

        assert!(!obj.set(key.clone(), Value::from(2)).unwrap());
        assert_eq!(obj.get(&key).unwrap(), Value::from(1));
    }

    #[test]
    fn test_private_slots_are_hidden() {
        let obj = JsObject::new();
        let key = PrivateKey::new(PropertyKey::string("x"));

        assert!(!obj.private_set(&key, Value::from(1)));
        obj.init_private(key.clone(), Value::undefined());
        assert!(obj.private_set(&key, Value::from(1)));
        assert_eq!(obj.private_get(&key), Some(Value::from(1)));
        assert!(obj.own_keys().is_empty());
    }

    #[test]
    fn test_object_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JsObject>();
    }
}
