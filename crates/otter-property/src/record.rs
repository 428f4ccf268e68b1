//! Descriptor records
//!
//! One layer of get/set/enumerable/configurable behavior plus its activation
//! state. The state is a tagged [`LayerState`] instead of separate
//! `active`/`enabled` flags, so an active layer is always an enabled one.

use otter_object::{Getter, PropertyAttributes, PropertyDescriptor, Setter};
use std::fmt;

/// Which interception callback an operation targets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Callback {
    /// Both `onGet` and `onSet`
    Both,
    /// The getter callback
    OnGet,
    /// The setter callback
    OnSet,
}

/// Per-callback activity of a layer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Activity {
    /// Getter fires on read
    pub on_get: bool,
    /// Setter fires on write
    pub on_set: bool,
}

impl Activity {
    /// Both callbacks fire
    pub const BOTH: Self = Self::all(true);

    /// No callback fires
    pub const NONE: Self = Self::all(false);

    /// Same flag for both callbacks
    pub const fn all(active: bool) -> Self {
        Self {
            on_get: active,
            on_set: active,
        }
    }

    /// Read the flag for `callback`; `Both` requires both halves
    pub fn get(self, callback: Callback) -> bool {
        match callback {
            Callback::Both => self.on_get && self.on_set,
            Callback::OnGet => self.on_get,
            Callback::OnSet => self.on_set,
        }
    }

    /// Copy with the flag for `callback` replaced
    pub fn with(mut self, callback: Callback, active: bool) -> Self {
        match callback {
            Callback::Both => self = Self::all(active),
            Callback::OnGet => self.on_get = active,
            Callback::OnSet => self.on_set = active,
        }
        self
    }

    /// At least one callback fires
    pub fn any(self) -> bool {
        self.on_get || self.on_set
    }
}

/// Input shape for a layer's `active` field
///
/// A boolean sets both halves; the split form leaves an omitted half active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Active {
    /// Same flag for both callbacks
    All(bool),
    /// Independent flags
    Split {
        /// Getter flag
        on_get: Option<bool>,
        /// Setter flag
        on_set: Option<bool>,
    },
}

impl From<bool> for Active {
    fn from(active: bool) -> Self {
        Self::All(active)
    }
}

impl From<Activity> for Active {
    fn from(activity: Activity) -> Self {
        Self::Split {
            on_get: Some(activity.on_get),
            on_set: Some(activity.on_set),
        }
    }
}

impl From<Active> for Activity {
    fn from(active: Active) -> Self {
        match active {
            Active::All(active) => Activity::all(active),
            Active::Split { on_get, on_set } => Activity {
                on_get: on_get.unwrap_or(true),
                on_set: on_set.unwrap_or(true),
            },
        }
    }
}

/// Installation state of a layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerState {
    /// Installable; callbacks fire according to the activity
    Enabled(Activity),
    /// Not installed; `resume` is restored by [`LayerState::enable`]
    Disabled {
        /// Activity to restore
        resume: Activity,
    },
}

impl LayerState {
    /// Check if the layer is enabled
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled(_))
    }

    /// Live activity (`NONE` while disabled)
    pub fn activity(self) -> Activity {
        match self {
            Self::Enabled(activity) => activity,
            Self::Disabled { .. } => Activity::NONE,
        }
    }

    /// Stored activity, including the one a disabled layer will resume with
    pub fn stored_activity(self) -> Activity {
        match self {
            Self::Enabled(activity) | Self::Disabled { resume: activity } => activity,
        }
    }

    /// Replace the stored activity without changing enablement
    pub fn with_activity(self, activity: Activity) -> Self {
        match self {
            Self::Enabled(_) => Self::Enabled(activity),
            Self::Disabled { .. } => Self::Disabled { resume: activity },
        }
    }

    /// Enabled state with the remembered activity
    pub fn enable(self) -> Self {
        Self::Enabled(self.stored_activity())
    }

    /// Disabled state remembering the current activity
    pub fn disable(self) -> Self {
        Self::Disabled {
            resume: self.stored_activity(),
        }
    }
}

impl Default for LayerState {
    fn default() -> Self {
        Self::Enabled(Activity::BOTH)
    }
}

/// One layer of a descriptor chain
#[derive(Clone)]
pub struct DescriptorRecord {
    /// Custom getter
    pub get: Option<Getter>,
    /// Custom setter
    pub set: Option<Setter>,
    /// Backing-slot writes allowed when no setter fires
    pub writable: bool,
    /// Mirrored onto the native descriptor
    pub enumerable: bool,
    /// Mirrored onto the native descriptor
    pub configurable: bool,
    state: LayerState,
}

impl DescriptorRecord {
    /// Enumerable, configurable, enabled and fully active layer with no callbacks
    pub fn new() -> Self {
        Self {
            get: None,
            set: None,
            writable: true,
            enumerable: true,
            configurable: true,
            state: LayerState::default(),
        }
    }

    /// Plain data layer backed by the private slot
    pub fn plain(attributes: PropertyAttributes) -> Self {
        Self {
            writable: attributes.writable,
            enumerable: attributes.enumerable,
            configurable: attributes.configurable,
            ..Self::new()
        }
    }

    /// Import a native descriptor as a layer
    ///
    /// Accessors keep their getter and setter; data properties become a plain
    /// layer (their value belongs in the backing slot).
    pub fn from_native(desc: &PropertyDescriptor) -> Self {
        match desc {
            PropertyDescriptor::Accessor {
                get,
                set,
                attributes,
            } => Self {
                get: get.clone(),
                set: set.clone(),
                writable: set.is_some(),
                ..Self::plain(*attributes)
            },
            PropertyDescriptor::Data { attributes, .. } => Self::plain(*attributes),
        }
    }

    /// Set the getter
    pub fn getter(mut self, getter: Getter) -> Self {
        self.get = Some(getter);
        self
    }

    /// Set the setter
    pub fn setter(mut self, setter: Setter) -> Self {
        self.set = Some(setter);
        self
    }

    /// Set slot writability
    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    /// Set enumerability
    pub fn enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = enumerable;
        self
    }

    /// Set configurability
    pub fn configurable(mut self, configurable: bool) -> Self {
        self.configurable = configurable;
        self
    }

    /// Set the activity
    pub fn active(mut self, active: impl Into<Active>) -> Self {
        let activity = Activity::from(active.into());
        self.state = self.state.with_activity(activity);
        self
    }

    /// Set enablement, keeping the activity
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.state = if enabled {
            self.state.enable()
        } else {
            self.state.disable()
        };
        self
    }

    /// Layer state
    pub fn state(&self) -> LayerState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: LayerState) {
        self.state = state;
    }

    /// Live activity
    pub fn activity(&self) -> Activity {
        self.state.activity()
    }

    /// Check if the layer is enabled
    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    /// Attributes mirrored onto the native descriptor
    pub fn attributes(&self) -> PropertyAttributes {
        PropertyAttributes {
            writable: self.writable,
            enumerable: self.enumerable,
            configurable: self.configurable,
        }
    }

    /// Getter that fires on read, if any
    pub fn effective_getter(&self) -> Option<&Getter> {
        self.get.as_ref().filter(|_| self.activity().on_get)
    }

    /// Check if writes can land anywhere: a setter or a writable slot
    pub fn accepts_writes(&self) -> bool {
        self.writable || self.set.is_some()
    }

    /// Setter that fires on write, if any
    pub fn effective_setter(&self) -> Option<&Setter> {
        self.set.as_ref().filter(|_| self.activity().on_set)
    }
}

impl Default for DescriptorRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DescriptorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorRecord")
            .field("get", &self.get.is_some())
            .field("set", &self.set.is_some())
            .field("writable", &self.writable)
            .field("enumerable", &self.enumerable)
            .field("configurable", &self.configurable)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otter_object::Value;

    #[test]
    fn test_split_active_defaults_missing_half() {
        let activity = Activity::from(Active::Split {
            on_get: Some(false),
            on_set: None,
        });
        assert_eq!(
            activity,
            Activity {
                on_get: false,
                on_set: true
            }
        );
    }

    #[test]
    fn test_activity_both_needs_both_halves() {
        let activity = Activity::BOTH.with(Callback::OnSet, false);
        assert!(activity.get(Callback::OnGet));
        assert!(!activity.get(Callback::Both));
        assert!(activity.any());
        assert!(!Activity::NONE.any());
    }

    #[test]
    fn test_disable_enable_restores_activity() {
        let state = LayerState::Enabled(Activity {
            on_get: true,
            on_set: false,
        });
        let disabled = state.disable();
        assert!(!disabled.is_enabled());
        assert_eq!(disabled.activity(), Activity::NONE);
        assert_eq!(disabled.enable(), state);
    }

    #[test]
    fn test_disabled_layer_has_no_effective_callbacks() {
        let record = DescriptorRecord::new()
            .getter(Getter::new(|_| Ok(Value::from(1))))
            .enabled(false);
        assert!(record.get.is_some());
        assert!(record.effective_getter().is_none());
        assert_eq!(record.state().stored_activity(), Activity::BOTH);
    }

    #[test]
    fn test_plain_keeps_writable() {
        let record = DescriptorRecord::plain(PropertyAttributes {
            writable: false,
            ..PropertyAttributes::data()
        });
        assert!(!record.writable);
        assert!(!record.attributes().writable);
        assert!(record.setter(Setter::new(|_, _| Ok(()))).accepts_writes());
    }

    #[test]
    fn test_from_native_accessor() {
        let getter = Getter::new(|_| Ok(Value::null()));
        let native = PropertyDescriptor::accessor(
            Some(getter.clone()),
            None,
            PropertyAttributes {
                enumerable: false,
                ..PropertyAttributes::data()
            },
        );
        let record = DescriptorRecord::from_native(&native);
        assert!(record.get.as_ref().is_some_and(|g| g.ptr_eq(&getter)));
        assert!(record.set.is_none());
        assert!(!record.writable);
        assert!(!record.accepts_writes());
        assert!(!record.enumerable);
        assert!(record.configurable);
    }
}
