//! Property keys
//!
//! Public keys are strings or symbols. Private keys address the hidden
//! side-table of an object and are unique per allocation, so two private keys
//! derived from the same public key never collide.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_PRIVATE_ID: AtomicU64 = AtomicU64::new(1);

/// A unique symbol
///
/// Identity is the allocation id; the description is only for display.
#[derive(Clone, Debug)]
pub struct Symbol {
    id: u64,
    description: Option<Arc<str>>,
}

impl Symbol {
    /// Create a new symbol with an optional description
    pub fn new(description: Option<&str>) -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: description.map(Arc::from),
        }
    }

    /// Symbol id
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Symbol description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description.as_deref().unwrap_or(""))
    }
}

/// Property key (string or symbol)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// String property key
    String(Arc<str>),
    /// Symbol property key
    Symbol(Symbol),
}

impl PropertyKey {
    /// Create a string property key
    pub fn string(s: &str) -> Self {
        Self::String(Arc::from(s))
    }

    /// Get the string name, if this is a string key
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Symbol(_) => None,
        }
    }

    /// Check if this is a symbol key
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        Self::string(s)
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        Self::String(Arc::from(s))
    }
}

impl From<Symbol> for PropertyKey {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Symbol(symbol) => symbol.fmt(f),
        }
    }
}

/// Key of a hidden backing slot
///
/// Carries the public key it shadows plus a process-unique id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PrivateKey {
    key: PropertyKey,
    id: u64,
}

impl PrivateKey {
    /// Allocate a fresh private key for `key`
    pub fn new(key: PropertyKey) -> Self {
        Self {
            key,
            id: NEXT_PRIVATE_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// The public key this slot shadows
    pub fn key(&self) -> &PropertyKey {
        &self.key
    }

    /// Allocation id
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}@{}", self.key, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_are_unique() {
        let a = Symbol::new(Some("tag"));
        let b = Symbol::new(Some("tag"));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(a.to_string(), "Symbol(tag)");
    }

    #[test]
    fn test_private_keys_never_collide() {
        let a = PrivateKey::new(PropertyKey::string("x"));
        let b = PrivateKey::new(PropertyKey::string("x"));
        assert_ne!(a, b);
        assert_eq!(a.key(), b.key());
        assert!(a.to_string().starts_with("#x@"));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(PropertyKey::from("name").to_string(), "name");
        let key = PropertyKey::from(Symbol::new(None));
        assert!(key.is_symbol());
        assert_eq!(key.as_str(), None);
        assert_eq!(key.to_string(), "Symbol()");
    }
}
