//! Process-wide table of types eligible for dynamic collection-element
//! reconstruction.
//!
//! Collection fields capture their declared element type statically; the
//! registry is only consulted when serialized metadata records a different
//! type than the one declared. Registration is expected to happen during
//! setup, before deserialization traffic starts.

use std::collections::HashMap;
use std::sync::{LazyLock, RwLock};

use crate::mappable::{DynMappable, Mappable};
use crate::{Map, Result};

/// Erased deserializer for one registered type.
pub type DecodeMapFn = fn(Map) -> Result<Box<dyn DynMappable>>;

pub(crate) fn decode_erased<T: Mappable>(map: Map) -> Result<Box<dyn DynMappable>> {
    Ok(Box::new(T::from_map(map)?))
}

/// Maps type names to erased deserializers.
#[derive(Default)]
pub struct Registry {
    entries: HashMap<&'static str, DecodeMapFn>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under its type name. Re-registering replaces the entry.
    pub fn register<T: Mappable>(&mut self) {
        self.entries
            .insert(std::any::type_name::<T>(), decode_erased::<T>);
    }

    /// Looks up the erased deserializer recorded for a type name.
    pub fn resolve(&self, name: &str) -> Option<DecodeMapFn> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static GLOBAL: LazyLock<RwLock<Registry>> = LazyLock::new(|| RwLock::new(Registry::new()));

/// Registers `T` in the process-wide registry.
pub fn register<T: Mappable>() {
    GLOBAL.write().expect("registry lock poisoned").register::<T>();
}

/// Resolves a recorded type name against the process-wide registry.
pub fn resolve(name: &str) -> Option<DecodeMapFn> {
    GLOBAL.read().expect("registry lock poisoned").resolve(name)
}

/// Whether a type name is registered in the process-wide registry.
pub fn is_registered(name: &str) -> bool {
    GLOBAL.read().expect("registry lock poisoned").contains(name)
}
