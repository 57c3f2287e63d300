use std::any::Any;

use crate::{Map, Mapper, Result};

/// A type that can be projected into an ordered [`Map`] and reconstructed
/// from one.
///
/// Implementors supply a [`Mapper`] configured once per type; the provided
/// entry points drive whole-object serialization through it. Types carrying
/// this capability may also participate as collection elements of other
/// mappable types.
pub trait Mappable:
    std::fmt::Debug + Clone + PartialEq + Send + Sync + Sized + 'static
{
    /// The mapper bound to this type. Expected to be configured once and
    /// shared, typically through a `LazyLock` static.
    fn mapper() -> &'static Mapper<Self>;

    /// Projects this instance into an ordered map.
    fn to_map(&self) -> Result<Map> {
        Self::mapper().to_map(self)
    }

    /// Reconstructs an instance from an ordered map.
    fn from_map(map: Map) -> Result<Self> {
        Self::mapper().from_map(map)
    }
}

/// Object-safe, erased form of [`Mappable`], used to carry mapped objects
/// inside [`Value`](crate::Value) collections.
///
/// Implemented for every [`Mappable`] type; not meant to be implemented by
/// hand.
pub trait DynMappable: std::fmt::Debug + Send + Sync {
    /// The concrete type's name, used as the metadata type identifier.
    fn type_name(&self) -> &'static str;

    /// Projects the erased object into a map.
    fn to_map_dyn(&self) -> Result<Map>;

    fn clone_dyn(&self) -> Box<dyn DynMappable>;

    /// Compares against another erased object; false across concrete types.
    fn eq_dyn(&self, other: &dyn DynMappable) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Mappable> DynMappable for T {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn to_map_dyn(&self) -> Result<Map> {
        self.to_map()
    }

    fn clone_dyn(&self) -> Box<dyn DynMappable> {
        Box::new(self.clone())
    }

    fn eq_dyn(&self, other: &dyn DynMappable) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Default instantiation strategy: construct the host type directly from
/// the decoded field map.
///
/// Mappers built without an explicit strategy use this; see
/// [`MapperBuilder::build`](crate::MapperBuilder::build).
pub trait FromFields: Sized {
    fn from_fields(fields: Map) -> Result<Self>;
}
