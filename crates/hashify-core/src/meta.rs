use indexmap::IndexMap;

use crate::{Map, Value};

/// Reserved top-level key carrying mapping metadata in serialized output.
pub const META_KEY: &str = "__hashing__";

const TYPES_KEY: &str = "types";

/// Side-channel data embedded in serialized output, recording which concrete
/// element type each collection field was observed to hold.
///
/// Deserialization consults this table to dispatch element reconstruction.
/// The table is best effort: the first mappable element observed per field
/// wins, and heterogeneous collections are not reconciled.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TypeMetadata {
    types: IndexMap<String, String>,
}

impl TypeMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Records the element type observed for a collection field. The first
    /// recorded type per field wins.
    pub fn record(&mut self, field: &str, ty: &str) {
        if !self.types.contains_key(field) {
            self.types.insert(field.to_string(), ty.to_string());
        }
    }

    /// The recorded element type for a collection field, if any.
    pub fn element_type(&self, field: &str) -> Option<&str> {
        self.types.get(field).map(String::as_str)
    }

    /// Renders the metadata as the value stored under [`META_KEY`].
    pub fn into_value(self) -> Value {
        let mut types = Map::with_capacity(self.types.len());
        for (field, ty) in self.types {
            types.insert(field, Value::String(ty));
        }
        let mut meta = Map::with_capacity(1);
        meta.insert(TYPES_KEY, Value::Map(types));
        Value::Map(meta)
    }

    /// Parses the value stored under [`META_KEY`]. Lenient: absent or
    /// malformed metadata yields an empty table, leaving elements raw.
    pub fn from_value(value: Option<Value>) -> Self {
        let mut types = IndexMap::new();
        if let Some(Value::Map(mut meta)) = value {
            if let Some(Value::Map(table)) = meta.remove(TYPES_KEY) {
                for (field, ty) in table {
                    if let Value::String(name) = ty {
                        types.insert(field, name);
                    }
                }
            }
        }
        TypeMetadata { types }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_recorded_type_wins() {
        let mut meta = TypeMetadata::new();
        meta.record("annotations", "demo::Annotation");
        meta.record("annotations", "demo::Other");

        assert_eq!(meta.element_type("annotations"), Some("demo::Annotation"));
        assert_eq!(meta.element_type("files"), None);
    }

    #[test]
    fn value_round_trip() {
        let mut meta = TypeMetadata::new();
        meta.record("annotations", "demo::Annotation");

        let restored = TypeMetadata::from_value(Some(meta.clone().into_value()));
        assert_eq!(restored, meta);
    }

    #[test]
    fn wire_shape() {
        let mut meta = TypeMetadata::new();
        meta.record("annotations", "demo::Annotation");

        let value = meta.into_value();
        let types = value.as_map().unwrap().get(TYPES_KEY).unwrap();
        assert_eq!(
            types.as_map().unwrap().get("annotations"),
            Some(&Value::from("demo::Annotation"))
        );
    }

    #[test]
    fn malformed_metadata_is_ignored() {
        assert!(TypeMetadata::from_value(None).is_empty());
        assert!(TypeMetadata::from_value(Some(Value::from(42))).is_empty());

        let mut meta = Map::new();
        meta.insert(TYPES_KEY, Value::from("not a table"));
        assert!(TypeMetadata::from_value(Some(Value::Map(meta))).is_empty());
    }
}
