use super::field::Field;
use crate::mappable::Mappable;
use crate::meta::TypeMetadata;
use crate::registry::{self, DecodeMapFn};
use crate::{Result, Value};

/// Statically captured element capability for a collection field: the
/// element type's name and its erased deserializer.
#[derive(Clone, Copy)]
pub struct ElementType {
    name: &'static str,
    decode: DecodeMapFn,
}

impl ElementType {
    pub fn of<E: Mappable>() -> Self {
        ElementType {
            name: std::any::type_name::<E>(),
            decode: registry::decode_erased::<E>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A field descriptor specialized for sequences of mappable elements.
///
/// Wraps a plain [`Field`] holder and applies element-wise mapping before
/// delegating to the holder's own transform. Element order is preserved and
/// the full collection is materialized.
pub struct CollectionField<T> {
    holder: Field<T>,
    element: ElementType,
}

impl<T> CollectionField<T> {
    pub(crate) fn new(holder: Field<T>, element: ElementType) -> Self {
        CollectionField { holder, element }
    }

    pub fn name(&self) -> &str {
        self.holder.name()
    }

    /// The statically declared element type name.
    pub fn element_type(&self) -> &'static str {
        self.element.name
    }

    pub(crate) fn holder_mut(&mut self) -> &mut Field<T> {
        &mut self.holder
    }

    pub(crate) fn into_holder(self) -> Field<T> {
        self.holder
    }

    pub(crate) fn read(&self, instance: &T) -> Value {
        self.holder.read(instance)
    }

    /// Maps each mappable element through its own mapper and passes other
    /// elements through unchanged, then applies the holder's transform.
    ///
    /// Returns the encoded value and the type name of the first mappable
    /// element observed, for recording into [`TypeMetadata`].
    pub(crate) fn encode(&self, raw: Value) -> Result<(Value, Option<&'static str>)> {
        let (value, observed) = match raw {
            Value::List(items) => {
                let mut observed = None;
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Mappable(element) => {
                            if observed.is_none() {
                                observed = Some(element.type_name());
                            }
                            out.push(Value::Map(element.to_map_dyn()?));
                        }
                        other => out.push(other),
                    }
                }
                (Value::List(out), observed)
            }
            other => (other, None),
        };
        Ok((self.holder.encode(value)?, observed))
    }

    /// Reconstructs map-shaped elements through the resolved element type
    /// and passes other elements through raw, then applies the holder's
    /// transform.
    pub(crate) fn decode(&self, raw: Value, meta: &TypeMetadata) -> Result<Value> {
        let value = match raw {
            Value::List(items) => {
                let decode = self.resolve_element(meta);
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    match (item, decode) {
                        (Value::Map(map), Some(decode)) => {
                            out.push(Value::Mappable(decode(map)?));
                        }
                        (other, _) => out.push(other),
                    }
                }
                Value::List(out)
            }
            other => other,
        };
        self.holder.decode(value)
    }

    /// Metadata names the element type when present; silent metadata falls
    /// back to the statically declared element type. A recorded name that
    /// matches neither the declared type nor a registry entry leaves
    /// elements raw.
    fn resolve_element(&self, meta: &TypeMetadata) -> Option<DecodeMapFn> {
        match meta.element_type(self.holder.name()) {
            Some(name) if name == self.element.name => Some(self.element.decode),
            Some(name) => registry::resolve(name),
            None => Some(self.element.decode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mappable::FromFields;
    use crate::{Map, Mapper};
    use std::sync::LazyLock;

    #[derive(Debug, Clone, PartialEq)]
    struct Tag {
        name: String,
    }

    impl FromFields for Tag {
        fn from_fields(mut fields: Map) -> Result<Self> {
            Ok(Tag {
                name: fields.take("name").to_string()?,
            })
        }
    }

    impl Mappable for Tag {
        fn mapper() -> &'static Mapper<Tag> {
            static MAPPER: LazyLock<Mapper<Tag>> = LazyLock::new(|| {
                Mapper::builder()
                    .field("name", |t: &Tag| Value::from(t.name.as_str()))
                    .build()
            });
            &MAPPER
        }
    }

    fn tags_field() -> CollectionField<Vec<Tag>> {
        let holder = Field::new(
            "tags".to_string(),
            Box::new(|tags: &Vec<Tag>| Value::mappable_list(tags)),
        );
        CollectionField::new(holder, ElementType::of::<Tag>())
    }

    #[test]
    fn element_type_is_the_declared_one() {
        let field = tags_field();
        assert_eq!(field.element_type(), std::any::type_name::<Tag>());
        assert_eq!(field.element_type(), ElementType::of::<Tag>().name());
    }

    #[test]
    fn encode_reports_the_observed_element_type() {
        let tags = vec![Tag {
            name: "wip".to_string(),
        }];
        let field = tags_field();

        let (value, observed) = field.encode(field.read(&tags)).unwrap();
        assert_eq!(observed, Some(std::any::type_name::<Tag>()));
        assert!(value.is_list());
    }
}
