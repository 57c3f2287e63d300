mod collection;
mod field;

pub use collection::{CollectionField, ElementType};
pub use field::{Field, GetFn, TransformFn};

use std::sync::Arc;

use crate::mappable::{FromFields, Mappable};
use crate::meta::{TypeMetadata, META_KEY};
use crate::{Error, Map, Result, Value};

type LoadFn<T> = Box<dyn Fn(Map) -> Result<T> + Send + Sync>;

/// One object carrying both directions of a field transform.
///
/// Attached with [`MapperBuilder::using`], which routes the current field's
/// encode and decode through the same codec.
pub trait Codec: Send + Sync + 'static {
    fn encode(&self, value: Value) -> Result<Value>;
    fn decode(&self, value: Value) -> Result<Value>;
}

enum FieldSlot<T> {
    Plain(Field<T>),
    Collection(CollectionField<T>),
}

impl<T> FieldSlot<T> {
    fn name(&self) -> &str {
        match self {
            FieldSlot::Plain(field) => field.name(),
            FieldSlot::Collection(field) => field.name(),
        }
    }
}

/// Per-type engine owning an ordered set of field descriptors and driving
/// both mapping directions.
///
/// A mapper is configured once through [`MapperBuilder`] and is immutable
/// afterwards; sharing one mapper across threads for concurrent
/// serialization is safe.
pub struct Mapper<T> {
    host: &'static str,
    fields: Vec<FieldSlot<T>>,
    load: LoadFn<T>,
}

impl<T> Mapper<T> {
    /// Starts configuring a mapper for `T`.
    pub fn builder() -> MapperBuilder<T> {
        MapperBuilder {
            host: std::any::type_name::<T>(),
            fields: Vec::new(),
            load: None,
            cursor: None,
        }
    }

    /// The host type name, used in error messages and metadata.
    pub fn host(&self) -> &'static str {
        self.host
    }

    /// Registered field names, in registration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldSlot::name)
    }

    /// Projects an instance into a fresh ordered map.
    ///
    /// Fields are processed in registration order, which is observable in
    /// the output key order. When any collection field held mappable
    /// elements, their observed types are merged in under [`META_KEY`].
    pub fn to_map(&self, instance: &T) -> Result<Map> {
        let mut out = Map::with_capacity(self.fields.len() + 1);
        let mut meta = TypeMetadata::new();
        for slot in &self.fields {
            match slot {
                FieldSlot::Plain(field) => {
                    let value = field.encode(field.read(instance))?;
                    out.insert(field.name(), value);
                }
                FieldSlot::Collection(field) => {
                    let (value, observed) = field.encode(field.read(instance))?;
                    if let Some(ty) = observed {
                        meta.record(field.name(), ty);
                    }
                    out.insert(field.name(), value);
                }
            }
        }
        if !meta.is_empty() {
            out.insert(META_KEY, meta.into_value());
        }
        Ok(out)
    }

    /// Reconstructs an instance from a map.
    ///
    /// Keys without a registered descriptor fail the whole call with an
    /// unconfigured-keys error; the reserved [`META_KEY`] is always
    /// accepted. Missing fields decode from [`Value::Null`]. The decoded
    /// field map is handed to the configured instantiation strategy.
    pub fn from_map(&self, mut map: Map) -> Result<T> {
        let meta = TypeMetadata::from_value(map.remove(META_KEY));
        self.check_unconfigured_keys(&map)?;

        let mut fields = Map::with_capacity(self.fields.len());
        for slot in &self.fields {
            let raw = map.remove(slot.name()).unwrap_or_default();
            let value = match slot {
                FieldSlot::Plain(field) => field.decode(raw)?,
                FieldSlot::Collection(field) => field.decode(raw, &meta)?,
            };
            fields.insert(slot.name(), value);
        }
        (self.load)(fields)
    }

    fn check_unconfigured_keys(&self, map: &Map) -> Result<()> {
        let unrecognized: Vec<String> = map
            .keys()
            .filter(|key| self.fields.iter().all(|slot| slot.name() != *key))
            .map(str::to_string)
            .collect();
        if unrecognized.is_empty() {
            Ok(())
        } else {
            Err(Error::unconfigured_keys(self.host, unrecognized))
        }
    }
}

/// Fluent configuration surface for a [`Mapper`].
///
/// Each call to [`field`](Self::field) moves an internal cursor to the
/// just-registered descriptor; [`encode`](Self::encode),
/// [`decode`](Self::decode), [`using`](Self::using) and
/// [`collection_of`](Self::collection_of) configure that descriptor. The
/// cursor is local to the builder; no global state is involved.
pub struct MapperBuilder<T> {
    host: &'static str,
    fields: Vec<FieldSlot<T>>,
    load: Option<LoadFn<T>>,
    cursor: Option<usize>,
}

impl<T> MapperBuilder<T> {
    /// Registers a field by name with an explicit accessor.
    ///
    /// Re-registering an existing name replaces the earlier descriptor in
    /// place, keeping its position in the field order and discarding its
    /// transforms.
    pub fn field(
        mut self,
        name: impl Into<String>,
        get: impl Fn(&T) -> Value + Send + Sync + 'static,
    ) -> Self {
        let field = Field::new(name.into(), Box::new(get));
        let index = self
            .fields
            .iter()
            .position(|slot| slot.name() == field.name());
        match index {
            Some(index) => {
                self.fields[index] = FieldSlot::Plain(field);
                self.cursor = Some(index);
            }
            None => {
                self.fields.push(FieldSlot::Plain(field));
                self.cursor = Some(self.fields.len() - 1);
            }
        }
        self
    }

    /// Sets the serialize transform for the current field.
    ///
    /// # Panics
    ///
    /// Panics when no field has been registered yet.
    pub fn encode(
        self,
        transform: impl Fn(Value) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.encode_fn(Box::new(transform))
    }

    /// Boxed variant of [`encode`](Self::encode).
    pub fn encode_fn(mut self, transform: TransformFn) -> Self {
        self.current_mut().set_encode(transform);
        self
    }

    /// Sets the deserialize transform for the current field.
    ///
    /// # Panics
    ///
    /// Panics when no field has been registered yet.
    pub fn decode(
        self,
        transform: impl Fn(Value) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.decode_fn(Box::new(transform))
    }

    /// Boxed variant of [`decode`](Self::decode).
    pub fn decode_fn(mut self, transform: TransformFn) -> Self {
        self.current_mut().set_decode(transform);
        self
    }

    /// Routes both directions of the current field through one codec.
    pub fn using(self, codec: impl Codec) -> Self {
        let codec = Arc::new(codec);
        let encode = {
            let codec = codec.clone();
            Box::new(move |value| codec.encode(value)) as TransformFn
        };
        let decode = Box::new(move |value| codec.decode(value)) as TransformFn;
        self.encode_fn(encode).decode_fn(decode)
    }

    /// Upgrades the current field into a collection of `E` elements,
    /// replacing the plain descriptor in place.
    ///
    /// Transforms already configured on the field keep applying to the
    /// whole (element-mapped) collection value.
    ///
    /// # Panics
    ///
    /// Panics when no field has been registered yet.
    pub fn collection_of<E: Mappable>(mut self) -> Self {
        let index = self
            .cursor
            .expect("collection_of must follow a field registration");
        let holder = match self.fields.remove(index) {
            FieldSlot::Plain(field) => field,
            FieldSlot::Collection(field) => field.into_holder(),
        };
        self.fields.insert(
            index,
            FieldSlot::Collection(CollectionField::new(holder, ElementType::of::<E>())),
        );
        self
    }

    /// Sets the instantiation strategy invoked with the decoded field map.
    pub fn load_with(
        mut self,
        load: impl Fn(Map) -> Result<T> + Send + Sync + 'static,
    ) -> Self {
        self.load = Some(Box::new(load));
        self
    }

    /// Finishes the configuration. Without a [`load_with`](Self::load_with)
    /// strategy, instances are constructed through [`FromFields`].
    pub fn build(self) -> Mapper<T>
    where
        T: FromFields + 'static,
    {
        let load = self.load.unwrap_or_else(|| Box::new(T::from_fields));
        Mapper {
            host: self.host,
            fields: self.fields,
            load,
        }
    }

    /// Finishes with an explicit strategy, for host types that do not
    /// implement [`FromFields`].
    pub fn build_with(
        self,
        load: impl Fn(Map) -> Result<T> + Send + Sync + 'static,
    ) -> Mapper<T> {
        Mapper {
            host: self.host,
            fields: self.fields,
            load: Box::new(load),
        }
    }

    fn current_mut(&mut self) -> &mut Field<T> {
        let index = self
            .cursor
            .expect("transform configuration must follow a field registration");
        match &mut self.fields[index] {
            FieldSlot::Plain(field) => field,
            FieldSlot::Collection(field) => field.holder_mut(),
        }
    }
}
