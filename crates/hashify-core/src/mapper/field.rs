use crate::{Result, Value};

/// Reads one field's value off the host instance.
pub type GetFn<T> = Box<dyn Fn(&T) -> Value + Send + Sync>;

/// Transforms one field's value in one direction.
pub type TransformFn = Box<dyn Fn(Value) -> Result<Value> + Send + Sync>;

/// Describes one mapped field: its name, an explicit accessor, and optional
/// directional transforms.
///
/// The name is immutable after construction. Transforms default to identity;
/// errors raised inside a configured transform propagate unmodified.
pub struct Field<T> {
    name: String,
    get: GetFn<T>,
    encode: Option<TransformFn>,
    decode: Option<TransformFn>,
}

impl<T> Field<T> {
    pub(crate) fn new(name: String, get: GetFn<T>) -> Self {
        Field {
            name,
            get,
            encode: None,
            decode: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn read(&self, instance: &T) -> Value {
        (self.get)(instance)
    }

    pub(crate) fn encode(&self, value: Value) -> Result<Value> {
        match &self.encode {
            Some(transform) => transform(value),
            None => Ok(value),
        }
    }

    pub(crate) fn decode(&self, value: Value) -> Result<Value> {
        match &self.decode {
            Some(transform) => transform(value),
            None => Ok(value),
        }
    }

    // Setting a transform twice replaces the earlier one.
    pub(crate) fn set_encode(&mut self, transform: TransformFn) {
        self.encode = Some(transform);
    }

    pub(crate) fn set_decode(&mut self, transform: TransformFn) {
        self.decode = Some(transform);
    }
}
