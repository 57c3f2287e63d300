mod map;
pub use map::Map;

use crate::mappable::DynMappable;
use crate::{Error, Mappable, Result};

/// A dynamically typed value stored in a [`Map`].
#[derive(Debug, Default)]
pub enum Value {
    /// Null value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit floating point value
    F64(f64),

    /// String value
    String(String),

    /// A list of values
    List(Vec<Value>),

    /// An ordered string-keyed map
    Map(Map),

    /// A value satisfying the [`Mappable`] capability, carried in erased
    /// form so collections can mix mapped objects with plain values.
    Mappable(Box<dyn DynMappable>),
}

impl Value {
    /// Returns a `Value` representing null.
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// The variant name, used in conversion error messages.
    pub const fn ty_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool(_) => "Bool",
            Self::I64(_) => "I64",
            Self::F64(_) => "F64",
            Self::String(_) => "String",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
            Self::Mappable(_) => "Mappable",
        }
    }

    /// Wraps a mappable object as a value.
    pub fn mappable<T: Mappable>(value: &T) -> Value {
        Value::Mappable(Box::new(value.clone()))
    }

    /// Builds a list value out of mappable objects, preserving order.
    pub fn mappable_list<'a, T, I>(items: I) -> Value
    where
        T: Mappable,
        I: IntoIterator<Item = &'a T>,
    {
        Value::List(items.into_iter().map(Value::mappable).collect())
    }

    pub fn to_bool(self) -> Result<bool> {
        match self {
            Self::Bool(v) => Ok(v),
            other => Err(Error::type_conversion(other.ty_name(), "bool")),
        }
    }

    pub fn to_i64(self) -> Result<i64> {
        match self {
            Self::I64(v) => Ok(v),
            other => Err(Error::type_conversion(other.ty_name(), "i64")),
        }
    }

    pub fn to_f64(self) -> Result<f64> {
        match self {
            Self::F64(v) => Ok(v),
            other => Err(Error::type_conversion(other.ty_name(), "f64")),
        }
    }

    pub fn to_string(self) -> Result<String> {
        match self {
            Self::String(v) => Ok(v),
            other => Err(Error::type_conversion(other.ty_name(), "String")),
        }
    }

    pub fn to_list(self) -> Result<Vec<Value>> {
        match self {
            Self::List(v) => Ok(v),
            other => Err(Error::type_conversion(other.ty_name(), "List")),
        }
    }

    pub fn to_map(self) -> Result<Map> {
        match self {
            Self::Map(v) => Ok(v),
            other => Err(Error::type_conversion(other.ty_name(), "Map")),
        }
    }

    /// Recovers a concrete mappable object from an erased value.
    pub fn to_mappable<T: Mappable>(self) -> Result<T> {
        match self {
            Self::Mappable(obj) => obj
                .into_any()
                .downcast::<T>()
                .map(|boxed| *boxed)
                .map_err(|_| {
                    Error::type_conversion("Mappable", std::any::type_name::<T>())
                }),
            other => Err(Error::type_conversion(
                other.ty_name(),
                std::any::type_name::<T>(),
            )),
        }
    }

    /// Recovers an ordered collection of concrete mappable objects.
    pub fn to_vec_of<T: Mappable>(self) -> Result<Vec<T>> {
        self.to_list()?
            .into_iter()
            .map(Value::to_mappable)
            .collect()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(&**v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(v) => Some(&v[..]),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Self::Null => Self::Null,
            Self::Bool(v) => Self::Bool(*v),
            Self::I64(v) => Self::I64(*v),
            Self::F64(v) => Self::F64(*v),
            Self::String(v) => Self::String(v.clone()),
            Self::List(v) => Self::List(v.clone()),
            Self::Map(v) => Self::Map(v.clone()),
            Self::Mappable(v) => Self::Mappable(v.clone_dyn()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::F64(a), Self::F64(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Mappable(a), Self::Mappable(b)) => a.eq_dyn(b.as_ref()),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Value {
        Value::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Value {
        Value::I64(src.into())
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Value {
        Value::I64(src)
    }
}

impl From<u32> for Value {
    fn from(src: u32) -> Value {
        Value::I64(src.into())
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Value {
        Value::F64(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Value {
        Value::String(src.to_string())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Value {
        Value::String(src)
    }
}

impl From<Vec<Value>> for Value {
    fn from(src: Vec<Value>) -> Value {
        Value::List(src)
    }
}

impl From<Map> for Value {
    fn from(src: Map) -> Value {
        Value::Map(src)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Value {
        match src {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
