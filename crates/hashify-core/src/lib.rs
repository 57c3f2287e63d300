mod error;
pub use error::Error;

mod mappable;
pub use mappable::{DynMappable, FromFields, Mappable};

pub mod mapper;
pub use mapper::{Codec, Mapper, MapperBuilder, TransformFn};

pub mod meta;
pub use meta::{TypeMetadata, META_KEY};

pub mod registry;
pub use registry::Registry;

pub mod value;
pub use value::{Map, Value};

/// A Result type alias that uses Hashify's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
