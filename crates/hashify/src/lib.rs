//! Declarative bidirectional mapping between objects and ordered key-value
//! maps.
//!
//! A host type declares, field by field, how its state is projected into a
//! [`Map`] and how a map is projected back into an instance, with optional
//! per-field transforms, custom instantiation logic, and collections of
//! other mapped objects.
//!
//! ```
//! use std::sync::LazyLock;
//! use hashify::prelude::*;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Commit {
//!     path: String,
//!     sha: String,
//! }
//!
//! impl FromFields for Commit {
//!     fn from_fields(mut fields: Map) -> hashify::Result<Self> {
//!         Ok(Commit {
//!             path: fields.take("path").to_string()?,
//!             sha: fields.take("sha").to_string()?,
//!         })
//!     }
//! }
//!
//! impl Mappable for Commit {
//!     fn mapper() -> &'static Mapper<Commit> {
//!         static MAPPER: LazyLock<Mapper<Commit>> = LazyLock::new(|| {
//!             Mapper::builder()
//!                 .field("path", |c: &Commit| Value::from(c.path.as_str()))
//!                 .field("sha", |c: &Commit| Value::from(c.sha.as_str()))
//!                 .build()
//!         });
//!         &MAPPER
//!     }
//! }
//!
//! let commit = Commit {
//!     path: "README.md".to_string(),
//!     sha: "cfe9aacbc02528b".to_string(),
//! };
//! let map = commit.to_map().unwrap();
//! assert_eq!(map.get("path"), Some(&Value::from("README.md")));
//! assert_eq!(Commit::from_map(map).unwrap(), commit);
//! ```

pub mod options;
pub use options::Options;

pub use hashify_core::{
    bail, err, mapper, registry, value, Codec, DynMappable, Error, FromFields, Map,
    Mappable, Mapper, MapperBuilder, Registry, Result, TransformFn, TypeMetadata, Value,
    META_KEY,
};

pub mod prelude {
    pub use crate::{
        Codec, FromFields, Map, Mappable, Mapper, MapperBuilder, TypeMetadata, Value,
    };
}
