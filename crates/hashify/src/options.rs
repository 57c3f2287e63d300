//! Diagnostics shim for legacy field-option names.
//!
//! Field transforms can be collected as a raw name → function map before
//! reaching the mapper. [`Options::filter`] rewrites legacy names to their
//! current spelling and drops unrecognized names, warning about both, so
//! the mapper itself only ever sees current options.

use indexmap::IndexMap;
use tracing::warn;

use crate::{MapperBuilder, Result, TransformFn, Value};

/// Option names the mapper configuration surface recognizes.
const RECOGNIZED: [&str; 2] = ["to", "from"];

const DEPRECATIONS: [Deprecation; 2] = [
    Deprecation {
        option: "to_hash",
        replacement: "to",
        version: "v1.0.0",
    },
    Deprecation {
        option: "from_hash",
        replacement: "from",
        version: "v1.0.0",
    },
];

/// A legacy option name slated for removal, and its replacement.
struct Deprecation {
    option: &'static str,
    replacement: &'static str,
    version: &'static str,
}

impl Deprecation {
    fn warn(&self, called_from: &str) {
        warn!(
            option = self.option,
            replacement = self.replacement,
            called_from,
            "option `{}` is deprecated; use `{}` instead. It will be \
             removed on or after {}",
            self.option,
            self.replacement,
            self.version,
        );
    }
}

/// A raw field-option map as written by a caller, possibly using legacy
/// names.
#[derive(Default)]
pub struct Options {
    entries: IndexMap<String, TransformFn>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named option. Later writes for the same name win.
    pub fn set(
        mut self,
        name: impl Into<String>,
        transform: impl Fn(Value) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.entries.insert(name.into(), Box::new(transform));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Rewrites deprecated option names to their replacements and drops
    /// unrecognized options, warning for each. `called_from` names the
    /// configuration site for the warning text.
    pub fn filter(mut self, called_from: &str) -> Self {
        for deprecation in &DEPRECATIONS {
            if let Some(transform) = self.entries.shift_remove(deprecation.option) {
                deprecation.warn(called_from);
                self.entries
                    .insert(deprecation.replacement.to_string(), transform);
            }
        }

        let unrecognized: Vec<String> = self
            .entries
            .keys()
            .filter(|name| !RECOGNIZED.contains(&name.as_str()))
            .cloned()
            .collect();
        for option in unrecognized {
            warn!(
                option = option.as_str(),
                called_from, "option `{option}` is not recognized and will be ignored",
            );
            self.entries.shift_remove(&option);
        }
        self
    }

    /// Splits into the two directional strategies.
    pub fn strategies(mut self) -> Strategies {
        Strategies {
            to: self.entries.shift_remove("to"),
            from: self.entries.shift_remove("from"),
        }
    }
}

/// Directional transforms extracted from a filtered [`Options`].
pub struct Strategies {
    pub to: Option<TransformFn>,
    pub from: Option<TransformFn>,
}

impl Strategies {
    /// Attaches the strategies to the builder's current field.
    pub fn apply<T>(self, mut builder: MapperBuilder<T>) -> MapperBuilder<T> {
        if let Some(transform) = self.to {
            builder = builder.encode_fn(transform);
        }
        if let Some(transform) = self.from {
            builder = builder.decode_fn(transform);
        }
        builder
    }
}
