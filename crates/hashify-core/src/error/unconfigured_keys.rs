/// Error when a deserialize input map carries keys with no matching field
/// descriptor.
#[derive(Debug)]
pub(super) struct UnconfiguredKeysError {
    pub(super) host: &'static str,
    pub(super) keys: Vec<String>,
}

impl std::error::Error for UnconfiguredKeysError {}

impl core::fmt::Display for UnconfiguredKeysError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "the map passed to {}::from_map contains keys not configured by \
             the mapper: {}",
            self.host,
            self.keys.join(", ")
        )
    }
}
