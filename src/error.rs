/// Crate-level error types for the postref tool boundary.
use std::path::PathBuf;

/// Errors carry enough context to produce a useful diagnostic without a
/// debugger. Extraction itself never fails (malformed candidates simply
/// produce no references), so every variant here belongs to the tool
/// boundary around the core: reading input, loading config, writing
/// reports.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input text exceeds the size bound the tool enforces before
    /// handing text to the extraction core.
    #[error("input too large ({size_bytes} bytes, max {max_bytes}): {}", file.display())]
    InputTooLarge {
        /// Input that exceeded the size limit.
        file: PathBuf,
        /// Maximum allowed input size in bytes.
        max_bytes: u64,
        /// Actual input size in bytes.
        size_bytes: u64,
    },

    /// Underlying I/O error from the filesystem or stdin.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization of a report failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// Config file exists but cannot be parsed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}
