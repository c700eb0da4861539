//! Error taxonomy for the entropy coders and block transforms.
//!
//! Follows the split described by the original design: invalid constructor
//! arguments are reported immediately and leave no partial state
//! (`ConfigError`), malformed encoded data is only ever detected by the
//! range decoder (`FormatError`), and bitstream I/O failures are the
//! caller's own concern — the `BitReader`/`BitWriter` contract in
//! [`crate::bitstream`] is infallible by design, so there is no
//! `BitstreamError` variant here. Nothing in this crate unifies the two
//! into a single top-level error: every fallible method returns the one
//! category it can actually produce.

use thiserror::Error;

/// Invalid constructor arguments. Reported at construction; no partial
/// state is left behind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `chunkSize` must be 0 (whole block) or in `[1024, 2^30]`.
    #[error("invalid chunk size {0}: must be 0 or in [1024, 2^30]")]
    InvalidChunkSize(u32),

    /// `logRange` must be in `[8, 16]`.
    #[error("invalid log range {0}: must be in [8, 16]")]
    InvalidLogRange(u32),

    /// `Bwt::set_primary_index` was given an index beyond the buffer length.
    #[error("primary index {index} exceeds buffer length {len}")]
    PrimaryIndexOutOfRange { index: usize, len: usize },

    /// `Sbrt::new` was given an unrecognized mode discriminant.
    #[error("invalid SBRT mode {0}")]
    InvalidSbrtMode(u8),
}

/// Malformed encoded data, detected only by the range decoder (§7).
///
/// Decoding halts at the point of detection; bytes already written to the
/// caller's output buffer remain valid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// A per-chunk header frequency was zero or exceeded the chunk's scale.
    #[error("invalid frequency {value} for symbol {symbol} (scale 2^{log_range})")]
    InvalidFrequency {
        symbol: u8,
        value: i64,
        log_range: u32,
    },

    /// The inferred first-symbol frequency (`scale - sum(others)`) was not
    /// in `(0, scale]`.
    #[error("invalid inferred first frequency {value} for symbol {symbol} (scale 2^{log_range})")]
    InvalidFirstFrequency {
        symbol: u8,
        value: i64,
        log_range: u32,
    },
}
