//! Entropy coding (§4): binary and multi-symbol arithmetic coding over the
//! [`crate::bitstream`] contract.

pub mod binary_coder;
pub mod predictor;
pub mod range_coder;
pub mod utils;

pub use binary_coder::{BinaryEntropyDecoder, BinaryEntropyEncoder};
pub use predictor::{BinaryPredictor, FpaqPredictor};
pub use range_coder::{RangeCoderConfig, RangeDecoder, RangeEncoder};
