#![allow(dead_code)]

//! The entropy-coding and reversible block-transform core of a BWT-class
//! lossless data-compression toolkit.
//!
//! This crate covers the pipeline stages that sit below framing and
//! container format: a pluggable-predictor binary arithmetic coder, an
//! adaptive order-0 predictor, a static-frequency range coder operating
//! in chunks, and the reversible transforms (BWT via suffix-array
//! construction, the Move-to-Front/Sort-by-Rank family, and a small
//! integer DCT) that prepare data for entropy coding.
//!
//! # Example
//!
//! ```
//! use presscore::bitstream::VecBitWriter;
//! use presscore::entropy::{BinaryEntropyEncoder, FpaqPredictor};
//!
//! let mut out = VecBitWriter::new();
//! let mut encoder = BinaryEntropyEncoder::new(&mut out, FpaqPredictor::new());
//! encoder.encode(b"hello");
//! encoder.dispose();
//! ```

pub mod bitstream;
pub mod entropy;
pub mod error;
pub mod transform;

pub use entropy::{
    BinaryEntropyDecoder, BinaryEntropyEncoder, BinaryPredictor, FpaqPredictor, RangeCoderConfig,
    RangeDecoder, RangeEncoder,
};
pub use error::{ConfigError, FormatError};
pub use transform::{Bwt, Dct4, Mtf, Sbrt, SbrtMode};
