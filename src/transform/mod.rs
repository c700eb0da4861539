//! Reversible block transforms (§4.5-4.7): BWT, the MTF/SBRT family, and
//! the small integer DCT-4, all operating synchronously over
//! caller-owned buffers.

pub mod bwt;
pub mod dct4;
pub mod mtf;
pub mod sais;
pub mod sbrt;

pub use bwt::Bwt;
pub use dct4::Dct4;
pub use mtf::Mtf;
pub use sbrt::{Sbrt, SbrtMode};
