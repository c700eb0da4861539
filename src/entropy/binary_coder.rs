//! BinaryEntropyCoder (§4.1): a 56-bit arithmetic coder driven by a
//! [`BinaryPredictor`].
//!
//! Grounded on `kanzi/entropy/BinaryEntropyCodec.go`: the 56-bit `low`/
//! `high` interval, the `MASK_24_56` renormalization test, the deferred
//! decoder initialization (the bitstream may not be ready for I/O at
//! construction), and the 56-bit flush tail on dispose.

use crate::bitstream::{BitReader, BitWriter};
use crate::entropy::predictor::BinaryPredictor;

/// `2^56 - 1`: the initial (and maximum) value of `high`.
const TOP: u64 = 0x00FF_FFFF_FFFF_FFFF;
/// Mask isolating bits 24..56; renormalization continues while `low` and
/// `high` agree on all of these bits.
const MASK_24_56: u64 = 0x00FF_FFFF_FF00_0000;
/// Low 32 bits, used to refill `high` after a renormalization shift.
const MASK_0_32: u64 = 0xFFFF_FFFF;
/// Low 24 bits, ORed into `low` on flush so the decoder's eventual
/// truncation reconstructs a value inside the final interval.
const MASK_0_24: u64 = 0x00FF_FFFF;

/// Encodes a bit/byte stream into an output [`BitWriter`] under the
/// guidance of a [`BinaryPredictor`].
pub struct BinaryEntropyEncoder<'a, P: BinaryPredictor, W: BitWriter> {
    predictor: P,
    low: u64,
    high: u64,
    bitstream: &'a mut W,
    disposed: bool,
}

impl<'a, P: BinaryPredictor, W: BitWriter> BinaryEntropyEncoder<'a, P, W> {
    pub fn new(bitstream: &'a mut W, predictor: P) -> Self {
        BinaryEntropyEncoder {
            predictor,
            low: 0,
            high: TOP,
            bitstream,
            disposed: false,
        }
    }

    /// Encode a single bit (only bit 0 of `bit` is significant).
    pub fn encode_bit(&mut self, bit: u8) {
        let bit = bit & 1;
        let p = self.predictor.get() as u64;
        let split = self.low + ((self.high - self.low) >> 12) * p;

        if bit == 1 {
            self.high = split;
        } else {
            self.low = split + 1;
        }

        self.predictor.update(bit);

        while (self.low ^ self.high) & MASK_24_56 == 0 {
            self.bitstream.write_bits(self.high >> 24, 32);
            self.low <<= 32;
            self.high = (self.high << 32) | MASK_0_32;
        }
    }

    /// Encode a byte, most significant bit first.
    pub fn encode_byte(&mut self, val: u8) {
        for shift in (0..8).rev() {
            self.encode_bit((val >> shift) & 1);
        }
    }

    /// Encode every byte of `block`, returning the number of bytes written.
    pub fn encode(&mut self, block: &[u8]) -> usize {
        for &b in block {
            self.encode_byte(b);
        }
        block.len()
    }

    /// Flush the remaining interval. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.bitstream.write_bits(self.low | MASK_0_24, 56);
    }
}

impl<'a, P: BinaryPredictor, W: BitWriter> Drop for BinaryEntropyEncoder<'a, P, W> {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Decodes a bit/byte stream from an input [`BitReader`] under the
/// guidance of a [`BinaryPredictor`].
pub struct BinaryEntropyDecoder<'a, P: BinaryPredictor, R: BitReader> {
    predictor: P,
    low: u64,
    high: u64,
    current: u64,
    initialized: bool,
    bitstream: &'a mut R,
}

impl<'a, P: BinaryPredictor, R: BitReader> BinaryEntropyDecoder<'a, P, R> {
    pub fn new(bitstream: &'a mut R, predictor: P) -> Self {
        BinaryEntropyDecoder {
            predictor,
            low: 0,
            high: TOP,
            current: 0,
            initialized: false,
            bitstream,
        }
    }

    /// Read the initial 56-bit `current` value. Deferred until the first
    /// decode call, since some bitstream implementations are not ready
    /// for I/O at construction.
    fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.current = self.bitstream.read_bits(56);
        self.initialized = true;
    }

    /// Decode a single bit.
    pub fn decode_bit(&mut self) -> u8 {
        self.initialize();

        let p = self.predictor.get() as u64;
        let split = self.low + ((self.high - self.low) >> 12) * p;

        let bit = if self.current <= split {
            self.high = split;
            1
        } else {
            self.low = split + 1;
            0
        };

        self.predictor.update(bit);

        while (self.low ^ self.high) & MASK_24_56 == 0 {
            self.low <<= 32;
            self.high = (self.high << 32) | MASK_0_32;
            self.current = (self.current << 32) | self.bitstream.read_bits(32);
        }

        bit
    }

    /// Decode a byte, most significant bit first.
    pub fn decode_byte(&mut self) -> u8 {
        let mut res = 0u8;
        for _ in 0..8 {
            res = (res << 1) | self.decode_bit();
        }
        res
    }

    /// Decode `block.len()` bytes into `block`, returning the count.
    pub fn decode(&mut self, block: &mut [u8]) -> usize {
        for b in block.iter_mut() {
            *b = self.decode_byte();
        }
        block.len()
    }
}
