//! RangeCoder (§4.3): a multi-symbol range coder with a static per-chunk
//! frequency header.
//!
//! Grounded on `kanzi/entropy/RangeCodec.go`: the chunked reset of
//! `(low, range)`, the header format built from [`super::utils`], the
//! precomputed `invSum` divisor that turns per-symbol division into a
//! multiply, and the underflow-protection branch in the renormalization
//! loop.

use crate::bitstream::{BitReader, BitWriter};
use crate::entropy::utils::{decode_alphabet, encode_alphabet, normalize_frequencies};
use crate::error::{ConfigError, FormatError};

const TOP_RANGE: u64 = 0x00FF_FFFF_FFFF_FFFF;
const BOTTOM_RANGE: u64 = 0x0000_0000_FFFF_FFFF;
const MASK: u64 = 0x00FF_FF00_0000_0000;

pub const DEFAULT_CHUNK_SIZE: u32 = 1 << 16;
pub const DEFAULT_LOG_RANGE: u32 = 13;

/// Configuration shared by [`RangeEncoder`] and [`RangeDecoder`].
///
/// `chunk_size` is the number of bytes encoded before the frequency
/// statistics are rebuilt; `0` means "the whole block is one chunk".
#[derive(Debug, Clone, Copy)]
pub struct RangeCoderConfig {
    pub chunk_size: u32,
    pub log_range: u32,
}

impl Default for RangeCoderConfig {
    fn default() -> Self {
        RangeCoderConfig {
            chunk_size: DEFAULT_CHUNK_SIZE,
            log_range: DEFAULT_LOG_RANGE,
        }
    }
}

impl RangeCoderConfig {
    pub fn new(chunk_size: u32, log_range: u32) -> Result<Self, ConfigError> {
        if chunk_size != 0 && !(1024..=(1 << 30)).contains(&chunk_size) {
            return Err(ConfigError::InvalidChunkSize(chunk_size));
        }
        if !(8..=16).contains(&log_range) {
            return Err(ConfigError::InvalidLogRange(log_range));
        }
        Ok(RangeCoderConfig {
            chunk_size,
            log_range,
        })
    }
}

fn llr_for(log_range: u32) -> u32 {
    let mut llr = 3u32;
    while (1u64 << llr) <= log_range as u64 {
        llr += 1;
    }
    llr
}

/// Static-frequency range encoder, operating in chunks (§4.3).
pub struct RangeEncoder<'a, W: BitWriter> {
    bitstream: &'a mut W,
    freqs: [u32; 256],
    cum_freqs: [u32; 257],
    alphabet: [u8; 256],
    config: RangeCoderConfig,
    low: u64,
    range: u64,
    inv_sum: u64,
}

impl<'a, W: BitWriter> RangeEncoder<'a, W> {
    pub fn new(bitstream: &'a mut W, config: RangeCoderConfig) -> Self {
        RangeEncoder {
            bitstream,
            freqs: [0; 256],
            cum_freqs: [0; 257],
            alphabet: [0; 256],
            config,
            low: 0,
            range: TOP_RANGE,
            inv_sum: 0,
        }
    }

    /// Encode `block`, resetting frequency statistics every `chunk_size`
    /// bytes (or once, for the whole block, if `chunk_size == 0`).
    /// Returns the number of bytes encoded.
    pub fn encode(&mut self, block: &[u8]) -> usize {
        if block.is_empty() {
            return 0;
        }

        let chunk_size = if self.config.chunk_size == 0 {
            block.len()
        } else {
            self.config.chunk_size as usize
        };

        let mut start = 0usize;
        while start < block.len() {
            let end = (start + chunk_size).min(block.len());
            self.encode_chunk(&block[start..end]);
            start = end;
        }

        block.len()
    }

    fn encode_chunk(&mut self, chunk: &[u8]) {
        self.range = TOP_RANGE;
        self.low = 0;

        let mut log_range = self.config.log_range;
        while log_range > 8 && (1u64 << log_range) > chunk.len() as u64 {
            log_range -= 1;
        }
        log::trace!(
            "encoding chunk of {} bytes at log_range {}",
            chunk.len(),
            log_range
        );

        self.freqs = [0; 256];
        for &b in chunk {
            self.freqs[b as usize] += 1;
        }

        let alphabet_size =
            normalize_frequencies(&mut self.freqs, &mut self.alphabet, 1 << log_range);

        self.cum_freqs[0] = 0;
        for i in 0..256 {
            self.cum_freqs[i + 1] = self.cum_freqs[i] + self.freqs[i];
        }
        self.inv_sum = (1u64 << 24) / self.cum_freqs[256] as u64;

        self.encode_header(alphabet_size, log_range);

        if alphabet_size == 0 {
            debug_assert!(chunk.is_empty());
            return;
        }

        for &b in chunk {
            self.encode_byte(b);
        }

        self.bitstream.write_bits(self.low, 56);
    }

    fn encode_header(&mut self, alphabet_size: usize, log_range: u32) {
        encode_alphabet(self.bitstream, &self.alphabet[..alphabet_size]);

        if alphabet_size == 0 {
            return;
        }

        self.bitstream.write_bits((log_range - 8) as u64, 3);

        let inc = if alphabet_size <= 64 { 8 } else { 16 };
        let llr = llr_for(log_range);

        let mut i = 1usize;
        while i < alphabet_size {
            let end = (i + inc).min(alphabet_size);
            let mut max_freq = 0u32;
            for j in i..end {
                max_freq = max_freq.max(self.freqs[self.alphabet[j] as usize]);
            }
            let mut log_max = 1u32;
            while (1u64 << log_max) <= max_freq as u64 {
                log_max += 1;
            }

            self.bitstream.write_bits((log_max - 1) as u64, llr);
            for j in i..end {
                self.bitstream
                    .write_bits(self.freqs[self.alphabet[j] as usize] as u64, log_max);
            }

            i += inc;
        }
    }

    fn encode_byte(&mut self, b: u8) {
        let sym_lo = self.cum_freqs[b as usize] as u64;
        let sym_hi = self.cum_freqs[b as usize + 1] as u64;

        self.range = (self.range >> 24) * self.inv_sum;
        self.low += sym_lo * self.range;
        self.range *= sym_hi - sym_lo;

        loop {
            if (self.low ^ (self.low + self.range)) & MASK != 0 {
                if self.range > BOTTOM_RANGE {
                    break;
                }
                self.range = self.low.wrapping_neg() & BOTTOM_RANGE;
            }

            self.bitstream.write_bits(self.low >> 40, 16);
            self.range <<= 16;
            self.low <<= 16;
        }
    }
}

/// Static-frequency range decoder, mirroring [`RangeEncoder`].
pub struct RangeDecoder<'a, R: BitReader> {
    bitstream: &'a mut R,
    freqs: [u32; 256],
    cum_freqs: [u32; 257],
    alphabet: [u8; 256],
    /// Frequency-to-symbol table; grows monotonically to the largest
    /// `log_range` observed (§5's intentional memoization).
    f2s: Vec<u8>,
    config: RangeCoderConfig,
    low: u64,
    range: u64,
    code: u64,
    inv_sum: u64,
}

impl<'a, R: BitReader> RangeDecoder<'a, R> {
    pub fn new(bitstream: &'a mut R, config: RangeCoderConfig) -> Self {
        RangeDecoder {
            bitstream,
            freqs: [0; 256],
            cum_freqs: [0; 257],
            alphabet: [0; 256],
            f2s: Vec::new(),
            config,
            low: 0,
            range: TOP_RANGE,
            code: 0,
            inv_sum: 0,
        }
    }

    /// Decode `block.len()` bytes into `block`, resetting frequency
    /// statistics every `chunk_size` bytes. Returns the number of bytes
    /// successfully decoded before any [`FormatError`] (all of
    /// `block.len()` on success).
    pub fn decode(&mut self, block: &mut [u8]) -> Result<usize, FormatError> {
        if block.is_empty() {
            return Ok(0);
        }

        let chunk_size = if self.config.chunk_size == 0 {
            block.len()
        } else {
            self.config.chunk_size as usize
        };

        let mut start = 0usize;
        while start < block.len() {
            let end = (start + chunk_size).min(block.len());
            if let Err(e) = self.decode_chunk(&mut block[start..end]) {
                return Err(e);
            }
            start = end;
        }

        Ok(block.len())
    }

    fn decode_chunk(&mut self, chunk: &mut [u8]) -> Result<(), FormatError> {
        let alphabet_size = self.decode_header()?;
        log::trace!(
            "decoding chunk of {} bytes, alphabet size {}",
            chunk.len(),
            alphabet_size
        );

        self.range = TOP_RANGE;
        self.low = 0;

        if alphabet_size == 0 {
            debug_assert!(chunk.is_empty());
            return Ok(());
        }

        self.code = self.bitstream.read_bits(56);

        for b in chunk.iter_mut() {
            *b = self.decode_byte();
        }

        Ok(())
    }

    fn decode_header(&mut self) -> Result<usize, FormatError> {
        let alphabet = decode_alphabet(self.bitstream);
        let alphabet_size = alphabet.len();
        self.alphabet[..alphabet_size].copy_from_slice(&alphabet);

        if alphabet_size == 0 {
            return Ok(0);
        }

        if alphabet_size != 256 {
            self.freqs = [0; 256];
        }

        let log_range = 8 + self.bitstream.read_bits(3) as u32;
        let inc = if alphabet_size <= 64 { 8 } else { 16 };
        let llr = llr_for(log_range);

        let mut sum: i64 = 0;
        let mut i = 1usize;
        while i < alphabet_size {
            let end = (i + inc).min(alphabet_size);
            let log_max = 1 + self.bitstream.read_bits(llr) as u32;

            for j in i..end {
                let val = self.bitstream.read_bits(log_max) as i64;
                if val <= 0 || val >= (1i64 << log_range) {
                    return Err(FormatError::InvalidFrequency {
                        symbol: self.alphabet[j],
                        value: val,
                        log_range,
                    });
                }
                self.freqs[self.alphabet[j] as usize] = val as u32;
                sum += val;
            }

            i += inc;
        }

        let first = (1i64 << log_range) - sum;
        if first <= 0 || first > (1i64 << log_range) {
            return Err(FormatError::InvalidFirstFrequency {
                symbol: self.alphabet[0],
                value: first,
                log_range,
            });
        }
        self.freqs[self.alphabet[0] as usize] = first as u32;

        self.cum_freqs[0] = 0;
        let scale = 1usize << log_range;
        if self.f2s.len() < scale {
            self.f2s.resize(scale, 0);
        }

        for i in 0..256 {
            self.cum_freqs[i + 1] = self.cum_freqs[i] + self.freqs[i];
            let cum = self.cum_freqs[i];
            for j in 0..self.freqs[i] {
                self.f2s[(cum + j) as usize] = i as u8;
            }
        }

        self.inv_sum = (1u64 << 24) / self.cum_freqs[256] as u64;
        Ok(alphabet_size)
    }

    fn decode_byte(&mut self) -> u8 {
        self.range = (self.range >> 24) * self.inv_sum;
        let count = ((self.code - self.low) / self.range) as usize;
        let value = self.f2s[count];

        let sym_lo = self.cum_freqs[value as usize] as u64;
        let sym_hi = self.cum_freqs[value as usize + 1] as u64;
        self.low += sym_lo * self.range;
        self.range *= sym_hi - sym_lo;

        loop {
            if (self.low ^ (self.low + self.range)) & MASK != 0 {
                if self.range > BOTTOM_RANGE {
                    break;
                }
                self.range = self.low.wrapping_neg() & BOTTOM_RANGE;
            }

            self.code = (self.code << 16) | self.bitstream.read_bits(16);
            self.range <<= 16;
            self.low <<= 16;
        }

        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream::{SliceBitReader, VecBitWriter};

    fn round_trip(bytes: &[u8], config: RangeCoderConfig) -> Vec<u8> {
        let mut w = VecBitWriter::new();
        {
            let mut enc = RangeEncoder::new(&mut w, config);
            enc.encode(bytes);
        }
        let encoded = w.into_bytes();

        let mut r = SliceBitReader::new(&encoded);
        let mut dec = RangeDecoder::new(&mut r, config);
        let mut out = vec![0u8; bytes.len()];
        dec.decode(&mut out).unwrap();
        out
    }

    #[test]
    fn scenario_2_repeated_byte_chunked() {
        let bytes = vec![0xAAu8; 4096];
        let config = RangeCoderConfig::new(1024, 12).unwrap();
        assert_eq!(round_trip(&bytes, config), bytes);
    }

    #[test]
    fn empty_buffer_emits_nothing() {
        let mut w = VecBitWriter::new();
        let mut enc = RangeEncoder::new(&mut w, RangeCoderConfig::default());
        let n = enc.encode(&[]);
        assert_eq!(n, 0);
        assert!(w.into_bytes().is_empty());
    }

    #[test]
    fn single_symbol_buffer_round_trips() {
        let bytes = vec![7u8; 200];
        let config = RangeCoderConfig::default();
        assert_eq!(round_trip(&bytes, config), bytes);
    }

    #[test]
    fn mixed_alphabet_whole_block_round_trips() {
        let mut bytes = Vec::new();
        for i in 0..2000u32 {
            bytes.push(((i * 37 + 11) % 251) as u8);
        }
        let config = RangeCoderConfig::new(0, 14).unwrap();
        assert_eq!(round_trip(&bytes, config.clone()), bytes);
    }

    #[test]
    fn rejects_invalid_chunk_size() {
        assert!(RangeCoderConfig::new(512, 13).is_err());
        assert!(RangeCoderConfig::new(1 << 31, 13).is_err());
    }

    #[test]
    fn rejects_invalid_log_range() {
        assert!(RangeCoderConfig::new(0, 7).is_err());
        assert!(RangeCoderConfig::new(0, 17).is_err());
    }
}
