//! Burrows-Wheeler Transform (§4.5).
//!
//! Grounded on `kanzi/transform/BWT.go`'s `BWT.Forward`/`Inverse` for the
//! overall shape (suffix array → last column; LF-mapping → original) and
//! on the GLOSSARY's definition of primary index: the row of the sorted
//! rotation matrix equal to the un-rotated input.

use crate::error::ConfigError;
use crate::transform::sais::build_suffix_array;

/// Stateless forward/inverse Burrows-Wheeler Transform.
pub struct Bwt;

impl Bwt {
    /// Transform `data`, returning `(last_column, primary_index)`.
    ///
    /// `data.len() < 2` is a no-op per §4.5: the input is returned
    /// unchanged with `primary_index = 0`.
    pub fn forward(data: &[u8]) -> (Vec<u8>, usize) {
        let n = data.len();
        if n < 2 {
            return (data.to_vec(), 0);
        }

        let mut widened: Vec<i32> = data.iter().map(|&b| b as i32).collect();
        widened.push(-1);
        let sa = build_suffix_array(&widened);

        let mut out = vec![0u8; n];
        let mut primary_index = 0usize;
        let mut row = 0usize;
        for &pos in &sa {
            if pos == n {
                // the sentinel's own suffix; not one of the n real rotations.
                continue;
            }
            out[row] = if pos > 0 { data[pos - 1] } else { data[n - 1] };
            if pos == 0 {
                primary_index = row;
            }
            row += 1;
        }

        (out, primary_index)
    }

    /// Invert a transform produced by [`Bwt::forward`].
    pub fn inverse(data: &[u8], primary_index: usize) -> Result<Vec<u8>, ConfigError> {
        let n = data.len();
        if n < 2 {
            return Ok(data.to_vec());
        }
        if primary_index >= n {
            return Err(ConfigError::PrimaryIndexOutOfRange {
                index: primary_index,
                len: n,
            });
        }

        let mut counts = [0u32; 256];
        for &b in data {
            counts[b as usize] += 1;
        }

        let mut cumulative = [0u32; 256];
        let mut sum = 0u32;
        for i in 0..256 {
            cumulative[i] = sum;
            sum += counts[i];
        }

        let mut occurrence = [0u32; 256];
        let mut lf = vec![0usize; n];
        for i in 0..n {
            let b = data[i] as usize;
            lf[i] = (cumulative[b] + occurrence[b]) as usize;
            occurrence[b] += 1;
        }

        let mut out = vec![0u8; n];
        let mut row = primary_index;
        for i in (0..n).rev() {
            out[i] = data[row];
            row = lf[row];
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_3_banana_round_trips() {
        let input = b"banana";
        let (transformed, primary_index) = Bwt::forward(input);
        let restored = Bwt::inverse(&transformed, primary_index).unwrap();
        assert_eq!(restored, input);
    }

    #[test]
    fn constant_string_round_trips_with_pidx_zero() {
        let input = vec![b'x'; 10];
        let (transformed, primary_index) = Bwt::forward(&input);
        assert_eq!(transformed, input);
        assert_eq!(primary_index, 0);
        assert_eq!(Bwt::inverse(&transformed, primary_index).unwrap(), input);
    }

    #[test]
    fn short_buffers_are_a_no_op() {
        assert_eq!(Bwt::forward(&[]), (Vec::new(), 0));
        assert_eq!(Bwt::forward(&[42]), (vec![42], 0));
        assert_eq!(Bwt::inverse(&[], 0).unwrap(), Vec::<u8>::new());
        assert_eq!(Bwt::inverse(&[42], 0).unwrap(), vec![42]);
    }

    #[test]
    fn rejects_out_of_range_primary_index() {
        let (transformed, _) = Bwt::forward(b"banana");
        assert!(Bwt::inverse(&transformed, transformed.len()).is_err());
    }

    #[test]
    fn round_trips_mixed_byte_buffer() {
        let mut input = Vec::new();
        for i in 0..500u32 {
            input.push(((i * 131 + 7) % 256) as u8);
        }
        let (transformed, primary_index) = Bwt::forward(&input);
        assert_eq!(Bwt::inverse(&transformed, primary_index).unwrap(), input);
    }
}
