//! Sort-by-Rank transform family: MTF, RANK, TIMESTAMP (§4.6).
//!
//! Grounded on `kanzi/transform/SBRT.go`: a single parametrized update
//! rule (`mask1`, `mask2`, `shift`) covers all three modes, and symbols
//! bubble up a rank table rather than moving through a linked list.

use crate::error::ConfigError;

/// Which Sort-by-Rank variant to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SbrtMode {
    Mtf,
    Rank,
    Timestamp,
}

impl SbrtMode {
    fn params(self) -> (i64, i64, u32) {
        match self {
            SbrtMode::Mtf => (-1, 0, 0),
            SbrtMode::Rank => (-1, -1, 1),
            SbrtMode::Timestamp => (0, -1, 0),
        }
    }

    pub fn from_u8(v: u8) -> Result<Self, ConfigError> {
        match v {
            0 => Ok(SbrtMode::Mtf),
            1 => Ok(SbrtMode::Rank),
            2 => Ok(SbrtMode::Timestamp),
            _ => Err(ConfigError::InvalidSbrtMode(v)),
        }
    }
}

/// Forward/inverse Sort-by-Rank transform, parametrized by [`SbrtMode`].
pub struct Sbrt {
    mode: SbrtMode,
    prev: [i64; 256],
    curr: [i64; 256],
    s2r: [u8; 256],
    r2s: [u8; 256],
}

impl Sbrt {
    pub fn new(mode: SbrtMode) -> Self {
        let mut identity = [0u8; 256];
        for (i, slot) in identity.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Sbrt {
            mode,
            prev: [0; 256],
            curr: [0; 256],
            s2r: identity,
            r2s: identity,
        }
    }

    fn step(&mut self, i: usize, r: usize, c: usize) {
        let (mask1, mask2, shift) = self.mode.params();
        let new_curr = ((i as i64 & mask1) + (self.prev[c] & mask2)) >> shift;
        self.curr[c] = new_curr;
        self.prev[c] = i as i64;
        self.bubble_up(r, new_curr);
    }

    fn bubble_up(&mut self, mut r: usize, c_curr: i64) {
        while r > 0 {
            let above = self.r2s[r - 1];
            if self.curr[above as usize] > c_curr {
                break;
            }
            let below = self.r2s[r];
            self.r2s[r - 1] = below;
            self.r2s[r] = above;
            self.s2r[below as usize] = (r - 1) as u8;
            self.s2r[above as usize] = r as u8;
            r -= 1;
        }
    }

    /// Transform `data` (symbols) into a stream of ranks.
    pub fn forward(&mut self, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(data.len());
        for (i, &c) in data.iter().enumerate() {
            let c = c as usize;
            let r = self.s2r[c] as usize;
            out.push(r as u8);
            self.step(i, r, c);
        }
        out
    }

    /// Invert a transform produced by [`Sbrt::forward`]; the lookup
    /// direction reverses (`r2s[rank]` yields the symbol) but the
    /// bookkeeping update is identical.
    pub fn inverse(&mut self, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(data.len());
        for (i, &r) in data.iter().enumerate() {
            let r = r as usize;
            let c = self.r2s[r] as usize;
            out.push(c as u8);
            self.step(i, r, c);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_5_timestamp_forward_and_inverse() {
        let mut enc = Sbrt::new(SbrtMode::Timestamp);
        let ranks = enc.forward(&[5, 5, 5]);
        assert_eq!(ranks, vec![5, 0, 0]);

        let mut dec = Sbrt::new(SbrtMode::Timestamp);
        assert_eq!(dec.inverse(&ranks), vec![5, 5, 5]);
    }

    #[test]
    fn mtf_mode_matches_move_to_front_on_a_run() {
        let mut enc = Sbrt::new(SbrtMode::Mtf);
        let ranks = enc.forward(&[9, 9, 9, 9]);
        assert_eq!(ranks[0], 9);
        assert!(ranks[1..].iter().all(|&r| r == 0));

        let mut dec = Sbrt::new(SbrtMode::Mtf);
        assert_eq!(dec.inverse(&ranks), vec![9, 9, 9, 9]);
    }

    #[test]
    fn round_trips_for_every_mode_on_mixed_input() {
        let mut input = Vec::new();
        for i in 0..300u32 {
            input.push(((i * 53 + 11) % 256) as u8);
        }
        for mode in [SbrtMode::Mtf, SbrtMode::Rank, SbrtMode::Timestamp] {
            let mut enc = Sbrt::new(mode);
            let ranks = enc.forward(&input);
            let mut dec = Sbrt::new(mode);
            assert_eq!(dec.inverse(&ranks), input, "mode {:?} failed to round-trip", mode);
        }
    }

    #[test]
    fn from_u8_rejects_unknown_discriminant() {
        assert!(SbrtMode::from_u8(3).is_err());
        assert_eq!(SbrtMode::from_u8(0).unwrap(), SbrtMode::Mtf);
    }
}
