//! Suffix array construction backing [`super::bwt`] (§4.5).
//!
//! Builds the array by prefix doubling: rank every suffix by its first
//! `2^k` symbols, doubling `k` each round, until ranks are already unique
//! or `k` covers the whole sequence. `-1` is a valid input symbol and
//! sorts before every byte value, used by `bwt` as an explicit sentinel.

/// Return the suffix array of `seq` (indices `0..seq.len()` in sorted
/// suffix order). Ties are broken by the standard convention that a
/// shorter suffix sorts before a longer suffix sharing its full prefix.
pub fn build_suffix_array(seq: &[i32]) -> Vec<usize> {
    let n = seq.len();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![0];
    }

    let mut sa: Vec<usize> = (0..n).collect();
    let mut rank: Vec<i64> = seq.iter().map(|&x| x as i64).collect();
    let mut next_rank = vec![0i64; n];

    let key = |rank: &[i64], i: usize, k: usize| -> (i64, i64) {
        let hi = rank[i];
        let lo = if i + k < n { rank[i + k] } else { -1 };
        (hi, lo)
    };

    let mut k = 1usize;
    loop {
        log::trace!("suffix array doubling round: k = {}", k);
        sa.sort_by(|&a, &b| key(&rank, a, k).cmp(&key(&rank, b, k)));

        next_rank[sa[0]] = 0;
        for i in 1..n {
            let prev_key = key(&rank, sa[i - 1], k);
            let cur_key = key(&rank, sa[i], k);
            next_rank[sa[i]] = next_rank[sa[i - 1]] + if cur_key > prev_key { 1 } else { 0 };
        }
        rank.copy_from_slice(&next_rank);

        if rank[sa[n - 1]] as usize == n - 1 {
            break;
        }
        if k >= n {
            break;
        }
        k *= 2;
    }

    sa
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_suffix_array(seq: &[i32]) -> Vec<usize> {
        let n = seq.len();
        let mut sa: Vec<usize> = (0..n).collect();
        sa.sort_by(|&a, &b| seq[a..].cmp(&seq[b..]));
        sa
    }

    #[test]
    fn matches_naive_on_banana_with_sentinel() {
        let seq: Vec<i32> = "banana".bytes().map(|b| b as i32).chain([-1]).collect();
        assert_eq!(build_suffix_array(&seq), naive_suffix_array(&seq));
    }

    #[test]
    fn matches_naive_on_repeated_symbol() {
        let seq: Vec<i32> = vec![5, 5, 5, 5, 5, -1];
        assert_eq!(build_suffix_array(&seq), naive_suffix_array(&seq));
    }

    #[test]
    fn matches_naive_on_mixed_alphabet() {
        let mut seq: Vec<i32> = Vec::new();
        for i in 0..100i32 {
            seq.push((i * 7 + 3) % 29);
        }
        seq.push(-1);
        assert_eq!(build_suffix_array(&seq), naive_suffix_array(&seq));
    }

    #[test]
    fn single_element_sequence() {
        assert_eq!(build_suffix_array(&[-1]), vec![0]);
    }
}
