// File: src/core/rolling.rs
//! Rabin-Karp polynomial hashing over windows of token ids.
//!
//! The hash of a window `w[0..k]` is `sum(w[i] * B^(k-1-i)) mod M`. Sliding
//! the window one step removes the outgoing id's weighted term and shifts the
//! incoming id in, so a whole sequence of `n` ids is hashed in O(n).

use crate::core::types::{HashPair, HashParams, TokenId};

#[inline]
fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

// Residues may exceed 2^63, so sums are taken in u128 too.
#[inline]
fn add_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 + b as u128) % m as u128) as u64
}

#[inline]
fn sub_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 + m as u128 - b as u128) % m as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: usize, m: u64) -> u64 {
    let mut acc = 1 % m;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = mul_mod(acc, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    acc
}

/// Hashes one window from scratch. O(len(ids)). Any modulus below 2 hashes to 0.
pub fn window_hash(ids: &[TokenId], base: u64, modulus: u64) -> u64 {
    if modulus < 2 {
        return 0;
    }
    ids.iter().fold(0, |acc, &id| {
        add_mod(mul_mod(acc, base, modulus), id as u64 % modulus, modulus)
    })
}

/// Hashes every length-`k` window of `ids`, in start order.
///
/// Produces `len(ids) - k + 1` pairs, or none when `k == 0` or `k > len(ids)`.
/// Any `modulus` of at least 2 is supported, up to `u64::MAX`; smaller
/// moduli yield no pairs.
pub fn rolling_hash(ids: &[TokenId], params: &HashParams) -> Vec<HashPair> {
    let HashParams { window: k, base, modulus: m } = *params;
    if k == 0 || ids.len() < k || m < 2 {
        return Vec::new();
    }

    // Weight of the outgoing id: B^(k-1).
    let lead = pow_mod(base, k - 1, m);
    let mut current = window_hash(&ids[..k], base, m);

    let mut out = Vec::with_capacity(ids.len() - k + 1);
    out.push(HashPair::new(current, 0));

    for i in k..ids.len() {
        let outgoing = mul_mod(ids[i - k] as u64 % m, lead, m);
        current = sub_mod(current, outgoing, m);
        current = add_mod(mul_mod(current, base, m), ids[i] as u64 % m, m);
        out.push(HashPair::new(current, i - k + 1));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(k: usize) -> HashParams {
        HashParams::default().with_window(k)
    }

    #[test]
    fn test_rolling_matches_naive_hash() {
        let ids: Vec<TokenId> = vec![5, 1, 9, 3, 3, 7, 2, 8, 1, 4, 6];
        let p = params(4);
        let pairs = rolling_hash(&ids, &p);

        assert_eq!(pairs.len(), ids.len() - 4 + 1);
        for (i, pair) in pairs.iter().enumerate() {
            assert_eq!(pair.start, i);
            assert_eq!(pair.hash, window_hash(&ids[i..i + 4], p.base, p.modulus));
        }
    }

    #[test]
    fn test_known_values_for_two_grams() {
        let pairs = rolling_hash(&[1, 2, 1, 3], &params(2));
        let hashes: Vec<u64> = pairs.iter().map(|p| p.hash).collect();
        assert_eq!(hashes, vec![259, 515, 260]);
    }

    #[test]
    fn test_short_input_yields_nothing() {
        assert!(rolling_hash(&[1, 2, 3], &params(4)).is_empty());
        assert!(rolling_hash(&[], &params(1)).is_empty());
    }

    #[test]
    fn test_zero_window_yields_nothing() {
        assert!(rolling_hash(&[1, 2, 3], &params(0)).is_empty());
    }

    #[test]
    fn test_window_equal_to_length() {
        let pairs = rolling_hash(&[4, 4, 4], &params(3));
        assert_eq!(pairs, vec![HashPair::new(window_hash(&[4, 4, 4], 257, 1_000_000_007), 0)]);
    }

    #[test]
    fn test_small_modulus_stays_in_range() {
        // Forces the outgoing term to exceed the running hash.
        let p = HashParams::new(3, 10, 7);
        let ids: Vec<TokenId> = vec![6, 0, 0, 1, 6, 5, 3, 6];
        for (i, pair) in rolling_hash(&ids, &p).iter().enumerate() {
            assert!(pair.hash < 7);
            assert_eq!(pair.hash, window_hash(&ids[i..i + 3], 10, 7));
        }
    }

    #[test]
    fn test_modulus_above_two_pow_63() {
        // 2^64 - 59, the largest u64 prime.
        let p = HashParams::new(2, 257, u64::MAX - 58);
        let ids: Vec<TokenId> = vec![u32::MAX, 1, u32::MAX, 7, 3];
        let pairs = rolling_hash(&ids, &p);

        assert_eq!(pairs.len(), 4);
        for (i, pair) in pairs.iter().enumerate() {
            assert!(pair.hash < p.modulus);
            assert_eq!(pair.hash, window_hash(&ids[i..i + 2], p.base, p.modulus));
        }

        let huge_base = HashParams::new(3, u64::MAX - 1, u64::MAX - 58);
        for (i, pair) in rolling_hash(&ids, &huge_base).iter().enumerate() {
            assert_eq!(pair.hash, window_hash(&ids[i..i + 3], huge_base.base, huge_base.modulus));
        }
    }

    #[test]
    fn test_degenerate_modulus() {
        assert!(rolling_hash(&[1, 2, 3], &HashParams::new(2, 257, 1)).is_empty());
        assert_eq!(window_hash(&[1, 2], 257, 0), 0);
    }

    #[test]
    fn test_large_modulus_does_not_overflow() {
        let p = HashParams::new(5, 1_000_003, (1u64 << 61) - 1);
        let ids: Vec<TokenId> = vec![u32::MAX, 17, u32::MAX - 1, 3, 99, u32::MAX, 5];
        for (i, pair) in rolling_hash(&ids, &p).iter().enumerate() {
            assert_eq!(pair.hash, window_hash(&ids[i..i + 5], p.base, p.modulus));
        }
    }
}
