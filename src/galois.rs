//! Galois Field GF(2^8) arithmetic for the Cauchy Reed-Solomon codec.
//!
//! ## Primitive polynomial
//!
//! This module implements 8-bit Galois Field arithmetic using the fixed
//! primitive polynomial **0x11D** (x⁸ + x⁴ + x³ + x² + 1). This is the
//! convention used by the reference implementation this crate is compatible
//! with; it cannot be changed without breaking bit-compatibility of encoded
//! streams (see `DESIGN.md` for the open-question rationale).
//!
//! ## Implementation notes
//!
//! Log/antilog tables give O(1) multiply and divide. `antilog` has 512
//! entries so that `log[a] + log[b]` (which can reach `2 * 254 = 508`) can be
//! looked up without a modulo reduction on every multiply.

use std::sync::OnceLock;

/// Primitive polynomial: x⁸ + x⁴ + x³ + x² + 1.
const GF256_GENERATOR: u16 = 0x11D;
const FIELD_SIZE: usize = 256;
const ORDER: usize = FIELD_SIZE - 1; // 255, the multiplicative group order

/// Precomputed log/antilog tables for GF(2^8).
///
/// Built once per process; see [`tables`] for the process-wide cached
/// instance.
pub struct GaloisTable {
    log: [u8; FIELD_SIZE],
    antilog: [u8; FIELD_SIZE * 2],
}

impl GaloisTable {
    fn build() -> Self {
        let mut log = [0u8; FIELD_SIZE];
        let mut antilog = [0u8; FIELD_SIZE * 2];

        let mut b: u16 = 1;
        for l in 0..ORDER {
            antilog[l] = b as u8;
            log[b as usize] = l as u8;

            b <<= 1;
            if b & FIELD_SIZE as u16 != 0 {
                b ^= GF256_GENERATOR;
            }
        }
        // log[0] is undefined; every multiply/divide path involving 0 is
        // special-cased before consulting the table, so this value is never
        // read for a meaningful result.
        log[0] = 0;

        // Duplicate the first half so `antilog[log_a + log_b]` (up to 2*254)
        // never needs a `% ORDER`.
        for i in ORDER..FIELD_SIZE * 2 {
            antilog[i] = antilog[i - ORDER];
        }

        Self { log, antilog }
    }
}

/// Returns the process-wide GF(2^8) log/antilog tables, building them on
/// first use.
///
/// This is the table-initialization step of spec §4.1: idempotent after the
/// first call, safe to read concurrently from any number of threads
/// thereafter.
pub fn tables() -> &'static GaloisTable {
    static TABLE: OnceLock<GaloisTable> = OnceLock::new();
    TABLE.get_or_init(GaloisTable::build)
}

/// `a + b` in GF(2^8), i.e. `a XOR b`.
#[inline]
pub fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// `a * b` in GF(2^8).
#[inline]
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let t = tables();
    let sum = t.log[a as usize] as usize + t.log[b as usize] as usize;
    t.antilog[sum]
}

/// `a / b` in GF(2^8). Returns `None` if `b == 0`.
#[inline]
pub fn div(a: u8, b: u8) -> Option<u8> {
    if b == 0 {
        return None;
    }
    if a == 0 {
        return Some(0);
    }
    let t = tables();
    let diff = t.log[a as usize] as i32 - t.log[b as usize] as i32 + ORDER as i32;
    Some(t.antilog[diff as usize % (FIELD_SIZE * 2)])
}

/// Multiplicative inverse of `a` in GF(2^8). Returns `None` for `a == 0`.
#[inline]
pub fn inv(a: u8) -> Option<u8> {
    div(1, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_antilog_roundtrip() {
        let t = tables();
        for i in 1..FIELD_SIZE {
            let l = t.log[i];
            assert_eq!(t.antilog[l as usize], i as u8);
        }
    }

    #[test]
    fn mul_by_zero_is_zero() {
        assert_eq!(mul(0, 200), 0);
        assert_eq!(mul(200, 0), 0);
    }

    #[test]
    fn mul_by_one_is_identity() {
        for a in 1..=255u8 {
            assert_eq!(mul(a, 1), a);
            assert_eq!(mul(1, a), a);
        }
    }

    #[test]
    fn mul_commutative() {
        for a in [1u8, 3, 17, 200, 255] {
            for b in [2u8, 9, 77, 254] {
                assert_eq!(mul(a, b), mul(b, a));
            }
        }
    }

    #[test]
    fn mul_associative() {
        let (a, b, c) = (5u8, 13u8, 201u8);
        assert_eq!(mul(mul(a, b), c), mul(a, mul(b, c)));
    }

    #[test]
    fn distributive_property() {
        let (a, b, c) = (3u8, 5u8, 7u8);
        assert_eq!(mul(a, b ^ c), mul(a, b) ^ mul(a, c));
    }

    #[test]
    fn div_by_self_is_one() {
        for a in 1..=255u8 {
            assert_eq!(div(a, a), Some(1));
        }
    }

    #[test]
    fn div_by_zero_is_none() {
        assert_eq!(div(5, 0), None);
        assert_eq!(div(0, 0), None);
    }

    #[test]
    fn zero_divided_by_nonzero_is_zero() {
        assert_eq!(div(0, 7), Some(0));
    }

    #[test]
    fn div_inverse_of_mul() {
        for a in [2u8, 9, 77, 254] {
            for b in [1u8, 3, 17, 200, 255] {
                let p = mul(a, b);
                assert_eq!(div(p, a), Some(b));
                assert_eq!(div(p, b), Some(a));
            }
        }
    }

    #[test]
    fn inv_times_self_is_one() {
        for a in 1..=255u8 {
            let inverse = inv(a).unwrap();
            assert_eq!(mul(a, inverse), 1);
        }
    }

    #[test]
    fn inv_of_zero_is_none() {
        assert_eq!(inv(0), None);
    }
}
