//! Bulk GF(2^8) byte-buffer operations (spec §4.2).
//!
//! These are the performance-critical primitives: every block-sized XOR and
//! scalar multiply the encoder and decoder perform goes through here. The
//! scalar implementation is the specification (spec §9 "Polymorphism
//! requirement"); a capability-detected backend accelerates the pure-XOR
//! primitives, mirroring the teacher crate's `SimdLevel`/
//! `detect_simd_support` split in `reed_solomon/simd.rs`.

use crate::galois;

/// `dst[i] ^= src[i]` for `i` in `0..n`, where `n = min(dst.len(), src.len())`.
#[inline]
pub fn xor_into(dst: &mut [u8], src: &[u8]) {
    Backend::current().xor_into(dst, src);
}

/// `dst[i] = a[i] ^ b[i]`, the three-operand form used to seed the all-ones
/// parity row two blocks at a time.
#[inline]
pub fn xor_xor_into(dst: &mut [u8], a: &[u8], b: &[u8]) {
    Backend::current().xor_xor_into(dst, a, b);
}

/// `dst[i] = c * src[i]`. Tolerates `dst` and `src` aliasing the same
/// buffer.
#[inline]
pub fn mul_into(dst: &mut [u8], src: &[u8], c: u8) {
    scalar::mul_into(dst, src, c);
}

/// `dst[i] ^= c * src[i]`.
#[inline]
pub fn muladd_into(dst: &mut [u8], c: u8, src: &[u8]) {
    scalar::muladd_into(dst, c, src);
}

/// `dst[i] = src[i] / c`. `c` must be non-zero. Tolerates `dst` and `src`
/// aliasing the same buffer.
#[inline]
pub fn div_into(dst: &mut [u8], src: &[u8], c: u8) {
    scalar::div_into(dst, src, c);
}

/// Which bulk-op backend is in effect for this process.
///
/// Resolved once and cached, the same shape as the teacher's `SimdLevel`
/// detected once behind a `OnceLock` in `reed_solomon/simd.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Portable byte-at-a-time implementation. Always available.
    Scalar,
    /// Word-at-a-time XOR using native `u64` lanes. Available on every
    /// target; not gated behind any CPU feature detection because plain XOR
    /// needs none.
    WideXor,
}

impl Backend {
    /// Detects and caches the best backend for this process.
    pub fn current() -> Backend {
        use std::sync::OnceLock;
        static DETECTED: OnceLock<Backend> = OnceLock::new();
        *DETECTED.get_or_init(Backend::detect)
    }

    fn detect() -> Backend {
        Backend::WideXor
    }

    #[inline]
    fn xor_into(self, dst: &mut [u8], src: &[u8]) {
        match self {
            Backend::Scalar => scalar::xor_into(dst, src),
            Backend::WideXor => wide::xor_into(dst, src),
        }
    }

    #[inline]
    fn xor_xor_into(self, dst: &mut [u8], a: &[u8], b: &[u8]) {
        match self {
            Backend::Scalar => scalar::xor_xor_into(dst, a, b),
            Backend::WideXor => wide::xor_xor_into(dst, a, b),
        }
    }
}

/// Scalar (byte-at-a-time) baseline implementation. This is the
/// specification: every other backend must produce bit-identical output.
mod scalar {
    use super::galois;

    pub fn xor_into(dst: &mut [u8], src: &[u8]) {
        let n = dst.len().min(src.len());
        for i in 0..n {
            dst[i] ^= src[i];
        }
    }

    pub fn xor_xor_into(dst: &mut [u8], a: &[u8], b: &[u8]) {
        let n = dst.len().min(a.len()).min(b.len());
        for i in 0..n {
            dst[i] = a[i] ^ b[i];
        }
    }

    pub fn mul_into(dst: &mut [u8], src: &[u8], c: u8) {
        let n = dst.len().min(src.len());
        for i in 0..n {
            dst[i] = galois::mul(c, src[i]);
        }
    }

    pub fn muladd_into(dst: &mut [u8], c: u8, src: &[u8]) {
        let n = dst.len().min(src.len());
        for i in 0..n {
            dst[i] ^= galois::mul(c, src[i]);
        }
    }

    pub fn div_into(dst: &mut [u8], src: &[u8], c: u8) {
        debug_assert_ne!(c, 0, "div_into requires a non-zero divisor");
        let n = dst.len().min(src.len());
        for i in 0..n {
            dst[i] = galois::div(src[i], c).unwrap_or(0);
        }
    }
}

/// Word-at-a-time XOR over `u64` lanes with a scalar tail. Correctness is
/// identical to `scalar::xor_into`/`xor_xor_into` for any input, including
/// misaligned and overlapping-length buffers, since XOR has no cross-lane
/// dependency.
mod wide {
    const LANE: usize = std::mem::size_of::<u64>();

    pub fn xor_into(dst: &mut [u8], src: &[u8]) {
        let n = dst.len().min(src.len());
        let lanes = n / LANE;

        for i in 0..lanes {
            let off = i * LANE;
            let d = u64::from_ne_bytes(dst[off..off + LANE].try_into().unwrap());
            let s = u64::from_ne_bytes(src[off..off + LANE].try_into().unwrap());
            dst[off..off + LANE].copy_from_slice(&(d ^ s).to_ne_bytes());
        }
        for i in (lanes * LANE)..n {
            dst[i] ^= src[i];
        }
    }

    pub fn xor_xor_into(dst: &mut [u8], a: &[u8], b: &[u8]) {
        let n = dst.len().min(a.len()).min(b.len());
        let lanes = n / LANE;

        for i in 0..lanes {
            let off = i * LANE;
            let av = u64::from_ne_bytes(a[off..off + LANE].try_into().unwrap());
            let bv = u64::from_ne_bytes(b[off..off + LANE].try_into().unwrap());
            dst[off..off + LANE].copy_from_slice(&(av ^ bv).to_ne_bytes());
        }
        for i in (lanes * LANE)..n {
            dst[i] = a[i] ^ b[i];
        }
    }
}
