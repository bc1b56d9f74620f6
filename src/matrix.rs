//! The normalized Cauchy generator matrix element function (spec §4.3).

use crate::galois;

/// `G[i][j] = (y_j + x_0) / (x_i + y_j)` in GF(2^8).
///
/// `+` is XOR. When `x_i == x_0` the result is 1 by construction (row 0 is
/// all-ones); callers that special-case row 0 should skip this function and
/// use XOR directly rather than calling it with `x_i == x_0`, since the
/// Cauchy condition requires the `x` and `y` sequences to be disjoint and
/// `x_0` is not itself a member of the `x_i` sequence used here.
#[inline]
pub fn element(x_i: u8, x_0: u8, y_j: u8) -> u8 {
    if x_i == x_0 {
        return 1;
    }
    let numerator = galois::add(y_j, x_0);
    let denominator = galois::add(x_i, y_j);
    // The Cauchy condition (x and y sequences disjoint) guarantees
    // denominator != 0 for every valid (x_i, y_j) pair used by the encoder
    // and decoder; a zero here indicates a caller bug, not a runtime
    // erasure-coding failure.
    galois::div(numerator, denominator)
        .expect("Cauchy matrix element: x_i + y_j == 0, x and y sequences are not disjoint")
}
