//! The encoder (spec §4.4).

use log::debug;

use crate::bulk;
use crate::error::{CodecError, Result};
use crate::matrix::element;
use crate::params::Params;

/// Produces `params.recovery_count()` recovery blocks from `originals` into
/// `out_recovery_region`.
///
/// `originals` must contain exactly `params.original_count()` slices, each
/// of length `params.block_bytes()`, in order 0..k-1. `out_recovery_region`
/// must be at least `params.recovery_count() * params.block_bytes()` bytes
/// and receives the recovery blocks concatenated in ordinal order.
pub fn encode(params: &Params, originals: &[&[u8]], out_recovery_region: &mut [u8]) -> Result<()> {
    let k = params.original_count();
    let m = params.recovery_count();
    let n = params.block_bytes();

    if originals.len() != k {
        return Err(CodecError::NullInput("originals"));
    }
    for (i, block) in originals.iter().enumerate() {
        if block.len() != n {
            return Err(CodecError::MalformedInput(
                "original block shorter than block_bytes",
            ));
        }
        let _ = i;
    }
    if out_recovery_region.len() < m * n {
        return Err(CodecError::NullInput("out_recovery_region"));
    }

    debug!("encode: k={k} m={m} block_bytes={n}");

    // k == 1: every Cauchy row collapses to 1 (spec §4.4 "Trivial case").
    if k == 1 {
        for b in 0..m {
            out_recovery_region[b * n..(b + 1) * n].copy_from_slice(originals[0]);
        }
        return Ok(());
    }

    let x_0 = k as u8;

    for b in 0..m {
        let x_i = (k + b) as u8;
        let rec = &mut out_recovery_region[b * n..(b + 1) * n];

        if b == 0 {
            // Row 0 is all-ones: plain XOR parity.
            bulk::xor_xor_into(rec, originals[0], originals[1]);
            for orig in &originals[2..] {
                bulk::xor_into(rec, orig);
            }
        } else {
            bulk::mul_into(rec, originals[0], element(x_i, x_0, 0));
            for (j, orig) in originals.iter().enumerate().skip(1) {
                bulk::muladd_into(rec, element(x_i, x_0, j as u8), orig);
            }
        }
    }

    Ok(())
}
