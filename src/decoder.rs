//! The decoder (spec §4.5): classification, the single-erasure fast path,
//! and the general LDU-based solver.

use log::{debug, trace};
use smallvec::SmallVec;

use crate::block::Block;
use crate::bulk;
use crate::error::{CodecError, Result};
use crate::galois;
use crate::matrix::element;
use crate::params::Params;

/// Inline capacity of the packed triangular buffers, chosen so `r <= 45`
/// (990 packed entries) stays off the heap; wider erasure counts spill over
/// transparently.
const TRI_INLINE: usize = 1024;
/// Inline capacity of the diagonal, sized to the same `r <= 45` cutoff.
const DIAG_INLINE: usize = 64;

/// Reconstructs all original data in place.
///
/// `blocks` must contain exactly `params.original_count()` descriptors, each
/// either an original or a recovery block, with distinct `index` values.
/// On success every descriptor's `buffer` holds the original-block bytes for
/// some logical position in `[0, k)` and its `index` is rewritten to that
/// position (spec §3 "Decoder input/output").
pub fn decode(params: &Params, blocks: &mut [Block<'_>]) -> Result<()> {
    let k = params.original_count();
    let m = params.recovery_count();
    let n = params.block_bytes();

    if blocks.len() != k {
        return Err(CodecError::NullInput("blocks"));
    }

    // --- Classification (spec §4.5.1) ---
    let mut erased = vec![true; k];
    let mut original_positions: Vec<usize> = Vec::new(); // index into `blocks`
    let mut recovery_positions: Vec<usize> = Vec::new(); // index into `blocks`

    for (slot, block) in blocks.iter().enumerate() {
        if block.buffer.len() != n {
            return Err(CodecError::NullInput("block buffer shorter than block_bytes"));
        }
        if block.index >= k + m {
            return Err(CodecError::MalformedInput("block index out of range"));
        }
        if block.index < k {
            if !erased[block.index] {
                return Err(CodecError::MalformedInput(
                    "duplicate original index in decode input",
                ));
            }
            erased[block.index] = false;
            original_positions.push(slot);
        } else {
            recovery_positions.push(slot);
        }
    }

    let r = recovery_positions.len();
    debug!("decode: k={k} m={m} block_bytes={n} r={r}");

    if r == 0 {
        return Ok(());
    }
    if k == 1 {
        blocks[0].index = 0;
        return Ok(());
    }

    let erasures: Vec<u8> = (0..k as u8).filter(|&pos| erased[pos as usize]).take(r).collect();
    debug_assert_eq!(erasures.len(), r);

    // Single-erasure XOR shortcut (spec §4.5.2): only valid when the sole
    // recovery block defined for this call is the all-ones parity row,
    // i.e. m == 1.
    if r == 1 && m == 1 {
        trace!("decode: m=1 XOR shortcut for erasure {}", erasures[0]);
        let mut acc = vec![0u8; n];
        for &slot in &original_positions {
            bulk::xor_into(&mut acc, blocks[slot].buffer);
        }
        let rec_slot = recovery_positions[0];
        bulk::xor_into(blocks[rec_slot].buffer, &acc);
        blocks[rec_slot].index = erasures[0] as usize;
        return Ok(());
    }

    // --- General path (spec §4.5.3) ---
    let x_0 = k as u8;

    // Snapshot original bytes and recovery bytes into owned scratch so the
    // in-place LDU solve below can freely cross-reference rows without
    // fighting the borrow checker over non-contiguous slots of `blocks`;
    // only recovery buffers are ever mutated, so this costs O(k*n) transient
    // memory, not O(r*r) (see DESIGN.md).
    let originals: Vec<(u8, Vec<u8>)> = original_positions
        .iter()
        .map(|&slot| (blocks[slot].index as u8, blocks[slot].buffer.to_vec()))
        .collect();
    let recovery_x: Vec<u8> = recovery_positions
        .iter()
        .map(|&slot| blocks[slot].index as u8)
        .collect();
    let mut recovery: Vec<Vec<u8>> = recovery_positions
        .iter()
        .map(|&slot| blocks[slot].buffer.to_vec())
        .collect();

    // Step 1: eliminate known originals from every recovery row.
    for t in 0..r {
        for (row, orig_buf) in &originals {
            let coeff = element(recovery_x[t], x_0, *row);
            bulk::muladd_into(&mut recovery[t], coeff, orig_buf);
        }
    }

    // Step 2: LDU decomposition of the r x r Cauchy submatrix.
    let ldu = Ldu::build(x_0, &recovery_x, &erasures);

    // Step 3: solve by forward / diagonal / back substitution.
    // Forward substitution (apply L).
    for t in 0..r.saturating_sub(1) {
        for s in (t + 1)..r {
            let coeff = ldu.l(t, s);
            let (src, dst) = two_mut(&mut recovery, t, s);
            bulk::muladd_into(dst, coeff, src);
        }
    }
    // Diagonal.
    for t in 0..r {
        let d = ldu.diag(t);
        let buf = recovery[t].clone();
        bulk::div_into(&mut recovery[t], &buf, d);
    }
    // Back substitution (apply U), columns r-1 downto 1.
    for t in (1..r).rev() {
        for s in 0..t {
            let coeff = ldu.u(s, t);
            let (src, dst) = two_mut(&mut recovery, t, s);
            bulk::muladd_into(dst, coeff, src);
        }
    }

    // Write the recovered bytes back into the caller's buffers and rewrite
    // their logical index (spec §4.5.3 end / §9 note: callers must read back
    // by scanning indices, not array position).
    for (t, &slot) in recovery_positions.iter().enumerate() {
        blocks[slot].buffer.copy_from_slice(&recovery[t]);
        blocks[slot].index = erasures[t] as usize;
    }

    Ok(())
}

/// Borrows two distinct elements of a slice mutably/immutably at once.
/// `i` is read-only, `j` is the mutable target; `i != j` is required.
fn two_mut<T>(v: &mut [T], i: usize, j: usize) -> (&T, &mut T) {
    assert_ne!(i, j, "two_mut requires distinct indices");
    if i < j {
        let (left, right) = v.split_at_mut(j);
        (&left[i], &mut right[0])
    } else {
        let (left, right) = v.split_at_mut(i);
        (&right[0], &mut left[j])
    }
}

/// Packed LDU factorization of the `r x r` Cauchy submatrix selecting the
/// erasure columns and the provided-recovery rows (spec §4.5.3 Step 2).
///
/// `U` is strictly upper triangular (implicit unit diagonal), `L` is
/// strictly lower triangular (implicit unit diagonal), both packed
/// row/column-major in a single byte buffer per the spec's storage layout.
struct Ldu {
    r: usize,
    u: SmallVec<[u8; TRI_INLINE]>,    // strictly upper, indexed via `tri_index`
    diag: SmallVec<[u8; DIAG_INLINE]>, // length r
    l: SmallVec<[u8; TRI_INLINE]>,    // strictly lower, indexed via `tri_index`
}

/// Packs the strictly-triangular `(row, col)` pair with `row < col < r` into
/// a flat offset, row-major.
#[inline]
fn tri_index(r: usize, row: usize, col: usize) -> usize {
    debug_assert!(row < col && col < r);
    row * r - row * (row + 1) / 2 + (col - row - 1)
}

impl Ldu {
    fn build(x_0: u8, recovery_x: &[u8], erasures: &[u8]) -> Self {
        let r = recovery_x.len();
        debug_assert_eq!(erasures.len(), r);

        let tri_len = r * r.saturating_sub(1) / 2;
        let mut u: SmallVec<[u8; TRI_INLINE]> = smallvec::smallvec![0u8; tri_len];
        let mut l: SmallVec<[u8; TRI_INLINE]> = smallvec::smallvec![0u8; tri_len];
        let mut diag: SmallVec<[u8; DIAG_INLINE]> = smallvec::smallvec![0u8; r];

        let mut g = vec![1u8; r];
        let mut b = vec![1u8; r];

        for t in 0..r.saturating_sub(1) {
            let x_t = recovery_x[t];
            let y_t = erasures[t];
            let d_tt = galois::add(x_t, y_t);
            let l_tt = galois::div(g[t], d_tt).expect("Cauchy submatrix is singular");
            let u_tt = galois::mul(
                galois::div(b[t], d_tt).expect("Cauchy submatrix is singular"),
                galois::add(x_0, y_t),
            );
            diag[t] = galois::mul(galois::mul(d_tt, l_tt), u_tt);
            trace!("decode: LDU pivot t={t} x_t={x_t} y_t={y_t}");

            for s in (t + 1)..r {
                let x_s = recovery_x[s];
                let y_s = erasures[s];

                let l_st = galois::div(g[s], galois::add(x_s, y_t))
                    .expect("Cauchy submatrix is singular");
                let u_ts = galois::div(b[s], galois::add(x_t, y_s))
                    .expect("Cauchy submatrix is singular");
                let idx = tri_index(r, t, s);
                l[idx] = l_st;
                u[idx] = u_ts;

                g[s] = galois::mul(
                    g[s],
                    galois::div(galois::add(x_s, x_t), galois::add(x_s, y_t)).unwrap(),
                );
                b[s] = galois::mul(
                    b[s],
                    galois::div(galois::add(y_s, y_t), galois::add(y_s, x_t)).unwrap(),
                );
            }

            for s in (t + 1)..r {
                let idx = tri_index(r, t, s);
                l[idx] = galois::div(l[idx], l_tt).unwrap();
                u[idx] = galois::div(u[idx], u_tt).unwrap();
            }
        }

        // Final pivot.
        let last = r - 1;
        let x_last = recovery_x[last];
        let y_last = erasures[last];
        let d_last = galois::add(x_last, y_last);
        diag[last] = galois::div(
            galois::mul(galois::mul(g[last], b[last]), galois::add(x_0, y_last)),
            d_last,
        )
        .expect("Cauchy submatrix is singular");

        // Fold the (x_0 + y_j) factor into column j of U.
        for j in 1..r {
            let factor = galois::add(x_0, erasures[j]);
            for i in 0..j {
                let idx = tri_index(r, i, j);
                u[idx] = galois::mul(u[idx], factor);
            }
        }

        Self { r, u, diag, l }
    }

    #[inline]
    fn u(&self, row: usize, col: usize) -> u8 {
        self.u[tri_index(self.r, row, col)]
    }

    #[inline]
    fn l(&self, row: usize, col: usize) -> u8 {
        self.l[tri_index(self.r, row, col)]
    }

    #[inline]
    fn diag(&self, t: usize) -> u8 {
        self.diag[t]
    }
}
