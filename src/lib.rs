//! gf256-cauchy - a Reed-Solomon erasure codec over GF(2^8) using a
//! normalized Cauchy generator matrix.
//!
//! Given `k` original fixed-size data blocks, [`encode`] computes `m`
//! recovery blocks such that any `k` of the `k + m` blocks (in any
//! combination of originals and recoveries) are enough for [`decode`] to
//! reconstruct the originals. `k + m` must not exceed 256.
//!
//! This crate is a pure computational library: no I/O, no CLI, no logging
//! setup of its own (call sites control that, via the `log` facade this
//! crate emits through) and no threads. See `DESIGN.md` for the grounding
//! of each module against the crate this one was adapted from.

pub mod block;
pub mod bulk;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod galois;
pub mod matrix;
pub mod params;

pub use block::Block;
pub use error::{CodecError, Result, STATUS_SUCCESS};
pub use params::{original_block_index, recovery_block_index, Params};

/// The version token understood by this build of [`init`].
pub const PROTOCOL_VERSION: u32 = 1;

/// Builds the process-wide GF(2^8) tables (spec §4.1 / §6).
///
/// Idempotent after the first successful call: the tables are cached behind
/// a `OnceLock` (see [`galois::tables`]) and this function's only remaining
/// job on subsequent calls is the version check. Pass [`PROTOCOL_VERSION`]
/// unless interoperating with a caller pinned to an older token.
pub fn init(version: u32) -> Result<()> {
    if version != PROTOCOL_VERSION {
        return Err(CodecError::VersionMismatch {
            requested: version,
            supported: PROTOCOL_VERSION,
        });
    }
    // Force table construction now rather than lazily on first encode/decode,
    // so a caller that checks `init`'s return value gets any construction
    // failure up front. Table construction over a fixed 256-entry field
    // cannot actually fail, so this just warms the cache.
    let _ = galois::tables();
    Ok(())
}

/// Encodes `originals` into `out_recovery_region` (spec §4.4, §6).
///
/// See [`encoder::encode`] for the full contract.
pub fn encode(params: &Params, originals: &[&[u8]], out_recovery_region: &mut [u8]) -> Result<()> {
    encoder::encode(params, originals, out_recovery_region)
}

/// Reconstructs all original data in place (spec §4.5, §6).
///
/// See [`decoder::decode`] for the full contract.
pub fn decode(params: &Params, blocks: &mut [Block<'_>]) -> Result<()> {
    decoder::decode(params, blocks)
}
