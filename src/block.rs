//! The block descriptor (spec §3 "Block descriptor").

/// A `(buffer, index)` pair as described in spec §3.
///
/// `index < k` denotes an original block at logical position `index`;
/// `index >= k` denotes a recovery block whose ordinal is `index - k`. The
/// buffer is borrowed for the duration of one encode/decode call and is
/// never retained past return (spec §5 "Buffer ownership is caller-managed").
pub struct Block<'a> {
    pub index: usize,
    pub buffer: &'a mut [u8],
}

impl<'a> Block<'a> {
    pub fn new(index: usize, buffer: &'a mut [u8]) -> Self {
        Self { index, buffer }
    }
}
