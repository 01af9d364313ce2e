use alloc::vec::Vec;

/// Split `payload` into approximately equal-sized chunks.
///
/// Chunk boundaries ignore UTF-8 and token structure on purpose: the writer
/// must cope with multi-byte sequences and tokens cut anywhere.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}
