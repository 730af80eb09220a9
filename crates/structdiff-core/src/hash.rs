/// Type alias representing the 64-bit structural hash used for membership tests.
///
/// ```
/// # use structdiff_core::hash_bytes;
/// let code = hash_bytes(b"structdiff");
/// assert_eq!(code.len(), 8);
/// ```
pub type HashCode = [u8; 8];

/// Compute the FNV-1a hash of the provided bytes.
///
/// ```
/// # use structdiff_core::hash_bytes;
/// let code = hash_bytes(b"diff");
/// let same = hash_bytes(b"diff");
/// assert_eq!(code, same);
/// ```
#[must_use]
pub fn hash_bytes(input: &[u8]) -> HashCode {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    let mut hash = OFFSET_BASIS;
    for byte in input {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash.to_le_bytes()
}

/// Combine hash codes into a single aggregate that ignores their order.
///
/// ```
/// # use structdiff_core::{combine, hash_bytes};
/// let forward = combine(vec![hash_bytes(b"a"), hash_bytes(b"b")]);
/// let backward = combine(vec![hash_bytes(b"b"), hash_bytes(b"a")]);
/// assert_eq!(forward, backward);
/// ```
#[must_use]
pub fn combine(mut codes: Vec<HashCode>) -> HashCode {
    codes.sort_unstable();
    let mut bytes = Vec::with_capacity(codes.len() * 8);
    for code in codes {
        bytes.extend_from_slice(&code);
    }
    hash_bytes(&bytes)
}

/// Hash a seed followed by each code in order.
#[must_use]
pub(crate) fn sequence(seed: &[u8], codes: impl IntoIterator<Item = HashCode>) -> HashCode {
    let mut bytes = Vec::with_capacity(seed.len() + 64);
    bytes.extend_from_slice(seed);
    for code in codes {
        bytes.extend_from_slice(&code);
    }
    hash_bytes(&bytes)
}
