use blake3::Hasher;

/// Computes a 64-bit hash of the input data using BLAKE3, truncated from 256 bits.
///
/// The truncated hash is used for catalog point ids. With 64 bits the birthday
/// bound sits around four billion items, far beyond the size of any wine list,
/// so a collision is treated as practically impossible rather than handled.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}

/// Numeric point id for an item inside a partition.
///
/// The same item id under two partitions yields two points, so a producer
/// reference entry never overwrites a restaurant's list entry.
#[inline]
pub fn catalog_point_id(partition: &str, item_id: &str) -> u64 {
    let mut hasher = Hasher::new();
    hasher.update(partition.as_bytes());
    hasher.update(b"|");
    hasher.update(item_id.as_bytes());

    let hash = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}

/// Short hex digest used where a bounded-length token is needed (e.g. log fields).
#[inline]
pub fn short_digest(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex()[..16].to_string()
}
