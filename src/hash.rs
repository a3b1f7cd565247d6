/// Hashes a byte slice using xxh3.
#[must_use]
pub fn hash64(bytes: &[u8]) -> u64 {
    xxhash_rust::xxh3::xxh3_64(bytes)
}

/// Default hash capability for byte-like keys.
///
/// The hash tables take a plain `fn(&K) -> u64`; pass this for `String`,
/// `Vec<u8>` and friends, or supply your own total, deterministic function.
pub fn default_hash<K: AsRef<[u8]>>(key: &K) -> u64 {
    hash64(key.as_ref())
}

#[cfg(test)]
mod tests {
    use super::{default_hash, hash64};
    use test_log::test;

    #[test]
    fn hash_is_stable() {
        assert_eq!(hash64(b"abc"), hash64(b"abc"));
        assert_ne!(hash64(b"abc"), hash64(b"abd"));
    }

    #[test]
    fn default_hash_matches_bytes() {
        let key = String::from("hello");
        assert_eq!(default_hash(&key), hash64(b"hello"));
    }
}
