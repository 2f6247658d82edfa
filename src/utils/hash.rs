//! Content hashing for change detection and asset fingerprints.

/// Compute a 64-bit content hash (first 8 bytes of blake3).
pub fn compute(content: &[u8]) -> u64 {
    let hash = blake3::hash(content);
    let mut head = [0u8; 8];
    head.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(head)
}

/// Short hex fingerprint used in cache-busting file names.
pub fn fingerprint(content: &[u8]) -> String {
    hex::encode(&blake3::hash(content).as_bytes()[..4])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_is_stable() {
        assert_eq!(compute(b"portfolio"), compute(b"portfolio"));
        assert_ne!(compute(b"portfolio"), compute(b"portfolio "));
    }

    #[test]
    fn test_fingerprint_shape() {
        let fp = fingerprint(b"console.log(1)");
        assert_eq!(fp.len(), 8);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(fp, fingerprint(b"console.log(1)"));
    }
}
