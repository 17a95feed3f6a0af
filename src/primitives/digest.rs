//! SHA3 摘要
use crate::common::config::HashFunction;
use sha3::{Digest, Sha3_256, Sha3_512};

/// Hashes `data` with the protocol-wide hash function.
pub fn digest(hash: HashFunction, data: &[u8]) -> Vec<u8> {
    match hash {
        HashFunction::Sha3_256 => Sha3_256::digest(data).to_vec(),
        HashFunction::Sha3_512 => Sha3_512::digest(data).to_vec(),
    }
}

/// Builds an unambiguous byte transcript: every part is prefixed with its length
/// as a big-endian `u32`.
pub fn transcript(parts: &[&[u8]]) -> Vec<u8> {
    let total = parts.iter().map(|p| 4 + p.len()).sum();
    let mut out = Vec::with_capacity(total);
    for part in parts {
        out.extend_from_slice(&(part.len() as u32).to_be_bytes());
        out.extend_from_slice(part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha3_256_known_answer() {
        let out = digest(HashFunction::Sha3_256, b"");
        assert_eq!(
            hex::encode(out),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn test_digest_lengths() {
        assert_eq!(digest(HashFunction::Sha3_256, b"abc").len(), 32);
        assert_eq!(digest(HashFunction::Sha3_512, b"abc").len(), 64);
    }

    #[test]
    fn test_transcript_is_unambiguous() {
        let a = transcript(&[b"ab", b"c"]);
        let b = transcript(&[b"a", b"bc"]);
        assert_ne!(a, b);
        assert_eq!(&a[..4], &2u32.to_be_bytes());
    }
}
