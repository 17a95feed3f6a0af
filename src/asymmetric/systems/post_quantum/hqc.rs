//! HQC 密钥封装
//!
//! HQC produces a 64-byte shared secret; only the first 32 bytes key the cipher.
use super::pqclean_kem;

pqclean_kem!(
    /// HQC-128, NIST level 1.
    Hqc128,
    pqcrypto_hqc::hqc128
);
pqclean_kem!(
    /// HQC-192, NIST level 3.
    Hqc192,
    pqcrypto_hqc::hqc192
);
pqclean_kem!(
    /// HQC-256, NIST level 5.
    Hqc256,
    pqcrypto_hqc::hqc256
);
