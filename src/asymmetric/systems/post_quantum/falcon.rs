//! Falcon 数字签名
//!
//! Falcon signatures are variable length; `signature_bytes` is only an upper bound.
use super::pqclean_sign;

pqclean_sign!(
    /// Falcon-512, NIST level 1.
    Falcon512,
    pqcrypto_falcon::falcon512
);
pqclean_sign!(
    /// Falcon-1024, NIST level 5.
    Falcon1024,
    pqcrypto_falcon::falcon1024
);
