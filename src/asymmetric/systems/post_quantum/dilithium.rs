//! Dilithium 数字签名
use super::pqclean_sign;

pqclean_sign!(
    /// Dilithium2, NIST level 2.
    Dilithium2,
    pqcrypto_dilithium::dilithium2
);
pqclean_sign!(
    /// Dilithium3, NIST level 3.
    Dilithium3,
    pqcrypto_dilithium::dilithium3
);
pqclean_sign!(
    /// Dilithium5, NIST level 5.
    Dilithium5,
    pqcrypto_dilithium::dilithium5
);
