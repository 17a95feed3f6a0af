//! Classic McEliece 密钥封装
//!
//! Public keys are hundreds of kilobytes and key generation needs a deep stack,
//! so this family sits behind the `classic-mceliece` feature.
use super::pqclean_kem;

pqclean_kem!(
    /// mceliece348864, NIST level 1.
    McEliece348864,
    pqcrypto_classicmceliece::mceliece348864
);
pqclean_kem!(
    /// mceliece460896, NIST level 3.
    McEliece460896,
    pqcrypto_classicmceliece::mceliece460896
);
