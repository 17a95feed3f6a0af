//! 基础密码学原语：SHA3 摘要与 AES-256-CBC
pub mod aes_cbc;
pub mod digest;

pub use aes_cbc::{IV_BYTES, KEY_BYTES, decrypt, derive_key, encrypt, random_iv};
pub use digest::{digest, transcript};
