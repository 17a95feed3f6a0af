//! 二进制信封模型
use crate::primitives::IV_BYTES;

/// One sealed message, in binary form.
///
/// The wire form is [`crate::contract::WireEnvelope`]; conversion between the two
/// checks the IV length and hex encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    pub kem_algorithm: String,
    pub signature_algorithm: String,
    /// KEM ciphertext, exactly `ciphertext_bytes` long.
    pub encapsulated_key: Vec<u8>,
    pub iv: [u8; IV_BYTES],
    /// AES-256-CBC output over the padded payload.
    pub ciphertext: Vec<u8>,
    /// Detached signature at the length the signer reported.
    pub signature: Vec<u8>,
    pub signer_public_key: Vec<u8>,
}
