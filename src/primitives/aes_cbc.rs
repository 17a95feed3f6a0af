//! AES-256-CBC with PKCS#7 padding.
use crate::common::errors::Error;
use crate::common::utils::ZeroizingVec;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use rand_core::{OsRng, TryRngCore};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES-256 key length.
pub const KEY_BYTES: usize = 32;
/// CBC initialisation vector length.
pub const IV_BYTES: usize = 16;

/// Takes the first 32 bytes of a KEM shared secret as the symmetric key. Bytes past
/// the 32nd (HQC produces 64) are discarded.
pub fn derive_key(shared_secret: &[u8]) -> Result<ZeroizingVec, Error> {
    if shared_secret.len() < KEY_BYTES {
        return Err(Error::InvalidLength {
            field: "shared_secret",
            expected: KEY_BYTES,
            actual: shared_secret.len(),
        });
    }
    Ok(ZeroizingVec(shared_secret[..KEY_BYTES].to_vec()))
}

/// A fresh IV from the operating system RNG.
pub fn random_iv() -> Result<[u8; IV_BYTES], Error> {
    let mut iv = [0u8; IV_BYTES];
    OsRng.try_fill_bytes(&mut iv)?;
    Ok(iv)
}

pub fn encrypt(key: &[u8], iv: &[u8; IV_BYTES], plaintext: &[u8]) -> Result<Vec<u8>, Error> {
    let cipher = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| Error::Encryption(e.to_string()))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypts and strips the padding. A ciphertext that is not a whole number of
/// blocks or carries invalid padding is a [`Error::Decryption`].
pub fn decrypt(key: &[u8], iv: &[u8; IV_BYTES], ciphertext: &[u8]) -> Result<Vec<u8>, Error> {
    let cipher = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|e| Error::Decryption(e.to_string()))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| Error::Decryption("invalid padding".to_string()))
}
