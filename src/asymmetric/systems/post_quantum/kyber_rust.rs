//! 纯 Rust Kyber 实现
//!
//! A second Kyber768 backed by the `pqc_kyber` crate, registered alongside the
//! PQClean build so both implementations can be timed against each other. The
//! crate fixes its security level at compile time; its default is Kyber768.
//!
//! Decapsulation uses implicit rejection: a ciphertext for another key yields an
//! unrelated shared secret rather than an error, so the failure surfaces later at
//! decryption.
use super::copy_exact;
use crate::asymmetric::traits::{KemPrimitive, KemSizes, PrimitiveFailure};
use pqc_kyber::{
    KYBER_CIPHERTEXTBYTES, KYBER_PUBLICKEYBYTES, KYBER_SECRETKEYBYTES, KYBER_SSBYTES,
};
use rand::rngs::OsRng;

/// Kyber768 from the `pqc_kyber` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Kyber768Rust;

impl KemPrimitive for Kyber768Rust {
    fn sizes(&self) -> KemSizes {
        KemSizes {
            public_key_bytes: KYBER_PUBLICKEYBYTES,
            private_key_bytes: KYBER_SECRETKEYBYTES,
            ciphertext_bytes: KYBER_CIPHERTEXTBYTES,
            shared_secret_bytes: KYBER_SSBYTES,
        }
    }

    fn keypair(
        &self,
        public_key: &mut [u8],
        private_key: &mut [u8],
    ) -> Result<(), PrimitiveFailure> {
        let keys = pqc_kyber::keypair(&mut OsRng).map_err(|_| PrimitiveFailure::REJECTED)?;
        copy_exact(public_key, &keys.public)?;
        copy_exact(private_key, &keys.secret)
    }

    fn encapsulate(
        &self,
        ciphertext: &mut [u8],
        shared_secret: &mut [u8],
        public_key: &[u8],
    ) -> Result<(), PrimitiveFailure> {
        if public_key.len() != KYBER_PUBLICKEYBYTES {
            return Err(PrimitiveFailure::MALFORMED_INPUT);
        }
        let (ct, ss) = pqc_kyber::encapsulate(public_key, &mut OsRng)
            .map_err(|_| PrimitiveFailure::REJECTED)?;
        copy_exact(ciphertext, &ct)?;
        copy_exact(shared_secret, &ss)
    }

    fn decapsulate(
        &self,
        shared_secret: &mut [u8],
        ciphertext: &[u8],
        private_key: &[u8],
    ) -> Result<(), PrimitiveFailure> {
        if ciphertext.len() != KYBER_CIPHERTEXTBYTES || private_key.len() != KYBER_SECRETKEYBYTES {
            return Err(PrimitiveFailure::MALFORMED_INPUT);
        }
        let ss = pqc_kyber::decapsulate(ciphertext, private_key)
            .map_err(|_| PrimitiveFailure::REJECTED)?;
        copy_exact(shared_secret, &ss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asymmetric::systems::post_quantum::kyber::Kyber768;

    fn keypair() -> (Vec<u8>, Vec<u8>) {
        let sizes = Kyber768Rust.sizes();
        let mut pk = vec![0u8; sizes.public_key_bytes];
        let mut sk = vec![0u8; sizes.private_key_bytes];
        Kyber768Rust.keypair(&mut pk, &mut sk).unwrap();
        (pk, sk)
    }

    #[test]
    fn test_sizes_match_pqclean_kyber768() {
        assert_eq!(Kyber768Rust.sizes(), Kyber768.sizes());
    }

    #[test]
    fn test_kyber768rust_roundtrip() {
        let sizes = Kyber768Rust.sizes();
        let (pk, sk) = keypair();

        let mut ct = vec![0u8; sizes.ciphertext_bytes];
        let mut ss_sender = vec![0u8; sizes.shared_secret_bytes];
        Kyber768Rust.encapsulate(&mut ct, &mut ss_sender, &pk).unwrap();

        let mut ss_receiver = vec![0u8; sizes.shared_secret_bytes];
        Kyber768Rust.decapsulate(&mut ss_receiver, &ct, &sk).unwrap();
        assert_eq!(ss_sender, ss_receiver);
    }

    #[test]
    fn test_wrong_private_key_gives_different_secret() {
        let sizes = Kyber768Rust.sizes();
        let (pk, _) = keypair();
        let (_, other_sk) = keypair();

        let mut ct = vec![0u8; sizes.ciphertext_bytes];
        let mut ss_sender = vec![0u8; sizes.shared_secret_bytes];
        Kyber768Rust.encapsulate(&mut ct, &mut ss_sender, &pk).unwrap();

        let mut ss_receiver = vec![0u8; sizes.shared_secret_bytes];
        Kyber768Rust.decapsulate(&mut ss_receiver, &ct, &other_sk).unwrap();
        assert_ne!(ss_sender, ss_receiver);
    }

    #[test]
    fn test_truncated_public_key_is_malformed() {
        let sizes = Kyber768Rust.sizes();
        let mut ct = vec![0u8; sizes.ciphertext_bytes];
        let mut ss = vec![0u8; sizes.shared_secret_bytes];

        assert_eq!(
            Kyber768Rust.encapsulate(&mut ct, &mut ss, &[0u8; 10]),
            Err(PrimitiveFailure::MALFORMED_INPUT)
        );
    }
}
