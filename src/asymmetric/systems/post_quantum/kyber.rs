//! Kyber (ML-KEM round 3) 密钥封装
use super::pqclean_kem;

pqclean_kem!(
    /// Kyber512, NIST level 1.
    Kyber512,
    pqcrypto_kyber::kyber512
);
pqclean_kem!(
    /// Kyber768, NIST level 3.
    Kyber768,
    pqcrypto_kyber::kyber768
);
pqclean_kem!(
    /// Kyber1024, NIST level 5.
    Kyber1024,
    pqcrypto_kyber::kyber1024
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asymmetric::traits::{KemPrimitive, PrimitiveFailure};

    fn keypair(kem: &dyn KemPrimitive) -> (Vec<u8>, Vec<u8>) {
        let sizes = kem.sizes();
        let mut pk = vec![0u8; sizes.public_key_bytes];
        let mut sk = vec![0u8; sizes.private_key_bytes];
        kem.keypair(&mut pk, &mut sk).unwrap();
        (pk, sk)
    }

    #[test]
    fn test_kyber768_declared_sizes() {
        let sizes = Kyber768.sizes();
        assert_eq!(sizes.public_key_bytes, 1184);
        assert_eq!(sizes.private_key_bytes, 2400);
        assert_eq!(sizes.ciphertext_bytes, 1088);
        assert_eq!(sizes.shared_secret_bytes, 32);
    }

    #[test]
    fn test_kyber_shared_secret_agrees_all_levels() {
        let kems: [&dyn KemPrimitive; 3] = [&Kyber512, &Kyber768, &Kyber1024];
        for kem in kems {
            let sizes = kem.sizes();
            let (pk, sk) = keypair(kem);

            let mut ct = vec![0u8; sizes.ciphertext_bytes];
            let mut ss_sender = vec![0u8; sizes.shared_secret_bytes];
            kem.encapsulate(&mut ct, &mut ss_sender, &pk).unwrap();

            let mut ss_receiver = vec![0u8; sizes.shared_secret_bytes];
            kem.decapsulate(&mut ss_receiver, &ct, &sk).unwrap();

            assert_eq!(ss_sender, ss_receiver);
        }
    }

    #[test]
    fn test_kyber_wrong_key_length_is_malformed() {
        let sizes = Kyber768.sizes();
        let mut ct = vec![0u8; sizes.ciphertext_bytes];
        let mut ss = vec![0u8; sizes.shared_secret_bytes];

        let result = Kyber768.encapsulate(&mut ct, &mut ss, &[0u8; 10]);
        assert_eq!(result, Err(PrimitiveFailure::MALFORMED_INPUT));
    }

    #[test]
    fn test_kyber_undersized_output_buffer_fails() {
        let sizes = Kyber512.sizes();
        let mut pk = vec![0u8; sizes.public_key_bytes - 1];
        let mut sk = vec![0u8; sizes.private_key_bytes];

        assert_eq!(
            Kyber512.keypair(&mut pk, &mut sk),
            Err(PrimitiveFailure::BUFFER_SIZE)
        );
    }
}
