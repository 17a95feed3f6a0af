//! 混合加密编码器
use crate::asymmetric::registry::{KemDescriptor, Registry, SignatureDescriptor};
use crate::audit::{StageTimings, timed};
use crate::common::config::ProtocolConfig;
use crate::common::errors::Error;
use crate::envelope::Envelope;
use crate::keys::KeyPair;
use crate::primitives::{derive_key, encrypt, random_iv};
use crate::sealer::signed_digest;
use std::sync::Arc;

/// An envelope together with the client-side stage timings that produced it.
#[derive(Clone, Debug)]
pub struct Sealed {
    pub envelope: Envelope,
    pub timings: StageTimings,
}

/// Client-side pipeline: encapsulate, derive, encrypt, hash, sign.
#[derive(Clone, Debug)]
pub struct HybridEncoder {
    registry: Arc<Registry>,
    protocol: ProtocolConfig,
}

impl HybridEncoder {
    pub fn new(registry: Arc<Registry>, protocol: ProtocolConfig) -> Self {
        Self { registry, protocol }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolves both algorithms by id and seals `plaintext` for the holder of
    /// `peer_public_key`.
    pub fn encode(
        &self,
        plaintext: &str,
        peer_public_key: &[u8],
        kem_id: &str,
        signature_id: &str,
        signer: &KeyPair,
    ) -> Result<Sealed, Error> {
        let kem = self.registry.lookup_kem(kem_id)?;
        let signature = self.registry.lookup_signature(signature_id)?;
        self.encode_with(plaintext.as_bytes(), peer_public_key, kem, signature, signer)
    }

    /// Seals raw bytes with already resolved descriptors. Any stage failure aborts
    /// the whole encode; no partial envelope is returned.
    pub fn encode_with(
        &self,
        plaintext: &[u8],
        peer_public_key: &[u8],
        kem: &KemDescriptor,
        signature: &SignatureDescriptor,
        signer: &KeyPair,
    ) -> Result<Sealed, Error> {
        let mut timings = StageTimings::default();

        let ((encapsulated_key, shared_secret), t) = timed(|| kem.encapsulate(peer_public_key))?;
        timings.encapsulation_time = t;
        log::debug!("{}: encapsulated {} bytes", kem.id(), encapsulated_key.len());

        let key = derive_key(&shared_secret)?;
        let iv = random_iv()?;
        let (ciphertext, t) = timed(|| encrypt(&key, &iv, plaintext))?;
        timings.encryption_time = t;
        log::debug!("encrypted {} bytes into {}", plaintext.len(), ciphertext.len());

        let mut envelope = Envelope {
            kem_algorithm: kem.id().to_string(),
            signature_algorithm: signature.id().to_string(),
            encapsulated_key,
            iv,
            ciphertext,
            signature: Vec::new(),
            signer_public_key: signer.public_key.clone(),
        };

        let (digest, t) = timed(|| Ok(signed_digest(&self.protocol, &envelope)))?;
        timings.client_hash_time = t;

        let (sig, t) = timed(|| signature.sign(&digest, &signer.private_key))?;
        timings.sign_time = t;
        log::debug!("{}: signed with {} byte signature", signature.id(), sig.len());

        envelope.signature = sig;
        Ok(Sealed { envelope, timings })
    }
}
