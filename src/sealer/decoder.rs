//! 混合加密解码器
//!
//! Verification strictly precedes decapsulation. A rejected signature returns
//! before the KEM private key is read, so unauthenticated ciphertext is never
//! decrypted.
use crate::asymmetric::registry::Registry;
use crate::audit::{AuditRecord, AuditSink, StageTimings, timed};
use crate::common::config::ProtocolConfig;
use crate::common::errors::Error;
use crate::envelope::Envelope;
use crate::keys::{KeyManager, TrustStore};
use crate::primitives::{decrypt, derive_key};
use crate::sealer::signed_digest;
use std::sync::Arc;

/// The recovered plaintext with the full set of stage timings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub plaintext: String,
    pub timings: StageTimings,
}

/// Server-side pipeline: resolve, hash, verify, decapsulate, decrypt.
#[derive(Clone)]
pub struct HybridDecoder {
    registry: Arc<Registry>,
    keys: Arc<KeyManager>,
    protocol: ProtocolConfig,
    trust: Option<Arc<TrustStore>>,
    audit: Option<Arc<dyn AuditSink>>,
}

impl HybridDecoder {
    pub fn new(registry: Arc<Registry>, keys: Arc<KeyManager>, protocol: ProtocolConfig) -> Self {
        Self {
            registry,
            keys,
            protocol,
            trust: None,
            audit: None,
        }
    }

    /// Rejects envelopes from signers that are not pinned in `trust`.
    pub fn with_trust_store(mut self, trust: Arc<TrustStore>) -> Self {
        self.trust = Some(trust);
        self
    }

    /// Appends one record to `sink` after every successful decode.
    pub fn with_audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(sink);
        self
    }

    pub fn keys(&self) -> &KeyManager {
        &self.keys
    }

    pub fn decode(&self, envelope: &Envelope) -> Result<Decoded, Error> {
        self.decode_timed(envelope, StageTimings::default())
    }

    /// Decodes `envelope`; `client_timings` supplies the client half of the audit record.
    pub fn decode_timed(
        &self,
        envelope: &Envelope,
        client_timings: StageTimings,
    ) -> Result<Decoded, Error> {
        let mut timings = client_timings;

        let kem = self.registry.lookup_kem(&envelope.kem_algorithm)?;
        let signature = self.registry.lookup_signature(&envelope.signature_algorithm)?;

        let (digest, t) = timed(|| Ok(signed_digest(&self.protocol, envelope)))?;
        timings.server_hash_time = t;

        if let Some(trust) = &self.trust {
            if !trust.is_trusted(signature.id(), &envelope.signer_public_key) {
                log::warn!("{}: signer public key is not pinned", signature.id());
                return Err(Error::SignatureInvalid {
                    algorithm: signature.id().to_string(),
                });
            }
        }

        let ((), t) = timed(|| {
            signature
                .verify(&envelope.signature, &digest, &envelope.signer_public_key)
                .inspect_err(|_| log::warn!("{}: signature rejected", signature.id()))
        })?;
        timings.verify_time = t;
        log::debug!("{}: signature verified", signature.id());

        let private_key = &self.keys.kem_key_pair(kem.id())?.private_key;
        let (shared_secret, t) =
            timed(|| kem.decapsulate(&envelope.encapsulated_key, private_key))?;
        timings.decapsulation_time = t;
        log::debug!("{}: decapsulated", kem.id());

        let key = derive_key(&shared_secret)?;
        let (bytes, t) = timed(|| decrypt(&key, &envelope.iv, &envelope.ciphertext))?;
        timings.decrypt_time = t;
        let plaintext = String::from_utf8(bytes)?;
        log::debug!("decrypted {} bytes", plaintext.len());

        if let Some(sink) = &self.audit {
            let record = AuditRecord::new(kem.id(), signature.id(), timings);
            if let Err(e) = sink.append(&record) {
                log::warn!("audit record {} not written: {}", record.id, e);
            }
        }

        Ok(Decoded { plaintext, timings })
    }
}
