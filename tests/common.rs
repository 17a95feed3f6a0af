//!
//! 集成测试的通用辅助函数
//!
#![allow(dead_code)]

use pq_envelope::asymmetric::traits::{
    KemPrimitive, KemSizes, PrimitiveFailure, SignaturePrimitive, SignatureSizes,
};
use pq_envelope::asymmetric::{KemAlgorithm, Registry, SignatureAlgorithm};
use pq_envelope::common::config::{KeyConfig, ProtocolConfig};
use pq_envelope::keys::KeyManager;
use pq_envelope::sealer::{HybridDecoder, HybridEncoder};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A plaintext long enough that decrypting it under a wrong key cannot plausibly
/// yield valid padding and valid UTF-8.
pub const LONG_MESSAGE: &str = "The quick brown fox jumps over the lazy dog while the \
    server verifies every signature before it touches its private key.";

pub fn key_config(kems: &[&str], signatures: &[&str]) -> KeyConfig {
    KeyConfig {
        kem_algorithms: Some(kems.iter().map(|s| s.to_string()).collect()),
        signature_algorithms: Some(signatures.iter().map(|s| s.to_string()).collect()),
    }
}

/// Server and client key material over one registry.
pub struct Fixture {
    pub registry: Arc<Registry>,
    pub server_keys: Arc<KeyManager>,
    pub client_keys: KeyManager,
    pub protocol: ProtocolConfig,
}

impl Fixture {
    pub fn new(registry: Arc<Registry>, config: &KeyConfig, protocol: ProtocolConfig) -> Self {
        Self {
            server_keys: Arc::new(KeyManager::server(&registry, config).unwrap()),
            client_keys: KeyManager::client(&registry, config).unwrap(),
            registry,
            protocol,
        }
    }

    pub fn builtin(kems: &[&str], signatures: &[&str]) -> Self {
        Self::new(
            Registry::shared(),
            &key_config(kems, signatures),
            ProtocolConfig::default(),
        )
    }

    pub fn encoder(&self) -> HybridEncoder {
        HybridEncoder::new(Arc::clone(&self.registry), self.protocol)
    }

    pub fn decoder(&self) -> HybridDecoder {
        HybridDecoder::new(
            Arc::clone(&self.registry),
            Arc::clone(&self.server_keys),
            self.protocol,
        )
    }

    pub fn seal(
        &self,
        plaintext: &str,
        kem: &str,
        signature: &str,
    ) -> pq_envelope::envelope::Envelope {
        self.encoder()
            .encode(
                plaintext,
                self.server_keys.public_key(kem).unwrap(),
                kem,
                signature,
                self.client_keys.signature_key_pair(signature).unwrap(),
            )
            .unwrap()
            .envelope
    }
}

/// Ordered log of primitive calls shared by the recording doubles.
#[derive(Default)]
pub struct CallLog {
    calls: Mutex<Vec<&'static str>>,
}

impl CallLog {
    pub fn push(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

/// Wraps a real KEM, logs decapsulations and optionally fails them.
pub struct RecordingKem {
    pub inner: KemAlgorithm,
    pub log: Arc<CallLog>,
    pub fail_decapsulate: bool,
    pub decapsulations: AtomicUsize,
}

impl RecordingKem {
    pub fn new(inner: KemAlgorithm, log: Arc<CallLog>, fail_decapsulate: bool) -> Self {
        Self {
            inner,
            log,
            fail_decapsulate,
            decapsulations: AtomicUsize::new(0),
        }
    }
}

impl KemPrimitive for RecordingKem {
    fn sizes(&self) -> KemSizes {
        self.inner.sizes()
    }

    fn keypair(&self, pk: &mut [u8], sk: &mut [u8]) -> Result<(), PrimitiveFailure> {
        self.inner.keypair(pk, sk)
    }

    fn encapsulate(&self, ct: &mut [u8], ss: &mut [u8], pk: &[u8]) -> Result<(), PrimitiveFailure> {
        self.log.push("encapsulate");
        self.inner.encapsulate(ct, ss, pk)
    }

    fn decapsulate(&self, ss: &mut [u8], ct: &[u8], sk: &[u8]) -> Result<(), PrimitiveFailure> {
        self.log.push("decapsulate");
        self.decapsulations.fetch_add(1, Ordering::SeqCst);
        if self.fail_decapsulate {
            return Err(PrimitiveFailure(-7));
        }
        self.inner.decapsulate(ss, ct, sk)
    }
}

/// Wraps a real signature scheme and logs sign and verify calls.
pub struct RecordingSignature {
    pub inner: SignatureAlgorithm,
    pub log: Arc<CallLog>,
}

impl SignaturePrimitive for RecordingSignature {
    fn sizes(&self) -> SignatureSizes {
        self.inner.sizes()
    }

    fn keypair(&self, pk: &mut [u8], sk: &mut [u8]) -> Result<(), PrimitiveFailure> {
        self.inner.keypair(pk, sk)
    }

    fn sign(&self, sig: &mut [u8], msg: &[u8], sk: &[u8]) -> Result<usize, PrimitiveFailure> {
        self.log.push("sign");
        self.inner.sign(sig, msg, sk)
    }

    fn verify(&self, sig: &[u8], msg: &[u8], pk: &[u8]) -> Result<(), PrimitiveFailure> {
        self.log.push("verify");
        self.inner.verify(sig, msg, pk)
    }
}

/// Flips one bit of `bytes` at `index`.
pub fn flip_bit(bytes: &mut [u8], index: usize) {
    bytes[index] ^= 0x01;
}
