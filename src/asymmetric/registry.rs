//! # Algorithm Registry
//!
//! Descriptors pair a wire identifier with the declared byte sizes and the
//! capability provider of one algorithm. They own the buffer-size contract:
//! inputs are checked against the declared sizes before a primitive is called
//! and outputs are allocated at exactly the declared sizes.
//!
//! 注册表在启动时构建一次，之后只读。
use crate::asymmetric::systems::{KemAlgorithm, SignatureAlgorithm};
use crate::asymmetric::traits::{KemPrimitive, KemSizes, SignaturePrimitive, SignatureSizes};
use crate::common::errors::Error;
use crate::common::utils::ZeroizingVec;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

static BUILTIN: Lazy<Arc<Registry>> =
    Lazy::new(|| Arc::new(Registry::builder().with_builtin().build()));

/// 一个 KEM 算法的注册项
#[derive(Clone)]
pub struct KemDescriptor {
    id: String,
    sizes: KemSizes,
    provider: Arc<dyn KemPrimitive>,
}

impl KemDescriptor {
    /// Creates a descriptor; byte sizes are read once from the provider.
    pub fn new(id: impl Into<String>, provider: Arc<dyn KemPrimitive>) -> Self {
        let sizes = provider.sizes();
        Self {
            id: id.into(),
            sizes,
            provider,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sizes(&self) -> KemSizes {
        self.sizes
    }

    /// Generates a key pair, returning `(public_key, private_key)`.
    pub fn keypair(&self) -> Result<(Vec<u8>, ZeroizingVec), Error> {
        let mut public_key = vec![0u8; self.sizes.public_key_bytes];
        let mut private_key = ZeroizingVec::zeroed(self.sizes.private_key_bytes);
        self.provider
            .keypair(&mut public_key, &mut private_key)
            .map_err(|e| Error::Keypair {
                algorithm: self.id.clone(),
                reason: e.to_string(),
            })?;
        Ok((public_key, private_key))
    }

    /// Encapsulates against `public_key`, returning `(encapsulated_key, shared_secret)`.
    pub fn encapsulate(&self, public_key: &[u8]) -> Result<(Vec<u8>, ZeroizingVec), Error> {
        if public_key.len() != self.sizes.public_key_bytes {
            return Err(Error::Encapsulation {
                algorithm: self.id.clone(),
                reason: format!(
                    "public key is {} bytes, expected {}",
                    public_key.len(),
                    self.sizes.public_key_bytes
                ),
            });
        }

        let mut encapsulated_key = vec![0u8; self.sizes.ciphertext_bytes];
        let mut shared_secret = ZeroizingVec::zeroed(self.sizes.shared_secret_bytes);
        self.provider
            .encapsulate(&mut encapsulated_key, &mut shared_secret, public_key)
            .map_err(|e| Error::Encapsulation {
                algorithm: self.id.clone(),
                reason: e.to_string(),
            })?;
        Ok((encapsulated_key, shared_secret))
    }

    /// Recovers the shared secret from `encapsulated_key` with the local `private_key`.
    pub fn decapsulate(
        &self,
        encapsulated_key: &[u8],
        private_key: &[u8],
    ) -> Result<ZeroizingVec, Error> {
        if encapsulated_key.len() != self.sizes.ciphertext_bytes {
            return Err(Error::Decapsulation {
                algorithm: self.id.clone(),
                reason: format!(
                    "encapsulated key is {} bytes, expected {}",
                    encapsulated_key.len(),
                    self.sizes.ciphertext_bytes
                ),
            });
        }
        if private_key.len() != self.sizes.private_key_bytes {
            return Err(Error::Decapsulation {
                algorithm: self.id.clone(),
                reason: "private key does not match the declared size".to_string(),
            });
        }

        let mut shared_secret = ZeroizingVec::zeroed(self.sizes.shared_secret_bytes);
        self.provider
            .decapsulate(&mut shared_secret, encapsulated_key, private_key)
            .map_err(|e| Error::Decapsulation {
                algorithm: self.id.clone(),
                reason: e.to_string(),
            })?;
        Ok(shared_secret)
    }
}

impl fmt::Debug for KemDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KemDescriptor")
            .field("id", &self.id)
            .field("sizes", &self.sizes)
            .finish()
    }
}

/// 一个签名算法的注册项
#[derive(Clone)]
pub struct SignatureDescriptor {
    id: String,
    sizes: SignatureSizes,
    provider: Arc<dyn SignaturePrimitive>,
}

impl SignatureDescriptor {
    pub fn new(id: impl Into<String>, provider: Arc<dyn SignaturePrimitive>) -> Self {
        let sizes = provider.sizes();
        Self {
            id: id.into(),
            sizes,
            provider,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sizes(&self) -> SignatureSizes {
        self.sizes
    }

    pub fn keypair(&self) -> Result<(Vec<u8>, ZeroizingVec), Error> {
        let mut public_key = vec![0u8; self.sizes.public_key_bytes];
        let mut private_key = ZeroizingVec::zeroed(self.sizes.private_key_bytes);
        self.provider
            .keypair(&mut public_key, &mut private_key)
            .map_err(|e| Error::Keypair {
                algorithm: self.id.clone(),
                reason: e.to_string(),
            })?;
        Ok((public_key, private_key))
    }

    /// Signs `message`. The returned signature has the length the primitive reported,
    /// which may be shorter than the declared maximum.
    pub fn sign(&self, message: &[u8], private_key: &[u8]) -> Result<Vec<u8>, Error> {
        if private_key.len() != self.sizes.private_key_bytes {
            return Err(Error::Signing {
                algorithm: self.id.clone(),
                reason: "private key does not match the declared size".to_string(),
            });
        }

        let mut signature = vec![0u8; self.sizes.signature_bytes];
        let len = self
            .provider
            .sign(&mut signature, message, private_key)
            .map_err(|e| Error::Signing {
                algorithm: self.id.clone(),
                reason: e.to_string(),
            })?;
        if len > self.sizes.signature_bytes {
            return Err(Error::Signing {
                algorithm: self.id.clone(),
                reason: format!(
                    "reported length {} exceeds maximum {}",
                    len, self.sizes.signature_bytes
                ),
            });
        }
        signature.truncate(len);
        Ok(signature)
    }

    /// Verifies `signature` over `message`. Every rejection, including a signature
    /// or key of impossible length, is reported as [`Error::SignatureInvalid`].
    pub fn verify(&self, signature: &[u8], message: &[u8], public_key: &[u8]) -> Result<(), Error> {
        let invalid = || Error::SignatureInvalid {
            algorithm: self.id.clone(),
        };

        if signature.is_empty()
            || signature.len() > self.sizes.signature_bytes
            || public_key.len() != self.sizes.public_key_bytes
        {
            return Err(invalid());
        }

        self.provider
            .verify(signature, message, public_key)
            .map_err(|_| invalid())
    }
}

impl fmt::Debug for SignatureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureDescriptor")
            .field("id", &self.id)
            .field("sizes", &self.sizes)
            .finish()
    }
}

/// 算法注册表
///
/// Immutable once built. Iteration follows registration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    kems: Vec<KemDescriptor>,
    signatures: Vec<SignatureDescriptor>,
    kem_index: HashMap<String, usize>,
    signature_index: HashMap<String, usize>,
}

impl Registry {
    /// The process-wide registry of every algorithm compiled into the crate.
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    /// Shared handle to [`Registry::builtin`].
    pub fn shared() -> Arc<Registry> {
        Arc::clone(&BUILTIN)
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn lookup_kem(&self, id: &str) -> Result<&KemDescriptor, Error> {
        self.kem_index
            .get(id)
            .map(|&i| &self.kems[i])
            .ok_or_else(|| Error::UnknownAlgorithm(id.to_string()))
    }

    pub fn lookup_signature(&self, id: &str) -> Result<&SignatureDescriptor, Error> {
        self.signature_index
            .get(id)
            .map(|&i| &self.signatures[i])
            .ok_or_else(|| Error::UnknownAlgorithm(id.to_string()))
    }

    pub fn kems(&self) -> impl Iterator<Item = &KemDescriptor> {
        self.kems.iter()
    }

    pub fn signatures(&self) -> impl Iterator<Item = &SignatureDescriptor> {
        self.signatures.iter()
    }

    pub fn kem_ids(&self) -> impl Iterator<Item = &str> {
        self.kems.iter().map(KemDescriptor::id)
    }

    pub fn signature_ids(&self) -> impl Iterator<Item = &str> {
        self.signatures.iter().map(SignatureDescriptor::id)
    }

    /// Every (KEM, signature) combination.
    pub fn pairs(&self) -> impl Iterator<Item = (&KemDescriptor, &SignatureDescriptor)> {
        self.kems
            .iter()
            .flat_map(move |kem| self.signatures.iter().map(move |sig| (kem, sig)))
    }
}

/// Builder for a [`Registry`]. Registering an id twice replaces the earlier entry
/// in place.
#[derive(Default)]
pub struct RegistryBuilder {
    kems: Vec<KemDescriptor>,
    signatures: Vec<SignatureDescriptor>,
}

impl RegistryBuilder {
    /// Registers every algorithm compiled into the crate.
    pub fn with_builtin(mut self) -> Self {
        for alg in KemAlgorithm::all() {
            self = self.kem(alg.id(), Arc::new(alg));
        }
        for alg in SignatureAlgorithm::all() {
            self = self.signature(alg.id(), Arc::new(alg));
        }
        self
    }

    pub fn kem(mut self, id: impl Into<String>, provider: Arc<dyn KemPrimitive>) -> Self {
        let descriptor = KemDescriptor::new(id, provider);
        match self.kems.iter_mut().find(|d| d.id == descriptor.id) {
            Some(slot) => *slot = descriptor,
            None => self.kems.push(descriptor),
        }
        self
    }

    pub fn signature(
        mut self,
        id: impl Into<String>,
        provider: Arc<dyn SignaturePrimitive>,
    ) -> Self {
        let descriptor = SignatureDescriptor::new(id, provider);
        match self.signatures.iter_mut().find(|d| d.id == descriptor.id) {
            Some(slot) => *slot = descriptor,
            None => self.signatures.push(descriptor),
        }
        self
    }

    pub fn build(self) -> Registry {
        let kem_index = self
            .kems
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.clone(), i))
            .collect();
        let signature_index = self
            .signatures
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.clone(), i))
            .collect();
        Registry {
            kems: self.kems,
            signatures: self.signatures,
            kem_index,
            signature_index,
        }
    }
}
