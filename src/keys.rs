//! # Key Manager
//!
//! Long-term key pairs generated once at startup and read-only afterwards, plus the
//! pre-shared signer keys a verifier trusts.
//!
//! 密钥管理器：启动时生成所有密钥对，此后只读，因此并发读取无需加锁。
use crate::asymmetric::registry::Registry;
use crate::common::config::KeyConfig;
use crate::common::errors::Error;
use crate::common::utils::{ZeroizingVec, constant_time_eq};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// 长期密钥对
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    pub public_key: Vec<u8>,
    pub private_key: ZeroizingVec,
}

/// Which kinds of key pair a party needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyRoles {
    pub kem: bool,
    pub signature: bool,
}

impl KeyRoles {
    /// Server: a KEM key pair per algorithm and its own signing keys.
    pub const SERVER: Self = Self {
        kem: true,
        signature: true,
    };
    /// Client: signing keys only. The server's KEM public keys are fetched on demand.
    pub const CLIENT: Self = Self {
        kem: false,
        signature: true,
    };
}

/// Time spent generating one key pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyGenerationTime {
    pub algorithm: String,
    pub elapsed: Duration,
}

/// 密钥管理器
#[derive(Debug)]
pub struct KeyManager {
    kem_keys: HashMap<String, KeyPair>,
    signature_keys: HashMap<String, KeyPair>,
    known_kems: HashSet<String>,
    known_signatures: HashSet<String>,
    generation_times: Vec<KeyGenerationTime>,
}

impl KeyManager {
    /// Generates every key pair `roles` and `config` ask for. Any failure aborts
    /// construction; a party without its own keys cannot continue safely.
    pub fn generate(
        registry: &Registry,
        config: &KeyConfig,
        roles: KeyRoles,
    ) -> Result<Self, Error> {
        let kem_ids = if roles.kem {
            select(registry.kem_ids(), config.kem_algorithms.as_deref(), |id| {
                registry.lookup_kem(id).map(|_| ())
            })?
        } else {
            Vec::new()
        };
        let signature_ids = if roles.signature {
            select(
                registry.signature_ids(),
                config.signature_algorithms.as_deref(),
                |id| registry.lookup_signature(id).map(|_| ()),
            )?
        } else {
            Vec::new()
        };

        let kem_results = generate_all(&kem_ids, |id| registry.lookup_kem(id)?.keypair())?;
        let signature_results =
            generate_all(&signature_ids, |id| registry.lookup_signature(id)?.keypair())?;

        let mut generation_times = Vec::with_capacity(kem_results.len() + signature_results.len());
        let mut kem_keys = HashMap::with_capacity(kem_results.len());
        for (id, pair, elapsed) in kem_results {
            generation_times.push(KeyGenerationTime {
                algorithm: id.clone(),
                elapsed,
            });
            kem_keys.insert(id, pair);
        }
        let mut signature_keys = HashMap::with_capacity(signature_results.len());
        for (id, pair, elapsed) in signature_results {
            generation_times.push(KeyGenerationTime {
                algorithm: id.clone(),
                elapsed,
            });
            signature_keys.insert(id, pair);
        }

        Ok(Self {
            kem_keys,
            signature_keys,
            known_kems: registry.kem_ids().map(str::to_string).collect(),
            known_signatures: registry.signature_ids().map(str::to_string).collect(),
            generation_times,
        })
    }

    pub fn server(registry: &Registry, config: &KeyConfig) -> Result<Self, Error> {
        Self::generate(registry, config, KeyRoles::SERVER)
    }

    pub fn client(registry: &Registry, config: &KeyConfig) -> Result<Self, Error> {
        Self::generate(registry, config, KeyRoles::CLIENT)
    }

    /// Looks up a key pair of either kind by algorithm id.
    pub fn get_key_pair(&self, id: &str) -> Result<&KeyPair, Error> {
        if let Some(pair) = self.kem_keys.get(id).or_else(|| self.signature_keys.get(id)) {
            return Ok(pair);
        }
        Err(self.missing(id))
    }

    pub fn kem_key_pair(&self, id: &str) -> Result<&KeyPair, Error> {
        self.kem_keys.get(id).ok_or_else(|| {
            if self.known_kems.contains(id) {
                Error::KeyNotFound(id.to_string())
            } else {
                Error::UnknownAlgorithm(id.to_string())
            }
        })
    }

    pub fn signature_key_pair(&self, id: &str) -> Result<&KeyPair, Error> {
        self.signature_keys.get(id).ok_or_else(|| {
            if self.known_signatures.contains(id) {
                Error::KeyNotFound(id.to_string())
            } else {
                Error::UnknownAlgorithm(id.to_string())
            }
        })
    }

    /// The KEM public key a client needs before it can encapsulate.
    pub fn public_key(&self, kem_id: &str) -> Result<&[u8], Error> {
        self.kem_key_pair(kem_id).map(|pair| pair.public_key.as_slice())
    }

    pub fn kem_ids(&self) -> impl Iterator<Item = &str> {
        self.kem_keys.keys().map(String::as_str)
    }

    pub fn signature_ids(&self) -> impl Iterator<Item = &str> {
        self.signature_keys.keys().map(String::as_str)
    }

    pub fn generation_times(&self) -> &[KeyGenerationTime] {
        &self.generation_times
    }

    fn missing(&self, id: &str) -> Error {
        if self.known_kems.contains(id) || self.known_signatures.contains(id) {
            Error::KeyNotFound(id.to_string())
        } else {
            Error::UnknownAlgorithm(id.to_string())
        }
    }
}

fn select<'a>(
    registered: impl Iterator<Item = &'a str>,
    allow_list: Option<&[String]>,
    check: impl Fn(&str) -> Result<(), Error>,
) -> Result<Vec<String>, Error> {
    match allow_list {
        Some(ids) => {
            for id in ids {
                check(id)?;
            }
            Ok(ids.to_vec())
        }
        None => Ok(registered.map(str::to_string).collect()),
    }
}

type Generated = (String, KeyPair, Duration);

fn generate_one(
    id: &str,
    keypair: &(impl Fn(&str) -> Result<(Vec<u8>, ZeroizingVec), Error> + Sync),
) -> Result<Generated, Error> {
    let start = Instant::now();
    let (public_key, private_key) = keypair(id)?;
    let elapsed = start.elapsed();
    log::info!("generated {} key pair in {:?}", id, elapsed);
    Ok((
        id.to_string(),
        KeyPair {
            public_key,
            private_key,
        },
        elapsed,
    ))
}

#[cfg(feature = "parallel")]
fn generate_all(
    ids: &[String],
    keypair: impl Fn(&str) -> Result<(Vec<u8>, ZeroizingVec), Error> + Sync,
) -> Result<Vec<Generated>, Error> {
    ids.par_iter().map(|id| generate_one(id, &keypair)).collect()
}

#[cfg(not(feature = "parallel"))]
fn generate_all(
    ids: &[String],
    keypair: impl Fn(&str) -> Result<(Vec<u8>, ZeroizingVec), Error> + Sync,
) -> Result<Vec<Generated>, Error> {
    ids.iter().map(|id| generate_one(id, &keypair)).collect()
}

/// 预共享的签名者公钥
///
/// A decoder configured with a trust store rejects envelopes whose signer public key
/// is not pinned for the envelope's signature algorithm.
#[derive(Clone, Debug, Default)]
pub struct TrustStore {
    pinned: HashMap<String, Vec<Vec<u8>>>,
}

impl TrustStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&mut self, signature_id: impl Into<String>, public_key: impl Into<Vec<u8>>) {
        self.pinned
            .entry(signature_id.into())
            .or_default()
            .push(public_key.into());
    }

    /// Pins every signing public key held by `keys`.
    pub fn pin_all(&mut self, keys: &KeyManager) {
        for (id, pair) in &keys.signature_keys {
            self.pin(id.clone(), pair.public_key.clone());
        }
    }

    pub fn is_trusted(&self, signature_id: &str, public_key: &[u8]) -> bool {
        self.pinned
            .get(signature_id)
            .is_some_and(|keys| keys.iter().any(|k| constant_time_eq(k, public_key)))
    }
}
