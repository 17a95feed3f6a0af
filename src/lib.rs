//! # pq-envelope: Post-Quantum Hybrid Envelopes
//!
//! `pq-envelope` combines a post-quantum KEM, AES-256-CBC and a post-quantum
//! signature into one signed, encrypted message, and lets every KEM be paired
//! with every signature scheme at runtime through a single registry.
//!
//! ## Core Concepts
//!
//! - **`Registry`**: The immutable catalog of KEM and signature descriptors.
//! - **`KeyManager`**: Long-term key pairs generated once at startup.
//! - **`HybridEncoder`** / **`HybridDecoder`**: The sealing pipelines. The decoder
//!   always verifies the signature before it decapsulates.
//! - **`Server`** / **`ClientSealer`**: Transport-agnostic adapters speaking the
//!   JSON wire format.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pq_envelope::prelude::*;
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Error> {
//!     let registry = Registry::shared();
//!     let server_keys = Arc::new(KeyManager::server(&registry, &KeyConfig::default())?);
//!     let client_keys = KeyManager::client(&registry, &KeyConfig::default())?;
//!     let protocol = ProtocolConfig::default();
//!
//!     let encoder = HybridEncoder::new(registry.clone(), protocol);
//!     let sealed = encoder.encode(
//!         "hello world",
//!         server_keys.public_key("kyber768")?,
//!         "kyber768",
//!         "dilithium2",
//!         client_keys.signature_key_pair("dilithium2")?,
//!     )?;
//!
//!     let decoder = HybridDecoder::new(registry, server_keys, protocol);
//!     assert_eq!(decoder.decode(&sealed.envelope)?.plaintext, "hello world");
//!     Ok(())
//! }
//! ```

pub mod asymmetric;
pub mod audit;
pub mod client;
pub mod common;
pub mod contract;
pub mod envelope;
pub mod keys;
pub mod primitives;
pub mod sealer;
pub mod server;

pub use common::errors::{Error, ErrorKind};

/// A collection of the most commonly used types.
pub mod prelude {
    pub use crate::asymmetric::{
        KemAlgorithm, KemDescriptor, KemPrimitive, Registry, SignatureAlgorithm,
        SignatureDescriptor, SignaturePrimitive,
    };
    pub use crate::audit::{AuditSink, CsvAuditSink, MemoryAuditSink, StageTimings};
    pub use crate::client::{ClientSealer, LoopbackTransport, RemoteKeyProvider};
    pub use crate::common::config::{
        ConfigFile, HashBinding, HashFunction, KeyConfig, ProtocolConfig,
    };
    pub use crate::common::errors::{Error, ErrorKind};
    pub use crate::contract::{KeyRequest, KeyResponse, WireEnvelope};
    pub use crate::envelope::Envelope;
    pub use crate::keys::{KeyManager, KeyPair, KeyRoles, TrustStore};
    pub use crate::sealer::{HybridDecoder, HybridEncoder};
    pub use crate::server::Server;
}

/// The version of the `pq-envelope` crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
