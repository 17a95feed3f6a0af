//! Transport-agnostic request handling for the server side.
//!
//! The HTTP layer is left to the embedding application: it routes a decode
//! request to [`Server::handle_json`] and a key request to
//! [`Server::handle_key_json`], then writes back the returned status and body.
use crate::asymmetric::registry::Registry;
use crate::audit::{AuditSink, CsvAuditSink};
use crate::common::config::ConfigFile;
use crate::common::errors::{Error, ErrorKind};
use crate::contract::{DecodeResponse, ErrorResponse, KeyRequest, KeyResponse, WireEnvelope};
use crate::envelope::Envelope;
use crate::keys::{KeyManager, KeyRoles, TrustStore};
use crate::sealer::HybridDecoder;
use serde::Serialize;
use std::sync::Arc;

/// A status code and JSON body, ready for any transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    fn ok<T: Serialize>(body: &T) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self { status: 200, body },
            Err(e) => Self::error(&Error::Json(e)),
        }
    }

    fn error(error: &Error) -> Self {
        let body = serde_json::to_string(&ErrorResponse::from(error))
            .unwrap_or_else(|_| r#"{"message":"internal error","kind":"internal"}"#.to_string());
        Self {
            status: status_for(error),
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Maps an error to its response status. Authentication failures are kept apart
/// from infrastructure failures.
pub fn status_for(error: &Error) -> u16 {
    match error.kind() {
        ErrorKind::Malformed => 400,
        ErrorKind::SignatureInvalid => 401,
        ErrorKind::UnknownAlgorithm | ErrorKind::KeyNotFound => 404,
        ErrorKind::Decapsulation | ErrorKind::Decryption | ErrorKind::Decode => 422,
        ErrorKind::Keypair
        | ErrorKind::Encapsulation
        | ErrorKind::Signing
        | ErrorKind::Encryption
        | ErrorKind::Internal => 500,
    }
}

/// 服务端：持有 KEM 私钥，解码客户端消息
#[derive(Clone)]
pub struct Server {
    decoder: HybridDecoder,
}

impl Server {
    pub fn new(decoder: HybridDecoder) -> Self {
        Self { decoder }
    }

    /// Generates server keys for the built-in registry and opens the audit file
    /// when `config` enables it.
    pub fn from_config(config: &ConfigFile) -> Result<Self, Error> {
        let registry = Registry::shared();
        let keys = Arc::new(KeyManager::generate(&registry, &config.keys, KeyRoles::SERVER)?);
        let mut decoder = HybridDecoder::new(registry, keys, config.protocol);
        if config.audit.enabled {
            let sink: Arc<dyn AuditSink> = Arc::new(CsvAuditSink::open(&config.audit.path)?);
            decoder = decoder.with_audit_sink(sink);
        }
        Ok(Self::new(decoder))
    }

    /// Restricts accepted signers to those pinned in `trust`.
    pub fn with_trust_store(mut self, trust: Arc<TrustStore>) -> Self {
        self.decoder = self.decoder.with_trust_store(trust);
        self
    }

    pub fn keys(&self) -> &KeyManager {
        self.decoder.keys()
    }

    /// Returns the server's KEM public key for the requested algorithm.
    pub fn public_key(&self, request: &KeyRequest) -> Result<KeyResponse, Error> {
        let public_key = self.keys().public_key(&request.kem_name)?;
        Ok(KeyResponse {
            server_public_key: hex::encode(public_key),
        })
    }

    /// Decodes a posted envelope.
    pub fn open(&self, wire: &WireEnvelope) -> Result<DecodeResponse, Error> {
        let envelope = Envelope::try_from(wire)?;
        let decoded = self
            .decoder
            .decode_timed(&envelope, wire.timings.unwrap_or_default())?;
        Ok(DecodeResponse {
            message: decoded.plaintext,
        })
    }

    pub fn handle_key_request(&self, request: &KeyRequest) -> Response {
        match self.public_key(request) {
            Ok(body) => Response::ok(&body),
            Err(e) => Response::error(&e),
        }
    }

    pub fn handle_message(&self, wire: &WireEnvelope) -> Response {
        match self.open(wire) {
            Ok(body) => Response::ok(&body),
            Err(e) => {
                log::info!(
                    "rejected {}/{} message: {}",
                    wire.kem_algo_name,
                    wire.sign_algorithm_name,
                    e
                );
                Response::error(&e)
            }
        }
    }

    /// Parses and handles a raw JSON decode request.
    pub fn handle_json(&self, body: &str) -> Response {
        match serde_json::from_str::<WireEnvelope>(body) {
            Ok(wire) => self.handle_message(&wire),
            Err(e) => Response::error(&Error::Json(e)),
        }
    }

    /// Parses and handles a raw JSON key request.
    pub fn handle_key_json(&self, body: &str) -> Response {
        match serde_json::from_str::<KeyRequest>(body) {
            Ok(request) => self.handle_key_request(&request),
            Err(e) => Response::error(&Error::Json(e)),
        }
    }
}
