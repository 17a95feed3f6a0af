//! Provides the client side of the exchange: seal with local signing keys and
//! post to the server.

use crate::client::provider::{KeyFetcher, RemoteKeyProvider};
use crate::common::errors::Error;
use crate::contract::{DecodeResponse, ErrorResponse, KeyRequest, KeyResponse, WireEnvelope};
use crate::keys::KeyManager;
use crate::sealer::HybridEncoder;
use crate::server::{Response, Server};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Carries a sealed message to the server and returns its decoded reply.
pub trait MessageTransport: Send + Sync {
    fn send(&self, envelope: &WireEnvelope) -> Result<DecodeResponse, Error>;
}

/// Calls a [`Server`] in-process. Non-success responses come back as
/// [`Error::Remote`] carrying the server's status and error kind.
#[derive(Clone)]
pub struct LoopbackTransport {
    server: Arc<Server>,
}

impl LoopbackTransport {
    pub fn new(server: Arc<Server>) -> Self {
        Self { server }
    }
}

fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    if response.is_success() {
        return Ok(serde_json::from_str(&response.body)?);
    }
    let error: ErrorResponse = serde_json::from_str(&response.body)?;
    Err(Error::Remote {
        status: response.status,
        kind: error.kind,
        message: error.message,
    })
}

impl KeyFetcher for LoopbackTransport {
    fn fetch(&self, request: &KeyRequest) -> Result<KeyResponse, Error> {
        parse_response(self.server.handle_key_request(request))
    }
}

impl MessageTransport for LoopbackTransport {
    fn send(&self, envelope: &WireEnvelope) -> Result<DecodeResponse, Error> {
        parse_response(self.server.handle_message(envelope))
    }
}

/// Result of one (KEM, signature) combination in [`ClientSealer::send_all_pairs`].
#[derive(Debug)]
pub struct PairOutcome {
    pub kem_algorithm: String,
    pub signature_algorithm: String,
    pub result: Result<String, Error>,
}

/// A client-side sealer that fetches server keys through a [`RemoteKeyProvider`]
/// and signs with its own key pairs.
pub struct ClientSealer<F: KeyFetcher, T: MessageTransport> {
    encoder: HybridEncoder,
    keys: Arc<KeyManager>,
    provider: RemoteKeyProvider<F>,
    transport: T,
    forward_timings: bool,
}

impl<F: KeyFetcher, T: MessageTransport> ClientSealer<F, T> {
    pub fn new(
        encoder: HybridEncoder,
        keys: Arc<KeyManager>,
        provider: RemoteKeyProvider<F>,
        transport: T,
    ) -> Self {
        Self {
            encoder,
            keys,
            provider,
            transport,
            forward_timings: true,
        }
    }

    /// Whether client-side stage timings are attached to posted envelopes.
    pub fn forward_timings(mut self, enabled: bool) -> Self {
        self.forward_timings = enabled;
        self
    }

    pub fn provider(&self) -> &RemoteKeyProvider<F> {
        &self.provider
    }

    /// Seals `plaintext` for the server without sending it.
    pub fn seal(
        &self,
        plaintext: &str,
        kem_id: &str,
        signature_id: &str,
    ) -> Result<WireEnvelope, Error> {
        let server_key = self.provider.public_key(kem_id)?;
        let signer = self.keys.signature_key_pair(signature_id)?;
        let sealed = self
            .encoder
            .encode(plaintext, &server_key, kem_id, signature_id, signer)?;

        let wire = WireEnvelope::from(&sealed.envelope);
        Ok(if self.forward_timings {
            wire.with_timings(sealed.timings)
        } else {
            wire
        })
    }

    /// Seals and posts `plaintext`, returning the message the server decoded.
    pub fn send(&self, plaintext: &str, kem_id: &str, signature_id: &str) -> Result<String, Error> {
        let wire = self.seal(plaintext, kem_id, signature_id)?;
        Ok(self.transport.send(&wire)?.message)
    }

    /// Sends `plaintext` once under every registered combination for which this
    /// client holds a signing key. Failures are collected, not retried.
    pub fn send_all_pairs(&self, plaintext: &str) -> Vec<PairOutcome> {
        let registry = self.encoder.registry();
        registry
            .kem_ids()
            .flat_map(move |kem| {
                registry
                    .signature_ids()
                    .filter(move |sig| self.keys.signature_key_pair(sig).is_ok())
                    .map(move |sig| (kem, sig))
            })
            .map(|(kem, sig)| PairOutcome {
                kem_algorithm: kem.to_string(),
                signature_algorithm: sig.to_string(),
                result: self.send(plaintext, kem, sig),
            })
            .collect()
    }
}
