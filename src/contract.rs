//! Defines the JSON messages exchanged between client and server.
//!
//! Binary fields travel as lowercase hex. Field names follow the deployed wire
//! format, so they differ from the names used by [`Envelope`].
use crate::audit::StageTimings;
use crate::common::errors::{Error, ErrorKind};
use crate::common::utils::{expect_len, from_hex};
use crate::envelope::Envelope;
use crate::primitives::IV_BYTES;
use serde::{Deserialize, Serialize};

/// The sealed message as posted to the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WireEnvelope {
    pub cipher_text: String,
    pub iv: String,
    pub signature: String,
    /// The encapsulated KEM ciphertext.
    pub secret_key: String,
    pub sign_pub_key: String,
    pub kem_algo_name: String,
    pub sign_algorithm_name: String,
    /// Client-side stage timings, forwarded for the server's audit record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timings: Option<StageTimings>,
}

impl WireEnvelope {
    pub fn with_timings(mut self, timings: StageTimings) -> Self {
        self.timings = Some(timings);
        self
    }
}

impl From<&Envelope> for WireEnvelope {
    fn from(envelope: &Envelope) -> Self {
        Self {
            cipher_text: hex::encode(&envelope.ciphertext),
            iv: hex::encode(envelope.iv),
            signature: hex::encode(&envelope.signature),
            secret_key: hex::encode(&envelope.encapsulated_key),
            sign_pub_key: hex::encode(&envelope.signer_public_key),
            kem_algo_name: envelope.kem_algorithm.clone(),
            sign_algorithm_name: envelope.signature_algorithm.clone(),
            timings: None,
        }
    }
}

impl TryFrom<&WireEnvelope> for Envelope {
    type Error = Error;

    fn try_from(wire: &WireEnvelope) -> Result<Self, Self::Error> {
        let iv_bytes = from_hex("iv", &wire.iv)?;
        expect_len("iv", IV_BYTES, iv_bytes.len())?;
        let mut iv = [0u8; IV_BYTES];
        iv.copy_from_slice(&iv_bytes);

        Ok(Envelope {
            kem_algorithm: wire.kem_algo_name.clone(),
            signature_algorithm: wire.sign_algorithm_name.clone(),
            encapsulated_key: from_hex("secret_key", &wire.secret_key)?,
            iv,
            ciphertext: from_hex("cipher_text", &wire.cipher_text)?,
            signature: from_hex("signature", &wire.signature)?,
            signer_public_key: from_hex("sign_pub_key", &wire.sign_pub_key)?,
        })
    }
}

/// Asks the server for its KEM public key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct KeyRequest {
    pub kem_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct KeyResponse {
    /// Hex encoded.
    pub server_public_key: String,
}

impl KeyResponse {
    pub fn public_key(&self) -> Result<Vec<u8>, Error> {
        from_hex("server_public_key", &self.server_public_key)
    }
}

/// A successfully decoded message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DecodeResponse {
    pub message: String,
}

/// Body of every non-success response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
    pub kind: ErrorKind,
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        Self {
            message: error.to_string(),
            kind: error.kind(),
        }
    }
}
