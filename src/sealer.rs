//! # Hybrid sealing pipelines
//!
//! [`HybridEncoder`] turns a plaintext into a signed [`Envelope`](crate::envelope::Envelope):
//! encapsulate, derive, encrypt, hash, sign. [`HybridDecoder`] reverses it and
//! authenticates before it touches the KEM private key: resolve, hash, verify,
//! decapsulate, decrypt.
pub mod decoder;
pub mod encoder;

pub use decoder::{Decoded, HybridDecoder};
pub use encoder::{HybridEncoder, Sealed};

use crate::common::config::{HashBinding, ProtocolConfig};
use crate::envelope::Envelope;
use crate::primitives::{digest, transcript};

/// The digest both sides sign and verify.
pub(crate) fn signed_digest(protocol: &ProtocolConfig, envelope: &Envelope) -> Vec<u8> {
    match protocol.binding {
        HashBinding::Ciphertext => digest(protocol.hash, &envelope.ciphertext),
        HashBinding::Transcript => {
            let bytes = transcript(&[
                envelope.kem_algorithm.as_bytes(),
                envelope.signature_algorithm.as_bytes(),
                &envelope.encapsulated_key,
                &envelope.iv,
                &envelope.ciphertext,
            ]);
            digest(protocol.hash, &bytes)
        }
    }
}
