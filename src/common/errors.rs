use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The pipeline stage a primitive failure was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnknownAlgorithm,
    KeyNotFound,
    Keypair,
    Encapsulation,
    Decapsulation,
    Signing,
    SignatureInvalid,
    Encryption,
    Decryption,
    Decode,
    Malformed,
    Internal,
}

/// 协议操作可能遇到的错误类型
#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("no key pair held for algorithm: {0}")]
    KeyNotFound(String),

    #[error("key pair generation failed for {algorithm}: {reason}")]
    Keypair { algorithm: String, reason: String },

    #[error("encapsulation failed for {algorithm}: {reason}")]
    Encapsulation { algorithm: String, reason: String },

    #[error("decapsulation failed for {algorithm}: {reason}")]
    Decapsulation { algorithm: String, reason: String },

    #[error("signing failed for {algorithm}: {reason}")]
    Signing { algorithm: String, reason: String },

    #[error("signature verification failed for {algorithm}")]
    SignatureInvalid { algorithm: String },

    #[error("symmetric encryption failed: {0}")]
    Encryption(String),

    #[error("symmetric decryption failed: {0}")]
    Decryption(String),

    #[error("plaintext is not valid UTF-8")]
    Decode(#[from] std::string::FromUtf8Error),

    #[error("invalid length for {field}: expected {expected}, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("hex decoding failed for {field}: {source}")]
    Hex {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    #[error("serialization error (JSON)")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("operating system RNG failed: {0}")]
    Random(#[from] rand_core::OsError),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("server rejected the request ({status}): {message}")]
    Remote {
        status: u16,
        kind: ErrorKind,
        message: String,
    },
}

impl Error {
    /// Classifies the error without its payload.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownAlgorithm(_) => ErrorKind::UnknownAlgorithm,
            Error::KeyNotFound(_) => ErrorKind::KeyNotFound,
            Error::Keypair { .. } => ErrorKind::Keypair,
            Error::Encapsulation { .. } => ErrorKind::Encapsulation,
            Error::Decapsulation { .. } => ErrorKind::Decapsulation,
            Error::Signing { .. } => ErrorKind::Signing,
            Error::SignatureInvalid { .. } => ErrorKind::SignatureInvalid,
            Error::Encryption(_) => ErrorKind::Encryption,
            Error::Decryption(_) => ErrorKind::Decryption,
            Error::Decode(_) => ErrorKind::Decode,
            Error::InvalidLength { .. } | Error::Hex { .. } | Error::Json(_) => {
                ErrorKind::Malformed
            }
            Error::Config(_) | Error::Io(_) | Error::Random(_) | Error::Transport(_) => {
                ErrorKind::Internal
            }
            Error::Remote { kind, .. } => *kind,
        }
    }

    /// True when the request was rejected because it could not be authenticated.
    pub fn is_authentication_failure(&self) -> bool {
        self.kind() == ErrorKind::SignatureInvalid
    }

    pub(crate) fn hex(field: &'static str) -> impl FnOnce(hex::FromHexError) -> Self {
        move |source| Error::Hex { field, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_invalid_is_distinct_from_internal() {
        let auth = Error::SignatureInvalid {
            algorithm: "dilithium2".to_string(),
        };
        let internal = Error::Transport("connection reset".to_string());

        assert!(auth.is_authentication_failure());
        assert!(!internal.is_authentication_failure());
        assert_ne!(auth.kind(), internal.kind());
    }

    #[test]
    fn test_utf8_error_maps_to_decode() {
        let err: Error = String::from_utf8(vec![0xff, 0xfe]).unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
