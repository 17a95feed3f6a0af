//! # Post-Quantum Primitive Module
//!
//! This module wraps the PQClean implementations shipped by the `pqcrypto-*` crates
//! behind the [`KemPrimitive`] and [`SignaturePrimitive`] capability traits. Every
//! family shares the same glue, generated by the macros below, so the protocol layer
//! never sees a scheme-specific type.
//!
//! ---
//!
//! # 后量子原语模块
//!
//! 本模块把 `pqcrypto-*` crate 中的 PQClean 实现统一包装为能力接口，
//! 协议层因此无需关心具体算法的类型。
//!
//! # Rejected ciphertexts
//!
//! The PQClean bindings assert on a non-zero decapsulation status, so a
//! ciphertext the scheme rejects (HQC does this for ciphertexts made against
//! another key) panics inside the binding. `pqclean_kem!` catches that panic
//! and returns [`PrimitiveFailure::REJECTED`]. Two consequences for embedders:
//!
//! * the process panic hook still runs, so each rejection prints a panic message
//!   unless the hook is replaced;
//! * the containment requires `panic = "unwind"`. Under `panic = "abort"` a
//!   rejected ciphertext aborts the process. [`REJECTION_IS_CONTAINED`] reports
//!   which strategy the crate was built with.
//!
//! [`KemPrimitive`]: crate::asymmetric::traits::KemPrimitive
//! [`SignaturePrimitive`]: crate::asymmetric::traits::SignaturePrimitive

use crate::asymmetric::traits::PrimitiveFailure;

/// Whether a rejected decapsulation is returned as an error rather than aborting.
pub const REJECTION_IS_CONTAINED: bool = cfg!(panic = "unwind");

/// Copies `src` into `dst`, which must already have exactly the same length.
pub(crate) fn copy_exact(dst: &mut [u8], src: &[u8]) -> Result<(), PrimitiveFailure> {
    if dst.len() != src.len() {
        return Err(PrimitiveFailure::BUFFER_SIZE);
    }
    dst.copy_from_slice(src);
    Ok(())
}

/// Implements `KemPrimitive` for a unit struct over a `pqcrypto` KEM module.
macro_rules! pqclean_kem {
    ($(#[$meta:meta])* $name:ident, $krate:ident :: $scheme:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl $crate::asymmetric::traits::KemPrimitive for $name {
            fn sizes(&self) -> $crate::asymmetric::traits::KemSizes {
                $crate::asymmetric::traits::KemSizes {
                    public_key_bytes: $krate::$scheme::public_key_bytes(),
                    private_key_bytes: $krate::$scheme::secret_key_bytes(),
                    ciphertext_bytes: $krate::$scheme::ciphertext_bytes(),
                    shared_secret_bytes: $krate::$scheme::shared_secret_bytes(),
                }
            }

            fn keypair(
                &self,
                public_key: &mut [u8],
                private_key: &mut [u8],
            ) -> Result<(), $crate::asymmetric::traits::PrimitiveFailure> {
                use pqcrypto_traits::kem::{PublicKey as _, SecretKey as _};
                let (pk, sk) = $krate::$scheme::keypair();
                $crate::asymmetric::systems::post_quantum::copy_exact(public_key, pk.as_bytes())?;
                $crate::asymmetric::systems::post_quantum::copy_exact(private_key, sk.as_bytes())
            }

            fn encapsulate(
                &self,
                ciphertext: &mut [u8],
                shared_secret: &mut [u8],
                public_key: &[u8],
            ) -> Result<(), $crate::asymmetric::traits::PrimitiveFailure> {
                use pqcrypto_traits::kem::{Ciphertext as _, PublicKey as _, SharedSecret as _};
                let pk = $krate::$scheme::PublicKey::from_bytes(public_key)
                    .map_err(|_| $crate::asymmetric::traits::PrimitiveFailure::MALFORMED_INPUT)?;
                let (ss, ct) = $krate::$scheme::encapsulate(&pk);
                $crate::asymmetric::systems::post_quantum::copy_exact(ciphertext, ct.as_bytes())?;
                $crate::asymmetric::systems::post_quantum::copy_exact(shared_secret, ss.as_bytes())
            }

            fn decapsulate(
                &self,
                shared_secret: &mut [u8],
                ciphertext: &[u8],
                private_key: &[u8],
            ) -> Result<(), $crate::asymmetric::traits::PrimitiveFailure> {
                use pqcrypto_traits::kem::{Ciphertext as _, SecretKey as _, SharedSecret as _};
                let ct = $krate::$scheme::Ciphertext::from_bytes(ciphertext)
                    .map_err(|_| $crate::asymmetric::traits::PrimitiveFailure::MALFORMED_INPUT)?;
                let sk = $krate::$scheme::SecretKey::from_bytes(private_key)
                    .map_err(|_| $crate::asymmetric::traits::PrimitiveFailure::MALFORMED_INPUT)?;
                // Some schemes report a failed re-encryption check as a non-zero status,
                // which the bindings surface as a panic.
                let ss = std::panic::catch_unwind(|| $krate::$scheme::decapsulate(&ct, &sk))
                    .map_err(|_| $crate::asymmetric::traits::PrimitiveFailure::REJECTED)?;
                $crate::asymmetric::systems::post_quantum::copy_exact(shared_secret, ss.as_bytes())
            }
        }
    };
}

/// Implements `SignaturePrimitive` for a unit struct over a `pqcrypto` signature module.
macro_rules! pqclean_sign {
    ($(#[$meta:meta])* $name:ident, $krate:ident :: $scheme:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl $crate::asymmetric::traits::SignaturePrimitive for $name {
            fn sizes(&self) -> $crate::asymmetric::traits::SignatureSizes {
                $crate::asymmetric::traits::SignatureSizes {
                    public_key_bytes: $krate::$scheme::public_key_bytes(),
                    private_key_bytes: $krate::$scheme::secret_key_bytes(),
                    signature_bytes: $krate::$scheme::signature_bytes(),
                }
            }

            fn keypair(
                &self,
                public_key: &mut [u8],
                private_key: &mut [u8],
            ) -> Result<(), $crate::asymmetric::traits::PrimitiveFailure> {
                use pqcrypto_traits::sign::{PublicKey as _, SecretKey as _};
                let (pk, sk) = $krate::$scheme::keypair();
                $crate::asymmetric::systems::post_quantum::copy_exact(public_key, pk.as_bytes())?;
                $crate::asymmetric::systems::post_quantum::copy_exact(private_key, sk.as_bytes())
            }

            fn sign(
                &self,
                signature: &mut [u8],
                message: &[u8],
                private_key: &[u8],
            ) -> Result<usize, $crate::asymmetric::traits::PrimitiveFailure> {
                use pqcrypto_traits::sign::{DetachedSignature as _, SecretKey as _};
                let sk = $krate::$scheme::SecretKey::from_bytes(private_key)
                    .map_err(|_| $crate::asymmetric::traits::PrimitiveFailure::MALFORMED_INPUT)?;
                let sig = $krate::$scheme::detached_sign(message, &sk);
                let bytes = sig.as_bytes();
                if bytes.len() > signature.len() {
                    return Err($crate::asymmetric::traits::PrimitiveFailure::BUFFER_SIZE);
                }
                signature[..bytes.len()].copy_from_slice(bytes);
                Ok(bytes.len())
            }

            fn verify(
                &self,
                signature: &[u8],
                message: &[u8],
                public_key: &[u8],
            ) -> Result<(), $crate::asymmetric::traits::PrimitiveFailure> {
                use pqcrypto_traits::sign::{DetachedSignature as _, PublicKey as _};
                let pk = $krate::$scheme::PublicKey::from_bytes(public_key)
                    .map_err(|_| $crate::asymmetric::traits::PrimitiveFailure::MALFORMED_INPUT)?;
                let sig = $krate::$scheme::DetachedSignature::from_bytes(signature)
                    .map_err(|_| $crate::asymmetric::traits::PrimitiveFailure::MALFORMED_INPUT)?;
                $krate::$scheme::verify_detached_signature(&sig, message, &pk)
                    .map_err(|_| $crate::asymmetric::traits::PrimitiveFailure::REJECTED)
            }
        }
    };
}

pub(crate) use {pqclean_kem, pqclean_sign};

pub mod dilithium;
pub mod falcon;
pub mod hqc;
pub mod kyber;
pub mod kyber_rust;
#[cfg(feature = "classic-mceliece")]
pub mod mceliece;
