//! 算法系统集合
//!
//! The closed set of KEM and signature algorithms compiled into the crate. Each
//! variant delegates to a primitive in [`post_quantum`], `pqcrypto` backed except
//! for `kyber768rust`; the string identifiers are the names carried on the wire.
//!
//! The HQC ids are `hqc128`/`hqc192`/`hqc256`, not `hqc-rmrs-*`: `pqcrypto-hqc`
//! ships the later HQC revision, whose ciphertexts are not the HQC-RMRS sizes.
pub mod post_quantum;

use crate::asymmetric::traits::{
    KemPrimitive, KemSizes, PrimitiveFailure, SignaturePrimitive, SignatureSizes,
};
use crate::common::errors::Error;
#[cfg(feature = "classic-mceliece")]
use post_quantum::mceliece::{McEliece348864, McEliece460896};
use post_quantum::{
    dilithium::{Dilithium2, Dilithium3, Dilithium5},
    falcon::{Falcon512, Falcon1024},
    hqc::{Hqc128, Hqc192, Hqc256},
    kyber::{Kyber512, Kyber768, Kyber1024},
    kyber_rust::Kyber768Rust,
};
use std::fmt;
use std::str::FromStr;

/// 编译进本 crate 的密钥封装算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KemAlgorithm {
    Kyber512,
    Kyber768,
    Kyber1024,
    Kyber768Rust,
    Hqc128,
    Hqc192,
    Hqc256,
    #[cfg(feature = "classic-mceliece")]
    McEliece348864,
    #[cfg(feature = "classic-mceliece")]
    McEliece460896,
}

impl KemAlgorithm {
    /// Wire identifier of the algorithm.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Kyber512 => "kyber512",
            Self::Kyber768 => "kyber768",
            Self::Kyber1024 => "kyber1024",
            Self::Kyber768Rust => "kyber768rust",
            Self::Hqc128 => "hqc128",
            Self::Hqc192 => "hqc192",
            Self::Hqc256 => "hqc256",
            #[cfg(feature = "classic-mceliece")]
            Self::McEliece348864 => "mceliece348864",
            #[cfg(feature = "classic-mceliece")]
            Self::McEliece460896 => "mceliece460896",
        }
    }

    /// Every enabled variant, in registry order.
    pub fn all() -> Vec<Self> {
        #[allow(unused_mut)]
        let mut all = vec![
            Self::Kyber512,
            Self::Kyber768,
            Self::Kyber1024,
            Self::Kyber768Rust,
            Self::Hqc128,
            Self::Hqc192,
            Self::Hqc256,
        ];
        #[cfg(feature = "classic-mceliece")]
        all.extend([Self::McEliece348864, Self::McEliece460896]);
        all
    }

    fn primitive(&self) -> &'static dyn KemPrimitive {
        match self {
            Self::Kyber512 => &Kyber512,
            Self::Kyber768 => &Kyber768,
            Self::Kyber1024 => &Kyber1024,
            Self::Kyber768Rust => &Kyber768Rust,
            Self::Hqc128 => &Hqc128,
            Self::Hqc192 => &Hqc192,
            Self::Hqc256 => &Hqc256,
            #[cfg(feature = "classic-mceliece")]
            Self::McEliece348864 => &McEliece348864,
            #[cfg(feature = "classic-mceliece")]
            Self::McEliece460896 => &McEliece460896,
        }
    }
}

impl fmt::Display for KemAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for KemAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|alg| alg.id() == s)
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}

impl KemPrimitive for KemAlgorithm {
    fn sizes(&self) -> KemSizes {
        self.primitive().sizes()
    }

    fn keypair(
        &self,
        public_key: &mut [u8],
        private_key: &mut [u8],
    ) -> Result<(), PrimitiveFailure> {
        self.primitive().keypair(public_key, private_key)
    }

    fn encapsulate(
        &self,
        ciphertext: &mut [u8],
        shared_secret: &mut [u8],
        public_key: &[u8],
    ) -> Result<(), PrimitiveFailure> {
        self.primitive().encapsulate(ciphertext, shared_secret, public_key)
    }

    fn decapsulate(
        &self,
        shared_secret: &mut [u8],
        ciphertext: &[u8],
        private_key: &[u8],
    ) -> Result<(), PrimitiveFailure> {
        self.primitive().decapsulate(shared_secret, ciphertext, private_key)
    }
}

/// 编译进本 crate 的签名算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    Dilithium2,
    Dilithium3,
    Dilithium5,
    Falcon512,
    Falcon1024,
}

impl SignatureAlgorithm {
    /// Wire identifier of the algorithm.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Dilithium2 => "dilithium2",
            Self::Dilithium3 => "dilithium3",
            Self::Dilithium5 => "dilithium5",
            Self::Falcon512 => "falcon512",
            Self::Falcon1024 => "falcon1024",
        }
    }

    /// Every variant, in registry order.
    pub fn all() -> Vec<Self> {
        vec![
            Self::Dilithium2,
            Self::Dilithium3,
            Self::Dilithium5,
            Self::Falcon512,
            Self::Falcon1024,
        ]
    }

    fn primitive(&self) -> &'static dyn SignaturePrimitive {
        match self {
            Self::Dilithium2 => &Dilithium2,
            Self::Dilithium3 => &Dilithium3,
            Self::Dilithium5 => &Dilithium5,
            Self::Falcon512 => &Falcon512,
            Self::Falcon1024 => &Falcon1024,
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|alg| alg.id() == s)
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}

impl SignaturePrimitive for SignatureAlgorithm {
    fn sizes(&self) -> SignatureSizes {
        self.primitive().sizes()
    }

    fn keypair(
        &self,
        public_key: &mut [u8],
        private_key: &mut [u8],
    ) -> Result<(), PrimitiveFailure> {
        self.primitive().keypair(public_key, private_key)
    }

    fn sign(
        &self,
        signature: &mut [u8],
        message: &[u8],
        private_key: &[u8],
    ) -> Result<usize, PrimitiveFailure> {
        self.primitive().sign(signature, message, private_key)
    }

    fn verify(
        &self,
        signature: &[u8],
        message: &[u8],
        public_key: &[u8],
    ) -> Result<(), PrimitiveFailure> {
        self.primitive().verify(signature, message, public_key)
    }
}
