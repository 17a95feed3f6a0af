//! 定义了后量子原语必须实现的能力接口。
//!
//! Every primitive follows the same buffer convention: the caller allocates each output
//! buffer at exactly the declared size and the primitive fills it in place. A non-success
//! status is reported as a [`PrimitiveFailure`] carrying the raw status code.
use thiserror::Error;

/// A non-zero status returned by a primitive.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("primitive returned status {0}")]
pub struct PrimitiveFailure(pub i32);

impl PrimitiveFailure {
    /// Status used when a key or ciphertext could not be parsed by the primitive.
    pub const MALFORMED_INPUT: Self = Self(-1);
    /// Status used when verification rejects a signature.
    pub const REJECTED: Self = Self(-2);
    /// Status used when an output buffer does not match what the primitive produced.
    pub const BUFFER_SIZE: Self = Self(-3);
}

/// Declared byte sizes of a KEM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KemSizes {
    pub public_key_bytes: usize,
    pub private_key_bytes: usize,
    pub ciphertext_bytes: usize,
    pub shared_secret_bytes: usize,
}

/// Declared byte sizes of a signature scheme. `signature_bytes` is the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureSizes {
    pub public_key_bytes: usize,
    pub private_key_bytes: usize,
    pub signature_bytes: usize,
}

/// `KemPrimitive` 是密钥封装机制 (KEM) 的统一能力接口。
pub trait KemPrimitive: Send + Sync {
    /// 声明的字节大小
    fn sizes(&self) -> KemSizes;

    /// Fills `public_key` and `private_key` with a fresh key pair.
    fn keypair(&self, public_key: &mut [u8], private_key: &mut [u8])
    -> Result<(), PrimitiveFailure>;

    /// Fills `ciphertext` and `shared_secret` by encapsulating against `public_key`.
    fn encapsulate(
        &self,
        ciphertext: &mut [u8],
        shared_secret: &mut [u8],
        public_key: &[u8],
    ) -> Result<(), PrimitiveFailure>;

    /// Recovers `shared_secret` from `ciphertext` with `private_key`.
    fn decapsulate(
        &self,
        shared_secret: &mut [u8],
        ciphertext: &[u8],
        private_key: &[u8],
    ) -> Result<(), PrimitiveFailure>;
}

/// `SignaturePrimitive` 是数字签名算法的统一能力接口。
pub trait SignaturePrimitive: Send + Sync {
    /// 声明的字节大小
    fn sizes(&self) -> SignatureSizes;

    /// Fills `public_key` and `private_key` with a fresh key pair.
    fn keypair(&self, public_key: &mut [u8], private_key: &mut [u8])
    -> Result<(), PrimitiveFailure>;

    /// Writes a detached signature over `message` into `signature` and returns its real length.
    fn sign(
        &self,
        signature: &mut [u8],
        message: &[u8],
        private_key: &[u8],
    ) -> Result<usize, PrimitiveFailure>;

    /// Checks `signature` over `message` against `public_key`.
    fn verify(
        &self,
        signature: &[u8],
        message: &[u8],
        public_key: &[u8],
    ) -> Result<(), PrimitiveFailure>;
}
