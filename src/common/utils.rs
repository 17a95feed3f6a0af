use crate::common::errors::Error;
use std::fmt;
use std::ops::{Deref, DerefMut};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// 安全地比较两个字节序列，防止时序攻击
///
/// 无论输入如何，此函数总是比较所有字节，但只有所有字节都匹配才返回true
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0;
    for (byte_a, byte_b) in a.iter().zip(b.iter()) {
        result |= byte_a ^ byte_b;
    }

    result == 0
}

/// 自动清零的字节向量，用于私钥和共享密钥等敏感数据
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ZeroizingVec(pub Vec<u8>);

impl ZeroizingVec {
    /// Allocates a zero-filled buffer of exactly `len` bytes.
    pub fn zeroed(len: usize) -> Self {
        Self(vec![0u8; len])
    }
}

impl fmt::Debug for ZeroizingVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZeroizingVec([REDACTED; {}])", self.0.len())
    }
}

impl Deref for ZeroizingVec {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ZeroizingVec {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl AsRef<[u8]> for ZeroizingVec {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ZeroizingVec {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Decodes a hex field, naming the field in the error.
pub fn from_hex(field: &'static str, value: &str) -> Result<Vec<u8>, Error> {
    hex::decode(value).map_err(Error::hex(field))
}

/// Checks that `actual` is exactly the declared size for `field`.
pub fn expect_len(field: &'static str, expected: usize, actual: usize) -> Result<(), Error> {
    if expected != actual {
        return Err(Error::InvalidLength {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        let a = b"sensitive data";
        let b = b"sensitive data";
        let c = b"different data";

        assert!(constant_time_eq(a, b));
        assert!(!constant_time_eq(a, c));
        assert!(!constant_time_eq(a, &c[0..5]));
    }

    #[test]
    fn test_zeroizing_vec_debug_is_redacted() {
        let secret = ZeroizingVec(vec![0x41; 8]);
        let printed = format!("{:?}", secret);

        assert!(!printed.contains("65"));
        assert!(printed.contains("REDACTED; 8"));
    }

    #[test]
    fn test_from_hex_names_field() {
        let err = from_hex("iv", "zz").unwrap_err();
        assert!(err.to_string().contains("iv"));
        assert_eq!(from_hex("iv", "00ff").unwrap(), vec![0x00, 0xff]);
    }

    #[test]
    fn test_expect_len() {
        assert!(expect_len("iv", 16, 16).is_ok());
        assert!(matches!(
            expect_len("iv", 16, 15),
            Err(Error::InvalidLength { expected: 16, actual: 15, .. })
        ));
    }
}
