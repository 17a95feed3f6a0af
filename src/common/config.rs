//!
//! # 通用配置模块
//!
//! Protocol, key-generation and audit settings shared by both ends of the exchange.
//! Every field has a serde default, so a partial JSON file is a valid configuration.
//!
use crate::common::errors::Error;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The digest signed over the ciphertext. Fixed protocol-wide.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum HashFunction {
    #[default]
    #[serde(rename = "sha3-256")]
    Sha3_256,
    #[serde(rename = "sha3-512")]
    Sha3_512,
}

/// Which envelope fields the signed digest covers.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum HashBinding {
    /// Ciphertext bytes only. Interoperates with peers that sign nothing else.
    #[default]
    Ciphertext,
    /// Algorithm identifiers, encapsulated key, IV and ciphertext.
    Transcript,
}

/// 协议配置
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProtocolConfig {
    #[serde(default)]
    pub hash: HashFunction,
    #[serde(default)]
    pub binding: HashBinding,
}

/// 密钥生成配置
///
/// `None` means every registered algorithm of that kind.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyConfig {
    #[serde(default)]
    pub kem_algorithms: Option<Vec<String>>,
    #[serde(default)]
    pub signature_algorithms: Option<Vec<String>>,
}

/// 审计记录配置
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditConfig {
    /// Whether successful decodes are appended to the audit file.
    #[serde(default)]
    pub enabled: bool,
    /// CSV file that receives one row per decoded envelope.
    #[serde(default = "default_audit_path")]
    pub path: PathBuf,
}

fn default_audit_path() -> PathBuf {
    PathBuf::from("timings.csv")
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_audit_path(),
        }
    }
}

/// 完整配置文件
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub protocol: ProtocolConfig,
    #[serde(default)]
    pub keys: KeyConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

impl ConfigFile {
    /// 从JSON字符串解析配置
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Config(format!("invalid config: {}", e)))
    }

    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Applies `PQ_ENVELOPE_*` environment overrides on top of this configuration.
    pub fn with_env_overrides(mut self) -> Result<Self, Error> {
        if let Ok(value) = std::env::var("PQ_ENVELOPE_HASH") {
            self.protocol.hash = match value.to_lowercase().as_str() {
                "sha3-256" => HashFunction::Sha3_256,
                "sha3-512" => HashFunction::Sha3_512,
                other => return Err(Error::Config(format!("unsupported hash: {}", other))),
            };
        }

        if let Ok(value) = std::env::var("PQ_ENVELOPE_BINDING") {
            self.protocol.binding = match value.to_lowercase().as_str() {
                "ciphertext" => HashBinding::Ciphertext,
                "transcript" => HashBinding::Transcript,
                other => return Err(Error::Config(format!("unsupported binding: {}", other))),
            };
        }

        if let Ok(value) = std::env::var("PQ_ENVELOPE_AUDIT_PATH") {
            self.audit.enabled = true;
            self.audit.path = PathBuf::from(value);
        }

        Ok(self)
    }
}
