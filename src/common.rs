//! 通用模块，包含错误处理、配置和工具函数

pub mod config;
pub mod errors;
pub mod utils;

pub use self::config::{
    AuditConfig, ConfigFile, HashBinding, HashFunction, KeyConfig, ProtocolConfig,
};
pub use self::errors::{Error, ErrorKind};
pub use self::utils::{ZeroizingVec, constant_time_eq};
