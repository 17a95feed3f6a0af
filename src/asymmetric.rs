//! 非对称原语、算法目录与注册表
pub mod registry;
pub mod systems;
pub mod traits;

pub use registry::{KemDescriptor, Registry, RegistryBuilder, SignatureDescriptor};
pub use systems::{KemAlgorithm, SignatureAlgorithm};
pub use traits::{KemPrimitive, KemSizes, PrimitiveFailure, SignaturePrimitive, SignatureSizes};
