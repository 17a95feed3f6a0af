//! 客户端：获取服务端 KEM 公钥，封装并发送消息
pub mod provider;
pub mod sealer;

pub use provider::{KeyFetcher, RemoteKeyProvider};
pub use sealer::{ClientSealer, LoopbackTransport, MessageTransport, PairOutcome};
