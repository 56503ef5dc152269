//! 播棋网络代理
//!
//! 连接到对局服务器，在响应时限内完成握手、搜索走法并发送，
//! 直到收到结束信号或超时。

pub mod client;
pub mod config;
pub mod game;

pub use client::ProtocolClient;
pub use config::AgentConfig;
pub use game::{GameLoop, GameReport, LoopState};
