//! 错误类型定义

use thiserror::Error;

use crate::side::Side;

/// 播棋规则错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MancalaError {
    /// 坑不属于当前玩家
    #[error("Pit {pit} does not belong to player {side}")]
    ForeignPit { pit: usize, side: Side },

    /// 坑是空的，无子可播
    #[error("Pit {pit} is empty")]
    EmptyPit { pit: usize },

    /// 坑索引超出棋盘
    #[error("Pit index out of range: {pit}")]
    PitOutOfRange { pit: usize },
}

/// 协议错误类型
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 报文格式错误
    #[error("Malformed payload: {reason} (payload: {payload:?})")]
    Malformed { reason: String, payload: String },

    /// 连接超时
    #[error("Connection timeout")]
    ConnectionTimeout,

    /// 连接已关闭
    #[error("Connection closed")]
    ConnectionClosed,

    /// 播棋规则错误
    #[error("Mancala error: {0}")]
    Mancala(#[from] MancalaError),
}

/// 协议操作结果类型
pub type Result<T> = std::result::Result<T, ProtocolError>;
