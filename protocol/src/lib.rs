//! 播棋（Mancala/Kalah）共享协议库
//!
//! 包含:
//! - 棋盘与规则引擎 (Board)
//! - 阵营/回合模型 (Side)
//! - 消息类型与报文编解码 (ServerMessage, ClientMessage)
//! - 传输层抽象 (Connector, Connection traits)
//! - 错误类型与常量

mod board;
mod constants;
mod error;
mod message;
mod side;
mod transport;

pub use board::Board;
pub use constants::*;
pub use error::{MancalaError, ProtocolError, Result};
pub use message::{ClientMessage, ServerMessage};
pub use side::Side;
pub use transport::{
    Connection, Connector,
    TcpConnection, TcpConnector,
    PayloadReader, PayloadWriter,
};
