//! 协议常量定义

use std::time::Duration;

/// 棋盘槽位总数（12 个坑 + 2 个仓）
pub const BOARD_SIZE: usize = 14;

/// 每方坑数
pub const PITS_PER_SIDE: usize = 6;

/// 玩家 1 的仓索引
pub const STORE_ONE: usize = 6;

/// 玩家 2 的仓索引
pub const STORE_TWO: usize = 13;

/// 每坑初始棋子数
pub const INITIAL_STONES: u16 = 4;

/// 局面报文长度: 1 字节回合 + 14 个两位数字段
pub const STATE_PAYLOAD_LEN: usize = 1 + BOARD_SIZE * 2;

/// 单次读取的最大字节数
pub const READ_BUF_SIZE: usize = 1024;

/// 默认服务器地址
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// 默认服务器端口
pub const DEFAULT_PORT: u16 = 30000;

/// 默认代理名称（握手时发送）
pub const DEFAULT_AGENT_NAME: &str = "mancala_bot";

/// 默认搜索深度（层数）
pub const DEFAULT_SEARCH_DEPTH: u8 = 3;

/// 响应超时（秒）- 超过此时间无消息则判负退出
pub const RESPONSE_TIMEOUT_SECS: u64 = 5;

/// 连接超时（秒）
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// 响应超时 Duration
pub const RESPONSE_TIMEOUT: Duration = Duration::from_secs(RESPONSE_TIMEOUT_SECS);

/// 连接超时 Duration
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(CONNECT_TIMEOUT_SECS);
