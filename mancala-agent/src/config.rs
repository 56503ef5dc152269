//! 代理配置
//!
//! 所有运行参数通过这个显式的配置值注入游戏循环，没有模块级可变状态。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use protocol::{
    DEFAULT_AGENT_NAME, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SEARCH_DEPTH, RESPONSE_TIMEOUT,
};

/// 代理配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// 服务器地址
    pub host: String,
    /// 服务器端口
    pub port: u16,
    /// 握手时上报的名字
    pub name: String,
    /// 搜索深度（层数）
    pub search_depth: u8,
    /// 单次等待服务器消息的时限
    pub response_timeout: Duration,
}

impl AgentConfig {
    /// 拼接连接地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            name: DEFAULT_AGENT_NAME.to_string(),
            search_depth: DEFAULT_SEARCH_DEPTH,
            response_timeout: RESPONSE_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AgentConfig::default();
        assert_eq!(config.addr(), "127.0.0.1:30000");
        assert_eq!(config.search_depth, 3);
        assert_eq!(config.response_timeout, Duration::from_secs(5));
    }
}
