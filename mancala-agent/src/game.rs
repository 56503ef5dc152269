//! 游戏控制循环
//!
//! 状态机：`Connecting → AwaitingSignal → Playing → Ended`。
//! 每个循环先在时限内等待服务器消息：握手信号回名字，结束信号收尾，
//! 局面报文交给搜索引擎算出走法后发回；等待超时视为弃权退出。

use anyhow::{anyhow, Context};
use tracing::{debug, info, warn};

use mancala_ai::AiEngine;
use protocol::{ClientMessage, ServerMessage};

use crate::client::ProtocolClient;
use crate::config::AgentConfig;

/// 控制循环状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// 建立连接
    Connecting,
    /// 等待服务器信号
    AwaitingSignal,
    /// 搜索并发送走法
    Playing,
    /// 终态：连接已关闭
    Ended,
}

/// 一局结束后的统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameReport {
    /// 发出的走法数
    pub moves_sent: u32,
    /// 等待超时的次数（超时即弃权，最多为 1）
    pub timed_out_reads: u64,
}

/// 游戏控制循环
pub struct GameLoop {
    config: AgentConfig,
    engine: AiEngine,
    state: LoopState,
}

impl GameLoop {
    /// 从配置创建
    pub fn new(config: AgentConfig) -> Self {
        let engine = AiEngine::from_depth(config.search_depth);
        Self {
            config,
            engine,
            state: LoopState::Connecting,
        }
    }

    /// 运行到棋局结束或超时弃权
    pub async fn run(mut self) -> anyhow::Result<GameReport> {
        info!("player {} connecting to {}", self.config.name, self.config.addr());
        let mut client = ProtocolClient::connect(&self.config.addr())
            .await
            .context("failed to connect to game server")?;
        info!("player {} connected", self.config.name);
        self.state = LoopState::AwaitingSignal;

        let mut moves_sent = 0u32;
        while self.state != LoopState::Ended {
            match client
                .receive_with_deadline(self.config.response_timeout)
                .await?
            {
                None => {
                    warn!(
                        "no response in {:?}, forfeiting the game",
                        self.config.response_timeout
                    );
                    self.state = LoopState::Ended;
                }
                Some(ServerMessage::NameRequest) => {
                    debug!("server asked for our name");
                    client
                        .send(&ClientMessage::Name(self.config.name.clone()))
                        .await?;
                }
                Some(ServerMessage::GameOver) => {
                    info!("game over signal received");
                    self.state = LoopState::Ended;
                }
                Some(ServerMessage::State { board, turn }) => {
                    self.state = LoopState::Playing;
                    debug!("our turn ({}), board {}", turn, board);

                    // 服务器只在轮到我们时发局面，这里必然有合法走法
                    let result = self
                        .engine
                        .search(&board, turn)
                        .ok_or_else(|| anyhow!("no legal move for the turn we were asked to play"))?;
                    debug!(
                        "chose pit {} (score {}, {} nodes)",
                        result.pit,
                        result.score,
                        self.engine.nodes_searched()
                    );

                    client.send(&ClientMessage::Move { pit: result.pit }).await?;
                    moves_sent += 1;
                    self.state = LoopState::AwaitingSignal;
                }
            }
        }

        Ok(GameReport {
            moves_sent,
            timed_out_reads: client.timed_out_reads(),
        })
    }
}
