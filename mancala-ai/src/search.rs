//! 搜索引擎
//!
//! 实现固定深度的 Minimax + Alpha-Beta 剪枝。
//! 没有迭代加深和置换表：服务器的限时远大于固定深度的搜索耗时。

use protocol::{Board, MancalaError, Side, DEFAULT_SEARCH_DEPTH};
use serde::{Deserialize, Serialize};

use crate::evaluate::Evaluator;

/// AI 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// 搜索深度（层数）
    pub max_depth: u8,
}

impl AiConfig {
    pub fn from_depth(max_depth: u8) -> Self {
        Self { max_depth }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_depth(DEFAULT_SEARCH_DEPTH)
    }
}

/// 搜索结果：选中的坑和它的得分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// 棋盘绝对索引（0-5 或 7-12）
    pub pit: usize,
    pub score: i32,
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            nodes_searched: 0,
        }
    }

    /// 从搜索深度创建
    pub fn from_depth(max_depth: u8) -> Self {
        Self::new(AiConfig::from_depth(max_depth))
    }

    /// 搜索当前回合的最佳走法
    ///
    /// 根节点没有合法走法（终局）时返回 `None`，由调用方按致命错误处理。
    pub fn search(&mut self, board: &Board, turn: Side) -> Option<SearchResult> {
        self.nodes_searched = 0;

        match self.minimax(board, self.config.max_depth, i32::MIN, i32::MAX, true, turn) {
            Ok((score, Some(pit))) => Some(SearchResult { pit, score }),
            Ok((_, None)) => None,
            // valid_pits 只产出合法走法，这里不可能出错
            Err(e) => {
                tracing::error!("illegal move inside search: {}", e);
                None
            }
        }
    }

    /// Minimax + Alpha-Beta 搜索
    ///
    /// 返回 `(得分, 选中的坑)`：选中的坑作为显式返回值随调用栈向上传递，
    /// 根帧取走它，内层帧的则被丢弃。只有严格更优的走法才会替换当前
    /// 最佳，因此同分时选中的是索引最小的坑（走法按坑索引升序枚举）。
    fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        turn: Side,
    ) -> Result<(i32, Option<usize>), MancalaError> {
        self.nodes_searched += 1;

        // 递归基：到达深度限制或终局，返回评估值
        if depth == 0 || board.is_terminal() {
            return Ok((Evaluator::evaluate(board, maximizing, turn), None));
        }

        let mut best_pit = None;

        if maximizing {
            let mut best = i32::MIN;
            for pit in board.valid_pits(turn) {
                let (child_board, child_turn) = board.apply_move(pit, turn)?;
                // 再走一次时同一方继续扮演同一角色，否则角色互换
                let child_maximizing = if child_turn == turn {
                    maximizing
                } else {
                    !maximizing
                };
                let (score, _) = self.minimax(
                    &child_board,
                    depth - 1,
                    alpha,
                    beta,
                    child_maximizing,
                    child_turn,
                )?;

                if score > best {
                    best = score;
                    best_pit = Some(pit);
                }
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            Ok((best, best_pit))
        } else {
            let mut best = i32::MAX;
            for pit in board.valid_pits(turn) {
                let (child_board, child_turn) = board.apply_move(pit, turn)?;
                let child_maximizing = if child_turn == turn {
                    maximizing
                } else {
                    !maximizing
                };
                let (score, _) = self.minimax(
                    &child_board,
                    depth - 1,
                    alpha,
                    beta,
                    child_maximizing,
                    child_turn,
                )?;

                if score < best {
                    best = score;
                    best_pit = Some(pit);
                }
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            Ok((best, best_pit))
        }
    }

    /// 获取上次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}
