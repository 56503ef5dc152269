//! 播棋（Mancala/Kalah）棋盘与规则引擎
//!
//! 棋盘是 14 个槽位的定长数组：索引 0-5 为玩家 1 的坑，6 为玩家 1 的仓，
//! 7-12 为玩家 2 的坑，13 为玩家 2 的仓。
//! 每次走子返回一个新的 `Board` 值，原局面不会被修改，
//! 因此搜索树的各分支之间不存在共享可变状态。

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, INITIAL_STONES, PITS_PER_SIDE};
use crate::error::MancalaError;
use crate::side::Side;

/// 棋盘
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 14 个槽位的棋子数
    slots: [u16; BOARD_SIZE],
}

impl Board {
    /// 创建初始棋盘（每坑 4 子，两仓为空）
    pub fn initial() -> Self {
        let mut slots = [INITIAL_STONES; BOARD_SIZE];
        slots[Side::One.store_index()] = 0;
        slots[Side::Two.store_index()] = 0;
        Self { slots }
    }

    /// 从槽位数组创建
    pub fn from_slots(slots: [u16; BOARD_SIZE]) -> Self {
        Self { slots }
    }

    /// 获取指定槽位的棋子数
    pub fn get(&self, index: usize) -> u16 {
        self.slots[index]
    }

    /// 获取槽位数组
    pub fn slots(&self) -> &[u16; BOARD_SIZE] {
        &self.slots
    }

    /// 获取指定阵营仓中的棋子数
    pub fn store(&self, side: Side) -> u16 {
        self.slots[side.store_index()]
    }

    /// 获取指定阵营六个坑中的棋子总数（不含仓）
    pub fn stones(&self, side: Side) -> u32 {
        side.pit_range().map(|i| self.slots[i] as u32).sum()
    }

    /// 棋盘上所有棋子的总数（守恒量）
    pub fn total_stones(&self) -> u32 {
        self.slots.iter().map(|&n| n as u32).sum()
    }

    /// 获取当前玩家的合法走法：己方所有非空坑，按索引升序
    pub fn valid_pits(&self, side: Side) -> Vec<usize> {
        side.pit_range().filter(|&i| self.slots[i] > 0).collect()
    }

    /// 检查是否到达终局（任意一方六坑全空）
    pub fn is_terminal(&self) -> bool {
        self.stones(Side::One) == 0 || self.stones(Side::Two) == 0
    }

    /// 执行一步走子，返回新棋盘和下一个回合
    ///
    /// 规则顺序：播撒（跳过对方仓）→ 截获 → 终局收割 → 再走一次判定。
    pub fn apply_move(&self, pit: usize, side: Side) -> Result<(Board, Side), MancalaError> {
        if pit >= BOARD_SIZE {
            return Err(MancalaError::PitOutOfRange { pit });
        }
        if !side.owns_pit(pit) {
            return Err(MancalaError::ForeignPit { pit, side });
        }
        if self.slots[pit] == 0 {
            return Err(MancalaError::EmptyPit { pit });
        }

        let mut board = *self;
        let mut stones = board.slots[pit];
        board.slots[pit] = 0;

        // 逆时针播撒，落点若是对方的仓则顺延到下一个槽位
        let opponent_store = side.opponent().store_index();
        let mut current = pit;
        while stones > 0 {
            current = (current + 1) % BOARD_SIZE;
            if current == opponent_store {
                current = (current + 1) % BOARD_SIZE;
            }
            board.slots[current] += 1;
            stones -= 1;
        }

        // 截获：最后一子落入己方原本为空的坑（此刻恰为 1 子），
        // 连同对面坑的全部棋子一起收入己方仓。对面坑为空时也触发。
        if side.owns_pit(current) && board.slots[current] == 1 {
            board.capture_opposite(current, side);
        }

        // 终局收割：任意一方六坑清空后，另一方剩余棋子全部入己方仓
        if board.is_terminal() {
            board.sweep_remaining();
        }

        // 最后一子落入己方仓则再走一次
        let next = if current == side.store_index() {
            side
        } else {
            side.opponent()
        };
        Ok((board, next))
    }

    /// 把 `pit` 和它对面坑的棋子全部收入己方仓
    fn capture_opposite(&mut self, pit: usize, side: Side) {
        let opposite = 2 * PITS_PER_SIDE - pit;
        let store = side.store_index();
        self.slots[store] += self.slots[pit] + self.slots[opposite];
        self.slots[pit] = 0;
        self.slots[opposite] = 0;
    }

    /// 把仍有棋子一方的坑全部清入该方自己的仓
    fn sweep_remaining(&mut self) {
        for side in [Side::One, Side::Two] {
            if self.stones(side.opponent()) == 0 {
                let remaining = self.stones(side) as u16;
                self.slots[side.store_index()] += remaining;
                for i in side.pit_range() {
                    self.slots[i] = 0;
                }
            }
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.slots)
    }
}
