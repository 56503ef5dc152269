//! 玩家阵营定义

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::constants::{PITS_PER_SIDE, STORE_ONE, STORE_TWO};

/// 阵营（回合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 玩家 1（坑 0-5，仓 6）
    One,
    /// 玩家 2（坑 7-12，仓 13）
    Two,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// 获取己方仓索引
    pub fn store_index(&self) -> usize {
        match self {
            Side::One => STORE_ONE,
            Side::Two => STORE_TWO,
        }
    }

    /// 获取己方坑的索引区间（不含仓）
    pub fn pit_range(&self) -> Range<usize> {
        match self {
            Side::One => 0..PITS_PER_SIDE,
            Side::Two => STORE_ONE + 1..STORE_TWO,
        }
    }

    /// 检查坑是否属于己方（仓不算坑）
    pub fn owns_pit(&self, pit: usize) -> bool {
        self.pit_range().contains(&pit)
    }

    /// 获取报文中的回合字符
    pub fn to_digit(&self) -> char {
        match self {
            Side::One => '1',
            Side::Two => '2',
        }
    }

    /// 从报文中的回合字符解析
    pub fn from_digit(c: char) -> Option<Side> {
        match c {
            '1' => Some(Side::One),
            '2' => Some(Side::Two),
            _ => None,
        }
    }
}

impl std::fmt::Display for Side {
    /// 日志输出和报文保持一致，直接用回合数字
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::One.opponent(), Side::Two);
        assert_eq!(Side::Two.opponent(), Side::One);
    }

    #[test]
    fn test_side_pits() {
        assert!(Side::One.owns_pit(0));
        assert!(Side::One.owns_pit(5));
        assert!(!Side::One.owns_pit(6)); // 仓不是坑
        assert!(!Side::One.owns_pit(7));

        assert!(Side::Two.owns_pit(7));
        assert!(Side::Two.owns_pit(12));
        assert!(!Side::Two.owns_pit(13));
        assert!(!Side::Two.owns_pit(5));
    }

    #[test]
    fn test_side_digit() {
        assert_eq!(Side::from_digit('1'), Some(Side::One));
        assert_eq!(Side::from_digit('2'), Some(Side::Two));
        assert_eq!(Side::from_digit('3'), None);
        assert_eq!(Side::One.to_digit(), '1');
    }
}
