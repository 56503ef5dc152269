//! 局面评估函数

use protocol::{Board, Side};

/// 评估器
pub struct Evaluator;

/// 终局且领先的奖励权重
const WIN_WEIGHT: i32 = 1000;

/// 仓内子数差的权重
const STORE_WEIGHT: i32 = 100;

/// 坑内子数差的权重
const PIT_WEIGHT: i32 = 10;

impl Evaluator {
    /// 评估局面
    ///
    /// 先从 `turn` 一方的视角计分：
    /// `1000 * (终局且己方仓领先) + 100 * 仓差 + 10 * 坑差`，
    /// 再按该节点是极大方还是极小方决定符号。
    /// 同一个函数同时服务于搜索树的两类节点，不需要单独的对手评估器。
    pub fn evaluate(board: &Board, maximizing: bool, turn: Side) -> i32 {
        let my_store = board.store(turn) as i32;
        let their_store = board.store(turn.opponent()) as i32;
        let my_pits = board.stones(turn) as i32;
        let their_pits = board.stones(turn.opponent()) as i32;

        let winning = board.is_terminal() && my_store > their_store;
        let score = WIN_WEIGHT * winning as i32
            + STORE_WEIGHT * (my_store - their_store)
            + PIT_WEIGHT * (my_pits - their_pits);

        if maximizing {
            score
        } else {
            -score
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_evaluation() {
        // 初始局面对称，双方评估都是 0
        let board = Board::initial();
        assert_eq!(Evaluator::evaluate(&board, true, Side::One), 0);
        assert_eq!(Evaluator::evaluate(&board, true, Side::Two), 0);
    }

    #[test]
    fn test_store_and_pit_weights() {
        // 玩家 1：仓 3 对 1，坑 5 对 2
        let board = Board::from_slots([5, 0, 0, 0, 0, 0, 3, 2, 0, 0, 0, 0, 0, 1]);
        assert_eq!(
            Evaluator::evaluate(&board, true, Side::One),
            100 * (3 - 1) + 10 * (5 - 2)
        );
        // 同一局面从玩家 2 的回合看，符号取反
        assert_eq!(
            Evaluator::evaluate(&board, true, Side::Two),
            -(100 * 2 + 10 * 3)
        );
    }

    #[test]
    fn test_terminal_bonus() {
        // 终局且仓领先，加 1000 分
        let board = Board::from_slots([0, 0, 0, 0, 0, 0, 30, 0, 0, 0, 0, 0, 0, 18]);
        assert_eq!(
            Evaluator::evaluate(&board, true, Side::One),
            1000 + 100 * (30 - 18)
        );
        // 落后一方没有终局奖励
        assert_eq!(
            Evaluator::evaluate(&board, true, Side::Two),
            -100 * 12
        );
    }

    #[test]
    fn test_minimizing_negates() {
        let board = Board::from_slots([5, 0, 0, 0, 0, 0, 3, 2, 0, 0, 0, 0, 0, 1]);
        let max_score = Evaluator::evaluate(&board, true, Side::One);
        let min_score = Evaluator::evaluate(&board, false, Side::One);
        assert_eq!(max_score, -min_score);
    }
}
