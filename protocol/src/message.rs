//! 消息类型定义与报文编解码
//!
//! 服务器使用裸 ASCII 报文：
//! - `"N"` 请求代理上报名字
//! - `"E"` 宣告棋局结束
//! - 长度 29 的局面串：`[回合:1 位][槽位 0:2 位]...[槽位 13:2 位]`
//!
//! 代理发出的报文：名字原文，或服务器 1-6 编号的坑位数字。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::{BOARD_SIZE, PITS_PER_SIDE, STATE_PAYLOAD_LEN};
use crate::error::ProtocolError;
use crate::side::Side;

/// 服务端发送给代理的消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerMessage {
    /// 请求代理上报名字（握手）
    NameRequest,
    /// 棋局结束
    GameOver,
    /// 当前局面和待走的回合
    State { board: Board, turn: Side },
}

impl ServerMessage {
    /// 解析入站报文
    pub fn decode(payload: &str) -> Result<Self, ProtocolError> {
        match payload {
            "N" => return Ok(ServerMessage::NameRequest),
            "E" => return Ok(ServerMessage::GameOver),
            _ => {}
        }

        if payload.len() != STATE_PAYLOAD_LEN {
            return Err(ProtocolError::Malformed {
                reason: format!(
                    "unexpected payload length {} (want {})",
                    payload.len(),
                    STATE_PAYLOAD_LEN
                ),
                payload: payload.to_string(),
            });
        }

        let bytes = payload.as_bytes();
        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(ProtocolError::Malformed {
                reason: "non-digit character in state payload".to_string(),
                payload: payload.to_string(),
            });
        }

        let turn = Side::from_digit(bytes[0] as char).ok_or_else(|| ProtocolError::Malformed {
            reason: format!("invalid turn digit {:?}", bytes[0] as char),
            payload: payload.to_string(),
        })?;

        // 每个槽位两位十进制，按索引顺序排列
        let mut slots = [0u16; BOARD_SIZE];
        for (i, slot) in slots.iter_mut().enumerate() {
            let hi = (bytes[1 + 2 * i] - b'0') as u16;
            let lo = (bytes[2 + 2 * i] - b'0') as u16;
            *slot = hi * 10 + lo;
        }

        Ok(ServerMessage::State {
            board: Board::from_slots(slots),
            turn,
        })
    }

    /// 编码为出站报文（测试里扮演服务器时使用）
    pub fn encode(&self) -> String {
        match self {
            ServerMessage::NameRequest => "N".to_string(),
            ServerMessage::GameOver => "E".to_string(),
            ServerMessage::State { board, turn } => {
                let mut payload = String::with_capacity(STATE_PAYLOAD_LEN);
                payload.push(turn.to_digit());
                for &n in board.slots() {
                    payload.push_str(&format!("{:02}", n));
                }
                payload
            }
        }
    }
}

/// 代理发送给服务端的消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientMessage {
    /// 上报名字（握手）
    Name(String),
    /// 选择的坑（棋盘绝对索引 0-5 或 7-12）
    Move { pit: usize },
}

impl ClientMessage {
    /// 编码为出站报文
    ///
    /// 坑索引转换为服务器的编号体系：双方都用 1-6，与阵营无关。
    pub fn encode(&self) -> String {
        match self {
            ClientMessage::Name(name) => name.clone(),
            ClientMessage::Move { pit } => ((pit + 1) % (PITS_PER_SIDE + 1)).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_signals() {
        assert_eq!(ServerMessage::decode("N").unwrap(), ServerMessage::NameRequest);
        assert_eq!(ServerMessage::decode("E").unwrap(), ServerMessage::GameOver);
    }

    #[test]
    fn test_decode_state() {
        let payload = "10404040404040004040404040400";
        let msg = ServerMessage::decode(payload).unwrap();
        assert_eq!(
            msg,
            ServerMessage::State {
                board: Board::initial(),
                turn: Side::One,
            }
        );
    }

    #[test]
    fn test_state_roundtrip() {
        let board = Board::from_slots([0, 12, 4, 0, 7, 4, 19, 4, 0, 4, 4, 1, 4, 3]);
        let msg = ServerMessage::State {
            board,
            turn: Side::Two,
        };
        let payload = msg.encode();
        assert_eq!(payload.len(), STATE_PAYLOAD_LEN);
        assert!(payload.starts_with('2'));
        assert_eq!(ServerMessage::decode(&payload).unwrap(), msg);
    }

    #[test]
    fn test_decode_malformed() {
        // 长度错误
        assert!(matches!(
            ServerMessage::decode("10404"),
            Err(ProtocolError::Malformed { .. })
        ));
        // 非数字字符
        assert!(matches!(
            ServerMessage::decode("1x404040404040004040404040400"),
            Err(ProtocolError::Malformed { .. })
        ));
        // 回合位不是 1/2
        assert!(matches!(
            ServerMessage::decode("30404040404040004040404040400"),
            Err(ProtocolError::Malformed { .. })
        ));
        // 空报文
        assert!(matches!(
            ServerMessage::decode(""),
            Err(ProtocolError::Malformed { .. })
        ));
    }

    #[test]
    fn test_encode_name() {
        let msg = ClientMessage::Name("mancala_bot".to_string());
        assert_eq!(msg.encode(), "mancala_bot");
    }

    #[test]
    fn test_encode_move_both_sides() {
        // 双方的坑都映射到服务器的 1-6 编号
        assert_eq!(ClientMessage::Move { pit: 0 }.encode(), "1");
        assert_eq!(ClientMessage::Move { pit: 5 }.encode(), "6");
        assert_eq!(ClientMessage::Move { pit: 7 }.encode(), "1");
        assert_eq!(ClientMessage::Move { pit: 12 }.encode(), "6");
    }
}
