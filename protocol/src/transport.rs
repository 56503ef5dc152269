//! 传输层抽象
//!
//! 提供 Connector/Connection traits 使上层与具体传输实现解耦。
//! 与服务器之间是单条持久的字节流连接，报文为裸 ASCII 文本，
//! 没有帧头：报文边界由首字符决定（单字符信号或定长局面串），
//! 读取器自带缓冲，粘在一起或被拆开的报文都能正确切分。

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::constants::{CONNECT_TIMEOUT, READ_BUF_SIZE, STATE_PAYLOAD_LEN};
use crate::error::{ProtocolError, Result};

/// 连接抽象 trait（核心抽象，用于业务层）
#[async_trait]
pub trait Connection: Send + Sync {
    /// 发送一条文本报文
    async fn send_text(&mut self, payload: &str) -> Result<()>;

    /// 接收一条文本报文（阻塞直到有数据或连接关闭）
    async fn recv_text(&mut self) -> Result<String>;

    /// 获取远端地址
    fn peer_addr(&self) -> Option<String>;
}

/// 连接器 trait（客户端使用）
#[async_trait]
pub trait Connector: Send + Sync {
    type Conn: Connection;

    /// 建立连接
    async fn connect(&self, addr: &str) -> Result<Self::Conn>;
}

// ============================================================================
// TCP 实现
// ============================================================================

/// TCP 连接器
pub struct TcpConnector;

#[async_trait]
impl Connector for TcpConnector {
    type Conn = TcpConnection;

    async fn connect(&self, addr: &str) -> Result<Self::Conn> {
        let stream = timeout(CONNECT_TIMEOUT, TcpStream::connect(addr))
            .await
            .map_err(|_| ProtocolError::ConnectionTimeout)?
            .map_err(ProtocolError::Io)?;

        stream.set_nodelay(true)?;
        tracing::debug!("connected to {}", addr);

        let peer_addr = stream.peer_addr().ok().map(|a| a.to_string());
        let (read_half, write_half) = stream.into_split();

        Ok(TcpConnection {
            reader: PayloadReader::new(read_half),
            writer: PayloadWriter::new(write_half),
            peer_addr,
        })
    }
}

/// TCP 连接
pub struct TcpConnection {
    reader: PayloadReader<OwnedReadHalf>,
    writer: PayloadWriter<OwnedWriteHalf>,
    peer_addr: Option<String>,
}

impl TcpConnection {
    /// 分离读写端（代理把读端交给后台读取任务）
    pub fn into_split(self) -> (PayloadReader<OwnedReadHalf>, PayloadWriter<OwnedWriteHalf>) {
        (self.reader, self.writer)
    }
}

#[async_trait]
impl Connection for TcpConnection {
    async fn send_text(&mut self, payload: &str) -> Result<()> {
        self.writer.write_payload(payload).await
    }

    async fn recv_text(&mut self) -> Result<String> {
        self.reader.read_payload().await
    }

    fn peer_addr(&self) -> Option<String> {
        self.peer_addr.clone()
    }
}

// ============================================================================
// 报文读写
// ============================================================================

/// 报文读取器
pub struct PayloadReader<R> {
    reader: R,
    /// 已收到但还未切分成报文的字节
    buffer: Vec<u8>,
}

impl<R: tokio::io::AsyncRead + Unpin + Send> PayloadReader<R> {
    /// 创建新的报文读取器
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::with_capacity(READ_BUF_SIZE),
        }
    }

    /// 读取一条报文
    ///
    /// 报文长度由首字符决定：`N`/`E` 是单字符信号，回合数字开头的是
    /// 定长局面串。同一次 `read` 里粘连的多条报文会被逐条返回，
    /// 跨多次 `read` 的局面串会先缓冲攒齐。其他首字符逐字节返回，
    /// 交给上层按格式错误丢弃。读到 0 字节表示连接被对端关闭。
    pub async fn read_payload(&mut self) -> Result<String> {
        loop {
            if let Some(payload) = self.take_payload() {
                return Ok(payload);
            }

            let mut chunk = [0u8; READ_BUF_SIZE];
            let n = self.reader.read(&mut chunk).await?;
            if n == 0 {
                return Err(ProtocolError::ConnectionClosed);
            }
            self.buffer.extend_from_slice(&chunk[..n]);
        }
    }

    /// 从缓冲里切出最前面的一条完整报文，不够一条时返回 `None`
    fn take_payload(&mut self) -> Option<String> {
        let len = match *self.buffer.first()? {
            b'N' | b'E' => 1,
            b'1' | b'2' => STATE_PAYLOAD_LEN,
            // 无法识别的首字节单独切出，让解码报格式错误
            _ => 1,
        };
        if self.buffer.len() < len {
            return None;
        }
        let payload: Vec<u8> = self.buffer.drain(..len).collect();
        Some(String::from_utf8_lossy(&payload).into_owned())
    }
}

/// 报文写入器
pub struct PayloadWriter<W> {
    writer: W,
}

impl<W: tokio::io::AsyncWrite + Unpin + Send> PayloadWriter<W> {
    /// 创建新的报文写入器
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// 写入一条报文
    pub async fn write_payload(&mut self, payload: &str) -> Result<()> {
        self.writer.write_all(payload.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{ClientMessage, ServerMessage};

    #[tokio::test]
    async fn test_tcp_connection() {
        // 启动监听
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        // 客户端连接并完成一次握手往返
        let client_handle = tokio::spawn(async move {
            let connector = TcpConnector;
            let mut conn = connector.connect(&addr).await.unwrap();

            let payload = conn.recv_text().await.unwrap();
            assert_eq!(ServerMessage::decode(&payload).unwrap(), ServerMessage::NameRequest);

            conn.send_text(&ClientMessage::Name("test_bot".to_string()).encode())
                .await
                .unwrap();
        });

        // 服务端接受连接，请求名字
        let (stream, _addr) = listener.accept().await.unwrap();
        let (mut read_half, mut write_half) = stream.into_split();
        write_half.write_all(b"N").await.unwrap();

        let mut buf = [0u8; 64];
        let n = read_half.read(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], b"test_bot");

        client_handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_coalesced_payloads_split_correctly() {
        // 一次写入里粘着信号和局面串，读取端要逐条切开
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let state = ServerMessage::State {
            board: crate::Board::initial(),
            turn: crate::Side::One,
        };
        let state_payload = state.encode();

        let combined = format!("N{}E", state_payload);
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            stream.write_all(combined.as_bytes()).await.unwrap();
        });

        let mut conn = TcpConnector.connect(&addr).await.unwrap();
        assert_eq!(conn.recv_text().await.unwrap(), "N");
        assert_eq!(conn.recv_text().await.unwrap(), state_payload);
        assert_eq!(conn.recv_text().await.unwrap(), "E");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_split_state_payload_is_reassembled() {
        // 局面串被拆成两段到达，读取端先缓冲攒齐再返回
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let state = ServerMessage::State {
            board: crate::Board::initial(),
            turn: crate::Side::Two,
        };
        let state_payload = state.encode();
        let (head, tail) = state_payload.split_at(10);
        let (head, tail) = (head.to_string(), tail.to_string());

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            stream.write_all(head.as_bytes()).await.unwrap();
            stream.flush().await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            stream.write_all(tail.as_bytes()).await.unwrap();
        });

        let mut conn = TcpConnector.connect(&addr).await.unwrap();
        assert_eq!(conn.recv_text().await.unwrap(), state_payload);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_recv_on_closed_connection() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let connector = TcpConnector;
        let connect = tokio::spawn(async move { connector.connect(&addr).await });

        let (stream, _addr) = listener.accept().await.unwrap();
        drop(stream); // 服务端立即断开

        let mut conn = connect.await.unwrap().unwrap();
        assert!(matches!(
            conn.recv_text().await,
            Err(ProtocolError::ConnectionClosed)
        ));
    }
}
