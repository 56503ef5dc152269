//! 协议客户端
//!
//! 独占套接字：写端留在客户端手里，读端交给唯一的后台读取任务，
//! 解码后的消息经 mpsc 通道送回。`receive_with_deadline` 在通道上
//! 挂一个截止定时器，到期后无条件把控制权还给调用方；后台任务
//! 不会被取消，留在通道里的消息由下一次接收取走或随通道一起丢弃。

use std::time::Duration;

use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use protocol::{
    ClientMessage, Connector, PayloadWriter, ProtocolError, Result, ServerMessage, TcpConnector,
};

/// 入站消息通道容量
const CHANNEL_CAPACITY: usize = 16;

/// 协议客户端
pub struct ProtocolClient {
    writer: PayloadWriter<OwnedWriteHalf>,
    inbound: mpsc::Receiver<ServerMessage>,
    reader_task: JoinHandle<()>,
    timed_out_reads: u64,
}

impl ProtocolClient {
    /// 连接到服务器并启动后台读取任务
    pub async fn connect(addr: &str) -> Result<Self> {
        let conn = TcpConnector.connect(addr).await?;
        let (mut reader, writer) = conn.into_split();

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let reader_task = tokio::spawn(async move {
            loop {
                match reader.read_payload().await {
                    Ok(payload) => match ServerMessage::decode(&payload) {
                        Ok(msg) => {
                            if tx.send(msg).await.is_err() {
                                break; // 客户端已经丢弃了接收端
                            }
                        }
                        // 格式错误的报文忽略后继续等待（见 DESIGN.md）
                        Err(e) => warn!("ignoring malformed payload: {}", e),
                    },
                    Err(ProtocolError::ConnectionClosed) => {
                        debug!("server closed the connection");
                        break;
                    }
                    Err(e) => {
                        warn!("read failed: {}", e);
                        break;
                    }
                }
            }
        });

        Ok(Self {
            writer,
            inbound: rx,
            reader_task,
            timed_out_reads: 0,
        })
    }

    /// 在时限内等待下一条服务器消息
    ///
    /// 到期返回 `Ok(None)`，不会无限阻塞调用方；
    /// 读取任务结束且通道排空后返回 `ConnectionClosed`。
    pub async fn receive_with_deadline(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<ServerMessage>> {
        match tokio::time::timeout(timeout, self.inbound.recv()).await {
            Ok(Some(msg)) => Ok(Some(msg)),
            Ok(None) => Err(ProtocolError::ConnectionClosed),
            Err(_) => {
                self.timed_out_reads += 1;
                Ok(None)
            }
        }
    }

    /// 发送一条消息
    pub async fn send(&mut self, msg: &ClientMessage) -> Result<()> {
        self.writer.write_payload(&msg.encode()).await
    }

    /// 等待超时的次数（每次到期恰好加一）
    pub fn timed_out_reads(&self) -> u64 {
        self.timed_out_reads
    }
}

impl Drop for ProtocolClient {
    fn drop(&mut self) {
        self.reader_task.abort();
    }
}
