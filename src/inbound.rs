use crate::buffer::PacketBuffer;
use crate::correlator::Correlator;
use crate::error::TransportError;
use async_trait::async_trait;
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::net::UdpSocket;

/// Transport seam for the inbound pipeline. An implementation yields one
/// de-framed message per call, with all transport envelope (source
/// address, length prefix) already stripped. It holds no DNS state.
#[async_trait]
pub trait FrameSource {
    async fn next_frame(&mut self) -> io::Result<Vec<u8>>;
}

/// UDP framing: one datagram is one message; the source address is
/// dropped, correlation happens by transaction id alone.
pub struct UdpFrameSource {
    socket: Arc<UdpSocket>,
}

impl UdpFrameSource {
    pub fn new(socket: Arc<UdpSocket>) -> Self {
        UdpFrameSource { socket }
    }
}

#[async_trait]
impl FrameSource for UdpFrameSource {
    async fn next_frame(&mut self) -> io::Result<Vec<u8>> {
        let mut buffer = PacketBuffer::new();
        let (len, _src) = self.socket.recv_from(buffer.as_mut_slice()).await?;
        buffer.set_len(len);
        Ok(buffer.frame().to_vec())
    }
}

/// Stream framing: each message is preceded by a two byte big-endian
/// length, the way DNS rides over TCP.
pub struct StreamFrameSource<R> {
    stream: R,
}

impl<R: AsyncRead + Unpin + Send> StreamFrameSource<R> {
    pub fn new(stream: R) -> Self {
        StreamFrameSource { stream }
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> FrameSource for StreamFrameSource<R> {
    async fn next_frame(&mut self) -> io::Result<Vec<u8>> {
        let mut prefix = [0u8; 2];
        self.stream.read_exact(&mut prefix).await?;
        let mut frame = vec![0u8; u16::from_be_bytes(prefix) as usize];
        self.stream.read_exact(&mut frame).await?;
        Ok(frame)
    }
}

/// Pumps frames from the source into the correlator until the transport
/// dies, then fails every query still pending and returns. Spawn this on
/// the runtime next to the send path that shares the table.
pub async fn run_inbound<S>(mut source: S, correlator: Arc<Correlator>)
where
    S: FrameSource + Send,
{
    loop {
        match source.next_frame().await {
            Ok(frame) => correlator.handle_frame(frame.as_slice()),
            Err(error) => {
                correlator.fail_all(TransportError::from(error));
                return;
            }
        }
    }
}
