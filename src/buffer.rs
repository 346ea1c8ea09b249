/// Receive buffer for one UDP datagram, sized to the classic 512 byte
/// message limit. Remembers how much of it the last datagram filled so
/// the frame handed downstream carries no trailing zeroes.
pub struct PacketBuffer {
    buf: [u8; 512],
    len: usize,
}

impl PacketBuffer {
    pub fn new() -> Self {
        PacketBuffer {
            buf: [0u8; 512],
            len: 0,
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    pub fn set_len(&mut self, len: usize) {
        self.len = len.min(self.buf.len());
    }

    pub fn frame(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}
