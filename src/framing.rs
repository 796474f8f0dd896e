//! Length-prefixed message framing over the control and event streams.
//!
//! Every message travels as `[2-byte big-endian length][body]`, where the
//! length counts the body bytes only. [`FrameReader`] reassembles frames
//! from arbitrary read boundaries; [`send`] emits one frame and drains it
//! fully before returning.

use std::io;
use std::os::fd::AsFd;

use crate::fdio;

/// Hard cap on one frame including its two-byte length prefix.
pub const MAX_FRAME_SIZE: usize = 65536;

/// Largest body a frame may carry.
pub const MAX_BODY_SIZE: usize = MAX_FRAME_SIZE - 2;

/// Bytes pulled off the stream per [`FrameReader::pump`] call.
const READ_CHUNK: usize = 8192;

#[derive(Debug, thiserror::Error)]
pub enum FramingError {
    #[error("Oversized inbound frame: {0} bytes")]
    Oversize(usize),
    #[error("Oversized outbound body: {0} bytes")]
    BodyTooLarge(usize),
    #[error("Frame read: {0}")]
    Read(io::Error),
    #[error("Frame write: {0}")]
    Write(io::Error),
}

/// Outcome of one [`FrameReader::pump`] call.
#[derive(Debug)]
pub enum Pump {
    /// Frame bodies completed by the bytes just read, oldest first.
    Frames(Vec<Vec<u8>>),
    /// The peer closed its end of the stream.
    Eof,
}

/// Incremental frame reassembler. Owns the bytes of any partially
/// received frame between reads.
#[derive(Debug, Default)]
pub struct FrameReader {
    buf: Vec<u8>,
}

impl FrameReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Perform exactly one read on `fd` and return the frames it
    /// completed. An interrupted read yields an empty batch so the
    /// caller can simply wait again.
    pub fn pump(&mut self, fd: impl AsFd) -> Result<Pump, FramingError> {
        let start = self.buf.len();
        self.buf.resize(start + READ_CHUNK, 0);
        let n = match fdio::read_fd(fd.as_fd(), &mut self.buf[start..]) {
            Ok(n) => n,
            Err(e) => {
                self.buf.truncate(start);
                if e.kind() == io::ErrorKind::Interrupted {
                    return Ok(Pump::Frames(Vec::new()));
                }
                return Err(FramingError::Read(e));
            }
        };
        self.buf.truncate(start + n);
        if n == 0 {
            return Ok(Pump::Eof);
        }
        self.drain_frames().map(Pump::Frames)
    }

    /// Append raw stream bytes and return the frames they completed.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<Vec<Vec<u8>>, FramingError> {
        self.buf.extend_from_slice(bytes);
        self.drain_frames()
    }

    fn drain_frames(&mut self) -> Result<Vec<Vec<u8>>, FramingError> {
        let mut frames = Vec::new();
        while self.buf.len() >= 2 {
            let body_len = u16::from_be_bytes([self.buf[0], self.buf[1]]) as usize;
            if body_len > MAX_BODY_SIZE {
                return Err(FramingError::Oversize(body_len));
            }
            if self.buf.len() < 2 + body_len {
                break;
            }
            let body = self.buf[2..2 + body_len].to_vec();
            self.buf.drain(..2 + body_len);
            frames.push(body);
        }
        Ok(frames)
    }
}

/// Write one frame to `fd`, draining short writes until the whole
/// prefix-plus-body has gone out.
pub fn send(fd: impl AsFd, body: &[u8]) -> Result<(), FramingError> {
    if body.len() > MAX_BODY_SIZE {
        return Err(FramingError::BodyTooLarge(body.len()));
    }
    let mut frame = Vec::with_capacity(2 + body.len());
    frame.extend_from_slice(&(body.len() as u16).to_be_bytes());
    frame.extend_from_slice(body);
    let fd = fd.as_fd();
    fdio::write_all_retrying(|chunk| fdio::write_fd(fd, chunk), &frame)
        .map_err(FramingError::Write)
}
