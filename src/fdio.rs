//! Raw descriptor I/O shared by the frame layer and the device handle.
//!
//! The bridge deliberately bypasses the std stream buffers: readiness
//! comes from poll(2), so every byte has to move through the descriptor
//! the kernel reported on, never through a userspace buffer poll cannot
//! see.

use std::io;
use std::os::fd::{AsRawFd, BorrowedFd};

/// One read(2). Returns the number of bytes read; 0 means end of stream.
pub(crate) fn read_fd(fd: BorrowedFd<'_>, buf: &mut [u8]) -> io::Result<usize> {
    let n = unsafe { libc::read(fd.as_raw_fd(), buf.as_mut_ptr() as *mut libc::c_void, buf.len()) };
    if n < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(n as usize)
    }
}

/// One write(2). Returns the number of bytes written.
pub(crate) fn write_fd(fd: BorrowedFd<'_>, buf: &[u8]) -> io::Result<usize> {
    let n = unsafe { libc::write(fd.as_raw_fd(), buf.as_ptr() as *const libc::c_void, buf.len()) };
    if n < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(n as usize)
    }
}

/// Drain `buf` through `write_some` until every byte is out.
///
/// A short write advances the offset and retries; `EINTR`, `EAGAIN` and
/// `EWOULDBLOCK` retry without advancing. Any other error aborts the
/// drain, as does a zero-byte write (the stream is not making progress).
pub(crate) fn write_all_retrying<F>(mut write_some: F, buf: &[u8]) -> io::Result<()>
where
    F: FnMut(&[u8]) -> io::Result<usize>,
{
    let mut written = 0;
    while written < buf.len() {
        match write_some(&buf[written..]) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "write made no progress",
                ))
            }
            Ok(n) => written += n,
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
                ) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
