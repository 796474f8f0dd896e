//! The open hidraw device node and the kernel queries against it.

use std::io;
use std::path::PathBuf;

pub mod handle;
mod ioctl;

pub use handle::Handle;

#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("Cannot access {}: {source}; check permissions or run as root", .path.display())]
    Access { path: PathBuf, source: io::Error },
    #[error("Cannot open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("Device read: {0}")]
    Read(io::Error),
    #[error("Device write: {0}")]
    Write(io::Error),
}
