use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::{AsFd, BorrowedFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use super::{ioctl, DeviceError};
use crate::fdio;

/// An open hidraw device node. Read-write, non-blocking, owned for the
/// life of the process.
#[derive(Debug)]
pub struct Handle {
    file: File,
}

impl Handle {
    /// Open the device node at `path`. Permission failures for an
    /// unprivileged user get their own error so the operator sees the
    /// likely fix.
    pub fn open(path: &Path) -> Result<Self, DeviceError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)
            .map_err(|source| {
                if source.kind() == io::ErrorKind::PermissionDenied
                    && !nix::unistd::Uid::current().is_root()
                {
                    DeviceError::Access {
                        path: path.to_owned(),
                        source,
                    }
                } else {
                    DeviceError::Open {
                        path: path.to_owned(),
                        source,
                    }
                }
            })?;
        Ok(Self { file })
    }

    /// One read(2) into `buf`. Returns the report length; 0 means the
    /// device signaled readiness with nothing to deliver.
    pub fn read_report(&self, buf: &mut [u8]) -> Result<usize, DeviceError> {
        fdio::read_fd(self.file.as_fd(), buf).map_err(DeviceError::Read)
    }

    /// Write one output report, draining short writes until it is out.
    pub fn write_report(&self, report: &[u8]) -> Result<(), DeviceError> {
        let fd = self.file.as_fd();
        fdio::write_all_retrying(|chunk| fdio::write_fd(fd, chunk), report)
            .map_err(DeviceError::Write)
    }

    /// Report descriptor bytes, possibly empty or zero-filled when the
    /// kernel queries fail.
    pub fn report_descriptor(&self) -> Vec<u8> {
        ioctl::report_descriptor(self.file.as_fd())
    }

    /// Product name as reported by the kernel.
    pub fn name(&self) -> Option<String> {
        ioctl::raw_name(self.file.as_fd())
    }
}

impl From<File> for Handle {
    fn from(file: File) -> Self {
        Self { file }
    }
}

impl AsFd for Handle {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.file.as_fd()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::MAX_REPORT_SIZE;

    #[test]
    fn test_open_missing_node_fails() {
        let err = Handle::open(Path::new("/nonexistent/hidraw99")).unwrap_err();
        assert!(matches!(err, DeviceError::Open { .. }));
    }

    #[test]
    fn test_write_report_lands_verbatim() {
        let (rx, tx) = nix::unistd::pipe().unwrap();
        let handle = Handle::from(File::from(tx));
        handle.write_report(&[0x01, 0x02, 0x03, 0x04]).unwrap();

        let mut buf = [0u8; 16];
        let n = fdio::read_fd(rx.as_fd(), &mut buf).unwrap();
        assert_eq!(&buf[..n], &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_read_report_returns_exact_bytes() {
        let (rx, tx) = nix::unistd::pipe().unwrap();
        fdio::write_fd(tx.as_fd(), &[9, 8, 7]).unwrap();

        let handle = Handle::from(File::from(rx));
        let mut buf = vec![0u8; MAX_REPORT_SIZE];
        let n = handle.read_report(&mut buf).unwrap();
        assert_eq!(&buf[..n], &[9, 8, 7]);
    }

    #[test]
    fn test_kernel_queries_degrade_off_device() {
        let (rx, _tx) = nix::unistd::pipe().unwrap();
        let handle = Handle::from(File::from(rx));
        assert!(handle.report_descriptor().is_empty());
        assert!(handle.name().is_none());
    }
}
