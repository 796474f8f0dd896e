//! hidraw ioctl plumbing: descriptor size, descriptor bytes, device name.
//!
//! Failures here never propagate. The descriptor reply must go out even
//! when the kernel queries degrade, so both helpers log and fall back to
//! whatever bytes they have.

use std::os::fd::{AsRawFd, BorrowedFd};

use nix::{ioctl_read, ioctl_read_buf};

/// Kernel cap on a HID report descriptor.
pub(crate) const HID_MAX_DESCRIPTOR_SIZE: usize = 4096;

/// Capacity handed to the raw-name query.
const NAME_BUF_SIZE: usize = 256;

/// Mirror of the kernel's `struct hidraw_report_descriptor`.
#[repr(C)]
pub(crate) struct HidrawReportDescriptor {
    size: u32,
    value: [u8; HID_MAX_DESCRIPTOR_SIZE],
}

impl HidrawReportDescriptor {
    fn zeroed() -> Self {
        Self {
            size: 0,
            value: [0; HID_MAX_DESCRIPTOR_SIZE],
        }
    }
}

ioctl_read!(hidraw_descriptor_size, b'H', 0x01, libc::c_int);
ioctl_read!(hidraw_descriptor, b'H', 0x02, HidrawReportDescriptor);
ioctl_read_buf!(hidraw_raw_name, b'H', 0x04, u8);

/// Fetch the report descriptor, best effort. A failed size query yields
/// an empty descriptor; a failed fetch yields zeroed bytes at the size
/// the kernel reported.
pub(crate) fn report_descriptor(fd: BorrowedFd<'_>) -> Vec<u8> {
    let mut size: libc::c_int = 0;
    if let Err(errno) = unsafe { hidraw_descriptor_size(fd.as_raw_fd(), &mut size) } {
        tracing::warn!(error = %errno, "report descriptor size query failed");
        size = 0;
    }
    let size = (size.max(0) as usize).min(HID_MAX_DESCRIPTOR_SIZE);
    if size == 0 {
        return Vec::new();
    }

    let mut desc = HidrawReportDescriptor::zeroed();
    desc.size = size as u32;
    if let Err(errno) = unsafe { hidraw_descriptor(fd.as_raw_fd(), &mut desc) } {
        tracing::warn!(error = %errno, "report descriptor fetch failed");
    }
    desc.value[..size].to_vec()
}

/// Product name as reported by the kernel, NUL padding stripped.
pub(crate) fn raw_name(fd: BorrowedFd<'_>) -> Option<String> {
    let mut buf = [0u8; NAME_BUF_SIZE];
    match unsafe { hidraw_raw_name(fd.as_raw_fd(), &mut buf) } {
        Ok(_) => {
            let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
            Some(String::from_utf8_lossy(&buf[..end]).into_owned())
        }
        Err(errno) => {
            tracing::debug!(error = %errno, "raw name query failed");
            None
        }
    }
}
