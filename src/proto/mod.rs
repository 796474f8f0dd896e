//! The port protocol spoken with the supervising parent: one-byte
//! message tags and the typed payloads behind them.

pub mod command;
pub mod event;

pub use command::Command;
pub use event::DeviceEntry;

use crate::etf::EtfError;

/// Largest HID report relayed in either direction.
pub const MAX_REPORT_SIZE: usize = 8192;

/// Descriptor traffic, both the request and the reply.
pub const TAG_DESCRIPTOR: u8 = b'd';
/// Inbound output report destined for the device.
pub const TAG_OUTPUT: u8 = b'o';
/// Outbound input report read from the device.
pub const TAG_INPUT_REPORT: u8 = b'i';
/// Outbound error tuple.
pub const TAG_ERROR: u8 = b'e';
/// Outbound enumeration listing.
pub const TAG_DEVICE_LIST: u8 = b'l';

#[derive(Debug, thiserror::Error)]
pub enum ProtoError {
    #[error("Empty command frame")]
    EmptyFrame,
    #[error("Term decode: {0}")]
    Term(#[from] EtfError),
    #[error("Oversized output report: {0} bytes")]
    ReportTooLarge(usize),
}
