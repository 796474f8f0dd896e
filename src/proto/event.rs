use super::{TAG_DESCRIPTOR, TAG_DEVICE_LIST, TAG_ERROR, TAG_INPUT_REPORT};
use crate::etf::Encoder;

/// One enumerated device node: its path and the product name the kernel
/// reports for it (empty when the name query fails).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEntry {
    pub path: String,
    pub name: String,
}

/// Input report relayed from the device.
pub fn input_report(report: &[u8]) -> Vec<u8> {
    binary_event(TAG_INPUT_REPORT, report)
}

/// Reply to a descriptor request.
pub fn descriptor_reply(descriptor: &[u8]) -> Vec<u8> {
    binary_event(TAG_DESCRIPTOR, descriptor)
}

fn binary_event(tag: u8, payload: &[u8]) -> Vec<u8> {
    // Tag, version marker and binary header in front of the payload.
    let mut enc = Encoder::with_capacity(payload.len() + 7);
    enc.raw_byte(tag).version().binary(payload);
    enc.into_bytes()
}

/// The `{error, closed}` tuple announcing the device vanished.
pub fn device_closed() -> Vec<u8> {
    let mut enc = Encoder::new();
    enc.raw_byte(TAG_ERROR)
        .version()
        .tuple_header(2)
        .atom("error")
        .atom("closed");
    enc.into_bytes()
}

/// Enumeration result: a proper list of `{path, name}` binary pairs in
/// the order given.
pub fn device_list(entries: &[DeviceEntry]) -> Vec<u8> {
    let mut enc = Encoder::new();
    enc.raw_byte(TAG_DEVICE_LIST).version();
    if entries.is_empty() {
        enc.empty_list();
        return enc.into_bytes();
    }
    enc.list_header(entries.len());
    for entry in entries {
        enc.tuple_header(2)
            .binary(entry.path.as_bytes())
            .binary(entry.name.as_bytes());
    }
    enc.empty_list();
    enc.into_bytes()
}
