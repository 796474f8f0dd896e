use super::{ProtoError, MAX_REPORT_SIZE, TAG_DESCRIPTOR, TAG_OUTPUT};
use crate::etf::Decoder;

/// One decoded parent command.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Fetch the report descriptor and reply with it.
    DescriptorRequest,
    /// Write an output report to the device. No reply is expected.
    Output(Vec<u8>),
    /// A tag this bridge does not implement. The dispatcher ignores
    /// these so newer parents keep working against older bridges.
    Unknown(u8),
}

impl Command {
    /// Decode one frame body: the tag byte, then the version marker and
    /// the tag-specific terms. Descriptor requests carry no payload, so
    /// anything after their tag is ignored.
    pub fn decode(body: &[u8]) -> Result<Self, ProtoError> {
        let mut dec = Decoder::new(body);
        let tag = dec.raw_byte().map_err(|_| ProtoError::EmptyFrame)?;
        match tag {
            TAG_DESCRIPTOR => Ok(Command::DescriptorRequest),
            TAG_OUTPUT => {
                dec.version()?;
                let report = dec.binary()?;
                if report.len() > MAX_REPORT_SIZE {
                    return Err(ProtoError::ReportTooLarge(report.len()));
                }
                Ok(Command::Output(report.to_vec()))
            }
            other => Ok(Command::Unknown(other)),
        }
    }
}
