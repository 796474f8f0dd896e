#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Device: {0}")]
    Device(#[from] crate::device::DeviceError),
    #[error("Framing: {0}")]
    Framing(#[from] crate::framing::FramingError),
    #[error("Protocol: {0}")]
    Proto(#[from] crate::proto::ProtoError),
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
