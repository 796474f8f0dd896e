//! The subset of the Erlang external term format the port protocol uses:
//! the version marker, binaries, atoms, small tuples and proper lists.
//!
//! Every message body crossing the control or event stream is a sequence
//! of these terms behind a one-byte tag. The encoder and decoder each own
//! an explicit cursor, so no state leaks between messages.

mod decode;
mod encode;

pub use decode::Decoder;
pub use encode::Encoder;

/// Version marker preceding every encoded term sequence.
pub const VERSION_MAGIC: u8 = 131;

pub(crate) const ATOM_EXT: u8 = 100;
pub(crate) const SMALL_TUPLE_EXT: u8 = 104;
pub(crate) const NIL_EXT: u8 = 106;
pub(crate) const LIST_EXT: u8 = 108;
pub(crate) const BINARY_EXT: u8 = 109;
pub(crate) const ATOM_UTF8_EXT: u8 = 118;
pub(crate) const SMALL_ATOM_UTF8_EXT: u8 = 119;

/// Erlang atoms are capped at 255 characters.
pub(crate) const MAX_ATOM_LEN: usize = 255;

#[derive(Debug, thiserror::Error)]
pub enum EtfError {
    #[error("Truncated term: {needed} more byte(s) needed")]
    Truncated { needed: usize },
    #[error("Bad version marker: {0}")]
    BadVersion(u8),
    #[error("Expected {expected}, got term tag {found}")]
    UnexpectedTerm { expected: &'static str, found: u8 },
}
