use super::{
    ATOM_EXT, BINARY_EXT, LIST_EXT, MAX_ATOM_LEN, NIL_EXT, SMALL_TUPLE_EXT, VERSION_MAGIC,
};

/// Append-only term writer. The cursor is the end of the owned buffer.
///
/// Encoding is infallible: every caller in this crate feeds it
/// structurally bounded input (reports up to 8 KiB, descriptors up to
/// 4 KiB, fixed atom names), and the per-term limits are asserted.
#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append one untyped byte. Used for the envelope tag, which sits in
    /// front of the version marker and is not a term.
    pub fn raw_byte(&mut self, byte: u8) -> &mut Self {
        self.buf.push(byte);
        self
    }

    /// Append the version marker that starts every term sequence.
    pub fn version(&mut self) -> &mut Self {
        self.buf.push(VERSION_MAGIC);
        self
    }

    /// Append a binary (`BINARY_EXT`).
    pub fn binary(&mut self, bytes: &[u8]) -> &mut Self {
        debug_assert!(bytes.len() <= u32::MAX as usize);
        self.buf.push(BINARY_EXT);
        self.buf.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Append an atom (`ATOM_EXT`, the encoding the erl_interface family
    /// emits; names here are short ASCII constants).
    pub fn atom(&mut self, name: &str) -> &mut Self {
        debug_assert!(name.len() <= MAX_ATOM_LEN);
        self.buf.push(ATOM_EXT);
        self.buf.extend_from_slice(&(name.len() as u16).to_be_bytes());
        self.buf.extend_from_slice(name.as_bytes());
        self
    }

    /// Append a tuple header; the next `arity` terms are the elements.
    pub fn tuple_header(&mut self, arity: u8) -> &mut Self {
        self.buf.push(SMALL_TUPLE_EXT);
        self.buf.push(arity);
        self
    }

    /// Append a list header; the next `len` terms are the elements and
    /// the caller closes the list with [`Encoder::empty_list`] as the
    /// tail. A zero-length list is just the empty-list term.
    pub fn list_header(&mut self, len: usize) -> &mut Self {
        debug_assert!(len > 0 && len <= u32::MAX as usize);
        self.buf.push(LIST_EXT);
        self.buf.extend_from_slice(&(len as u32).to_be_bytes());
        self
    }

    /// Append the empty list (`NIL_EXT`): an empty list value, or the
    /// tail closing a proper list.
    pub fn empty_list(&mut self) -> &mut Self {
        self.buf.push(NIL_EXT);
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
