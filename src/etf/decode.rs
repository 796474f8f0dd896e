use super::{
    EtfError, ATOM_EXT, ATOM_UTF8_EXT, BINARY_EXT, LIST_EXT, NIL_EXT, SMALL_ATOM_UTF8_EXT,
    SMALL_TUPLE_EXT, VERSION_MAGIC,
};

/// Cursor-based term reader over one message body.
#[derive(Debug)]
pub struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], EtfError> {
        if self.remaining() < n {
            return Err(EtfError::Truncated {
                needed: n - self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn take_u8(&mut self) -> Result<u8, EtfError> {
        Ok(self.take(1)?[0])
    }

    /// Read one untyped byte (the envelope tag in front of the terms).
    pub fn raw_byte(&mut self) -> Result<u8, EtfError> {
        self.take_u8()
    }

    /// Consume the version marker.
    pub fn version(&mut self) -> Result<(), EtfError> {
        match self.take_u8()? {
            VERSION_MAGIC => Ok(()),
            other => Err(EtfError::BadVersion(other)),
        }
    }

    /// Consume a binary and return its bytes.
    pub fn binary(&mut self) -> Result<&'a [u8], EtfError> {
        match self.take_u8()? {
            BINARY_EXT => {
                let len = u32::from_be_bytes(self.take(4)?.try_into().unwrap()) as usize;
                self.take(len)
            }
            found => Err(EtfError::UnexpectedTerm {
                expected: "binary",
                found,
            }),
        }
    }

    /// Consume an atom. Accepts the latin-1 and both UTF-8 encodings so
    /// terms from any parent runtime vintage decode.
    pub fn atom(&mut self) -> Result<String, EtfError> {
        let len = match self.take_u8()? {
            ATOM_EXT | ATOM_UTF8_EXT => {
                u16::from_be_bytes(self.take(2)?.try_into().unwrap()) as usize
            }
            SMALL_ATOM_UTF8_EXT => self.take_u8()? as usize,
            found => {
                return Err(EtfError::UnexpectedTerm {
                    expected: "atom",
                    found,
                })
            }
        };
        Ok(String::from_utf8_lossy(self.take(len)?).into_owned())
    }

    /// Consume a tuple header and return its arity.
    pub fn tuple_header(&mut self) -> Result<usize, EtfError> {
        match self.take_u8()? {
            SMALL_TUPLE_EXT => Ok(self.take_u8()? as usize),
            found => Err(EtfError::UnexpectedTerm {
                expected: "tuple",
                found,
            }),
        }
    }

    /// Consume a list header and return the element count. The empty
    /// list decodes as zero elements; a non-empty list is followed by
    /// its elements and a [`Decoder::empty_list`] tail.
    pub fn list_header(&mut self) -> Result<usize, EtfError> {
        match self.take_u8()? {
            NIL_EXT => Ok(0),
            LIST_EXT => Ok(u32::from_be_bytes(self.take(4)?.try_into().unwrap()) as usize),
            found => Err(EtfError::UnexpectedTerm {
                expected: "list",
                found,
            }),
        }
    }

    /// Consume the empty-list term that closes a proper list.
    pub fn empty_list(&mut self) -> Result<(), EtfError> {
        match self.take_u8()? {
            NIL_EXT => Ok(()),
            found => Err(EtfError::UnexpectedTerm {
                expected: "empty list",
                found,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::Encoder;
    use super::*;

    #[test]
    fn test_binary_roundtrip() {
        let payload = [0u8, 1, 2, 0xFF, 0x80];
        let mut enc = Encoder::new();
        enc.version().binary(&payload);
        let bytes = enc.into_bytes();

        let mut dec = Decoder::new(&bytes);
        dec.version().unwrap();
        assert_eq!(dec.binary().unwrap(), &payload);
        assert_eq!(dec.remaining(), 0);
    }

    #[test]
    fn test_atom_pair_roundtrip() {
        let mut enc = Encoder::new();
        enc.version().tuple_header(2).atom("error").atom("closed");
        let bytes = enc.into_bytes();

        let mut dec = Decoder::new(&bytes);
        dec.version().unwrap();
        assert_eq!(dec.tuple_header().unwrap(), 2);
        assert_eq!(dec.atom().unwrap(), "error");
        assert_eq!(dec.atom().unwrap(), "closed");
        assert_eq!(dec.remaining(), 0);
    }

    #[test]
    fn test_accepts_small_utf8_atoms() {
        // SMALL_ATOM_UTF8_EXT, as a modern parent runtime encodes atoms.
        let bytes = [SMALL_ATOM_UTF8_EXT, 2, b'o', b'k'];
        let mut dec = Decoder::new(&bytes);
        assert_eq!(dec.atom().unwrap(), "ok");
    }

    #[test]
    fn test_list_roundtrip() {
        let mut enc = Encoder::new();
        enc.list_header(2).binary(b"a").binary(b"bc").empty_list();
        let bytes = enc.into_bytes();

        let mut dec = Decoder::new(&bytes);
        assert_eq!(dec.list_header().unwrap(), 2);
        assert_eq!(dec.binary().unwrap(), b"a");
        assert_eq!(dec.binary().unwrap(), b"bc");
        dec.empty_list().unwrap();
        assert_eq!(dec.remaining(), 0);
    }

    #[test]
    fn test_empty_list_decodes_as_zero_elements() {
        let mut enc = Encoder::new();
        enc.empty_list();
        let bytes = enc.into_bytes();
        assert_eq!(Decoder::new(&bytes).list_header().unwrap(), 0);
    }

    #[test]
    fn test_bad_version_is_reported() {
        let mut dec = Decoder::new(&[0x00]);
        assert!(matches!(dec.version(), Err(EtfError::BadVersion(0))));
    }

    #[test]
    fn test_truncated_binary_is_reported() {
        // Claims four bytes, carries one.
        let bytes = [BINARY_EXT, 0, 0, 0, 4, 0xAB];
        let mut dec = Decoder::new(&bytes);
        assert!(matches!(dec.binary(), Err(EtfError::Truncated { .. })));
    }

    #[test]
    fn test_wrong_term_tag_is_reported() {
        let bytes = [ATOM_EXT, 0, 2, b'h', b'i'];
        let mut dec = Decoder::new(&bytes);
        let err = dec.binary().unwrap_err();
        assert!(matches!(
            err,
            EtfError::UnexpectedTerm {
                expected: "binary",
                found: ATOM_EXT,
            }
        ));
    }
}
