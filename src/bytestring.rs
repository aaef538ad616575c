use std::borrow::Borrow;
use std::fmt::Display;

// Raw bytes, no UTF-8 guarantee. Ordered by raw byte value.
#[derive(Debug, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ByteString(pub Vec<u8>);

impl ByteString {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

pub trait ToByteString {
    fn to_byte_string(&self) -> ByteString;
}

impl ToByteString for &str {
    fn to_byte_string(&self) -> ByteString {
        ByteString(self.as_bytes().to_vec())
    }
}

impl ToByteString for &[u8] {
    fn to_byte_string(&self) -> ByteString {
        ByteString(self.to_vec())
    }
}

impl From<&str> for ByteString {
    fn from(s: &str) -> Self {
        s.to_byte_string()
    }
}

impl From<&[u8]> for ByteString {
    fn from(bytes: &[u8]) -> Self {
        bytes.to_byte_string()
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(bytes: Vec<u8>) -> Self {
        ByteString(bytes)
    }
}

// Lets dictionaries be queried with a plain `&[u8]`.
impl Borrow<[u8]> for ByteString {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for ByteString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for ByteString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = String::from_utf8_lossy(&self.0);
        write!(f, "{}", s)
    }
}
