use linked_hash_map::LinkedHashMap;

use crate::bytestring::ByteString;

/// A decoded bencode value.
///
/// Dictionaries keep their keys in the order they appeared in the input.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Value {
    ByteString(ByteString),
    Integer(i64),
    List(Vec<Value>),
    Dictionary(LinkedHashMap<ByteString, Value>),
}

impl Value {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::ByteString(bs) => Some(bs.as_bytes()),
            _ => None,
        }
    }

    /// The byte string as text, if it is one and is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::ByteString(bs) => bs.as_str(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&LinkedHashMap<ByteString, Value>> {
        match self {
            Value::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Looks up `key` if this is a dictionary.
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict().and_then(|dict| dict.get(key))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::ByteString(_) => "byte string",
            Value::Integer(_) => "integer",
            Value::List(_) => "list",
            Value::Dictionary(_) => "dictionary",
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::ByteString(s.into())
    }
}

impl From<ByteString> for Value {
    fn from(bs: ByteString) -> Self {
        Value::ByteString(bs)
    }
}

impl From<Vec<Value>> for Value {
    fn from(list: Vec<Value>) -> Self {
        Value::List(list)
    }
}
