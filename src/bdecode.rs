use std::io::{BufRead, BufReader, Read};

use linked_hash_map::LinkedHashMap;
use tracing::{debug, trace};

use crate::bytestring::ByteString;
use crate::config::DecoderConfig;
use crate::cursor::Cursor;
use crate::error::{DecodingError, SyntaxError};
use crate::value::Value;

type Result<T> = std::result::Result<T, DecodingError>;

// Longest integer literal buffered before giving up on finding the 'e'.
const MAX_INTEGER_LITERAL: usize = 64;

/// Recursive-descent decoder over a buffered byte source.
///
/// Each call to [`BDecoder::decode`] consumes exactly one value and leaves the
/// source positioned on the byte that follows it.
pub struct BDecoder<R> {
    cursor: Cursor<R>,
    config: DecoderConfig,
}

impl<R: BufRead> BDecoder<R> {
    pub fn new(reader: R) -> BDecoder<R> {
        BDecoder::with_config(reader, DecoderConfig::default())
    }

    pub fn with_config(reader: R, config: DecoderConfig) -> BDecoder<R> {
        BDecoder { cursor: Cursor::new(reader), config }
    }

    pub fn decode(&mut self) -> Result<Value> {
        let start = self.cursor.position();
        match self.parse_type(0) {
            Ok(value) => {
                debug!(
                    kind = value.type_name(),
                    consumed = self.cursor.position() - start,
                    "decoded value"
                );
                Ok(value)
            }
            Err(err) => {
                debug!(error = %err, "decode failed");
                Err(err)
            }
        }
    }

    /// True once the source has no bytes left.
    pub fn is_at_end(&mut self) -> Result<bool> {
        Ok(self.cursor.try_peek()?.is_none())
    }

    /// Bytes consumed since the decoder was created.
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    pub fn into_inner(self) -> R {
        self.cursor.into_inner()
    }

    // `depth` is the number of containers enclosing the value about to be read.
    fn parse_type(&mut self, depth: usize) -> Result<Value> {
        match self.cursor.peek()? {
            b'0'..=b'9' => self.parse_str().map(Value::ByteString),
            b'i' => self.parse_int().map(Value::Integer),
            b'l' => self.parse_list(depth).map(Value::List),
            b'd' => self.parse_dict(depth).map(Value::Dictionary),
            other => Err(self.syntax(SyntaxError::UnrecognizedValueStart(other))),
        }
    }

    fn parse_str(&mut self) -> Result<ByteString> {
        let len = self.read_length()?;
        let bytes = self.cursor.read_exact_bytes(len)?;
        Ok(ByteString(bytes))
    }

    // Reads `<digits> ':'`, leaving the cursor on the first body byte.
    fn read_length(&mut self) -> Result<usize> {
        let start = self.cursor.position();
        let mut len: usize = 0;
        let mut digits = 0;
        loop {
            match self.cursor.advance()? {
                chr @ b'0'..=b'9' => {
                    len = len
                        .checked_mul(10)
                        .and_then(|l| l.checked_add((chr - b'0') as usize))
                        .ok_or_else(|| self.syntax_at(SyntaxError::LengthOverflow, start))?;
                    digits += 1;
                }
                b':' if digits > 0 => break,
                chr => {
                    self.cursor.pushback();
                    return Err(self.syntax(if digits == 0 {
                        SyntaxError::MissingLength
                    } else {
                        SyntaxError::ExpectedLengthSeparator(chr)
                    }));
                }
            }
        }
        // Only a leading zero can make the digit count exceed the value's width.
        if self.config.strict && digits > 1 && len.to_string().len() != digits {
            let literal = format!("{:0width$}", len, width = digits);
            return Err(self.syntax_at(SyntaxError::NonCanonicalLength(literal), start));
        }
        Ok(len)
    }

    fn parse_int(&mut self) -> Result<i64> {
        self.expect_char(b'i')?;
        let start = self.cursor.position();
        let mut literal = Vec::new();
        loop {
            match self.cursor.advance()? {
                b'e' => break,
                chr if literal.len() < MAX_INTEGER_LITERAL => literal.push(chr),
                _ => {
                    let literal = String::from_utf8_lossy(&literal).into_owned();
                    return Err(self.syntax_at(SyntaxError::InvalidInteger(literal), start));
                }
            }
        }
        let literal = String::from_utf8_lossy(&literal).into_owned();
        let value = match literal.parse::<i64>() {
            Ok(value) => value,
            Err(_) => return Err(self.syntax_at(SyntaxError::InvalidInteger(literal), start)),
        };
        if self.config.strict && !is_canonical_integer(&literal) {
            return Err(self.syntax_at(SyntaxError::NonCanonicalInteger(literal), start));
        }
        Ok(value)
    }

    fn parse_list(&mut self, depth: usize) -> Result<Vec<Value>> {
        let depth = self.enter(depth)?;
        self.expect_char(b'l')?;
        trace!(depth, position = self.cursor.position(), "list");
        let mut list = Vec::new();
        while self.cursor.peek()? != b'e' {
            list.push(self.parse_type(depth)?);
        }
        self.expect_char(b'e')?;
        Ok(list)
    }

    fn parse_dict(&mut self, depth: usize) -> Result<LinkedHashMap<ByteString, Value>> {
        let depth = self.enter(depth)?;
        self.expect_char(b'd')?;
        trace!(depth, position = self.cursor.position(), "dictionary");
        let mut dict: LinkedHashMap<ByteString, Value> = LinkedHashMap::new();
        loop {
            match self.cursor.peek()? {
                b'e' => break,
                b'0'..=b'9' => {}
                _ => return Err(self.syntax(SyntaxError::KeyNotByteString)),
            }
            let key_start = self.cursor.position();
            let key = self.parse_str()?;
            if self.config.strict {
                let previous = dict.keys().next_back();
                self.check_key_order(previous, &key, key_start)?;
            }
            if self.cursor.try_peek()? == Some(b'e') {
                return Err(self.syntax(SyntaxError::KeyWithoutValue(key)));
            }
            let value = self.parse_type(depth)?;
            dict.insert(key, value);
        }
        self.expect_char(b'e')?;
        Ok(dict)
    }

    fn check_key_order(&self, previous: Option<&ByteString>, key: &ByteString, at: u64) -> Result<()> {
        match previous {
            Some(prev) if key == prev => {
                Err(self.syntax_at(SyntaxError::DuplicateKey(key.clone()), at))
            }
            Some(prev) if key < prev => {
                Err(self.syntax_at(SyntaxError::UnsortedKeys(key.clone()), at))
            }
            _ => Ok(()),
        }
    }

    // Opens one more container level, failing before any byte of it is consumed.
    fn enter(&self, depth: usize) -> Result<usize> {
        let depth = depth + 1;
        if depth > self.config.max_depth {
            return Err(DecodingError::NestingTooDeep {
                limit: self.config.max_depth,
                position: self.cursor.position(),
            });
        }
        Ok(depth)
    }

    fn expect_char(&mut self, expected: u8) -> Result<u8> {
        match self.cursor.peek()? {
            chr if chr == expected => self.cursor.advance(),
            _ => Err(self.syntax(SyntaxError::MissingIdentifier(expected))),
        }
    }

    fn syntax(&self, kind: SyntaxError) -> DecodingError {
        self.syntax_at(kind, self.cursor.position())
    }

    fn syntax_at(&self, kind: SyntaxError, position: u64) -> DecodingError {
        DecodingError::Syntax { kind, position }
    }
}

// "0", or an optional '-' followed by digits without a leading zero.
fn is_canonical_integer(literal: &str) -> bool {
    let negative = literal.starts_with('-');
    let digits = literal.strip_prefix('-').unwrap_or(literal);
    match digits.as_bytes() {
        [b'0'] => !negative,
        [first, ..] => (b'1'..=b'9').contains(first),
        [] => false,
    }
}

/// Decodes one value from `reader`.
///
/// The reader is buffered internally, so bytes past the end of the value may
/// be read from it. Use [`BDecoder`] directly to keep hold of the source.
pub fn decode<R: Read>(reader: R) -> Result<Value> {
    BDecoder::new(BufReader::new(reader)).decode()
}

pub fn decode_bytes(inp: &[u8]) -> Result<Value> {
    BDecoder::new(inp).decode()
}

pub fn decode_bytes_with(inp: &[u8], config: DecoderConfig) -> Result<Value> {
    BDecoder::with_config(inp, config).decode()
}
