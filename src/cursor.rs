use std::io::{self, BufRead};

use crate::error::DecodingError;

type Result<T> = std::result::Result<T, DecodingError>;

// Byte-string bodies are read in chunks of at most this size, so a forged
// length prefix cannot force a huge allocation before the bytes exist.
const MAX_PREALLOC: usize = 64 * 1024;

/// One-byte lookahead over a buffered source, with one byte of pushback.
pub struct Cursor<R> {
    reader: R,
    last: Option<u8>,
    pushed_back: bool,
    position: u64,
}

impl<R: BufRead> Cursor<R> {
    pub fn new(reader: R) -> Cursor<R> {
        Cursor { reader, last: None, pushed_back: false, position: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn peek(&mut self) -> Result<u8> {
        self.try_peek()?.ok_or(DecodingError::EndOfInput { position: self.position })
    }

    /// Like `peek`, but end of input is `Ok(None)` instead of an error.
    pub fn try_peek(&mut self) -> Result<Option<u8>> {
        if self.pushed_back {
            return Ok(self.last);
        }
        Ok(self.fill_buf()?.first().cloned())
    }

    pub fn advance(&mut self) -> Result<u8> {
        if self.pushed_back {
            self.pushed_back = false;
            self.position += 1;
            return self.last.ok_or(DecodingError::EndOfInput { position: self.position });
        }
        let byte = self.peek()?;
        self.reader.consume(1);
        self.last = Some(byte);
        self.position += 1;
        Ok(byte)
    }

    /// Puts the last advanced byte back.
    ///
    /// # Panics
    ///
    /// If nothing has been advanced yet, or the last byte was already pushed back.
    pub fn pushback(&mut self) {
        assert!(
            self.last.is_some() && !self.pushed_back,
            "pushback without a preceding advance"
        );
        self.pushed_back = true;
        self.position -= 1;
    }

    /// Reads exactly `len` bytes verbatim.
    pub fn read_exact_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(len.min(MAX_PREALLOC));
        if len > 0 && self.pushed_back {
            out.push(self.advance()?);
        }
        while out.len() < len {
            let position = self.position;
            let available = self.fill_buf()?;
            if available.is_empty() {
                return Err(DecodingError::EndOfInput { position });
            }
            let take = available.len().min(len - out.len());
            out.extend_from_slice(&available[..take]);
            self.reader.consume(take);
            self.position += take as u64;
        }
        if let Some(&byte) = out.last() {
            self.last = Some(byte);
        }
        Ok(out)
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fill_buf(&mut self) -> Result<&[u8]> {
        loop {
            match self.reader.fill_buf() {
                Ok(_) => break,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(DecodingError::Io(err)),
            }
        }
        Ok(self.reader.fill_buf()?)
    }
}
