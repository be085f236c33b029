//! Memory trace reader.
//!
//! A trace is line-oriented text, one access per line:
//!
//! ```text
//! # op  address
//! 0 7fff1a20
//! 1 0x0040_1000
//! ```
//!
//! `op` is `0` for a read and `1` for a write; the address is hexadecimal,
//! with an optional `0x` prefix and `_` separators. Blank lines and lines
//! starting with `#` are skipped. Records are produced lazily, so the length
//! of the trace is never needed up front.

use std::io::BufRead;
use std::str;

use crate::common::error::TraceError;
use crate::common::{AccessType, PhysAddr};

/// One parsed trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// 1-based source line.
    pub line: usize,
    /// Read or write.
    pub op: AccessType,
    /// Accessed address.
    pub addr: PhysAddr,
}

impl TraceRecord {
    /// Parses a single trace line.
    ///
    /// # Arguments
    ///
    /// * `line` - 1-based line number, used in error messages.
    /// * `text` - The line, with or without its trailing newline.
    /// * `address_bits` - Width the address must fit in.
    ///
    /// # Returns
    ///
    /// `Ok(None)` for blank and comment lines.
    ///
    /// # Errors
    ///
    /// A [`TraceError`] describing the first malformed field.
    pub fn parse(line: usize, text: &str, address_bits: u32) -> Result<Option<Self>, TraceError> {
        let text = text.trim();
        if text.is_empty() || text.starts_with('#') {
            return Ok(None);
        }

        let mut fields = text.split_whitespace();
        let op_token = fields.next().unwrap_or_default();
        let op = Some(op_token)
            .filter(|t| t.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|t| t.parse::<u64>().ok())
            .and_then(AccessType::from_code)
            .ok_or_else(|| TraceError::UnknownOperation {
                line,
                token: op_token.to_string(),
            })?;

        let addr_token = fields.next().ok_or(TraceError::MissingField { line })?;
        if fields.next().is_some() {
            return Err(TraceError::TrailingField { line });
        }
        let address = parse_hex(addr_token).ok_or_else(|| TraceError::BadAddress {
            line,
            token: addr_token.to_string(),
        })?;

        let addr = PhysAddr::new(address);
        if !addr.fits(address_bits) {
            return Err(TraceError::AddressOutOfRange {
                line,
                address,
                bits: address_bits,
            });
        }

        Ok(Some(Self { line, op, addr }))
    }
}

fn parse_hex(token: &str) -> Option<u64> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    let digits = digits.replace('_', "");
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(&digits, 16).ok()
}

/// Streams [`TraceRecord`]s from any buffered reader.
///
/// Yields `Err` for malformed lines, including lines that are not UTF-8, and
/// keeps going on the next call; a read failure yields [`TraceError::Io`] and
/// ends the stream.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    address_bits: u32,
    line: usize,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps `reader`; addresses must fit in `address_bits`.
    pub const fn new(reader: R, address_bits: u32) -> Self {
        Self {
            reader,
            address_bits,
            line: 0,
            buf: Vec::new(),
            done: false,
        }
    }

    /// Number of lines consumed so far.
    pub const fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line += 1;
                    let Ok(text) = str::from_utf8(&self.buf) else {
                        return Some(Err(TraceError::InvalidEncoding { line: self.line }));
                    };
                    match TraceRecord::parse(self.line, text, self.address_bits) {
                        Ok(None) => {}
                        Ok(Some(record)) => return Some(Ok(record)),
                        Err(e) => return Some(Err(e)),
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(TraceError::Io(e)));
                }
            }
        }
        None
    }
}
