use std::collections::HashSet;
use std::ops::Range;

use crate::error::{Error, Result};
use crate::map::Dict;
use crate::value::Value;
use super::MAX_DEPTH;

// Recursive descent over a borrowed buffer. `pos` always points at the next unread byte,
// so it doubles as the offset reported in errors.
pub struct Decoder<'a> {
    buf:   &'a [u8],
    pos:   usize,
    depth: usize,
}

impl<'a> Decoder<'a> {

    pub fn new(buf: &'a [u8]) -> Self { Self { buf, pos: 0, depth: 0 } }

    pub fn position(&self) -> usize { self.pos }

    fn peek(&self) -> Result<u8> {
        self.buf
            .get(self.pos)
            .copied()
            .ok_or(Error::UnexpectedEof { offset: self.pos })
    }

    fn next_byte(&mut self) -> Result<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Ok(b)
    }

    fn expect(&mut self, token: u8, expected: &'static str) -> Result<()> {
        let offset = self.pos;
        match self.next_byte()? {
            b if b == token => Ok(()),
            b => Err(Error::InvalidToken { offset, expected, found: b as char }),
        }
    }

    // Consumes a (possibly empty) run of ASCII digits.
    fn read_digits(&mut self) -> &'a [u8] {
        let start = self.pos;
        while let Some(b'0'..=b'9') = self.buf.get(self.pos) {
            self.pos += 1;
        }
        &self.buf[start..self.pos]
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::NestingTooDeep { offset: self.pos, limit: MAX_DEPTH });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        // Closing 'e', already peeked by the caller.
        self.pos += 1;
        self.depth -= 1;
    }

    pub fn read_value(&mut self) -> Result<Value> {
        match self.peek()? {
            b'i' => self.read_int().map(Value::Integer),
            b'0'..=b'9' => self.read_bytes().map(|b| Value::ByteString(b.to_vec())),
            b'l' => self.read_list().map(Value::List),
            b'd' => self.read_dict_spanned().map(|(dict, _)| Value::Dictionary(dict)),
            b => Err(Error::InvalidToken {
                offset: self.pos,
                expected: "i, l, d or a digit",
                found: b as char,
            }),
        }
    }

    // An integer is encoded as i<integer encoded in base ten ASCII>e. Leading zeros are not allowed
    // (although the number zero is still represented as "0"). Negative zero is not permitted.
    fn read_int(&mut self) -> Result<i64> {
        self.expect(b'i', "i")?;

        let negative = self.buf.get(self.pos) == Some(&b'-');
        if negative {
            self.pos += 1;
        }

        let offset = self.pos;
        let digits = self.read_digits();
        match digits {
            [] => {
                let found = self.peek()?;
                return Err(Error::InvalidToken { offset, expected: "a digit", found: found as char });
            },
            [b'0', _, ..] => return Err(Error::InvalidInteger { offset, reason: "leading zero" }),
            [b'0'] if negative => return Err(Error::InvalidInteger { offset, reason: "negative zero" }),
            _ => {},
        }

        // Accumulate towards the sign so i64::MIN still fits.
        let mut int: i64 = 0;
        for d in digits {
            let d = i64::from(d - b'0');
            int = int
                .checked_mul(10)
                .and_then(|n| if negative { n.checked_sub(d) } else { n.checked_add(d) })
                .ok_or(Error::InvalidInteger { offset, reason: "out of range for a 64-bit integer" })?;
        }

        self.expect(b'e', "e to end the integer")?;
        Ok(int)
    }

    // A byte string is encoded as <length>:<contents>, the length in base ten without sign or
    // leading zeros.
    pub fn read_bytes(&mut self) -> Result<&'a [u8]> {
        let offset = self.pos;
        let digits = self.read_digits();
        let len = match digits {
            [] => {
                let found = self.peek()?;
                return Err(Error::InvalidToken { offset, expected: "a byte string length", found: found as char });
            },
            [b'0', _, ..] => return Err(Error::InvalidLength { offset, reason: "leading zero" }),
            _ => digits
                .iter()
                .try_fold(0usize, |acc, d| acc.checked_mul(10)?.checked_add(usize::from(d - b'0')))
                .ok_or(Error::InvalidLength { offset, reason: "too large" })?,
        };

        self.expect(b':', ": after the length")?;

        let available = self.buf.len() - self.pos;
        if len > available {
            return Err(Error::TruncatedByteString { offset: self.pos, expected: len, available });
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn read_list(&mut self) -> Result<Vec<Value>> {
        self.enter()?;
        self.expect(b'l', "l")?;

        let mut list = Vec::new();
        while self.peek()? != b'e' {
            list.push(self.read_value()?);
        }

        self.leave();
        Ok(list)
    }

    // Keys may arrive in any order, the order is recorded. Duplicates are rejected.
    pub fn read_dict_spanned(&mut self) -> Result<(Dict, Vec<Range<usize>>)> {
        self.enter()?;
        self.expect(b'd', "d")?;

        let mut dict = Dict::new();
        let mut spans = Vec::new();
        let mut seen = HashSet::new();

        while self.peek()? != b'e' {
            let offset = self.pos;
            let key = match self.peek()? {
                b'0'..=b'9' => self.read_bytes()?,
                b => return Err(Error::InvalidToken {
                    offset,
                    expected: "a byte string key",
                    found: b as char,
                }),
            };
            if !seen.insert(key) {
                return Err(Error::DuplicateKey {
                    offset,
                    key: String::from_utf8_lossy(key).into_owned(),
                });
            }

            let start = self.pos;
            let value = self.read_value()?;
            spans.push(start..self.pos);
            // Uniqueness already checked against `seen`.
            dict.push_unchecked(key.to_vec(), value);
        }

        self.leave();
        Ok((dict, spans))
    }
}
