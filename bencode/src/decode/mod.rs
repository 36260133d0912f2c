use std::ops::Range;

use crate::error::{Error, Result};
use crate::map::Dict;
use crate::value::Value;

mod decoder;

pub(crate) use decoder::Decoder;

// Deepest list/dictionary nesting the decoder will follow.
pub const MAX_DEPTH: usize = 64;

// Decodes one value from the start of `b`, returning it with the number of bytes consumed.
// Anything after the value is left untouched.
pub fn decode(b: &[u8]) -> Result<(Value, usize)> {
    let mut decoder = Decoder::new(b);
    let value = decoder.read_value()?;
    Ok((value, decoder.position()))
}

// Decodes exactly one value spanning the whole of `b`.
pub fn decode_all(b: &[u8]) -> Result<Value> {
    let (value, consumed) = decode(b)?;
    if consumed != b.len() {
        return Err(Error::TrailingData { offset: consumed });
    }
    Ok(value)
}

// Decodes a top level dictionary, keeping the source range of every value.
pub fn decode_dict_spanned(b: &[u8]) -> Result<SpannedDict<'_>> {
    let mut decoder = Decoder::new(b);
    let (dict, spans) = decoder.read_dict_spanned()?;
    Ok(SpannedDict {
        source: b,
        dict,
        spans,
        consumed: decoder.position(),
    })
}

// A decoded dictionary that still knows where each of its values came from.
#[derive(Debug)]
pub struct SpannedDict<'a> {
    source:   &'a [u8],
    dict:     Dict,
    // Parallel to the dict entries, in decode order.
    spans:    Vec<Range<usize>>,
    consumed: usize,
}

impl<'a> SpannedDict<'a> {

    pub fn dict(&self) -> &Dict { &self.dict }

    pub fn into_dict(self) -> Dict { self.dict }

    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Option<&Value> { self.dict.get(key) }

    // Byte range of the value bound to `key` within the source buffer.
    pub fn span<K: AsRef<[u8]>>(&self, key: K) -> Option<Range<usize>> {
        let key = key.as_ref();
        self.dict
            .keys()
            .position(|k| k == key)
            .map(|idx| self.spans[idx].clone())
    }

    // The verbatim source bytes of the value bound to `key`.
    pub fn raw<K: AsRef<[u8]>>(&self, key: K) -> Option<&'a [u8]> {
        self.span(key).map(|span| &self.source[span])
    }

    // Number of source bytes the dictionary occupied.
    pub fn consumed(&self) -> usize { self.consumed }

    // Bytes left over after the dictionary.
    pub fn trailing(&self) -> &'a [u8] { &self.source[self.consumed..] }
}
