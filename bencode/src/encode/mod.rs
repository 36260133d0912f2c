use serde::ser;
use crate::{Error, Result, Value};

mod encoder;
mod map;

#[cfg(test)]
mod test;

use encoder::Encoder;

// Canonical encoding of a value tree: dictionary keys sorted by raw bytes.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut encoder = Encoder::new();
    encoder.write_value(value);
    encoder.into_buf()
}

pub fn encode_to_raw<T: ser::Serialize + ?Sized>(v: &T) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new();
    v.serialize(&mut encoder)?;
    Ok(encoder.into_buf())
}

pub fn encode_to_str<T: ser::Serialize + ?Sized>(v: &T) -> Result<String> {
    let raw = encode_to_raw(v)?;
    String::from_utf8(raw).map_err(|_| Error::Custom("invalid utf-8 string".to_string()))
}
