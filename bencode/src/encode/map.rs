use std::mem;

use serde::ser;

use crate::decode::Decoder;
use crate::{Error, Result};
use super::encoder::Encoder;

// A dictionary is encoded as d<contents>e. The elements of the dictionary are encoded with each key
// immediately followed by its value. All keys must be byte strings and must appear in lexicographical
// order of their raw bytes, so entries are buffered and sorted on `end`.
pub struct SerializeMap<'a> {
    serializer:  &'a mut Encoder,
    // (raw key, encoded value)
    items:       Vec<(Vec<u8>, Vec<u8>)>,
    current_key: Option<Vec<u8>>,
}

impl<'a> SerializeMap<'a> {

    pub fn new(serializer: &'a mut Encoder, size: usize) -> Self {
        Self {
            serializer,
            items: Vec::with_capacity(size),
            current_key: None,
        }
    }

    fn finish(&mut self) -> Result<()> {
        if self.current_key.is_some() {
            return Err(Error::MapSerializationOrder(
                "attempted to end map serialization while holding key".to_string())
            )
        }
        // Take items and sort lexicographically by raw key.
        let mut items = mem::take(&mut self.items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        if items.windows(2).any(|w| w[0].0 == w[1].0) {
            return Err(Error::MapSerializationOrder("duplicate key".to_string()))
        }

        self.serializer.push("d");
        for (k, v) in items {
            self.serializer.write_bytes(&k);
            self.serializer.push(v);
        }

        self.serializer.push("e");
        Ok(())
    }

    fn push_entry(&mut self, key: Vec<u8>, value: Vec<u8>) {
        // None and unit serialize to nothing, leave the key out entirely.
        if !value.is_empty() {
            self.items.push((key, value));
        }
    }
}

// Serializes a key and strips the length prefix, rejecting anything that is not a byte string.
fn raw_key<T: ?Sized + serde::Serialize>(key: &T) -> Result<Vec<u8>> {
    let mut ser = Encoder::new();
    key.serialize(&mut ser)?;
    let encoded = ser.into_buf();

    match encoded.first() {
        Some(b'0'..=b'9') => {
            let raw = Decoder::new(&encoded).read_bytes()?.to_vec();
            Ok(raw)
        },
        _ => Err(Error::InvalidType("dictionary keys must be byte strings".to_string())),
    }
}

fn encode_value<T: ?Sized + serde::Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut ser = Encoder::new();
    value.serialize(&mut ser)?;
    Ok(ser.into_buf())
}

impl<'a> ser::SerializeMap for SerializeMap<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T: ?Sized>(&mut self, key: &T) -> Result<()>
        where T: serde::Serialize
    {
        match self.current_key {
            // We are supposed to be serializing value here.
            Some(_) => Err(Error::MapSerializationOrder("key serialized twice".to_string())),
            None => {
                self.current_key = Some(raw_key(key)?);
                Ok(())
            }
        }
    }

    fn serialize_value<T: ?Sized>(&mut self, value: &T) -> Result<()>
        where T: serde::Serialize
    {
        let key = self.current_key.take().ok_or_else(
            || Error::MapSerializationOrder("value serialized without a key".to_string())
        )?;
        let value = encode_value(value)?;
        self.push_entry(key, value);
        Ok(())
    }

    fn serialize_entry<K: ?Sized, V: ?Sized>(
        &mut self,
        key: &K,
        value: &V,
    ) -> Result<()>
        where K: serde::Serialize, V: serde::Serialize,
    {
        if self.current_key.is_some() {
            return Err(Error::MapSerializationOrder("key serialized twice".to_string()))
        }
        let key = raw_key(key)?;
        let value = encode_value(value)?;
        self.push_entry(key, value);
        Ok(())
    }

    fn end(mut self) -> Result<()> { self.finish() }
}

impl<'a> ser::SerializeStruct for SerializeMap<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized>(
            &mut self,
            key: &'static str,
            value: &T,
        ) -> Result<()>
        where T: serde::Serialize
    {
        ser::SerializeMap::serialize_entry(self, key, value)
    }

    fn end(mut self) -> Result<()> {
        self.finish()
    }
}

impl<'a> ser::SerializeStructVariant for SerializeMap<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized>(
            &mut self,
            key: &'static str,
            value: &T,
        ) -> Result<()>
        where T: serde::Serialize
    {
        ser::SerializeMap::serialize_entry(self, key, value)
    }

    fn end(mut self) -> Result<()> {
        self.finish()?;
        self.serializer.push("e");
        Ok(())
    }
}
