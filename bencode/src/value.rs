use serde::Serialize;
use serde::ser::{SerializeMap, SerializeSeq};

use crate::encode;
use crate::map::Dict;

// Bencode types.
#[derive(Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    ByteString(Vec<u8>),
    List(Vec<Value>),
    Dictionary(Dict),
}

impl Value {

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::ByteString(_) => "byte string",
            Value::List(_) => "list",
            Value::Dictionary(_) => "dictionary",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(int) => Some(*int),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::ByteString(bytes) => Some(bytes),
            _ => None,
        }
    }

    // Byte string that is also valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    // Canonical encoding, see `encode`.
    pub fn encode(&self) -> Vec<u8> { encode::encode(self) }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self { Value::Integer(v) }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self { Value::ByteString(v.as_bytes().to_vec()) }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self { Value::ByteString(v.to_vec()) }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self { Value::ByteString(v) }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self { Value::List(v) }
}

impl From<Dict> for Value {
    fn from(v: Dict) -> Self { Value::Dictionary(v) }
}

// Byte strings are printed as text when they are UTF-8, otherwise just their length,
// piece tables would be unreadable.
impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(int) => write!(f, "{}", int),
            Value::ByteString(bytes) => match std::str::from_utf8(bytes) {
                Ok(s) => write!(f, "{:?}", s),
                Err(_) => write!(f, "<{} bytes>", bytes.len()),
            },
            Value::List(list) => f.debug_list().entries(list).finish(),
            Value::Dictionary(dict) => std::fmt::Debug::fmt(dict, f),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: serde::Serializer
    {
        match self {
            Value::Integer(int) => serializer.serialize_i64(*int),

            Value::ByteString(string) => serializer.serialize_bytes(string),

            Value::List(list) => {
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for elem in list {
                    seq.serialize_element(elem)?;
                }
                seq.end()
            },

            Value::Dictionary(dict) => {
                let mut map = serializer.serialize_map(Some(dict.len()))?;
                for (k, v) in dict.iter() {
                    map.serialize_entry(serde_bytes::Bytes::new(k), v)?;
                }
                map.end()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variant() {
        let v = Value::from("spam");
        assert_eq!(v.as_str(), Some("spam"));
        assert_eq!(v.as_int(), None);
        assert_eq!(v.type_name(), "byte string");

        let v = Value::from(-3);
        assert_eq!(v.as_int(), Some(-3));
        assert!(v.as_bytes().is_none());
    }

    #[test]
    fn as_str_rejects_invalid_utf8() {
        let v = Value::from(vec![0xff, 0xfe]);
        assert_eq!(v.as_bytes(), Some(&[0xff, 0xfe][..]));
        assert_eq!(v.as_str(), None);
    }

    #[test]
    fn debug_hides_binary_strings() {
        let v = Value::List(vec![Value::from(vec![0xff; 40]), Value::from("ok")]);
        assert_eq!(format!("{:?}", v), r#"[<40 bytes>, "ok"]"#);
    }
}
