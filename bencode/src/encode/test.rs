use std::collections::HashMap;
use serde::{Serialize, ser::SerializeStruct, Serializer};
use serde_derive::Serialize;

use crate::{decode_all, Dict, Error, Value};
use super::{encode, encode_to_raw, encode_to_str};

#[test]
fn serialize_string() {
    let r = encode_to_str(&"foo").unwrap();
    assert_eq!(r, "3:foo")
}

#[test]
fn serialize_num() {
    let r = encode_to_str(&999).unwrap();
    assert_eq!(r, "i999e");
    assert_eq!(encode_to_str(&-7i64).unwrap(), "i-7e");
}

#[test]
fn serialize_vec() {
    let r = encode_to_str(&vec!["fooo", "bar"]).unwrap();
    assert_eq!(r, "l4:fooo3:bare")
}

struct TestStruct<'a> {
    a: &'a str,
    b: i64,
    c: Vec<u8>,
    d: HashMap<&'a str, Vec<u8>>,
}
impl Serialize for TestStruct<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
           let mut state = serializer.serialize_struct("TestStruct", 4)?;
           state.serialize_field("d", &self.d)?;
           state.serialize_field("c", &self.c)?;
           state.serialize_field("b", &self.b)?;
           state.serialize_field("a", &self.a)?;
           state.end()
    }
}

#[test]
fn test_serialization() {
    let mut s = TestStruct {
        a: "foo",
        b: 999,
        c: vec![1, 2, 3],
        d: HashMap::new()
    };
    s.d.insert("foo", vec![1, 2, 3]);
    s.d.insert("bar", vec![4, 5, 6]);
    let out = encode_to_str(&s).unwrap();
    assert_eq!(out, "d1:a3:foo1:bi999e1:cli1ei2ei3ee1:dd3:barli4ei5ei6ee3:fooli1ei2ei3eeee".to_string());
}

#[test]
fn serialize_struct_skips_none() {
    #[derive(Debug, Serialize)]
    struct Fake {
        x: i64,
        y: String,
        z: Option<String>,
    }
    let f = Fake {
        x: 1111,
        y: "dog".to_string(),
        z: None,
    };
    assert_eq!(encode_to_str(&f).unwrap(), "d1:xi1111e1:y3:doge");
}

#[test]
fn serialize_lexical_sorted_keys() {
    #[derive(Serialize)]
    struct Fake {
        aaa: i32,
        bb: i32,
        z: i32,
        c: i32,
    }
    let f = Fake {
        aaa: 1,
        bb: 2,
        z: 3,
        c: 4,
    };
    assert_eq!(encode_to_str(&f).unwrap(), "d3:aaai1e2:bbi2e1:ci4e1:zi3ee");
}

// Sorting must use the raw key, not its length-prefixed encoding ("10:..." < "2:..").
#[test]
fn serialize_sorts_by_raw_key_not_prefix() {
    let mut m = HashMap::new();
    m.insert("zz", 1);
    m.insert("aaaaaaaaaa", 2);
    assert_eq!(encode_to_str(&m).unwrap(), "d10:aaaaaaaaaai2e2:zzi1ee");
}

#[test]
fn serialize_byte_buf_field() {
    #[derive(Serialize)]
    struct Info {
        #[serde(with = "serde_bytes")]
        pieces: Vec<u8>,
    }
    let raw = encode_to_raw(&Info { pieces: vec![0xff, 0x00] }).unwrap();
    assert_eq!(raw, b"d6:pieces2:\xff\x00e");
}

#[test]
fn reject_floats_and_non_string_keys() {
    assert!(matches!(encode_to_raw(&1.5f64), Err(Error::InvalidType(_))));

    let mut m = HashMap::new();
    m.insert(1, "one");
    assert!(matches!(encode_to_raw(&m), Err(Error::InvalidType(_))));
}

#[test]
fn encode_value_sorts_keys() {
    let mut d = Dict::new();
    d.insert("spam", Value::from("eggs"));
    d.insert("cow", Value::from("moo"));
    d.insert("Z", Value::from(1));
    assert_eq!(encode(&Value::Dictionary(d)), b"d1:Zi1e3:cow3:moo4:spam4:eggse");
}

#[test]
fn encode_value_matches_serde_path() {
    let v = decode_all(b"d4:listl0:i-3ee1:ad1:zi0e1:a1:bee").unwrap();
    assert_eq!(encode(&v), encode_to_raw(&v).unwrap());
    assert_eq!(encode(&v), b"d1:ad1:a1:b1:zi0ee4:listl0:i-3eee");
}
