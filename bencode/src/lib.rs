// Convention from https://serde.rs/conventions.html
mod encode;
mod decode;
mod error;
mod map;
mod value;

// For bencode -> Value
pub use decode::{decode, decode_all, decode_dict_spanned, SpannedDict, MAX_DEPTH};

// For Value / T -> bencode
pub use encode::{encode, encode_to_raw, encode_to_str};

pub use error::{Error, Result};
pub use map::Dict;
pub use value::Value;
