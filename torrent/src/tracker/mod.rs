mod http;
mod peer_id;
mod request;
mod response;

pub use http::HttpTracker;
pub use peer_id::PeerId;
pub use request::{AnnounceParams, AnnounceRequest, QueryMode};
pub use response::{parse_compact_peers, TrackerResponse};

use crate::de::FieldError;

type Result<T> = std::result::Result<T, TrackerError>;

#[derive(thiserror::Error, Debug)]
pub enum TrackerError {

    #[error("invalid announce url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("announce url is not absolute: {0}")]
    NotAbsolute(String),

    #[error("unsupported tracker scheme: {0}")]
    UnsupportedScheme(String),

    #[error("peer id must be 20 bytes, got {0}")]
    InvalidPeerId(usize),

    #[error("error deserializing response: {0}")]
    Decode(#[from] bencode::Error),

    #[error("malformed response field {field}: {reason}")]
    MalformedResponse {
        field:  &'static str,
        reason: String,
    },

    #[error("response has no peers")]
    MissingPeers,

    #[error("compact peers length {0} is not a multiple of 6")]
    InvalidPeersLength(usize),

    #[error("unsupported response format: {0}")]
    Unsupported(&'static str),

    #[error("tracker failure: {0}")]
    Failure(String),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

}

impl From<FieldError> for TrackerError {
    fn from(e: FieldError) -> Self {
        TrackerError::MalformedResponse { field: e.field, reason: e.reason }
    }
}
