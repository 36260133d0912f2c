use url::Url;

use crate::info_hash::InfoHash;
use super::{PeerId, Result, TrackerError};

// Keys the announce query always carries, in the order they are written.
const ANNOUNCE_KEYS: [&str; 7] = ["info_hash", "peer_id", "port", "uploaded", "downloaded", "left", "compact"];

// How an announce URL that already has a query string is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {

    // Drop the existing query, the announce keys are the whole query.
    #[default]
    Replace,

    // Keep existing pairs (minus any that clash with announce keys) ahead of the announce keys.
    Merge,

}

#[derive(Debug, Copy, Clone)]
pub struct AnnounceParams {

    // Hash of info dict.
    pub info_hash:  InfoHash,

    // 20-byte string used as a unique ID for the client.
    pub peer_id:    PeerId,

    // Port number.
    pub port:       u16,

    // The total amount uploaded, in bytes.
    pub uploaded:   u64,

    // The total amount downloaded, in bytes.
    pub downloaded: u64,

    // The number of bytes this client still has to download to be 100% complete.
    pub left:       u64,

    // Ask for the compact peer list.
    pub compact:    bool,

}

// A validated announce URL plus the parameters to send to it.
#[derive(Debug, Clone)]
pub struct AnnounceRequest {
    announce: Url,
    params:   AnnounceParams,
}

impl AnnounceRequest {

    pub fn new(announce: &str, params: AnnounceParams) -> Result<Self> {
        let announce = Url::parse(announce)?;
        if announce.cannot_be_a_base() || !announce.has_host() {
            return Err(TrackerError::NotAbsolute(announce.to_string()));
        }
        match announce.scheme() {
            "http" | "https" => {},
            scheme => return Err(TrackerError::UnsupportedScheme(scheme.to_string())),
        }
        Ok(Self { announce, params })
    }

    pub fn announce(&self) -> &Url { &self.announce }

    pub fn params(&self) -> &AnnounceParams { &self.params }

    // The announce keys, percent-encoded. Binary values are encoded byte for byte.
    pub fn query(&self) -> String {
        let p = &self.params;
        format!(
            "info_hash={}&peer_id={}&port={}&uploaded={}&downloaded={}&left={}&compact={}",
            urlencoding::encode_binary(p.info_hash.as_bytes()),
            urlencoding::encode_binary(p.peer_id.as_bytes()),
            p.port,
            p.uploaded,
            p.downloaded,
            p.left,
            if p.compact { 1 } else { 0 },
        )
    }

    pub fn url(&self, mode: QueryMode) -> Url {
        let mut pairs: Vec<&str> = match mode {
            QueryMode::Replace => Vec::new(),
            QueryMode::Merge => self.announce
                .query()
                .unwrap_or_default()
                .split('&')
                .filter(|pair| !pair.is_empty() && !is_announce_key(pair))
                .collect(),
        };
        let query = self.query();
        pairs.push(&query);

        let mut url = self.announce.clone();
        url.set_query(Some(&pairs.join("&")));
        tracing::debug!("announce url: {}", url);
        url
    }
}

fn is_announce_key(pair: &str) -> bool {
    let key = pair.split_once('=').map_or(pair, |(k, _)| k);
    urlencoding::decode(key).map_or(false, |k| ANNOUNCE_KEYS.contains(&k.as_ref()))
}
