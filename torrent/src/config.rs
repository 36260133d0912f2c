use std::{path::PathBuf, time::Duration};
use crate::tracker::{PeerId, QueryMode};

#[derive(Debug, Clone)]
pub struct Config {

    pub peer_id: PeerId,

    // Port reported to the tracker.
    pub port: u16,

    // Ask the tracker for the compact peer list.
    pub compact: bool,

    // What to do with a query string already present on the announce URL.
    pub query_mode: QueryMode,

    // Where torrents fetched over HTTP are saved.
    pub save_dir: PathBuf,

    pub request_timeout: Duration,

}

const DEFAULT_PEER_ID: [u8; 20] = *b"-PC0123-abcdefghijkl";

impl Default for Config {
    fn default() -> Self {
        Self {
            peer_id: PeerId::from(DEFAULT_PEER_ID),
            port: 6881,
            compact: true,
            query_mode: QueryMode::Replace,
            save_dir: PathBuf::from("torrents"),
            request_timeout: Duration::from_secs(30),
        }
    }
}
