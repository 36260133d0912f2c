mod config;
mod de;
mod info_hash;
mod metainfo;
mod piece;
pub mod source;
pub mod tracker;

// Re-exports
pub use config::Config;
pub use info_hash::InfoHash;
pub use metainfo::{Info, MetaInfo, MetaInfoError};
pub use piece::{split_piece_hashes, PieceHash, PIECE_HASH_LEN};
pub use source::{Loaded, SourceError, TorrentSource};
pub use tracker::{
    AnnounceParams,
    AnnounceRequest,
    HttpTracker,
    PeerId,
    QueryMode,
    TrackerError,
    TrackerResponse,
};
