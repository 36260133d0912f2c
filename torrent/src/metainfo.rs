use crate::de::{self, FieldError};
use crate::info_hash::InfoHash;
use crate::piece::{split_piece_hashes, PieceHash};
use crate::tracker::{AnnounceParams, AnnounceRequest, TrackerError};
use crate::Config;

#[derive(Debug, thiserror::Error)]
pub enum MetaInfoError {

    #[error("bencode error whilst decoding metainfo: {0}")]
    Decode(#[from] bencode::Error),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid field {field}: {reason}")]
    InvalidField {
        field:  &'static str,
        reason: String,
    },

    #[error("invalid pieces length {0}, must be divisible by 20")]
    InvalidPiecesLength(usize),

    #[error("unsupported torrent format: {0}")]
    Unsupported(&'static str),

}

impl From<FieldError> for MetaInfoError {
    fn from(e: FieldError) -> Self {
        MetaInfoError::InvalidField { field: e.field, reason: e.reason }
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, MetaInfoError> {
    value.ok_or(MetaInfoError::MissingField(field))
}

#[derive(Clone)]
pub struct Info {

    // Suggested file name.
    pub name: String,

    // Number of bytes in each piece.
    pub piece_length: u64,

    // Length of the file in bytes.
    pub length: u64,

    // One SHA1 hash per piece, split from the concatenated `pieces` string.
    pub pieces: Vec<PieceHash>,

    // If set, peers must only be obtained from the trackers in the metainfo file.
    pub private: bool,

}

impl Info {

    fn from_dict(info: &bencode::Dict) -> Result<Self, MetaInfoError> {
        // A list of dictionaries, one for each file.
        if info.contains_key("files") {
            return Err(MetaInfoError::Unsupported("multi-file torrents"));
        }

        let name = required(de::text(info, "name")?, "name")?;

        let piece_length = required(de::int(info, "piece length")?, "piece length")?;
        if piece_length <= 0 {
            return Err(MetaInfoError::InvalidField {
                field: "piece length",
                reason: format!("must be positive, got {}", piece_length),
            });
        }

        let length = required(de::uint(info, "length")?, "length")?;
        let pieces = split_piece_hashes(required(de::bytes(info, "pieces")?, "pieces")?)?;
        let private = de::int(info, "private")? == Some(1);

        Ok(Self {
            name,
            piece_length: piece_length as u64,
            length,
            pieces,
            private,
        })
    }
}

#[derive(Clone)]
pub struct MetaInfo {

    // The announce URL of the tracker.
    pub announce: String,

    // Describes the file of the torrent.
    pub info: Info,

    // (optional) tiers of backup trackers.
    pub announce_list: Option<Vec<Vec<String>>>,

    // (optional) the creation time of the torrent, in standard UNIX epoch format.
    pub creation_date: Option<i64>,

    // (optional) free-form textual comments of the author.
    pub comment: Option<String>,

    // (optional) name and version of the program used to create the .torrent.
    pub created_by: Option<String>,

    // (optional) the string encoding format used to generate the pieces part of the info dictionary.
    pub encoding: Option<String>,

    info_hash: InfoHash,

    // The info dict exactly as it appeared in the source.
    info_bytes: Vec<u8>,

}

impl MetaInfo {

    pub fn from_bytes(buf: &[u8]) -> Result<MetaInfo, MetaInfoError> {
        let root = bencode::decode_dict_spanned(buf)?;
        if !root.trailing().is_empty() {
            tracing::warn!("ignoring {} trailing bytes after metainfo", root.trailing().len());
        }
        let dict = root.dict();

        let announce = required(de::utf8(dict, "announce")?, "announce")?.to_string();

        let info = de::dict(dict, "info")?;
        let info = Info::from_dict(required(info, "info")?)?;
        // Present, since the info dict was just read from this key.
        let info_bytes = required(root.raw("info"), "info")?.to_vec();
        tracing::debug!("info dict spans {:?}", root.span("info"));

        let metainfo = MetaInfo {
            announce,
            announce_list: de::announce_list(dict, "announce-list")?,
            creation_date: de::int(dict, "creation date")?,
            comment: de::text(dict, "comment")?,
            created_by: de::text(dict, "created by")?,
            encoding: de::text(dict, "encoding")?,
            info_hash: InfoHash::from_info_bytes(&info_bytes),
            info_bytes,
            info,
        };

        let expected = metainfo.expected_pieces();
        if expected != metainfo.num_pieces() as u64 {
            tracing::warn!(
                "torrent has {} piece hashes, length {} implies {}",
                metainfo.num_pieces(),
                metainfo.total_len(),
                expected,
            );
        }

        tracing::debug!("metainfo created: {:#?}", metainfo);
        Ok(metainfo)
    }

    // Announce parameters for a fresh download: nothing transferred, everything left.
    pub fn announce_params(&self, config: &Config) -> AnnounceParams {
        AnnounceParams {
            info_hash: self.info_hash,
            peer_id: config.peer_id,
            port: config.port,
            uploaded: 0,
            downloaded: 0,
            left: self.total_len(),
            compact: config.compact,
        }
    }

    pub fn announce_request(&self, config: &Config) -> Result<AnnounceRequest, TrackerError> {
        AnnounceRequest::new(&self.announce, self.announce_params(config))
    }

    pub fn piece_hashes(&self) -> &[PieceHash] { &self.info.pieces }

    pub fn piece_len(&self) -> u64 { self.info.piece_length }

    pub fn num_pieces(&self) -> usize { self.info.pieces.len() }

    pub fn total_len(&self) -> u64 { self.info.length }

    pub fn info_hash(&self) -> InfoHash { self.info_hash }

    pub fn info_bytes(&self) -> &[u8] { &self.info_bytes }

    pub fn name(&self) -> &str { &self.info.name }

    pub fn is_private(&self) -> bool { self.info.private }

    fn expected_pieces(&self) -> u64 {
        self.total_len().div_ceil(self.piece_len())
    }

    // Formatting methods.

    pub fn creation_date_fmt(&self) -> Option<String> {
        self.creation_date.map(|v| {
            chrono::DateTime::from_timestamp(v, 0)
                .map(|v| v.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "Invalid date".to_string())
        })
    }

    pub fn info_hash_hex(&self) -> String {
        self.info_hash.to_hex()
    }

    pub fn size_fmt(&self) -> String {
        format_size(self.total_len())
    }
}

fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = "B";
    for next in ["KiB", "MiB", "GiB", "TiB"] {
        if size < 1024.0 {
            break;
        }
        size /= 1024.0;
        unit = next;
    }
    format!("{:.2} {}", size, unit)
}

impl std::fmt::Debug for MetaInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetaInfo")
            .field("announce", &self.announce)
            .field("info", &self.info)
            .field("info_hash", &self.info_hash_hex())
            .field("encoding", &self.encoding)
            .field("announce_list", &self.announce_list)
            .field("creation_date", &self.creation_date_fmt())
            .field("comment", &self.comment)
            .field("created_by", &self.created_by)
            .finish()
    }
}

// Dont want to print out the pieces field, so we implement Debug manually.
impl std::fmt::Debug for Info {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Info")
            .field("name", &self.name)
            .field("num pieces", &self.pieces.len())
            .field("piece_length", &self.piece_length)
            .field("length", &self.length)
            .field("private", &self.private)
            .finish()
    }
}
