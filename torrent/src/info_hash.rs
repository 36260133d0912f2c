use sha1::{Digest, Sha1};

// 20 byte SHA1 digest of the bencoded info dict, exactly as it appeared in the torrent file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InfoHash([u8; 20]);

impl InfoHash {

    // Hashes the raw info dict bytes, never a re-encoding of the parsed dict.
    pub fn from_info_bytes(raw: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(raw);
        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 20] { &self.0 }

    // 40 character lowercase hex.
    pub fn to_hex(&self) -> String { hex::encode(self.0) }
}

impl From<[u8; 20]> for InfoHash {
    fn from(bytes: [u8; 20]) -> Self { Self(bytes) }
}

impl AsRef<[u8]> for InfoHash {
    fn as_ref(&self) -> &[u8] { &self.0 }
}

impl std::fmt::Display for InfoHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for InfoHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InfoHash({})", self.to_hex())
    }
}
