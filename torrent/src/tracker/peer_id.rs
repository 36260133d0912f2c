use rand::{distributions::Alphanumeric, Rng};

use super::TrackerError;

const PEER_ID_PREFIX: &[u8; 8] = b"-PC0123-";

// 20 byte client identifier sent to trackers.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerId([u8; 20]);

impl PeerId {

    // Azureus-style id: client prefix followed by 12 random alphanumerics.
    pub fn generate() -> Self {
        let mut id = [0u8; 20];
        id[..8].copy_from_slice(PEER_ID_PREFIX);
        for (b, r) in id[8..].iter_mut().zip(rand::thread_rng().sample_iter(&Alphanumeric)) {
            *b = r;
        }
        Self(id)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TrackerError> {
        let id = <[u8; 20]>::try_from(bytes).map_err(|_| TrackerError::InvalidPeerId(bytes.len()))?;
        Ok(Self(id))
    }

    pub fn as_bytes(&self) -> &[u8; 20] { &self.0 }
}

impl From<[u8; 20]> for PeerId {
    fn from(bytes: [u8; 20]) -> Self { Self(bytes) }
}

impl std::fmt::Debug for PeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PeerId({})", String::from_utf8_lossy(&self.0))
    }
}
