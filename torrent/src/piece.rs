use crate::metainfo::MetaInfoError;

// Length of a SHA1 piece hash.
pub const PIECE_HASH_LEN: usize = 20;

pub type PieceHash = [u8; PIECE_HASH_LEN];

// Splits the concatenated `pieces` string into one hash per piece, in order.
// An empty string is a torrent with no pieces, not an error.
pub fn split_piece_hashes(pieces: &[u8]) -> Result<Vec<PieceHash>, MetaInfoError> {
    if pieces.len() % PIECE_HASH_LEN != 0 {
        return Err(MetaInfoError::InvalidPiecesLength(pieces.len()));
    }

    Ok(pieces
        .chunks_exact(PIECE_HASH_LEN)
        .map(|chunk| {
            let mut hash = [0u8; PIECE_HASH_LEN];
            hash.copy_from_slice(chunk);
            hash
        })
        .collect())
}
