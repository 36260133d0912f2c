use std::net::{Ipv4Addr, SocketAddrV4};
use bytes::Buf;
use bencode::Value;

use crate::de;
use super::{Result, TrackerError};

const COMPACT_PEER_LEN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerResponse {

    // Interval in seconds that the client should wait between sending regular requests to the tracker.
    pub interval: Option<u64>,

    // Minimum announce interval. If present clients must not reannounce more frequently than this.
    pub min_interval: Option<u64>,

    // A string that the client should send back on its next announcements.
    pub tracker_id: Option<String>,

    // Number of seeders.
    pub complete: Option<u64>,

    // Number of leechers.
    pub incomplete: Option<u64>,

    // Similar to failure reason, but the response still gets processed normally.
    pub warning_message: Option<String>,

    pub peers: Vec<SocketAddrV4>,

}

impl TrackerResponse {

    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        let (root, consumed) = bencode::decode(buf)?;
        if consumed < buf.len() {
            tracing::warn!("ignoring {} trailing bytes in tracker response", buf.len() - consumed);
        }
        let Value::Dictionary(dict) = root else {
            return Err(TrackerError::MalformedResponse {
                field:  "response",
                reason: format!("expected dictionary, found {}", root.type_name()),
            });
        };

        // If present, then no other keys matter.
        if let Some(failure) = de::text(&dict, "failure reason")? {
            return Err(TrackerError::Failure(failure));
        }

        let warning_message = de::text(&dict, "warning message")?;
        if let Some(warning) = &warning_message {
            tracing::warn!("tracker warning: {}", warning);
        }

        let peers = match dict.get("peers") {
            None => return Err(TrackerError::MissingPeers),
            Some(Value::ByteString(b)) => parse_compact_peers(b)?,
            // Dictionary model, only sent when compact=0 is honoured.
            Some(Value::List(_)) => return Err(TrackerError::Unsupported("non-compact peer list")),
            Some(v) => return Err(TrackerError::MalformedResponse {
                field:  "peers",
                reason: format!("expected byte string, found {}", v.type_name()),
            }),
        };

        let resp = Self {
            interval:     de::uint(&dict, "interval")?,
            min_interval: de::uint(&dict, "min interval")?,
            tracker_id:   de::text(&dict, "tracker id")?,
            complete:     de::uint(&dict, "complete")?,
            incomplete:   de::uint(&dict, "incomplete")?,
            warning_message,
            peers,
        };
        tracing::debug!("announce response: {:#?}", resp);
        Ok(resp)
    }
}

// String model.
// Each peer is 6 bytes, the first 4 are the IP address and the last 2 the port.
// All in network (big-endian) byte order.
pub fn parse_compact_peers(mut buf: &[u8]) -> Result<Vec<SocketAddrV4>> {
    if buf.len() % COMPACT_PEER_LEN != 0 {
        return Err(TrackerError::InvalidPeersLength(buf.len()));
    }

    let mut peers = Vec::with_capacity(buf.len() / COMPACT_PEER_LEN);
    while buf.has_remaining() {
        let ip = Ipv4Addr::from(buf.get_u32());
        let port = buf.get_u16();
        peers.push(SocketAddrV4::new(ip, port));
    }
    Ok(peers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn single_compact_peer() {
        let peers = parse_compact_peers(&hex!("7F 00 00 01 1A E1")).unwrap();
        assert_eq!(peers, vec![SocketAddrV4::new(Ipv4Addr::LOCALHOST, 6881)]);
    }

    #[test]
    fn compact_peers_in_order() {
        let peers = parse_compact_peers(&hex!("C0 A8 00 01 00 50 0A 00 00 02 FF FF")).unwrap();
        assert_eq!(peers, vec![
            SocketAddrV4::new(Ipv4Addr::new(192, 168, 0, 1), 80),
            SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 2), 65535),
        ]);
    }

    #[test]
    fn compact_peers_bad_length() {
        assert!(matches!(parse_compact_peers(&hex!("7F 00 00 01 1A")), Err(TrackerError::InvalidPeersLength(5))));
        assert!(matches!(parse_compact_peers(&hex!("7F 00 00 01 1A E1 00")), Err(TrackerError::InvalidPeersLength(7))));
        assert!(parse_compact_peers(&[]).unwrap().is_empty());
    }

    #[test]
    fn parse_response_binary() {
        let s = "64383a636f6d706c65746569396531303a696e636f6d706c657465693165383a696e74657276616c69313830306531323a6d696e20696e74657276616c693138303065353a706565727336303a52454d051ae1ca2f2a2ec00884937726decc61759ab8138851ab05e8f6bb5062f69770469247493ad4d005879f2ec8d54237ce44ea6043db8806c8d565";
        let resp = TrackerResponse::from_bytes(&hex::decode(s).unwrap()).unwrap();
        assert_eq!(resp.interval, Some(1800));
        assert_eq!(resp.min_interval, Some(1800));
        assert_eq!(resp.complete, Some(9));
        assert_eq!(resp.incomplete, Some(1));
        assert_eq!(resp.peers.len(), 10);
        assert!(resp.peers.contains(&SocketAddrV4::new(Ipv4Addr::new(97, 117, 154, 184), 5000)));
        assert!(resp.peers.contains(&SocketAddrV4::new(Ipv4Addr::new(5, 135, 159, 46), 51413)));
    }

    #[test]
    fn optional_fields() {
        let body = b"d8:intervali900e10:tracker id3:abc15:warning message4:slow5:peers6:\x7f\x00\x00\x01\x1a\xe1e";
        let resp = TrackerResponse::from_bytes(body).unwrap();
        assert_eq!(resp.interval, Some(900));
        assert_eq!(resp.min_interval, None);
        assert_eq!(resp.tracker_id.as_deref(), Some("abc"));
        assert_eq!(resp.warning_message.as_deref(), Some("slow"));
        assert_eq!(resp.peers, vec![SocketAddrV4::new(Ipv4Addr::LOCALHOST, 6881)]);
    }

    #[test]
    fn failure_reason() {
        let err = TrackerResponse::from_bytes(b"d14:failure reason12:unregisterede").unwrap_err();
        assert!(matches!(err, TrackerError::Failure(r) if r == "unregistered"));
    }

    #[test]
    fn malformed_responses() {
        assert!(matches!(TrackerResponse::from_bytes(b"d8:intervali60ee"), Err(TrackerError::MissingPeers)));
        assert!(matches!(
            TrackerResponse::from_bytes(b"d5:peersld2:ip9:127.0.0.14:porti6881eeee"),
            Err(TrackerError::Unsupported(_))
        ));
        assert!(matches!(
            TrackerResponse::from_bytes(b"d5:peersi3ee"),
            Err(TrackerError::MalformedResponse { field: "peers", .. })
        ));
        assert!(matches!(
            TrackerResponse::from_bytes(b"d8:interval2:xx5:peers0:e"),
            Err(TrackerError::MalformedResponse { field: "interval", .. })
        ));
        assert!(matches!(TrackerResponse::from_bytes(b"le"), Err(TrackerError::MalformedResponse { field: "response", .. })));
        assert!(matches!(TrackerResponse::from_bytes(b"d5:peers"), Err(TrackerError::Decode(_))));
        assert!(matches!(
            TrackerResponse::from_bytes(b"d5:peers5:abcdee"),
            Err(TrackerError::InvalidPeersLength(5))
        ));
    }

    #[test]
    fn trailing_bytes_tolerated() {
        let resp = TrackerResponse::from_bytes(b"d5:peers0:ejunk").unwrap();
        assert!(resp.peers.is_empty());
    }
}
