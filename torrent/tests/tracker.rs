mod common;

use std::net::{Ipv4Addr, SocketAddrV4};

use common::serve_once;
use hex_literal::hex;
use torrent::{AnnounceParams, AnnounceRequest, HttpTracker, InfoHash, PeerId, QueryMode, TrackerError};

fn params() -> AnnounceParams {
    AnnounceParams {
        info_hash: InfoHash::from([0u8; 20]),
        peer_id: PeerId::from(*b"-PC0123-abcdefghijkl"),
        port: 6881,
        uploaded: 0,
        downloaded: 0,
        left: 1000,
        compact: true,
    }
}

#[tokio::test]
async fn announce_compact_peers() {
    let mut body = b"d8:completei3e10:incompletei1e8:intervali1800e12:min intervali60e10:tracker id2:t15:peers12:".to_vec();
    body.extend_from_slice(&hex!("7F 00 00 01 1A E1 0A 00 00 02 C8 D5"));
    body.push(b'e');
    let (addr, request_line) = serve_once("200 OK", body).await;

    let req = AnnounceRequest::new(&format!("http://{}/announce?passkey=secret", addr), params()).unwrap();
    let mut tracker = HttpTracker::new(reqwest::Client::new(), QueryMode::Merge);
    let resp = tracker.announce(&req).await.unwrap();

    assert_eq!(resp.peers, vec![
        SocketAddrV4::new(Ipv4Addr::LOCALHOST, 6881),
        SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 2), 51413),
    ]);
    assert_eq!(resp.complete, Some(3));
    assert_eq!(resp.incomplete, Some(1));
    assert_eq!(tracker.tracker_id(), Some("t1"));
    assert_eq!(tracker.interval(), Some(std::time::Duration::from_secs(1800)));
    assert_eq!(tracker.min_interval(), Some(std::time::Duration::from_secs(60)));

    let request_line = request_line.await.unwrap();
    assert!(request_line.starts_with(&format!(
        "GET /announce?passkey=secret&info_hash={}&peer_id=-PC0123-abcdefghijkl&port=6881",
        "%00".repeat(20),
    )));
    assert!(request_line.contains("&left=1000&compact=1 "));
}

#[tokio::test]
async fn announce_failure_reason() {
    let (addr, _) = serve_once("200 OK", b"d14:failure reason17:torrent not founde".to_vec()).await;

    let req = AnnounceRequest::new(&format!("http://{}/announce", addr), params()).unwrap();
    let mut tracker = HttpTracker::new(reqwest::Client::new(), QueryMode::Replace);
    let err = tracker.announce(&req).await.unwrap_err();

    assert!(matches!(err, TrackerError::Failure(reason) if reason == "torrent not found"));
    assert_eq!(tracker.interval(), None);
    assert_eq!(tracker.tracker_id(), None);
}

#[tokio::test]
async fn announce_http_error_status() {
    let (addr, _) = serve_once("500 Internal Server Error", b"oops".to_vec()).await;

    let req = AnnounceRequest::new(&format!("http://{}/announce", addr), params()).unwrap();
    let mut tracker = HttpTracker::new(reqwest::Client::new(), QueryMode::Replace);
    assert!(matches!(tracker.announce(&req).await, Err(TrackerError::Request(_))));
}

#[tokio::test]
async fn announce_garbage_body() {
    let (addr, _) = serve_once("200 OK", b"<html>nope</html>".to_vec()).await;

    let req = AnnounceRequest::new(&format!("http://{}/announce", addr), params()).unwrap();
    let mut tracker = HttpTracker::new(reqwest::Client::new(), QueryMode::Replace);
    assert!(matches!(tracker.announce(&req).await, Err(TrackerError::Decode(_))));
}
