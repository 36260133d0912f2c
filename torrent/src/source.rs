use std::path::{Path, PathBuf};
use url::Url;

type Result<T> = std::result::Result<T, SourceError>;

#[derive(thiserror::Error, Debug)]
pub enum SourceError {

    #[error("invalid argument '{0}', pass in path to torrent file or link")]
    InvalidArgument(String),

    #[error("failed to fetch torrent from '{0}'")]
    NotFound(Url),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

}

// Where the raw torrent bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TorrentSource {
    Local(PathBuf),
    Remote(Url),
}

#[derive(Debug)]
pub struct Loaded {
    pub bytes: Vec<u8>,
    // Set when a remote torrent was written to disk.
    pub saved_to: Option<PathBuf>,
}

impl TorrentSource {

    pub fn parse(arg: &str) -> Result<Self> {
        if arg.starts_with("http") {
            let url = Url::parse(arg).map_err(|_| SourceError::InvalidArgument(arg.to_string()))?;
            Ok(TorrentSource::Remote(url))
        } else if arg.ends_with(".torrent") {
            Ok(TorrentSource::Local(PathBuf::from(arg)))
        } else {
            Err(SourceError::InvalidArgument(arg.to_string()))
        }
    }

    pub async fn load(&self, client: &reqwest::Client, save_dir: &Path) -> Result<Loaded> {
        match self {
            TorrentSource::Local(path) => {
                tracing::info!("opening torrent file at '{}'", path.display());
                let bytes = tokio::fs::read(path).await?;
                Ok(Loaded { bytes, saved_to: None })
            },
            TorrentSource::Remote(url) => {
                tracing::info!("fetching torrent file from '{}'", url);
                let bytes = client
                    .get(url.clone())
                    .send()
                    .await?
                    .error_for_status()?
                    .bytes()
                    .await?
                    .to_vec();
                if contains_ignore_case(&bytes, b"not found") {
                    return Err(SourceError::NotFound(url.clone()));
                }

                tokio::fs::create_dir_all(save_dir).await?;
                let path = save_dir.join(file_name(url));
                tokio::fs::write(&path, &bytes).await?;
                tracing::info!("torrent file saved locally as '{}'", path.display());
                Ok(Loaded { bytes, saved_to: Some(path) })
            },
        }
    }
}

fn contains_ignore_case(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w.eq_ignore_ascii_case(needle))
}

// Last path segment of the url.
fn file_name(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty())
        .map(|name| urlencoding::decode(name).map_or_else(|_| name.to_string(), |n| n.into_owned()))
        .filter(|name| !name.contains(['/', '\\']) && name != "..")
        .unwrap_or_else(|| "download.torrent".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_arguments() {
        assert_eq!(
            TorrentSource::parse("https://example.com/files/a.torrent").unwrap(),
            TorrentSource::Remote(Url::parse("https://example.com/files/a.torrent").unwrap()),
        );
        assert_eq!(
            TorrentSource::parse("dir/ubuntu.torrent").unwrap(),
            TorrentSource::Local(PathBuf::from("dir/ubuntu.torrent")),
        );
        assert!(matches!(TorrentSource::parse("ubuntu.iso"), Err(SourceError::InvalidArgument(_))));
        assert!(matches!(TorrentSource::parse("http//broken"), Err(SourceError::InvalidArgument(_))));
    }

    #[test]
    fn remote_file_names() {
        let name = |s: &str| file_name(&Url::parse(s).unwrap());
        assert_eq!(name("http://example.com/a/b/debian.torrent"), "debian.torrent");
        assert_eq!(name("http://example.com/my%20file.torrent"), "my file.torrent");
        assert_eq!(name("http://example.com/"), "download.torrent");
        assert_eq!(name("http://example.com/a/%2E%2E"), "download.torrent");
    }

    #[test]
    fn not_found_marker_any_case() {
        assert!(contains_ignore_case(b"<h1>404 Not Found</h1>", b"not found"));
        assert!(contains_ignore_case(b"NOT FOUND", b"not found"));
        assert!(!contains_ignore_case(b"d4:infode", b"not found"));
    }

    #[tokio::test]
    async fn load_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.torrent");
        std::fs::write(&path, b"d4:infode").unwrap();

        let loaded = TorrentSource::Local(path)
            .load(&reqwest::Client::new(), dir.path())
            .await
            .unwrap();
        assert_eq!(loaded.bytes, b"d4:infode");
        assert!(loaded.saved_to.is_none());
    }

    #[tokio::test]
    async fn load_missing_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let res = TorrentSource::Local(dir.path().join("missing.torrent"))
            .load(&reqwest::Client::new(), dir.path())
            .await;
        assert!(matches!(res, Err(SourceError::Io(_))));
    }
}
