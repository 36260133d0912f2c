use anyhow::Context;
use clap::Parser;
use torrent::{Config, HttpTracker, MetaInfo, PeerId, QueryMode, TorrentSource};

#[derive(Parser)]
#[command(about = "Parse a torrent file and build its tracker announce")]
struct Args {
    #[arg(help = "Path to a .torrent file or an http(s) link to one")]
    torrent: String,

    #[arg(short, long, default_value_t = 6881, help = "Port reported to the tracker")]
    port: u16,

    #[arg(long, conflicts_with = "random_peer_id", help = "20 byte peer id")]
    peer_id: Option<String>,

    #[arg(long, help = "Generate a random peer id")]
    random_peer_id: bool,

    #[arg(long, help = "Keep any query already on the announce url")]
    merge_query: bool,

    #[arg(long, default_value = "torrents", help = "Where fetched torrents are saved")]
    save_dir: std::path::PathBuf,

    #[arg(short, long, help = "Send the announce and print the peers")]
    announce: bool,

    #[arg(short, long, help = "Verbose output")]
    verbose: bool,
}

impl Args {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::default();
        if let Some(id) = &self.peer_id {
            config.peer_id = PeerId::from_bytes(id.as_bytes())?;
        } else if self.random_peer_id {
            config.peer_id = PeerId::generate();
        }
        config.port = self.port;
        if self.merge_query {
            config.query_mode = QueryMode::Merge;
        }
        config.save_dir = self.save_dir.clone();
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {

    let args = Args::parse();

    // Set up logging.
    let level = if args.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let sub = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(sub)?;

    let config = args.config()?;
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()?;

    let source = TorrentSource::parse(&args.torrent)?;
    let loaded = source.load(&client, &config.save_dir).await?;
    let metainfo = MetaInfo::from_bytes(&loaded.bytes).context("error parsing torrent file")?;

    println!("Announce: {}", metainfo.announce);
    println!("Name: {}", metainfo.name());
    println!("Piece Length: {}", metainfo.piece_len());
    println!("Length: {} ({})", metainfo.total_len(), metainfo.size_fmt());
    if let Some(date) = metainfo.creation_date_fmt() {
        println!("Created: {}", date);
    }
    if let Some(comment) = &metainfo.comment {
        println!("Comment: {}", comment);
    }
    println!("Info Hash: {}", metainfo.info_hash_hex());
    println!("Number of pieces: {}", metainfo.num_pieces());

    let req = metainfo
        .announce_request(&config)
        .context("error building tracker url")?;
    println!("Tracker URL: {}", req.url(config.query_mode));

    if !args.announce {
        return Ok(());
    }

    let mut tracker = HttpTracker::new(client, config.query_mode);
    let resp = tracker.announce(&req).await.context("tracker announce failed")?;
    if let Some(interval) = tracker.interval() {
        println!("Interval: {}s", interval.as_secs());
    }
    if let Some(min_interval) = tracker.min_interval() {
        println!("Min Interval: {}s", min_interval.as_secs());
    }
    if let Some(id) = tracker.tracker_id() {
        println!("Tracker ID: {}", id);
    }
    if let (Some(complete), Some(incomplete)) = (resp.complete, resp.incomplete) {
        println!("Seeders: {}, Leechers: {}", complete, incomplete);
    }
    println!("Peers ({}):", resp.peers.len());
    for peer in &resp.peers {
        println!("  {}", peer);
    }

    Ok(())
}
