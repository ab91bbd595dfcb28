use anyhow::{Context, Result};
use chrono::DateTime;
use clap::Parser;
use std::path::PathBuf;

use feedreader::config::Config;
use feedreader::feed::{FeedRegistry, HttpFeedSource};
use feedreader::ui::Entry;
use feedreader::util::{strip_control_chars, truncate_to_width};
use feedreader::Session;

/// Get the default config file path (~/.config/feedreader/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("feedreader")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(name = "feedreader", about = "Load a feed and print its entries")]
struct Args {
    /// Config file (defaults to ~/.config/feedreader/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// List the registered feeds and exit
    #[arg(long)]
    list: bool,

    /// Index of the feed to load
    #[arg(long, default_value_t = 0)]
    feed: usize,

    /// Print entries as JSON
    #[arg(long)]
    json: bool,

    /// Truncate printed lines to this many columns
    #[arg(long, default_value_t = 100)]
    width: usize,
}

fn print_registry(registry: &FeedRegistry) {
    for (index, feed) in registry.feeds().iter().enumerate() {
        println!("{:>3}  {}  <{}>", index, feed.name, feed.url);
    }
}

fn print_entry(entry: &Entry, width: usize) {
    let text = strip_control_chars(entry.text());
    let mut lines = text.lines();
    let title = lines.next().unwrap_or_default();
    let date = entry
        .published
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "----------".to_string());

    println!("{}  {}", date, truncate_to_width(title, width.saturating_sub(12)));
    if let Some(snippet) = lines.next() {
        println!("            {}", truncate_to_width(snippet, width.saturating_sub(12)));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    let registry = config.registry().context("Invalid feed registry")?;

    if args.list {
        print_registry(&registry);
        return Ok(());
    }

    let source =
        HttpFeedSource::new(config.fetch_timeout()).context("Failed to build HTTP client")?;
    let session = Session::new(registry, source);

    let handle = session
        .load_feed(args.feed)
        .context("Cannot load requested feed")?;
    let outcome = handle
        .wait_timeout(config.load_timeout())
        .await?
        .context("Feed load was superseded")?;
    let report = outcome.with_context(|| {
        format!(
            "Failed to load feed #{} ({})",
            args.feed,
            session
                .registry()
                .get(args.feed)
                .map(|f| f.url.as_str())
                .unwrap_or("?")
        )
    })?;

    tracing::info!(feed = %report.feed_name, entries = report.entries, "Feed loaded");

    let entries = session.entries();
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&*entries).context("Failed to serialize entries")?
        );
    } else {
        println!("{}", session.header_title());
        for entry in entries.iter() {
            print_entry(entry, args.width);
        }
    }

    Ok(())
}
