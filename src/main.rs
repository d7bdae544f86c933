//! TuneSearch terminal client
//!
//! Every line read from stdin replaces the query text; the result list is
//! printed whenever it changes.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use tunesearch::{
    config::Settings, network::HttpClient, ItunesFetcher, ResultList, SearchViewModel, UiQueue,
};

/// How long to wait for a final result after stdin closes, on top of the debounce
const DRAIN_GRACE: Duration = Duration::from_secs(10);

/// Slack after the debounce so the last edit has been dispatched
const SETTLE_MARGIN: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    let (settings, source) = load_settings()?;

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(if settings.general.debug {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting TuneSearch v{}", tunesearch::VERSION);
    match source {
        Some(path) => info!("Loaded settings from: {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }

    let client = HttpClient::with_settings(&settings.outgoing)?;
    let fetcher = Arc::new(ItunesFetcher::new(client));

    // This task is the UI context: it owns rendering and runs posted updates.
    let (queue, mut ui) = UiQueue::new();
    let vm = SearchViewModel::new(fetcher, Arc::new(queue), &settings.search);
    let mut items = vm.subscribe();
    let metrics = vm.metrics();

    let mut lines = BufReader::new(tokio::io::stdin()).split(b'\n');

    loop {
        tokio::select! {
            segment = lines.next_segment() => match segment? {
                Some(bytes) => {
                    if let Some(text) = decode_line(bytes) {
                        vm.set_query_text(text);
                    }
                }
                None => break,
            },
            ran = ui.turn() => {
                if !ran {
                    return Ok(());
                }
            }
            changed = items.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                render(&mut items);
            }
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }

    // Input closed; keep publishing until the last query has been fetched
    // and every fetch is either shown or discarded.
    let settle_at = Instant::now() + settings.search.debounce() + SETTLE_MARGIN;
    let give_up = sleep(settings.search.debounce() + DRAIN_GRACE);
    tokio::pin!(give_up);
    loop {
        tokio::select! {
            ran = ui.turn() => {
                if !ran {
                    break;
                }
            }
            changed = items.changed() => {
                if changed.is_err() {
                    break;
                }
                render(&mut items);
            }
            _ = sleep_until(settle_at), if Instant::now() < settle_at => {}
            _ = &mut give_up => {
                info!("No further results, exiting");
                break;
            }
        }

        if Instant::now() >= settle_at && metrics.unresolved_fetches() == 0 {
            break;
        }
    }

    if let Ok(true) = items.has_changed() {
        render(&mut items);
    }

    Ok(())
}

/// Turn one raw stdin line into query text, skipping lines that are not UTF-8
fn decode_line(mut bytes: Vec<u8>) -> Option<String> {
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    match String::from_utf8(bytes) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("Skipping input line that is not valid UTF-8: {}", e);
            None
        }
    }
}

fn render(items: &mut watch::Receiver<ResultList>) {
    let list = items.borrow_and_update();
    println!("{} result(s)", list.len());
    for item in list.iter() {
        println!("  {} - {}", item.track_name, item.artist_name);
    }
}

/// Load settings from file or use defaults, then apply environment overrides
fn load_settings() -> Result<(Settings, Option<PathBuf>)> {
    let mut candidates = Vec::new();

    // Environment variable first
    if let Ok(path) = std::env::var("TUNESEARCH_SETTINGS_PATH") {
        candidates.push(PathBuf::from(path));
    }
    candidates.push(PathBuf::from("settings.yml"));
    candidates.push(PathBuf::from("config/settings.yml"));
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("tunesearch/settings.yml"));
    }

    for path in candidates {
        if path.exists() {
            let mut settings = Settings::from_file(&path)?;
            settings.merge_env();
            return Ok((settings, Some(path)));
        }
    }

    let mut settings = Settings::default();
    settings.merge_env();
    Ok((settings, None))
}
