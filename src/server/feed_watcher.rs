use crate::commands::Dispatcher;
use crate::error::SnitchError;
use crate::reports::format_top_changes;
use crate::server::relay::Relay;
use crate::storage::{load_snapshot, Feed};
use crate::types::EloSnapshot;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::Duration;

/// A snapshot ready to be pushed, not yet marked as announced.
#[derive(Debug, PartialEq)]
pub struct Announcement {
    pub path: PathBuf,
    pub text: String,
}

/// Remembers the last announced ELO snapshot so each one is pushed once.
pub struct FeedWatcher {
    last_seen: Option<PathBuf>,
}

impl FeedWatcher {
    /// Snapshots already on disk at startup are not announced.
    pub fn starting_at(feed: &Feed) -> Self {
        FeedWatcher {
            last_seen: feed.latest_path().ok(),
        }
    }

    /// Announcement for the newest snapshot if it was not pushed yet.
    /// Nothing is recorded until `mark_announced`, so a snapshot that fails
    /// to load or to send comes back on the next poll.
    pub fn poll(&self, feed: &Feed) -> Result<Option<Announcement>, SnitchError> {
        let latest = feed.latest_path()?;
        if self.last_seen.as_ref() == Some(&latest) {
            return Ok(None);
        }
        debug!("Candidate {} snapshot: {}", feed.kind.label(), latest.display());
        let snapshot: EloSnapshot = load_snapshot(&latest)?;
        let text = match snapshot.message {
            Some(ref message) if !message.trim().is_empty() => message.clone(),
            _ => format_top_changes(&snapshot),
        };
        Ok(Some(Announcement { path: latest, text }))
    }

    pub fn mark_announced(&mut self, announcement: Announcement) {
        info!("Announced snapshot {}", announcement.path.display());
        self.last_seen = Some(announcement.path);
    }
}

async fn check_for_update(
    dispatcher: &Dispatcher,
    relay: &Relay,
    watcher: &mut FeedWatcher,
) -> Result<(), crate::BoxError> {
    if let Some(announcement) = watcher.poll(&dispatcher.storage().elo)? {
        relay.send(&announcement.text).await?;
        watcher.mark_announced(announcement);
    }
    Ok(())
}

pub fn spawn_worker(
    dispatcher: Arc<Dispatcher>,
    relay: Arc<Relay>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut watcher = FeedWatcher::starting_at(&dispatcher.storage().elo);
        loop {
            tokio::time::sleep(interval).await;
            match check_for_update(&dispatcher, &relay, &mut watcher).await {
                Ok(()) => (),
                Err(e) => warn!(
                    "Error ({}) occured while relaying ELO changes. Retry in {:?}.",
                    e, interval
                ),
            };
        }
    })
}
