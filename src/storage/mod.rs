pub mod locator;
use crate::error::SnitchError;
use crate::settings::Settings;
use locator::{JsonFiles, NameFilter, PatternFilter, SnapshotFilter, SnapshotLocator};
use regex::Regex;
use serde::de::DeserializeOwned;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumString};

/// Snapshot streams written by the rank tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum FeedKind {
    #[strum(serialize = "elo")]
    EloChanges,
    #[strum(serialize = "winrate")]
    Winrate,
}

impl FeedKind {
    /// Name used in replies and the fallback texts.
    pub fn label(self) -> &'static str {
        match self {
            FeedKind::EloChanges => "ELO changes",
            FeedKind::Winrate => "win rate",
        }
    }

    pub fn not_found_reply(self) -> String {
        format!("No {} data available!", self.label())
    }

    pub fn failure_reply(self) -> String {
        let label = match self {
            FeedKind::EloChanges => "ELO",
            FeedKind::Winrate => "win rate",
        };
        format!("Error processing {} data. Please try again later.", label)
    }
}

pub struct Feed {
    pub kind: FeedKind,
    pub root: PathBuf,
    locator: SnapshotLocator<SnapshotFilter>,
}

impl Feed {
    pub fn new(kind: FeedKind, root: PathBuf, filter: JsonFiles) -> Self {
        Feed::with_filter(kind, root, SnapshotFilter::Json(filter))
    }

    pub fn with_filter(kind: FeedKind, root: PathBuf, filter: SnapshotFilter) -> Self {
        Feed {
            kind,
            root,
            locator: SnapshotLocator::new(filter),
        }
    }

    #[cfg(test)]
    fn accepts(&self, name: &str) -> bool {
        self.locator.filter().accepts(name)
    }

    pub fn latest_path(&self) -> Result<PathBuf, SnitchError> {
        self.locator.locate(&self.root)
    }

    /// Re-reads the newest snapshot on every call, nothing is cached.
    pub fn load_latest<T: DeserializeOwned>(&self) -> Result<T, SnitchError> {
        let path = self.latest_path()?;
        load_snapshot(&path)
    }
}

pub fn load_snapshot<T: DeserializeOwned>(path: &Path) -> Result<T, SnitchError> {
    info!("Reading snapshot {}", path.display());
    let raw = read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Both feeds the bot answers from.
pub struct Storage {
    pub elo: Feed,
    pub winrate: Feed,
}

/// A configured pattern takes precedence over the `*.json` prefix filter.
fn filter_from_settings(
    pattern: &Option<String>,
    prefix: &Option<String>,
) -> Result<SnapshotFilter, regex::Error> {
    Ok(match pattern {
        Some(pattern) => SnapshotFilter::Pattern(PatternFilter(Regex::new(pattern)?)),
        None => SnapshotFilter::Json(JsonFiles {
            prefix: prefix.clone(),
        }),
    })
}

impl Storage {
    pub fn from_settings(settings: &Settings) -> Result<Self, regex::Error> {
        Ok(Storage {
            elo: Feed::with_filter(
                FeedKind::EloChanges,
                settings.elo_changes_dir.clone(),
                filter_from_settings(&settings.elo_file_pattern, &settings.elo_file_prefix)?,
            ),
            winrate: Feed::with_filter(
                FeedKind::Winrate,
                settings.winrate_dir.clone(),
                filter_from_settings(
                    &settings.winrate_file_pattern,
                    &settings.winrate_file_prefix,
                )?,
            ),
        })
    }

    pub fn feed(&self, kind: FeedKind) -> &Feed {
        match kind {
            FeedKind::EloChanges => &self.elo,
            FeedKind::Winrate => &self.winrate,
        }
    }
}
