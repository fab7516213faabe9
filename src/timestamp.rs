use crate::error::SnitchError;
use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer};
use std::fmt;

const SNAPSHOT_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
const DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Capture time of a snapshot, written by the producer as `YYYY-MM-DD_HH-MM-SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SnapshotTimestamp(NaiveDateTime);

impl SnapshotTimestamp {
    pub fn parse(raw: &str) -> Result<Self, SnitchError> {
        // chrono accepts single digit fields, the producer never writes them.
        if raw.len() != "YYYY-MM-DD_HH-MM-SS".len() {
            return Err(SnitchError::Timestamp(raw.to_string()));
        }
        NaiveDateTime::parse_from_str(raw, SNAPSHOT_FORMAT)
            .map(SnapshotTimestamp)
            .map_err(|_| SnitchError::Timestamp(raw.to_string()))
    }
}

impl fmt::Display for SnapshotTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

impl<'de> Deserialize<'de> for SnapshotTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        SnapshotTimestamp::parse(&raw).map_err(de::Error::custom)
    }
}

/// Rewrites `YYYY-MM-DD_HH-MM-SS` as `YYYY/MM/DD HH:MM:SS`.
pub fn format_timestamp(raw: &str) -> Result<String, SnitchError> {
    Ok(SnapshotTimestamp::parse(raw)?.to_string())
}
