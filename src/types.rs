use crate::timestamp::SnapshotTimestamp;
use serde::Deserialize;

pub type SummonerId = String;
pub type QueueName = String;

/// How a ladder move is emphasised in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Normal,
    Promoted,
    Demoted,
}

impl ChangeKind {
    /// Legacy producers only encode the kind inside the free-text description.
    pub fn from_description(change: &str) -> Self {
        if change.contains("PROMOTED") {
            ChangeKind::Promoted
        } else if change.contains("DEMOTED") {
            ChangeKind::Demoted
        } else {
            ChangeKind::Normal
        }
    }

    pub fn is_emphasised(self) -> bool {
        self != ChangeKind::Normal
    }
}

/// Single LP movement of a summoner in one queue.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChangeRecord {
    pub summ_id: SummonerId,
    pub tier: String,
    pub lp: i64,
    pub change: String,
    #[serde(default)]
    pub queue: QueueName,
    #[serde(default)]
    pub kind: Option<ChangeKind>,
}

impl ChangeRecord {
    pub fn kind(&self) -> ChangeKind {
        self.kind
            .unwrap_or_else(|| ChangeKind::from_description(&self.change))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EloSnapshot {
    #[serde(default)]
    pub top_changes: Option<Vec<ChangeRecord>>,
    #[serde(default)]
    pub changes: Option<Vec<ChangeRecord>>,
    #[serde(default)]
    pub timestamp: Option<SnapshotTimestamp>,
    /// Announcement pre-rendered by the producer.
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerRecord {
    pub summ_id: SummonerId,
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub rank: String,
    pub win_rate: f64,
    pub wins: u32,
    pub losses: u32,
}

impl PlayerRecord {
    pub fn total_games(&self) -> u32 {
        self.wins + self.losses
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WinrateSnapshot {
    #[serde(default)]
    pub changes: Option<Vec<PlayerRecord>>,
    #[serde(default)]
    pub timestamp: Option<SnapshotTimestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_kind_from_description_is_case_sensitive() {
        assert_eq!(
            ChangeKind::from_description("+20 LP - PROMOTED from SILVER to GOLD"),
            ChangeKind::Promoted
        );
        assert_eq!(
            ChangeKind::from_description("DEMOTED from GOLD to SILVER"),
            ChangeKind::Demoted
        );
        assert_eq!(ChangeKind::from_description("promoted"), ChangeKind::Normal);
        assert_eq!(ChangeKind::from_description("+12 LP"), ChangeKind::Normal);
    }

    #[test]
    fn explicit_kind_overrides_description() {
        let record: ChangeRecord = serde_json::from_str(
            r#"{"summ_id": "p1", "tier": "GOLD II", "lp": 10, "change": "PROMOTED-ish", "kind": "NORMAL"}"#,
        )
        .unwrap();
        assert_eq!(record.kind(), ChangeKind::Normal);
        assert_eq!(record.queue, "");
    }

    #[test]
    fn elo_snapshot_from_producer_output() {
        let snapshot: EloSnapshot = serde_json::from_str(
            r#"{
                "message": "*ELO CHANGES UPDATE*",
                "timestamp": "2025-07-20_21-52-54",
                "changes": [{"summ_id": "p1", "queue": "Flex Queue", "tier": "GOLD II", "lp": 40, "change": "+15 LP"}],
                "top_changes": [{"rank": 1, "summ_id": "p1", "queue": "Flex Queue", "tier": "GOLD II",
                                 "lp": 40, "change": "+15 LP", "absolute_change": 15}]
            }"#,
        )
        .unwrap();
        assert_eq!(snapshot.changes.unwrap().len(), 1);
        assert_eq!(snapshot.top_changes.unwrap()[0].lp, 40);
        assert_eq!(snapshot.timestamp.unwrap().to_string(), "2025/07/20 21:52:54");
    }

    #[test]
    fn elo_snapshot_with_bad_timestamp_is_rejected() {
        let res = serde_json::from_str::<EloSnapshot>(r#"{"timestamp": "2025-07-20"}"#);
        assert!(res.is_err());
    }
}
