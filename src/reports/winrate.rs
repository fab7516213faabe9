use super::reports_utils::*;
use crate::types::{PlayerRecord, WinrateSnapshot};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;

pub const NO_WINRATE_DATA: &str = "No win rate data available!";
const TOP_BY_WINRATE: usize = 10;
const MOST_ACTIVE: usize = 5;

/// Aggregates over every tracked player, not just the displayed ones.
#[derive(Debug, Clone, PartialEq)]
pub struct WinrateSummary {
    pub players: usize,
    pub total_games: u64,
    /// Unweighted mean of the players' win rates.
    pub average_win_rate: f64,
}

impl WinrateSummary {
    pub fn compute(players: &[PlayerRecord]) -> Option<Self> {
        if players.is_empty() {
            return None;
        }
        let total_games = players.iter().map(|p| p.total_games() as u64).sum();
        let average_win_rate =
            players.iter().map(|p| p.win_rate).sum::<f64>() / players.len() as f64;
        Some(WinrateSummary {
            players: players.len(),
            total_games,
            average_win_rate,
        })
    }
}

/// Highest win rate first, more games played breaks ties.
pub fn rank_by_win_rate(players: &[PlayerRecord]) -> Vec<&PlayerRecord> {
    players
        .iter()
        .sorted_by(|a, b| {
            OrderedFloat(b.win_rate)
                .cmp(&OrderedFloat(a.win_rate))
                .then_with(|| b.total_games().cmp(&a.total_games()))
        })
        .collect()
}

/// Most games played first. Stable, so equal players keep snapshot order.
pub fn rank_by_activity(players: &[PlayerRecord]) -> Vec<&PlayerRecord> {
    players
        .iter()
        .sorted_by_key(|p| Reverse(p.total_games()))
        .collect()
}

fn tier_rank(player: &PlayerRecord) -> String {
    format!("{} {}", player.tier, player.rank).trim().to_string()
}

pub fn format_winrate(snapshot: &WinrateSnapshot) -> String {
    let players = match snapshot.changes.as_deref() {
        Some(players) if !players.is_empty() => players,
        _ => return NO_WINRATE_DATA.to_string(),
    };
    let top_players = rank_by_win_rate(players)
        .into_iter()
        .take(TOP_BY_WINRATE)
        .enumerate()
        .map(|(i, p)| {
            format!(
                "{}. {} - {} ({}% | {}W-{}L)",
                i + 1,
                p.summ_id,
                tier_rank(p),
                format_percent(p.win_rate),
                p.wins,
                p.losses
            )
        })
        .join("\n");
    let most_active = rank_by_activity(players)
        .into_iter()
        .take(MOST_ACTIVE)
        .enumerate()
        .map(|(i, p)| {
            format!(
                "{}. {} - {} games ({}%)",
                i + 1,
                p.summ_id,
                p.total_games(),
                format_percent(p.win_rate)
            )
        })
        .join("\n");
    let mut sections = vec![
        bold("WIN RATE LEADERBOARD"),
        format!("{}\n{}", bold("Top 10 Players by Win Rate"), top_players),
        format!("{}\n{}", bold("Most Active Players"), most_active),
    ];
    if let Some(summary) = WinrateSummary::compute(players) {
        sections.push(format!(
            "{}\nPlayers tracked: {}\nTotal games: {}\nAverage win rate: {:.2}%",
            bold("Summary"),
            summary.players,
            summary.total_games,
            summary.average_win_rate
        ));
    }
    if let Some(timestamp) = &snapshot.timestamp {
        sections.push(last_updated_line(timestamp));
    }
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(raw: &str) -> WinrateSnapshot {
        serde_json::from_str(raw).unwrap()
    }

    fn position(report: &str, section: &str, needle: &str) -> usize {
        let start = report.find(section).unwrap();
        start + report[start..].find(needle).unwrap()
    }

    #[test]
    fn ties_on_win_rate_prefer_more_games() {
        let snap = snapshot(
            r#"{"changes": [
                {"summ_id": "a", "win_rate": 60, "wins": 10, "losses": 5},
                {"summ_id": "b", "win_rate": 60, "wins": 20, "losses": 10}
            ]}"#,
        );
        let report = format_winrate(&snap);
        assert!(
            position(&report, "Top 10", "b - ") < position(&report, "Top 10", "a - ")
        );
        assert!(
            position(&report, "Most Active", "b - ") < position(&report, "Most Active", "a - ")
        );
        assert!(report.contains("Average win rate: 60.00%"));
        assert!(report.contains("Total games: 45"));
        assert!(report.contains("Players tracked: 2"));
    }

    #[test]
    fn full_report_layout() {
        let snap = snapshot(
            r#"{
                "timestamp": "2025-07-20_21-52-54",
                "changes": [
                    {"summ_id": "low", "tier": "SILVER", "rank": "II", "win_rate": 40.5, "wins": 17, "losses": 25},
                    {"summ_id": "high", "tier": "GOLD", "rank": "I", "win_rate": 70, "wins": 7, "losses": 3},
                    {"summ_id": "master", "tier": "MASTER", "rank": "", "win_rate": 55.25, "wins": 100, "losses": 81}
                ]
            }"#,
        );
        let expected = "*WIN RATE LEADERBOARD*\n\n\
                        *Top 10 Players by Win Rate*\n\
                        1. high - GOLD I (70% | 7W-3L)\n\
                        2. master - MASTER (55.25% | 100W-81L)\n\
                        3. low - SILVER II (40.5% | 17W-25L)\n\n\
                        *Most Active Players*\n\
                        1. master - 181 games (55.25%)\n\
                        2. low - 42 games (40.5%)\n\
                        3. high - 10 games (70%)\n\n\
                        *Summary*\n\
                        Players tracked: 3\n\
                        Total games: 233\n\
                        Average win rate: 55.25%\n\n\
                        _Last updated: 2025/07/20 21:52:54_";
        assert_eq!(format_winrate(&snap), expected);
    }

    #[test]
    fn lists_are_truncated_but_summary_is_not() {
        let players = (0..12)
            .map(|i| {
                format!(
                    r#"{{"summ_id": "p{}", "win_rate": {}, "wins": {}, "losses": 1}}"#,
                    i,
                    i * 5,
                    i
                )
            })
            .join(",");
        let snap = snapshot(&format!(r#"{{"changes": [{}]}}"#, players));
        let report = format_winrate(&snap);
        assert!(report.contains("10. p2 - "));
        assert!(!report.contains("11. "));
        assert!(!report.contains("p1 - "));
        assert!(report.contains("5. p7 - 8 games"));
        assert!(report.contains("Players tracked: 12"));
        assert!(report.contains("Total games: 78"));
        assert!(report.contains("Average win rate: 27.50%"));
    }

    #[test]
    fn activity_ties_keep_snapshot_order() {
        let snap = snapshot(
            r#"{"changes": [
                {"summ_id": "first", "win_rate": 10, "wins": 1, "losses": 9},
                {"summ_id": "second", "win_rate": 90, "wins": 9, "losses": 1}
            ]}"#,
        );
        let players = snap.changes.as_deref().unwrap();
        let ids: Vec<&str> = rank_by_activity(players)
            .iter()
            .map(|p| p.summ_id.as_str())
            .collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn empty_winrate_snapshot() {
        assert_eq!(format_winrate(&snapshot(r#"{"changes": []}"#)), NO_WINRATE_DATA);
        assert_eq!(format_winrate(&WinrateSnapshot::default()), NO_WINRATE_DATA);
        assert_eq!(WinrateSummary::compute(&[]), None);
    }

    #[test]
    fn formatting_does_not_reorder_snapshot() {
        let snap = snapshot(
            r#"{"changes": [
                {"summ_id": "a", "win_rate": 10, "wins": 1, "losses": 9},
                {"summ_id": "b", "win_rate": 90, "wins": 90, "losses": 10}
            ]}"#,
        );
        let before = snap.clone();
        let first = format_winrate(&snap);
        assert_eq!(first, format_winrate(&snap));
        assert_eq!(snap, before);
    }
}
