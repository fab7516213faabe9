pub mod reports_utils;
pub mod elo;
pub mod winrate;

pub use elo::{format_full_changes, format_top_changes, QueueGroups};
pub use winrate::{format_winrate, WinrateSummary};
