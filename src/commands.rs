use crate::error::SnitchError;
use crate::reports::{format_full_changes, format_top_changes, format_winrate};
use crate::storage::{Feed, FeedKind, Storage};
use crate::types::{EloSnapshot, WinrateSnapshot};
use serde::de::DeserializeOwned;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

pub const GREETING: &str = "Hello! I am a WhatsApp bot for League of Legends rank tracking.";

const GREETING_TRIGGERS: [&str; 2] = ["hello", "Hello"];

/// Chat commands, matched case-insensitively against the whole message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Command {
    #[strum(serialize = "!topelo")]
    TopElo,
    #[strum(to_string = "!elocheck", serialize = "!fullelo")]
    FullElo,
    #[strum(serialize = "!winrate")]
    Winrate,
    #[strum(serialize = "hello")]
    Greeting,
}

impl Command {
    /// Anything but an exact command token is ignored. The greeting only
    /// answers to `hello` and `Hello`.
    pub fn parse(text: &str) -> Option<Self> {
        match Command::from_str(text).ok()? {
            Command::Greeting if !GREETING_TRIGGERS.contains(&text) => None,
            command => Some(command),
        }
    }

    pub fn feed(self) -> Option<FeedKind> {
        match self {
            Command::TopElo | Command::FullElo => Some(FeedKind::EloChanges),
            Command::Winrate => Some(FeedKind::Winrate),
            Command::Greeting => None,
        }
    }
}

/// Answers chat commands from the snapshots on disk.
pub struct Dispatcher {
    storage: Storage,
}

impl Dispatcher {
    pub fn new(storage: Storage) -> Self {
        Dispatcher { storage }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Reply to a chat message, `None` if the message is not a command.
    pub fn handle_message(&self, text: &str) -> Option<String> {
        let command = Command::parse(text)?;
        info!("Received command {}", command);
        Some(self.execute(command))
    }

    pub fn execute(&self, command: Command) -> String {
        match command {
            Command::TopElo => {
                self.reply_from_feed(&self.storage.elo, |s: &EloSnapshot| format_top_changes(s))
            }
            Command::FullElo => {
                self.reply_from_feed(&self.storage.elo, |s: &EloSnapshot| format_full_changes(s))
            }
            Command::Winrate => {
                self.reply_from_feed(&self.storage.winrate, |s: &WinrateSnapshot| format_winrate(s))
            }
            Command::Greeting => GREETING.to_string(),
        }
    }

    fn reply_from_feed<T, R>(&self, feed: &Feed, render: R) -> String
    where
        T: DeserializeOwned,
        R: Fn(&T) -> String,
    {
        match feed.load_latest::<T>() {
            Ok(snapshot) => render(&snapshot),
            Err(e) => failure_reply(feed.kind, e),
        }
    }
}

fn failure_reply(kind: FeedKind, e: SnitchError) -> String {
    if e.is_not_found() {
        warn!("No {} snapshot: {}", kind.label(), e);
        kind.not_found_reply()
    } else {
        error!("Error processing {} snapshot: {}", kind.label(), e);
        kind.failure_reply()
    }
}
