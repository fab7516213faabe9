//! Latest-snapshot lookup and chat report rendering for ranked ladder feeds.
#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;

pub mod commands;
pub mod error;
pub mod reports;
pub mod server;
pub mod settings;
pub mod storage;
pub mod timestamp;
pub mod types;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
