#[macro_use]
extern crate log;

use clap::{Parser, Subcommand};
use elosnitch::commands::Dispatcher;
use elosnitch::server;
use elosnitch::settings::Settings;
use elosnitch::storage::{FeedKind, Storage};
use elosnitch::BoxError;
use simplelog::{
    ColorChoice, CombinedLogger, LevelFilter, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::OpenOptions;
use std::str::FromStr;

/// Relays ranked ladder snapshots into a group chat.
#[derive(Parser)]
#[command(name = "elosnitch", version)]
struct Cli {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Run the webhook server and relay new ELO snapshots to the group chat.
    Serve,
    /// Print the reply a chat message would get, e.g. `!topelo`.
    Report { message: String },
    /// Print the path of the latest snapshot of a feed (`elo` or `winrate`).
    Locate { feed: FeedKind },
}

fn init_logger(settings: &Settings) -> Result<(), BoxError> {
    let level = LevelFilter::from_str(&settings.log_level)
        .map_err(|_| format!("Unknown log level: {}", settings.log_level))?;
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(log_file) = &settings.log_file {
        let file = OpenOptions::new().create(true).append(true).open(log_file)?;
        loggers.push(WriteLogger::new(level, simplelog::Config::default(), file));
    }
    CombinedLogger::init(loggers).map_err(|e| format!("Unable to set up logging: {}", e))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let settings = Settings::load()?;
    init_logger(&settings)?;
    let dispatcher = Dispatcher::new(Storage::from_settings(&settings)?);
    match cli.action {
        Action::Serve => server::run(dispatcher, &settings).await?,
        Action::Report { message } => match dispatcher.handle_message(&message) {
            Some(reply) => println!("{}", reply),
            None => warn!("{:?} is not a command.", message),
        },
        Action::Locate { feed } => {
            let path = dispatcher.storage().feed(feed).latest_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
