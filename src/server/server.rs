use crate::commands::{Command, Dispatcher};
use crate::server::feed_watcher;
use crate::server::health_routes::{health, start, stop};
use crate::server::relay::{Relay, STARTUP_ATTEMPTS, STARTUP_RETRY_DELAY};
use crate::settings::Settings;
use crate::BoxError;
use rocket::figment::Figment;
use rocket::http::Status;
use rocket::{get, post, routes, Build, Rocket, State};
use std::sync::Arc;
use tokio::time::Duration;

/// Chat gateway webhook: the body is the raw message text.
#[post("/message", data = "<text>")]
fn message(text: String, dispatcher: &State<Arc<Dispatcher>>) -> Result<String, Status> {
    match dispatcher.handle_message(&text) {
        Some(reply) => Ok(reply),
        None => {
            debug!("Ignoring message: {}", text);
            Err(Status::NoContent)
        }
    }
}

/// Same replies as the chat commands, addressed without the leading `!`.
#[get("/report/<command>")]
fn report(command: &str, dispatcher: &State<Arc<Dispatcher>>) -> Option<String> {
    let command = Command::parse(&format!("!{}", command))?;
    Some(dispatcher.execute(command))
}

pub fn build_rocket(dispatcher: Arc<Dispatcher>, figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .mount("/snitch", routes![message, report, start, stop, health])
        .manage(dispatcher)
}

fn announce_startup(relay: Arc<Relay>, startup_message: String) {
    tokio::spawn(async move {
        match relay
            .send_with_retry(&startup_message, STARTUP_ATTEMPTS, STARTUP_RETRY_DELAY)
            .await
        {
            Ok(()) => info!("Startup message sent."),
            Err(e) => error!("Unable to send startup message: {}", e),
        }
    });
}

pub async fn run(dispatcher: Dispatcher, settings: &Settings) -> Result<(), BoxError> {
    let dispatcher = Arc::new(dispatcher);
    let watcher = match Relay::from_settings(settings) {
        Some(relay) => {
            let relay = Arc::new(relay);
            announce_startup(relay.clone(), settings.startup_message.clone());
            Some(feed_watcher::spawn_worker(
                dispatcher.clone(),
                relay,
                Duration::from_secs(settings.watch_interval_secs),
            ))
        }
        None => {
            info!("No chat gateway configured. Relaying is disabled.");
            None
        }
    };
    let figment = rocket::Config::figment()
        .merge(("address", settings.server_address.clone()))
        .merge(("port", settings.server_port));
    let launched = build_rocket(dispatcher, figment).launch().await;
    if let Some(watcher) = watcher {
        watcher.abort();
    }
    launched.map_err(|e| format!("Server failed: {}", e))?;
    Ok(())
}
