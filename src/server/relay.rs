use crate::settings::Settings;
use crate::BoxError;
use serde::Serialize;
use std::future::Future;
use tokio::time::{sleep, Duration};

pub const STARTUP_ATTEMPTS: u32 = 3;
pub const STARTUP_RETRY_DELAY: Duration = Duration::from_secs(2);

#[derive(Serialize)]
struct OutgoingMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Pushes messages to the group chat through the chat gateway.
pub struct Relay {
    client: reqwest::Client,
    gateway_url: String,
    chat_id: String,
}

impl Relay {
    pub fn new(gateway_url: String, chat_id: String) -> Self {
        Relay {
            client: reqwest::Client::new(),
            gateway_url,
            chat_id,
        }
    }

    pub fn from_settings(settings: &Settings) -> Option<Self> {
        match (&settings.gateway_url, &settings.group_chat_id) {
            (Some(url), Some(chat_id)) => Some(Relay::new(url.clone(), chat_id.clone())),
            (Some(_), None) => {
                warn!("gateway_url is set but group_chat_id is missing.");
                None
            }
            _ => None,
        }
    }

    pub async fn send(&self, text: &str) -> Result<(), BoxError> {
        self.client
            .post(&self.gateway_url)
            .json(&OutgoingMessage {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await?
            .error_for_status()?;
        info!("Message sent to {}.", self.chat_id);
        Ok(())
    }

    pub async fn send_with_retry(
        &self,
        text: &str,
        attempts: u32,
        delay: Duration,
    ) -> Result<(), BoxError> {
        retry(attempts, delay, || self.send(text)).await
    }
}

/// Runs `operation` up to `attempts` times, sleeping `delay` between failures.
pub async fn retry<T, F, Fut>(attempts: u32, delay: Duration, mut operation: F) -> Result<T, BoxError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, BoxError>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(res) => return Ok(res),
            Err(e) if attempt < attempts => {
                warn!(
                    "Attempt {}/{} failed: {}. Retrying in {:?}.",
                    attempt, attempts, e, delay
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn retry_stops_after_success() {
        let calls = AtomicU32::new(0);
        let res = retry(3, Duration::from_millis(1), || {
            let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if call < 2 {
                    Err(BoxError::from("gateway unavailable"))
                } else {
                    Ok(call)
                }
            }
        })
        .await;
        assert_eq!(res.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn retry_gives_up_after_last_attempt() {
        let calls = AtomicU32::new(0);
        let res: Result<(), BoxError> = retry(STARTUP_ATTEMPTS, Duration::from_millis(1), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(BoxError::from("gateway unavailable")) }
        })
        .await;
        assert!(res.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn unreachable_gateway_fails() {
        let relay = Relay::new("http://127.0.0.1:9/send".to_string(), "group".to_string());
        let res = relay
            .send_with_retry("test", 2, Duration::from_millis(1))
            .await;
        assert!(res.is_err());
    }

    #[test]
    fn relay_needs_url_and_chat() {
        let config = crate::settings::build_config("this-settings-file-does-not-exist").unwrap();
        let mut settings = Settings::from_config(&config).unwrap();
        assert!(Relay::from_settings(&settings).is_none());
        settings.gateway_url = Some("http://localhost:3000/send".to_string());
        assert!(Relay::from_settings(&settings).is_none());
        settings.group_chat_id = Some("1203630@g.us".to_string());
        assert!(Relay::from_settings(&settings).is_some());
    }
}
