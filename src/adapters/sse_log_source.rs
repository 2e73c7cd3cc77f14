//! Log event subscription over Server-Sent Events.
//!
//! `GET {base}/sessions/{id}/logs` returns a `text/event-stream` whose
//! `log` (or unnamed) events carry one JSON [`LogEvent`](crate::models::LogEvent)
//! each. Payloads are forwarded to the session unparsed.
//!
//! A dropped stream is reopened with exponential backoff: 1s, 2s, 4s, ...
//! capped at `max_backoff`. A `retry:` hint from the server replaces the
//! base delay. The attempt counter resets once a connection delivers an
//! event.

use std::time::Duration;

use futures_util::StreamExt;
use tracing::{debug, info, warn};

use crate::error::StreamError;
use crate::sse::SseParser;
use crate::traits::{LogEventSource, LogSink, LogSubscription};

/// Reconnection policy for the log stream.
#[derive(Debug, Clone)]
pub struct SseLogSourceConfig {
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    /// Give up after this many consecutive failures. `None` retries forever.
    pub max_retries: Option<u32>,
}

impl Default for SseLogSourceConfig {
    fn default() -> Self {
        Self {
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
            max_retries: None,
        }
    }
}

/// Delay before reconnection attempt `attempt` (1-based).
pub fn backoff_delay(attempt: u32, base: Duration, max: Duration) -> Duration {
    let shift = attempt.saturating_sub(1).min(16);
    base.saturating_mul(1u32 << shift).min(max)
}

/// [`LogEventSource`] reading an SSE endpoint with reqwest.
#[derive(Debug, Clone)]
pub struct SseLogSource {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
    config: SseLogSourceConfig,
}

impl SseLogSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
            config: SseLogSourceConfig::default(),
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_config(mut self, config: SseLogSourceConfig) -> Self {
        self.config = config;
        self
    }

    fn logs_url(&self, session_id: &str) -> String {
        format!(
            "{}/sessions/{}/logs",
            self.base_url,
            urlencoding::encode(session_id)
        )
    }

    /// Hold one connection open, forwarding frames to `sink`.
    ///
    /// `Ok(())` means the session went away and the subscription should
    /// end. Any other outcome is an error, including a clean close.
    async fn stream_once(
        &self,
        url: &str,
        sink: &LogSink,
        parser: &mut SseParser,
        delivered: &mut bool,
    ) -> Result<(), StreamError> {
        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/event-stream");
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StreamError::Http {
                status: status.as_u16(),
            });
        }
        info!("Log stream connected: {}", url);

        parser.reset();
        let mut pending: Vec<u8> = Vec::new();
        let mut text = String::new();
        let mut bytes = response.bytes_stream();

        while let Some(chunk) = bytes.next().await {
            let chunk = chunk?;
            pending.extend_from_slice(&chunk);
            // Only decode through the last newline so multi-byte characters
            // split across chunks stay intact
            let Some(last_newline) = pending.iter().rposition(|b| *b == b'\n') else {
                continue;
            };
            let complete: Vec<u8> = pending.drain(..=last_newline).collect();
            for frame in parser.feed_chunk(&mut text, &String::from_utf8_lossy(&complete)) {
                match frame.event_type() {
                    "log" | "message" => {
                        *delivered = true;
                        if !sink.deliver(frame.data) {
                            return Ok(());
                        }
                    }
                    other => debug!("Ignoring log stream event type {}", other),
                }
            }
        }
        Err(StreamError::Closed)
    }

    async fn run(self, session_id: String, sink: LogSink) {
        let url = self.logs_url(&session_id);
        let mut parser = SseParser::new();
        let mut attempt: u32 = 0;

        loop {
            let mut delivered = false;
            let result = self
                .stream_once(&url, &sink, &mut parser, &mut delivered)
                .await;
            let err = match result {
                Ok(()) => {
                    debug!("Session for {} closed, ending log stream", session_id);
                    return;
                }
                Err(e) => e,
            };
            if sink.is_closed() {
                return;
            }
            if !err.should_reconnect() {
                warn!("Log stream for {} stopped: {}", session_id, err);
                return;
            }
            if delivered {
                attempt = 0;
            }
            attempt += 1;
            if self.config.max_retries.is_some_and(|max| attempt > max) {
                warn!(
                    "Log stream for {} failed {} times, giving up: {}",
                    session_id,
                    attempt - 1,
                    err
                );
                return;
            }

            let base = parser
                .retry_hint_ms()
                .map(Duration::from_millis)
                .unwrap_or(self.config.initial_backoff);
            let delay = backoff_delay(attempt, base, self.config.max_backoff);
            warn!(
                "Log stream for {} interrupted ({}), reconnecting in {:?} (attempt {})",
                session_id, err, delay, attempt
            );
            tokio::time::sleep(delay).await;
        }
    }
}

impl LogEventSource for SseLogSource {
    fn subscribe(&self, session_id: &str, sink: LogSink) -> LogSubscription {
        let source = self.clone();
        let session_id = session_id.to_string();
        LogSubscription::from_task(tokio::spawn(source.run(session_id, sink)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_and_caps() {
        let base = Duration::from_secs(1);
        let max = Duration::from_secs(30);
        assert_eq!(backoff_delay(1, base, max), Duration::from_secs(1));
        assert_eq!(backoff_delay(2, base, max), Duration::from_secs(2));
        assert_eq!(backoff_delay(3, base, max), Duration::from_secs(4));
        assert_eq!(backoff_delay(6, base, max), Duration::from_secs(30));
        assert_eq!(backoff_delay(200, base, max), Duration::from_secs(30));
    }

    #[test]
    fn test_logs_url() {
        let source = SseLogSource::new("http://localhost:9000/");
        assert_eq!(
            source.logs_url("s-1"),
            "http://localhost:9000/sessions/s-1/logs"
        );
    }
}
