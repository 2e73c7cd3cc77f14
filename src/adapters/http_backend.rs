//! Reqwest-based command backend.
//!
//! Talks JSON to the project API:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | execute | `POST {base}/sessions/{id}/commands` with `{"command": ...}` |
//! | history | `GET {base}/sessions/{id}/history?limit=N` |
//! | clear history | `DELETE {base}/sessions/{id}/history` |

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ExecutorError;
use crate::models::{CommandRequest, CommandResult, HistoryResponse};
use crate::traits::CommandBackend;

/// Error body returned by the API on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "message")]
    error: String,
}

/// [`CommandBackend`] over HTTP.
///
/// The per-command timeout is enforced by the session, not here, so a
/// slow command is reported the same way for every backend.
#[derive(Debug, Clone)]
pub struct HttpCommandBackend {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpCommandBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Use a preconfigured client (proxies, TLS roots, connect timeout).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
        }
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn session_url(&self, session_id: &str, tail: &str) -> String {
        format!(
            "{}/sessions/{}/{}",
            self.base_url,
            urlencoding::encode(session_id),
            tail
        )
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Turn a non-success response into an [`ExecutorError::Server`].
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ExecutorError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| body.trim().to_string());
        Err(ExecutorError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl CommandBackend for HttpCommandBackend {
    async fn execute_command(
        &self,
        session_id: &str,
        command: &str,
    ) -> Result<CommandResult, ExecutorError> {
        let url = self.session_url(session_id, "commands");
        tracing::debug!("POST {}", url);
        let response = self
            .authorize(self.client.post(&url))
            .json(&CommandRequest { command })
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<CommandResult>().await?)
    }

    async fn fetch_command_history(
        &self,
        session_id: &str,
        limit: usize,
    ) -> Result<Vec<String>, ExecutorError> {
        let url = self.session_url(session_id, "history");
        tracing::debug!("GET {}", url);
        let response = self
            .authorize(self.client.get(&url))
            .query(&[("limit", limit)])
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let history = response.json::<HistoryResponse>().await?;
        Ok(history.commands.into_iter().take(limit).collect())
    }

    async fn clear_command_history(&self, session_id: &str) -> Result<(), ExecutorError> {
        let url = self.session_url(session_id, "history");
        tracing::debug!("DELETE {}", url);
        let response = self.authorize(self.client.delete(&url)).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let backend = HttpCommandBackend::new("http://localhost:8080/api/");
        assert_eq!(backend.base_url(), "http://localhost:8080/api");
        assert_eq!(
            backend.session_url("abc", "commands"),
            "http://localhost:8080/api/sessions/abc/commands"
        );
    }

    #[test]
    fn test_session_id_is_encoded() {
        let backend = HttpCommandBackend::new("http://h");
        assert_eq!(
            backend.session_url("a b/c", "history"),
            "http://h/sessions/a%20b%2Fc/history"
        );
    }
}
