//! Outbound email relay
//!
//! The contact form hands one message per submission to an [`EmailRelay`].
//! The production relay posts to the EmailJS REST endpoint with the
//! service/template identifiers and public key embedded as configuration.
//! A response is either success or failure; its body is never read.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";
pub const DEFAULT_SERVICE_ID: &str = "service_289lmwf";
pub const DEFAULT_TEMPLATE_ID: &str = "template_39j91pm";
pub const DEFAULT_PUBLIC_KEY: &str = "7koHjymWC3bspJCOs";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("relay request failed: {0}")]
    Transport(String),
    #[error("relay responded with status {0}")]
    Status(u16),
}

/// The three form fields, named the way the relay template expects them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub from_name: String,
    pub reply_to: String,
    pub message: String,
}

/// Relay identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_service_id")]
    pub service_id: String,
    #[serde(default = "default_template_id")]
    pub template_id: String,
    #[serde(default = "default_public_key")]
    pub public_key: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_service_id() -> String {
    DEFAULT_SERVICE_ID.to_string()
}

fn default_template_id() -> String {
    DEFAULT_TEMPLATE_ID.to_string()
}

fn default_public_key() -> String {
    DEFAULT_PUBLIC_KEY.to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            service_id: default_service_id(),
            template_id: default_template_id(),
            public_key: default_public_key(),
        }
    }
}

/// Something that can deliver a contact message
#[async_trait]
pub trait EmailRelay: Send + Sync {
    /// Deliver one message. Exactly one attempt is made.
    async fn send(&self, message: &EmailMessage) -> Result<(), RelayError>;
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a EmailMessage,
}

/// EmailJS REST relay
#[derive(Debug, Clone)]
pub struct EmailJsRelay {
    client: Client,
    config: RelayConfig,
}

impl EmailJsRelay {
    pub fn new(config: RelayConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: RelayConfig, client: Client) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

#[async_trait]
impl EmailRelay for EmailJsRelay {
    async fn send(&self, message: &EmailMessage) -> Result<(), RelayError> {
        let request = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: message,
        };

        tracing::debug!(endpoint = %self.config.endpoint, "sending contact message");
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Status(status.as_u16()));
        }
        Ok(())
    }
}

/// In-memory relay for tests and headless runs. Clones share the outbox.
#[derive(Debug, Clone, Default)]
pub struct MemoryRelay {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    failing: Arc<Mutex<bool>>,
}

impl MemoryRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// A relay whose every send fails
    pub fn failing() -> Self {
        let relay = Self::new();
        relay.set_failing(true);
        relay
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap_or_else(PoisonError::into_inner) = failing;
    }

    /// Messages delivered so far
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl EmailRelay for MemoryRelay {
    async fn send(&self, message: &EmailMessage) -> Result<(), RelayError> {
        if *self.failing.lock().unwrap_or_else(PoisonError::into_inner) {
            return Err(RelayError::Transport("relay unavailable".to_string()));
        }
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn message() -> EmailMessage {
        EmailMessage {
            from_name: "Ada".to_string(),
            reply_to: "ada@example.com".to_string(),
            message: "Hello".to_string(),
        }
    }

    fn relay_for(server: &MockServer) -> EmailJsRelay {
        EmailJsRelay::new(RelayConfig {
            endpoint: format!("{}/api/v1.0/email/send", server.uri()),
            ..RelayConfig::default()
        })
    }

    #[test]
    fn test_default_config_is_literal() {
        let config: RelayConfig = toml::from_str("").unwrap();
        assert_eq!(config, RelayConfig::default());
        assert_eq!(config.service_id, "service_289lmwf");
        assert_eq!(config.template_id, "template_39j91pm");
        assert_eq!(config.public_key, "7koHjymWC3bspJCOs");
    }

    #[tokio::test]
    async fn test_posts_expected_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1.0/email/send"))
            .and(body_json(serde_json::json!({
                "service_id": "service_289lmwf",
                "template_id": "template_39j91pm",
                "user_id": "7koHjymWC3bspJCOs",
                "template_params": {
                    "from_name": "Ada",
                    "reply_to": "ada@example.com",
                    "message": "Hello"
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&server)
            .await;

        relay_for(&server).send(&message()).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("The user ID is invalid"))
            .expect(1)
            .mount(&server)
            .await;

        let err = relay_for(&server).send(&message()).await.unwrap_err();
        assert_eq!(err, RelayError::Status(400));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let relay = EmailJsRelay::new(RelayConfig {
            endpoint: "http://127.0.0.1:9/send".to_string(),
            ..RelayConfig::default()
        });
        let err = relay.send(&message()).await.unwrap_err();
        assert!(matches!(err, RelayError::Transport(_)));
    }

    #[tokio::test]
    async fn test_memory_relay() {
        let relay = MemoryRelay::new();
        relay.send(&message()).await.unwrap();
        assert_eq!(relay.sent(), vec![message()]);

        relay.set_failing(true);
        assert!(relay.send(&message()).await.is_err());
        assert_eq!(relay.sent().len(), 1);
    }
}
