//! Telegram delivery for the rendered report
//!
//! Posts the report text to a chat through the Telegram Bot API. Delivery
//! failures are recoverable: the caller logs them and the run still
//! succeeds, since the report is always printed to standard output first.

use crate::KayakError;
use crate::config::DeliveryConfig;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Request body for the Bot API `sendMessage` method
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Notifier that posts the report to a Telegram chat
pub struct TelegramNotifier<'a> {
    /// HTTP client
    client: Client,
    /// Delivery configuration (token, chat, endpoint)
    config: &'a DeliveryConfig,
}

impl<'a> TelegramNotifier<'a> {
    /// Create a new notifier from the delivery configuration
    pub fn new(config: &'a DeliveryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("MallorKayak/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client for delivery")?;

        Ok(Self { client, config })
    }

    /// Send the report text as one Markdown-formatted message
    pub async fn send_report(&self, text: &str) -> Result<()> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.config.api_base.trim_end_matches('/'),
            self.config.bot_token
        );

        let body = SendMessageRequest {
            chat_id: &self.config.chat_id,
            text,
            parse_mode: "Markdown",
        };

        debug!("Posting report ({} chars) to Telegram", text.len());

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .with_context(|| "Failed to reach the Telegram API")?;

        let status = response.status();
        if status.is_success() {
            info!("Report delivered to Telegram chat");
            Ok(())
        } else {
            let detail = response.text().await.unwrap_or_default();
            Err(KayakError::delivery(format!(
                "Telegram API returned {status}: {detail}"
            ))
            .into())
        }
    }
}
