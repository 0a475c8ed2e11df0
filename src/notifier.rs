use async_trait::async_trait;
use poise::serenity_prelude::{self as serenity, ChannelId, CreateMessage};
use std::sync::Arc;

use crate::constants::MAX_MESSAGE_LENGTH;
use crate::utils::messages::truncate_message;

/// Delivery failure reported by a notifier
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The bot was removed from, or blocked in, the conversation
    #[error("conversation {0} is no longer reachable: {1}")]
    Gone(ChannelId, String),

    #[error("failed to deliver to {0}: {1}")]
    Failed(ChannelId, String),
}

impl TransportError {
    pub fn is_gone(&self) -> bool {
        matches!(self, TransportError::Gone(..))
    }
}

/// Outbound side of the messaging transport
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, conversation: ChannelId, text: &str) -> Result<(), TransportError>;

    /// Show a typing indicator; transports without one do nothing
    async fn typing(&self, _conversation: ChannelId) -> Result<(), TransportError> {
        Ok(())
    }
}

/// Notifier backed by the Discord HTTP client
pub struct DiscordNotifier {
    http: Arc<serenity::Http>,
}

impl DiscordNotifier {
    pub fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn send(&self, conversation: ChannelId, text: &str) -> Result<(), TransportError> {
        let message = CreateMessage::new().content(truncate_message(text, MAX_MESSAGE_LENGTH));
        conversation
            .send_message(&self.http, message)
            .await
            .map(|_| ())
            .map_err(|e| classify_error(conversation, e))
    }

    async fn typing(&self, conversation: ChannelId) -> Result<(), TransportError> {
        conversation
            .broadcast_typing(&self.http)
            .await
            .map_err(|e| classify_error(conversation, e))
    }
}

/// Map a serenity error to a transport error, spotting removed/blocked channels
fn classify_error(conversation: ChannelId, error: serenity::Error) -> TransportError {
    let status = match &error {
        ::serenity::Error::Http(::serenity::http::HttpError::UnsuccessfulRequest(response)) => {
            Some(response.status_code.as_u16())
        }
        _ => None,
    };

    if status.is_some_and(is_gone_status) {
        TransportError::Gone(conversation, error.to_string())
    } else {
        TransportError::Failed(conversation, error.to_string())
    }
}

/// 403 Forbidden (missing access) or 404 Not Found (unknown channel)
fn is_gone_status(status: u16) -> bool {
    matches!(status, 403 | 404)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_gone_status() {
        assert!(is_gone_status(403));
        assert!(is_gone_status(404));
        assert!(!is_gone_status(429));
        assert!(!is_gone_status(500));
    }

    #[test]
    fn test_transport_error_is_gone() {
        let channel = ChannelId::new(1);
        assert!(TransportError::Gone(channel, "forbidden".into()).is_gone());
        assert!(!TransportError::Failed(channel, "timeout".into()).is_gone());
    }
}
