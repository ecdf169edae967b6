use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
}

/// One turn of a chat-completion conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Chat-completion backend. Concrete HTTP clients live outside this crate.
pub trait ChatProvider: Send + Sync {
    fn name(&self) -> &str;
    fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{0} is not configured")]
    NotConfigured(String),
    #[error("{provider} request failed: {message}")]
    Request { provider: String, message: String },
    #[error("{0} returned no content")]
    EmptyResponse(String),
    #[error("no chat providers configured")]
    NoProviders,
    #[error("all chat providers failed: {}", .0.join("; "))]
    Exhausted(Vec<String>),
}

/// Completion text together with the provider that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub provider: String,
    pub content: String,
}

/// Ordered list of providers tried in turn until one answers.
#[derive(Clone, Default)]
pub struct ProviderChain {
    providers: Vec<Arc<dyn ChatProvider>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn ChatProvider>>) -> Self {
        Self { providers }
    }

    pub fn with(mut self, provider: Arc<dyn ChatProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|provider| provider.name()).collect()
    }

    /// Returns the first non-empty completion; when every provider fails the
    /// error lists each provider with its failure.
    pub fn complete(&self, messages: &[ChatMessage]) -> Result<Completion, ProviderError> {
        if self.providers.is_empty() {
            return Err(ProviderError::NoProviders);
        }

        let mut failures = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            let name = provider.name();
            let outcome = provider.complete(messages).and_then(|content| {
                if content.trim().is_empty() {
                    Err(ProviderError::EmptyResponse(name.to_string()))
                } else {
                    Ok(content)
                }
            });

            match outcome {
                Ok(content) => {
                    debug!(provider = name, "chat completion received");
                    return Ok(Completion {
                        provider: name.to_string(),
                        content,
                    });
                }
                Err(err) => {
                    warn!(provider = name, error = %err, "chat provider failed");
                    failures.push(format!("{name}: {err}"));
                }
            }
        }

        Err(ProviderError::Exhausted(failures))
    }
}

impl std::fmt::Debug for ProviderChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderChain")
            .field("providers", &self.names())
            .finish()
    }
}
