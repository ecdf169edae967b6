//! Seams for the language-model collaborators: profile suggestion from free
//! text, opportunity extraction from scraped HTML and scam-risk checks on
//! job postings.

mod extract;
mod posting;
mod provider;
mod suggest;

#[cfg(test)]
mod tests;

pub use extract::OpportunityExtractor;
pub use posting::{PostingDetails, PostingRisk, PostingRiskAnalyzer, RiskLevel};
pub use provider::{ChatMessage, ChatProvider, ChatRole, Completion, ProviderChain, ProviderError};
pub use suggest::ProfileSuggestionService;

use crate::guard::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("{provider} could not produce valid JSON: {source}")]
    InvalidJson {
        provider: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("generated profile did not match the profile shape: {source}")]
    ProfileShape {
        #[source]
        source: serde_json::Error,
    },
}

/// Removes a surrounding Markdown code fence (```` ```json ```` or bare ```` ``` ````).
pub(crate) fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    body.strip_suffix("```").unwrap_or(body).trim()
}
