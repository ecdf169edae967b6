use tracing::info;

use super::provider::{ChatMessage, ProviderChain};
use super::{strip_code_fences, CollaboratorError};
use crate::domain::UserProfile;
use crate::guard::validate_description;

const SYSTEM_PROMPT: &str = "You turn a short free-text description of someone's circumstances \
into a structured user profile for a South African opportunity finder.\n\
- Respond with a single JSON object and nothing else.\n\
- Use snake_case keys and only the enumerated values of the profile schema.\n\
- Leave a section out when the description says nothing about it.\n\
- Never invent identifiers or other personal data.\n\
- Use ISO 3166 alpha-2 country codes (ZA for South Africa).";

/// Builds a draft `UserProfile` from free text through the provider chain.
#[derive(Debug, Clone)]
pub struct ProfileSuggestionService {
    chain: ProviderChain,
}

impl ProfileSuggestionService {
    pub fn new(chain: ProviderChain) -> Self {
        Self { chain }
    }

    pub fn suggest(&self, description: &str) -> Result<UserProfile, CollaboratorError> {
        let description = validate_description(description)?;

        let messages = [
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Create a user profile JSON from this description.\n\nDescription:\n{description}\n\nReturn only JSON."
            )),
        ];
        let completion = self.chain.complete(&messages)?;

        let value: serde_json::Value = serde_json::from_str(strip_code_fences(&completion.content))
            .map_err(|source| CollaboratorError::InvalidJson {
                provider: completion.provider.clone(),
                source,
            })?;
        let profile = serde_json::from_value(value)
            .map_err(|source| CollaboratorError::ProfileShape { source })?;

        info!(provider = %completion.provider, "profile suggestion parsed");
        Ok(profile)
    }
}
