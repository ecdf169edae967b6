use serde_json::Value;
use tracing::debug;

use super::provider::{ChatMessage, ProviderChain};
use super::{strip_code_fences, CollaboratorError};
use crate::domain::Opportunity;

const SYSTEM_PROMPT: &str = "You extract structured opportunity records for a South African \
jobs, grants, training and services finder. Respond only with JSON.";

const SHAPE_HINT: &str = "{id, title, category: \"job|training|grant|service\", organization?, \
regions: [string], value_amount?, value_currency? = \"ZAR\", deadline?, required_documents?, \
eligibility_rules: [json-logic], source_url, apply_url?, provenance: {extraction_method: \
\"manual_curated|static_html|api\", evidence_links?, last_seen_at, last_verified_at?, \
freshness_score?}}";

/// Turns a scraped HTML snippet into at most one `Opportunity`.
#[derive(Debug, Clone)]
pub struct OpportunityExtractor {
    chain: ProviderChain,
}

impl OpportunityExtractor {
    pub fn new(chain: ProviderChain) -> Self {
        Self { chain }
    }

    /// `Ok(None)` when the model answers `null` or returns an object that is
    /// not a valid opportunity.
    pub fn extract(
        &self,
        html: &str,
        source_url: &str,
    ) -> Result<Option<Opportunity>, CollaboratorError> {
        let messages = [
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "From the following HTML snippet and URL, extract one opportunity JSON object \
                 shaped like {SHAPE_HINT}. If unsure, return null.\nURL: {source_url}\nHTML:\n{html}"
            )),
        ];
        let completion = self.chain.complete(&messages)?;

        let mut value: Value = serde_json::from_str(strip_code_fences(&completion.content))
            .map_err(|source| CollaboratorError::InvalidJson {
                provider: completion.provider.clone(),
                source,
            })?;

        if value.is_null() {
            return Ok(None);
        }

        if let Value::Object(fields) = &mut value {
            let has_source = fields
                .get("source_url")
                .and_then(Value::as_str)
                .is_some_and(|url| !url.trim().is_empty());
            if !has_source {
                fields.insert(
                    "source_url".to_string(),
                    Value::String(source_url.to_string()),
                );
            }
        }

        match serde_json::from_value::<Opportunity>(value) {
            Ok(opportunity) => Ok(Some(opportunity)),
            Err(err) => {
                debug!(provider = %completion.provider, error = %err, source_url, "extracted object is not an opportunity");
                Ok(None)
            }
        }
    }
}
