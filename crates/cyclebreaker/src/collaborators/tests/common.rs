use std::sync::{Arc, Mutex};

use crate::collaborators::{ChatMessage, ChatProvider, ProviderChain, ProviderError};

/// Provider that answers every request with a fixed reply and records what it
/// was asked.
pub(super) struct ScriptedProvider {
    name: String,
    reply: Result<String, String>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedProvider {
    pub(super) fn answering(name: &str, reply: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            reply: Ok(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(super) fn failing(name: &str, message: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            reply: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(super) fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().expect("requests mutex poisoned").clone()
    }
}

impl ChatProvider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .push(messages.to_vec());
        self.reply.clone().map_err(|message| ProviderError::Request {
            provider: self.name.clone(),
            message,
        })
    }
}

pub(super) fn chain_of(providers: &[Arc<ScriptedProvider>]) -> ProviderChain {
    ProviderChain::new(
        providers
            .iter()
            .map(|provider| provider.clone() as Arc<dyn ChatProvider>)
            .collect(),
    )
}

pub(super) const PROFILE_JSON: &str = r#"{
  "location": {"country_code": "ZA", "province_code": "GP", "municipality": "Soweto"},
  "economic": {"employment_status": "unemployed", "dependents_count": 2},
  "education_skills": {"skills": ["forklift", "customer service"]},
  "goals": {"primary_goal": "find_job"},
  "consent": {"terms_accepted_at": "2025-03-01T09:00:00Z", "consent_data_processing": true}
}"#;

pub(super) const OPPORTUNITY_JSON: &str = r#"{
  "id": "nsfas-2026",
  "title": "NSFAS bursary 2026",
  "category": "grant",
  "regions": ["ZA"],
  "eligibility_rules": [{"eq": [{"var": "demographics.citizenship_status"}, "citizen"]}],
  "provenance": {"extraction_method": "static_html", "last_seen_at": "2025-10-01T00:00:00Z"}
}"#;
