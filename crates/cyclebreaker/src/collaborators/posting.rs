use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::provider::{ChatMessage, ProviderChain};
use super::{strip_code_fences, CollaboratorError};
use crate::guard;

const SYSTEM_PROMPT: &str =
    "You analyze job postings for scam risk in South Africa. Respond with a strict JSON object.";

const SHAPE_HINT: &str = "{risk_score: 0-1, risk_level: \"low|medium|high\", flags: [string], \
confidence: 0-1, explanation: string}";

/// The parts of a job posting shown to the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostingDetails {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingRisk {
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub flags: Vec<String>,
    pub confidence: f64,
    #[serde(default)]
    pub explanation: String,
}

impl PostingRisk {
    /// Low-confidence verdict used when the model reply cannot be read.
    pub fn fallback() -> Self {
        Self {
            risk_score: 0.3,
            risk_level: RiskLevel::Low,
            flags: Vec::new(),
            confidence: 0.4,
            explanation: "Fallback: could not parse model output".to_string(),
        }
    }

    fn clamped(mut self) -> Self {
        self.risk_score = clamp_unit(self.risk_score);
        self.confidence = clamp_unit(self.confidence);
        self
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Asks the provider chain whether a job posting looks like a scam.
#[derive(Debug, Clone)]
pub struct PostingRiskAnalyzer {
    chain: ProviderChain,
}

impl PostingRiskAnalyzer {
    pub fn new(chain: ProviderChain) -> Self {
        Self { chain }
    }

    /// Provider failures are errors; an unreadable reply yields
    /// [`PostingRisk::fallback`].
    pub fn analyze(&self, posting: &PostingDetails) -> Result<PostingRisk, CollaboratorError> {
        guard::validate_posting(posting)?;

        let messages = [
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Analyze this job posting for scam indicators and return JSON shaped like \
                 {SHAPE_HINT}.\nTitle: {}\nOrganization: {}\nDescription: {}",
                posting.title.trim(),
                posting.organization.trim(),
                posting.description.trim()
            )),
        ];
        let completion = self.chain.complete(&messages)?;

        match serde_json::from_str::<PostingRisk>(strip_code_fences(&completion.content)) {
            Ok(risk) => {
                let risk = risk.clamped();
                info!(provider = %completion.provider, level = ?risk.risk_level, "posting risk assessed");
                Ok(risk)
            }
            Err(err) => {
                warn!(provider = %completion.provider, error = %err, "posting risk reply unreadable");
                Ok(PostingRisk::fallback())
            }
        }
    }
}
