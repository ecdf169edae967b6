use super::common::*;
use crate::collaborators::{
    ChatRole, CollaboratorError, PostingDetails, PostingRisk, PostingRiskAnalyzer, ProviderError,
    RiskLevel,
};
use crate::guard::ValidationError;

fn posting() -> PostingDetails {
    PostingDetails {
        title: "Data capturer, work from home".to_string(),
        organization: "QuickCash Recruiters".to_string(),
        description: "Pay a R350 registration fee to start earning R15 000 a week.".to_string(),
    }
}

#[test]
fn model_verdict_is_returned_within_bounds() {
    let provider = ScriptedProvider::answering(
        "nvidia",
        "```json\n{\"risk_score\": 1.4, \"risk_level\": \"high\", \"flags\": [\"upfront fee\"], \
         \"confidence\": 0.9, \"explanation\": \"Asks for a registration fee.\"}\n```",
    );
    let analyzer = PostingRiskAnalyzer::new(chain_of(&[provider.clone()]));

    let risk = analyzer.analyze(&posting()).expect("analysis runs");

    assert_eq!(risk.risk_level, RiskLevel::High);
    assert_eq!(risk.risk_score, 1.0);
    assert_eq!(risk.confidence, 0.9);
    assert_eq!(risk.flags, vec!["upfront fee".to_string()]);

    let requests = provider.requests();
    assert_eq!(requests[0][0].role, ChatRole::System);
    assert!(requests[0][1].content.contains("Title: Data capturer, work from home"));
    assert!(requests[0][1].content.contains("Organization: QuickCash Recruiters"));
}

#[test]
fn unreadable_reply_falls_back_to_low_confidence() {
    let analyzer = PostingRiskAnalyzer::new(chain_of(&[ScriptedProvider::answering(
        "nvidia",
        "This posting looks suspicious.",
    )]));

    let risk = analyzer.analyze(&posting()).expect("analysis runs");

    assert_eq!(risk, PostingRisk::fallback());
    assert_eq!(risk.risk_level, RiskLevel::Low);
}

#[test]
fn empty_posting_never_reaches_a_provider() {
    let provider = ScriptedProvider::answering("nvidia", "{}");
    let analyzer = PostingRiskAnalyzer::new(chain_of(&[provider.clone()]));

    let err = analyzer
        .analyze(&PostingDetails::default())
        .expect_err("nothing to analyze");

    assert!(matches!(err, CollaboratorError::Validation(ValidationError::EmptyPosting)));
    assert!(provider.requests().is_empty());
}

#[test]
fn provider_failures_are_reported() {
    let analyzer = PostingRiskAnalyzer::new(chain_of(&[ScriptedProvider::failing(
        "nvidia",
        "timeout",
    )]));

    let err = analyzer.analyze(&posting()).expect_err("provider down");

    assert!(matches!(err, CollaboratorError::Provider(ProviderError::Exhausted(_))));
}
