use super::common::*;
use crate::collaborators::{CollaboratorError, OpportunityExtractor};
use crate::domain::OpportunityCategory;

const PAGE: &str = "<h1>NSFAS bursary 2026</h1><p>Apply before 31 January.</p>";
const URL: &str = "https://www.nsfas.org.za/content/bursary";

#[test]
fn missing_source_url_is_filled_from_the_request() {
    let extractor =
        OpportunityExtractor::new(chain_of(&[ScriptedProvider::answering("nvidia", OPPORTUNITY_JSON)]));

    let opportunity = extractor
        .extract(PAGE, URL)
        .expect("extraction runs")
        .expect("opportunity found");

    assert_eq!(opportunity.id, "nsfas-2026");
    assert_eq!(opportunity.category, OpportunityCategory::Grant);
    assert_eq!(opportunity.source_url, URL);
    assert_eq!(opportunity.eligibility_rules.len(), 1);
}

#[test]
fn reported_source_url_is_kept() {
    let reply = OPPORTUNITY_JSON.replacen(
        "\"id\"",
        "\"source_url\": \"https://example.org/listing\", \"id\"",
        1,
    );
    let extractor =
        OpportunityExtractor::new(chain_of(&[ScriptedProvider::answering("nvidia", &reply)]));

    let opportunity = extractor
        .extract(PAGE, URL)
        .expect("extraction runs")
        .expect("opportunity found");

    assert_eq!(opportunity.source_url, "https://example.org/listing");
}

#[test]
fn literal_null_means_nothing_found() {
    let extractor = OpportunityExtractor::new(chain_of(&[ScriptedProvider::answering(
        "nvidia",
        "```json\nnull\n```",
    )]));

    assert_eq!(extractor.extract(PAGE, URL).expect("extraction runs"), None);
}

#[test]
fn malformed_opportunity_is_dropped() {
    let extractor = OpportunityExtractor::new(chain_of(&[ScriptedProvider::answering(
        "nvidia",
        r#"{"id": "x", "title": "Untitled", "category": "raffle"}"#,
    )]));

    assert_eq!(extractor.extract(PAGE, URL).expect("extraction runs"), None);
}

#[test]
fn unparseable_reply_is_an_error() {
    let extractor = OpportunityExtractor::new(chain_of(&[ScriptedProvider::answering(
        "unlimited",
        "I could not find anything.",
    )]));

    let err = extractor.extract(PAGE, URL).expect_err("not JSON");
    assert!(matches!(err, CollaboratorError::InvalidJson { .. }));
}

#[test]
fn prompt_carries_the_page_and_url() {
    let provider = ScriptedProvider::answering("nvidia", "null");
    let extractor = OpportunityExtractor::new(chain_of(&[provider.clone()]));

    extractor.extract(PAGE, URL).expect("extraction runs");

    let prompt = &provider.requests()[0][1].content;
    assert!(prompt.contains(&format!("URL: {URL}")));
    assert!(prompt.ends_with(PAGE));
}
