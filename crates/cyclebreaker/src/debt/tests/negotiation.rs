use crate::debt::{
    negotiation_templates, ArrearsState, Channel, LenderType, NegotiationGoal,
    NegotiationTemplateRequest, Tone,
};

#[test]
fn default_request_is_a_polite_payment_plan() {
    let response = negotiation_templates(&NegotiationTemplateRequest::default());

    let channels: Vec<Channel> = response
        .templates
        .iter()
        .map(|template| template.channel)
        .collect();
    assert_eq!(channels, vec![Channel::Sms, Channel::Whatsapp, Channel::Email]);
    assert_eq!(
        response.templates[0].message,
        "Hi, I would like to discuss my account. Due to hardship, I propose a more affordable plan. \
         I propose a lower monthly payment for the next 3 months, with review after."
    );
    assert!(response.templates.iter().all(|template| template.notes.is_none()));
}

#[test]
fn arrears_and_goal_clauses_are_combined() {
    let request = NegotiationTemplateRequest {
        lender_type: LenderType::MicroLender,
        arrears_state: ArrearsState::From31To90Days,
        goal: NegotiationGoal::ReduceInterest,
        tone: Tone::Formal,
    };

    let response = negotiation_templates(&request);

    assert_eq!(
        response.templates[0].message,
        "Good day, I would like to discuss my account. Due to hardship, I propose a more affordable plan. \
         I am 31–90 days behind. Please consider a reduced interest rate so I can stay on track."
    );
}

#[test]
fn email_adds_a_sign_off() {
    let request = NegotiationTemplateRequest {
        tone: Tone::Direct,
        goal: NegotiationGoal::Dispute,
        arrears_state: ArrearsState::Over90Days,
        ..NegotiationTemplateRequest::default()
    };

    let response = negotiation_templates(&request);
    let email = &response.templates[2];

    assert!(email.message.starts_with("Hello, "));
    assert!(email
        .message
        .contains(" I am over 90 days behind and need urgent help. "));
    assert!(email.message.ends_with("statement breakdown.\n\nRegards,"));
}

#[test]
fn mashonisa_whatsapp_carries_a_safety_note() {
    let request = NegotiationTemplateRequest {
        lender_type: LenderType::Mashonisa,
        arrears_state: ArrearsState::UpTo30Days,
        goal: NegotiationGoal::FeeWaiver,
        ..NegotiationTemplateRequest::default()
    };

    let response = negotiation_templates(&request);

    assert_eq!(
        response.templates[1].notes.as_deref(),
        Some("Be polite and prioritize safety in any in-person contact.")
    );
    assert!(response.templates[0].notes.is_none());
    assert!(response.templates[1]
        .message
        .contains("I am up to 30 days behind. Please waive initiation/late fees"));
}

#[test]
fn request_fields_default_when_absent() {
    let request: NegotiationTemplateRequest =
        serde_json::from_str(r#"{"arrearsState": "7_30_days"}"#).expect("request");

    assert_eq!(request.arrears_state, ArrearsState::UpTo30Days);
    assert_eq!(request.goal, NegotiationGoal::PaymentPlan);
    assert_eq!(request.tone, Tone::Polite);
    assert_eq!(request.lender_type, LenderType::Other);
}
