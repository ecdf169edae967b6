use super::domain::{
    ArrearsState, Channel, LenderType, NegotiationGoal, NegotiationTemplate,
    NegotiationTemplateRequest, NegotiationTemplateResponse, Tone,
};

const MASHONISA_SAFETY_NOTE: &str = "Be polite and prioritize safety in any in-person contact.";
const EMAIL_SIGN_OFF: &str = "\n\nRegards,";

/// Hardship message for a lender, rendered once per outbound channel.
pub fn negotiation_templates(request: &NegotiationTemplateRequest) -> NegotiationTemplateResponse {
    let message = format!(
        "{}, I would like to discuss my account. Due to hardship, I propose a more affordable plan.{} {}",
        greeting(request.tone),
        arrears_clause(request.arrears_state),
        goal_clause(request.goal),
    );

    let whatsapp_notes = (request.lender_type == LenderType::Mashonisa)
        .then(|| MASHONISA_SAFETY_NOTE.to_string());

    NegotiationTemplateResponse {
        templates: vec![
            NegotiationTemplate {
                channel: Channel::Sms,
                message: message.clone(),
                notes: None,
            },
            NegotiationTemplate {
                channel: Channel::Whatsapp,
                message: message.clone(),
                notes: whatsapp_notes,
            },
            NegotiationTemplate {
                channel: Channel::Email,
                message: format!("{message}{EMAIL_SIGN_OFF}"),
                notes: None,
            },
        ],
    }
}

fn greeting(tone: Tone) -> &'static str {
    match tone {
        Tone::Formal => "Good day",
        Tone::Direct => "Hello",
        Tone::Polite => "Hi",
    }
}

fn arrears_clause(state: ArrearsState) -> &'static str {
    match state {
        ArrearsState::Current => "",
        ArrearsState::UpTo30Days => " I am up to 30 days behind.",
        ArrearsState::From31To90Days => " I am 31–90 days behind.",
        ArrearsState::Over90Days => " I am over 90 days behind and need urgent help.",
    }
}

fn goal_clause(goal: NegotiationGoal) -> &'static str {
    match goal {
        NegotiationGoal::ReduceInterest => {
            "Please consider a reduced interest rate so I can stay on track."
        }
        NegotiationGoal::PaymentPlan => {
            "I propose a lower monthly payment for the next 3 months, with review after."
        }
        NegotiationGoal::FeeWaiver => "Please waive initiation/late fees to make repayment possible.",
        NegotiationGoal::Dispute => {
            "I would like to dispute certain charges and request a statement breakdown."
        }
    }
}
