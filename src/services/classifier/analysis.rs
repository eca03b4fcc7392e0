use crate::models::{
    Action, ClassificationRequest, ClassificationResult, Intent, RawClassification, Sentiment,
    Urgency,
};

use super::LlmProvider;

const SYSTEM_PROMPT: &str = r#"You are an assistant specialized in analyzing customer replies to billing reminders.

Analyze the customer's message and identify:
1. The main INTENT
2. SENTIMENT (positive/neutral/negative)
3. URGENCY (low/medium/high)
4. The recommended ACTION

Possible intents:
- payment-made: customer says they already paid
- wants-negotiation: wants to negotiate, split the payment, or get a discount
- invoice-request: never received or lost the invoice
- debt-not-recognized: does not recognize the debt
- financial-hardship: having trouble paying
- disputes-charge: disputes the amount or the charge itself
- extension-request: asks for more time
- wants-details: wants details about the debt
- unidentified: intent could not be identified

Possible actions:
- confirm-thanks: thank the customer and confirm payment
- send-negotiation-options: send negotiation options
- resend-invoice: resend the invoice link
- escalate-to-support: hand off to human support
- offer-installments: offer an installment plan
- request-proof-of-payment: ask for proof of payment
- explain-debt: explain the details of the debt
- generic-response: default response plus human follow-up

ALWAYS return valid JSON with:
{
    "intent": "one of the intents listed",
    "sentiment": "positive/neutral/negative",
    "urgency": "low/medium/high",
    "action": "one of the actions listed",
    "confidence": 0.95,
    "explanation": "brief explanation of the analysis",
    "suggested_reply": "personalized message for the customer"
}"#;

const SERVICE_FAILURE_CONFIDENCE: f64 = 0.1;
const MALFORMED_RESPONSE_CONFIDENCE: f64 = 0.3;
const MISSING_FIELD_CONFIDENCE: f64 = 0.5;

/// Classify a customer reply. Never fails: transport errors and malformed
/// responses degrade to conservative fallback results so every customer
/// message still gets answered.
pub async fn classify_message(
    llm: &dyn LlmProvider,
    request: &ClassificationRequest,
) -> ClassificationResult {
    let response = match llm.chat(SYSTEM_PROMPT, &user_prompt(request)).await {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(
                customer = %request.customer_name,
                error = %err,
                "classification service unavailable, escalating to support"
            );
            return service_failure_fallback(&request.customer_name);
        }
    };

    match parse_classification(&response) {
        Some(raw) => repair(raw, &request.customer_name),
        None => {
            tracing::warn!(
                customer = %request.customer_name,
                "classifier response was not valid JSON, using generic fallback"
            );
            malformed_response_fallback(&request.customer_name)
        }
    }
}

fn user_prompt(request: &ClassificationRequest) -> String {
    format!(
        "CUSTOMER: {}\nBILLING TYPE: {}\nHISTORY: {}\n\nCUSTOMER MESSAGE:\n\"{}\"\n\nAnalyze this message and return the JSON with your analysis:",
        request.customer_name,
        request.billing_type.as_str(),
        request.history,
        request.text,
    )
}

fn parse_classification(response: &str) -> Option<RawClassification> {
    if let Ok(raw) = serde_json::from_str::<RawClassification>(response) {
        return Some(raw);
    }

    // Strip markdown code fences
    let cleaned = response
        .trim()
        .strip_prefix("```json")
        .or_else(|| response.trim().strip_prefix("```"))
        .unwrap_or(response.trim());
    let cleaned = cleaned.strip_suffix("```").unwrap_or(cleaned).trim();

    if let Ok(raw) = serde_json::from_str::<RawClassification>(cleaned) {
        return Some(raw);
    }

    // Last resort: a JSON object buried in surrounding prose
    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    serde_json::from_str::<RawClassification>(&cleaned[start..=end]).ok()
}

/// Fill the holes in a partial classifier reply. Required fields get the
/// documented defaults; fields the service did return are left untouched.
fn repair(raw: RawClassification, customer_name: &str) -> ClassificationResult {
    ClassificationResult {
        intent: raw.intent.unwrap_or(Intent::Unidentified),
        sentiment: raw.sentiment.unwrap_or(Sentiment::Neutral),
        urgency: raw.urgency.unwrap_or(Urgency::Medium),
        action: raw.action.unwrap_or(Action::Unknown),
        confidence: raw
            .confidence
            .unwrap_or(MISSING_FIELD_CONFIDENCE)
            .clamp(0.0, 1.0),
        explanation: raw.explanation,
        suggested_reply: raw
            .suggested_reply
            .unwrap_or_else(|| generic_reply(customer_name)),
    }
}

fn generic_reply(customer_name: &str) -> String {
    format!("Hello {customer_name}, I will forward your message to our team.")
}

fn service_failure_fallback(customer_name: &str) -> ClassificationResult {
    ClassificationResult {
        intent: Intent::Unidentified,
        sentiment: Sentiment::Neutral,
        urgency: Urgency::High,
        action: Action::EscalateToSupport,
        confidence: SERVICE_FAILURE_CONFIDENCE,
        explanation: Some("classification service unavailable".to_string()),
        suggested_reply: format!("Hello {customer_name}, our team will contact you shortly."),
    }
}

fn malformed_response_fallback(customer_name: &str) -> ClassificationResult {
    ClassificationResult {
        intent: Intent::Unidentified,
        sentiment: Sentiment::Neutral,
        urgency: Urgency::Medium,
        action: Action::GenericResponse,
        confidence: MALFORMED_RESPONSE_CONFIDENCE,
        explanation: Some("could not parse classifier response".to_string()),
        suggested_reply: generic_reply(customer_name),
    }
}
