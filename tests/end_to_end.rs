use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use dunbot::models::{
    Action, BillingType, ClassificationRequest, Customer, TemplateTable,
};
use dunbot::services::classifier::{classify_message, LlmProvider};
use dunbot::services::dispatch;
use dunbot::services::messaging::MessageSink;
use dunbot::services::responder::{self, Handoff};

// ── Mock providers ──

struct ScriptedLlm {
    response: String,
}

impl ScriptedLlm {
    fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    async fn chat(&self, _system_prompt: &str, _user_prompt: &str) -> anyhow::Result<String> {
        Ok(self.response.clone())
    }
}

struct FailingLlm;

#[async_trait]
impl LlmProvider for FailingLlm {
    async fn chat(&self, _system_prompt: &str, _user_prompt: &str) -> anyhow::Result<String> {
        anyhow::bail!("request timed out")
    }
}

struct MockSink {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockSink {
    fn new() -> (Self, Arc<Mutex<Vec<(String, String)>>>) {
        let sent = Arc::new(Mutex::new(vec![]));
        (
            Self {
                sent: Arc::clone(&sent),
            },
            sent,
        )
    }
}

#[async_trait]
impl MessageSink for MockSink {
    async fn deliver(&self, to: &str, body: &str) -> anyhow::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), body.to_string()));
        Ok(())
    }
}

// ── Helpers ──

fn customer(billing_type: BillingType, due: &str) -> Customer {
    Customer {
        name: "João Silva".to_string(),
        phone: "+5599999999999".to_string(),
        due_date: NaiveDate::parse_from_str(due, "%Y-%m-%d").unwrap(),
        billing_type,
        payment_link: "https://example.com/invoice/joao".to_string(),
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 5).unwrap()
}

// ── Scheduled dispatch ──

#[tokio::test]
async fn due_tomorrow_installment_gets_day_before_reminder() {
    let reminded = customer(BillingType::Installment, "2025-08-06");
    let (sink, sent) = MockSink::new();

    dispatch::run_dispatch(
        &[reminded.clone()],
        today(),
        &TemplateTable::defaults(),
        &sink,
    )
    .await
    .unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, reminded.phone);
    assert!(sent[0].1.contains("João Silva"));
    assert!(sent[0].1.contains("https://example.com/invoice/joao"));
    assert!(sent[0].1.contains("due tomorrow"));
}

#[tokio::test]
async fn only_the_two_reminder_windows_fire() {
    let roster = vec![
        customer(BillingType::Installment, "2025-08-06"),
        customer(BillingType::RenegotiatedAgreement, "2025-08-04"),
        customer(BillingType::Installment, "2025-08-05"),
        customer(BillingType::Installment, "2025-08-20"),
    ];
    let (sink, sent) = MockSink::new();

    dispatch::run_dispatch(&roster, today(), &TemplateTable::defaults(), &sink)
        .await
        .unwrap();

    assert_eq!(sent.lock().unwrap().len(), 2);
}

// ── Reply handling ──

#[tokio::test]
async fn service_failure_still_answers_the_customer() {
    let disputed = customer(BillingType::Installment, "2025-08-06");

    let request = ClassificationRequest::new(&disputed, "I never received anything from you");
    let result = classify_message(&FailingLlm, &request).await;
    assert_eq!(result.action, Action::EscalateToSupport);
    assert!(result.confidence <= 0.2);

    let (sink, sent) = MockSink::new();
    let reply = responder::handle_reply(
        &FailingLlm,
        &sink,
        &disputed,
        "I never received anything from you",
    )
    .await
    .unwrap();

    assert!(!reply.text.is_empty());
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].1, reply.text);
}

#[tokio::test]
async fn unparseable_response_degrades_to_generic_reply() {
    let confused = customer(BillingType::Installment, "2025-08-06");
    let llm = ScriptedLlm::new("I am sorry, I cannot produce JSON today.");

    let request = ClassificationRequest::new(&confused, "hello?");
    let result = classify_message(&llm, &request).await;
    assert_eq!(result.action, Action::GenericResponse);
    assert_eq!(result.confidence, 0.3);

    let (sink, sent) = MockSink::new();
    let reply = responder::handle_reply(&llm, &sink, &confused, "hello?")
        .await
        .unwrap();

    assert_eq!(reply.handoff, Some(Handoff::HumanReview));
    assert!(reply.text.contains("João Silva"));
    assert_eq!(sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn resend_invoice_reply_carries_the_payment_link() {
    let asking = customer(BillingType::Installment, "2025-08-06");
    let llm = ScriptedLlm::new(
        r#"{"intent":"invoice-request","sentiment":"neutral","urgency":"medium","action":"resend-invoice","confidence":0.92,"explanation":"lost the invoice","suggested_reply":"No problem, here is your invoice again:"}"#,
    );
    let (sink, sent) = MockSink::new();

    let reply = responder::handle_reply(&llm, &sink, &asking, "I lost the invoice, can you resend it?")
        .await
        .unwrap();

    assert_eq!(
        reply.text,
        "No problem, here is your invoice again: https://example.com/invoice/joao"
    );
    assert_eq!(sent.lock().unwrap()[0].1, reply.text);
}

#[tokio::test]
async fn explain_debt_reply_names_the_charge_and_due_date() {
    let asking = customer(BillingType::RenegotiatedAgreement, "2025-08-04");
    let llm = ScriptedLlm::new(
        r#"{"intent":"wants-details","sentiment":"neutral","urgency":"low","action":"explain-debt","confidence":0.88,"suggested_reply":"Of course, here are the details."}"#,
    );
    let (sink, _sent) = MockSink::new();

    let reply = responder::handle_reply(&llm, &sink, &asking, "what is this charge?")
        .await
        .unwrap();

    assert!(reply.text.contains("renegotiated agreement"));
    assert!(reply.text.contains("04/08/2025"));
}

#[tokio::test]
async fn unknown_action_vocabulary_is_flagged_for_review() {
    let replying = customer(BillingType::Installment, "2025-08-06");
    let llm = ScriptedLlm::new(
        r#"{"intent":"payment-made","sentiment":"positive","urgency":"low","action":"send-carrier-pigeon","confidence":0.9,"suggested_reply":"Understood!"}"#,
    );
    let (sink, _sent) = MockSink::new();

    let reply = responder::handle_reply(&llm, &sink, &replying, "paid it yesterday")
        .await
        .unwrap();

    assert_eq!(reply.text, "Understood!");
    assert_eq!(reply.handoff, Some(Handoff::HumanReview));
}
