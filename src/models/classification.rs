use serde::{Deserialize, Serialize};

use super::{BillingType, Customer};

/// Upper bound on customer text forwarded to the classifier.
pub const MAX_TEXT_LEN: usize = 2000;

#[derive(Debug, Clone)]
pub struct ClassificationRequest {
    pub text: String,
    pub customer_name: String,
    pub billing_type: BillingType,
    pub history: String,
}

impl ClassificationRequest {
    pub fn new(customer: &Customer, text: &str) -> Self {
        Self {
            text: text.chars().take(MAX_TEXT_LEN).collect(),
            customer_name: customer.name.clone(),
            billing_type: customer.billing_type,
            history: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    PaymentMade,
    WantsNegotiation,
    InvoiceRequest,
    DebtNotRecognized,
    FinancialHardship,
    DisputesCharge,
    ExtensionRequest,
    WantsDetails,
    #[serde(other)]
    Unidentified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sentiment {
    Positive,
    Negative,
    #[serde(other)]
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    Low,
    High,
    #[serde(other)]
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    ConfirmThanks,
    SendNegotiationOptions,
    ResendInvoice,
    EscalateToSupport,
    OfferInstallments,
    RequestProofOfPayment,
    ExplainDebt,
    GenericResponse,
    /// Catch-all for vocabulary the upstream classifier grows later.
    #[serde(other)]
    Unknown,
}

/// Wire shape of a classifier response. Every field is optional so a
/// partial reply still parses; repair fills the holes afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct RawClassification {
    pub intent: Option<Intent>,
    pub sentiment: Option<Sentiment>,
    pub urgency: Option<Urgency>,
    pub action: Option<Action>,
    pub confidence: Option<f64>,
    pub explanation: Option<String>,
    pub suggested_reply: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ClassificationResult {
    pub intent: Intent,
    pub sentiment: Sentiment,
    pub urgency: Urgency,
    pub action: Action,
    pub confidence: f64,
    pub explanation: Option<String>,
    pub suggested_reply: String,
}
