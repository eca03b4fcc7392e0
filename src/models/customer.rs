use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BillingType {
    Installment,
    RenegotiatedAgreement,
}

impl BillingType {
    pub const ALL: [BillingType; 2] = [BillingType::Installment, BillingType::RenegotiatedAgreement];

    pub fn as_str(&self) -> &'static str {
        match self {
            BillingType::Installment => "installment",
            BillingType::RenegotiatedAgreement => "renegotiated-agreement",
        }
    }

    /// Human-readable label used in customer-facing text.
    pub fn label(&self) -> &'static str {
        match self {
            BillingType::Installment => "installment plan",
            BillingType::RenegotiatedAgreement => "renegotiated agreement",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    /// E.164-like international format; passed through to the sink unvalidated.
    pub phone: String,
    pub due_date: NaiveDate,
    pub billing_type: BillingType,
    pub payment_link: String,
}
