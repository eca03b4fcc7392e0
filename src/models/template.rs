use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::BillingType;
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OffsetLabel {
    DayBefore,
    DayAfter,
}

impl OffsetLabel {
    pub const ALL: [OffsetLabel; 2] = [OffsetLabel::DayBefore, OffsetLabel::DayAfter];

    pub fn as_str(&self) -> &'static str {
        match self {
            OffsetLabel::DayBefore => "day-before",
            OffsetLabel::DayAfter => "day-after",
        }
    }
}

/// Reminder templates keyed by (billing type, offset label). Values are
/// format strings with `{name}` and `{payment_link}` placeholders.
#[derive(Debug, Clone)]
pub struct TemplateTable {
    entries: HashMap<(BillingType, OffsetLabel), String>,
}

impl TemplateTable {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The built-in reminder set covering every (billing type, offset) pair.
    pub fn defaults() -> Self {
        let mut table = Self::new();
        table.insert(
            BillingType::Installment,
            OffsetLabel::DayBefore,
            "Hello {name}, your installment is due tomorrow. Avoid late fees! Invoice: {payment_link}",
        );
        table.insert(
            BillingType::Installment,
            OffsetLabel::DayAfter,
            "Hello {name}, your installment was due yesterday. Settle it here: {payment_link}",
        );
        table.insert(
            BillingType::RenegotiatedAgreement,
            OffsetLabel::DayBefore,
            "Hello {name}, your agreement is due tomorrow. Keep your benefits. Link: {payment_link}",
        );
        table.insert(
            BillingType::RenegotiatedAgreement,
            OffsetLabel::DayAfter,
            "Hello {name}, we noticed your agreement was due yesterday. Renegotiate now: {payment_link}",
        );
        table
    }

    pub fn insert(
        &mut self,
        billing_type: BillingType,
        offset: OffsetLabel,
        template: impl Into<String>,
    ) {
        self.entries.insert((billing_type, offset), template.into());
    }

    pub fn get(&self, billing_type: BillingType, offset: OffsetLabel) -> Option<&str> {
        self.entries
            .get(&(billing_type, offset))
            .map(String::as_str)
    }

    /// Every (billing type, offset) pair must have a template. A hole is a
    /// configuration error caught before any customer is processed.
    pub fn validate(&self) -> Result<(), AppError> {
        for billing_type in BillingType::ALL {
            for offset in OffsetLabel::ALL {
                if self.get(billing_type, offset).is_none() {
                    return Err(AppError::Template {
                        billing_type: billing_type.as_str(),
                        offset: offset.as_str(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for TemplateTable {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(template: &str, name: &str, payment_link: &str) -> String {
    template
        .replace("{name}", name)
        .replace("{payment_link}", payment_link)
}
