use std::fs;
use std::path::Path;

use chrono::{Duration, NaiveDate};

use crate::errors::AppError;
use crate::models::{BillingType, Customer};

/// Built-in demo roster: one customer due tomorrow, one due yesterday, so a
/// dispatch run exercises both reminder windows.
pub fn demo_roster(today: NaiveDate) -> Vec<Customer> {
    vec![
        Customer {
            name: "João Silva".to_string(),
            phone: "+5599999999999".to_string(),
            due_date: today + Duration::days(1),
            billing_type: BillingType::Installment,
            payment_link: "https://example.com/invoice/joao".to_string(),
        },
        Customer {
            name: "Maria Oliveira".to_string(),
            phone: "+5598888888888".to_string(),
            due_date: today - Duration::days(1),
            billing_type: BillingType::RenegotiatedAgreement,
            payment_link: "https://example.com/invoice/maria".to_string(),
        },
    ]
}

pub fn load(path: &Path) -> Result<Vec<Customer>, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read roster {}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::Config(format!("invalid roster {}: {e}", path.display())))
}

pub fn find<'a>(roster: &'a [Customer], name: &str) -> Option<&'a Customer> {
    roster.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_json_shape() {
        let json = r#"[{
            "name": "Ana Souza",
            "phone": "+5597777777777",
            "due_date": "2025-08-10",
            "billing_type": "renegotiated-agreement",
            "payment_link": "https://example.com/invoice/ana"
        }]"#;

        let customers: Vec<Customer> = serde_json::from_str(json).unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].billing_type, BillingType::RenegotiatedAgreement);
        assert_eq!(
            customers[0].due_date,
            NaiveDate::from_ymd_opt(2025, 8, 10).unwrap()
        );
    }

    #[test]
    fn test_demo_roster_straddles_today() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 5).unwrap();
        let roster = demo_roster(today);

        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].due_date, today + Duration::days(1));
        assert_eq!(roster[1].due_date, today - Duration::days(1));
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let roster = demo_roster(NaiveDate::from_ymd_opt(2025, 8, 5).unwrap());
        assert!(find(&roster, "maria oliveira").is_some());
        assert!(find(&roster, "Nobody").is_none());
    }
}
