pub mod classification;
pub mod customer;
pub mod template;

pub use classification::{
    Action, ClassificationRequest, ClassificationResult, Intent, RawClassification, Sentiment,
    Urgency,
};
pub use customer::{BillingType, Customer};
pub use template::{OffsetLabel, TemplateTable};
