#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("missing template for {billing_type}/{offset}")]
    Template {
        billing_type: &'static str,
        offset: &'static str,
    },

    #[error("unknown customer: {0}")]
    UnknownCustomer(String),
}
