use chrono::NaiveDate;

use crate::errors::AppError;
use crate::models::template::render;
use crate::models::{Customer, OffsetLabel, TemplateTable};
use crate::services::messaging::MessageSink;

/// Outcome of scheduling one customer for a given day.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchPlan {
    Send { offset: OffsetLabel, text: String },
    Skip,
}

/// Decide whether a reminder fires for `customer` on `today`. Only two
/// offsets trigger a message: due tomorrow (day-before) and due yesterday
/// (day-after). Everything else is an explicit no-op, not an error.
pub fn plan(
    customer: &Customer,
    today: NaiveDate,
    templates: &TemplateTable,
) -> Result<DispatchPlan, AppError> {
    let offset = match (customer.due_date - today).num_days() {
        1 => OffsetLabel::DayBefore,
        -1 => OffsetLabel::DayAfter,
        _ => return Ok(DispatchPlan::Skip),
    };

    let template =
        templates
            .get(customer.billing_type, offset)
            .ok_or(AppError::Template {
                billing_type: customer.billing_type.as_str(),
                offset: offset.as_str(),
            })?;

    Ok(DispatchPlan::Send {
        offset,
        text: render(template, &customer.name, &customer.payment_link),
    })
}

/// Run scheduled dispatch over the whole roster, one customer at a time.
/// The scheduler is stateless: re-running it on the same day fires the same
/// reminders again.
pub async fn run_dispatch(
    roster: &[Customer],
    today: NaiveDate,
    templates: &TemplateTable,
    sink: &dyn MessageSink,
) -> anyhow::Result<()> {
    templates.validate()?;

    for customer in roster {
        match plan(customer, today, templates)? {
            DispatchPlan::Send { offset, text } => {
                tracing::info!(
                    customer = %customer.name,
                    offset = offset.as_str(),
                    "dispatching reminder"
                );
                sink.deliver(&customer.phone, &text).await?;
            }
            DispatchPlan::Skip => {
                tracing::info!(customer = %customer.name, "no dispatch today");
            }
        }
    }

    Ok(())
}
