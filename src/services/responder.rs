use crate::models::{Action, ClassificationRequest, ClassificationResult, Customer, Urgency};
use crate::services::classifier::{classify_message, LlmProvider};
use crate::services::messaging::MessageSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketPriority {
    Low,
    Normal,
    High,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "low",
            TicketPriority::Normal => "normal",
            TicketPriority::High => "high",
        }
    }
}

/// Escalation paths that need a human after the automated reply goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    Sales,
    SupportTicket { priority: TicketPriority },
    HumanReview,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutboundReply {
    pub text: String,
    pub handoff: Option<Handoff>,
}

fn ticket_priority(urgency: Urgency) -> TicketPriority {
    match urgency {
        Urgency::Low => TicketPriority::Low,
        Urgency::Medium => TicketPriority::Normal,
        Urgency::High => TicketPriority::High,
    }
}

/// Map a classification to the outbound reply. One construction per action;
/// vocabulary the classifier grows later lands on the generic path instead
/// of failing.
pub fn build_reply(result: &ClassificationResult, customer: &Customer) -> OutboundReply {
    match result.action {
        Action::ConfirmThanks | Action::OfferInstallments | Action::RequestProofOfPayment => {
            OutboundReply {
                text: result.suggested_reply.clone(),
                handoff: None,
            }
        }
        Action::SendNegotiationOptions => OutboundReply {
            text: result.suggested_reply.clone(),
            handoff: Some(Handoff::Sales),
        },
        Action::ResendInvoice => OutboundReply {
            text: format!("{} {}", result.suggested_reply, customer.payment_link),
            handoff: None,
        },
        Action::EscalateToSupport => OutboundReply {
            text: result.suggested_reply.clone(),
            handoff: Some(Handoff::SupportTicket {
                priority: ticket_priority(result.urgency),
            }),
        },
        Action::ExplainDebt => OutboundReply {
            text: format!(
                "{} This charge is your {} due on {}.",
                result.suggested_reply,
                customer.billing_type.label(),
                customer.due_date.format("%d/%m/%Y"),
            ),
            handoff: None,
        },
        Action::GenericResponse | Action::Unknown => OutboundReply {
            text: result.suggested_reply.clone(),
            handoff: Some(Handoff::HumanReview),
        },
    }
}

/// Full reply flow: classify the customer's message, build the reply for the
/// recommended action, deliver it, and surface any handoff flag.
pub async fn handle_reply(
    llm: &dyn LlmProvider,
    sink: &dyn MessageSink,
    customer: &Customer,
    text: &str,
) -> anyhow::Result<OutboundReply> {
    let request = ClassificationRequest::new(customer, text);
    let result = classify_message(llm, &request).await;

    tracing::info!(
        customer = %customer.name,
        intent = ?result.intent,
        action = ?result.action,
        confidence = result.confidence,
        "message classified"
    );

    let reply = build_reply(&result, customer);

    match reply.handoff {
        Some(Handoff::Sales) => {
            tracing::info!(customer = %customer.name, "routing to sales for negotiation");
        }
        Some(Handoff::SupportTicket { priority }) => {
            tracing::info!(
                customer = %customer.name,
                priority = priority.as_str(),
                "opening support ticket"
            );
        }
        Some(Handoff::HumanReview) => {
            tracing::info!(customer = %customer.name, "flagged for human follow-up");
        }
        None => {}
    }

    sink.deliver(&customer.phone, &reply.text).await?;

    Ok(reply)
}
