//! Creative brief generation from order context.
//!
//! The language model is a text-in/text-out collaborator: one prompt, one
//! completion, no conversation state kept on this side.

use std::sync::Arc;

use async_trait::async_trait;
use atelier_core::AppResult;
use atelier_domain::{Identity, OrderId};

use crate::order_service::{OrderRecord, OrderService};

/// Port to the external language-model completion API.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// One-shot text completion.
    async fn complete(&self, prompt: &str) -> AppResult<String>;
}

/// Application service generating creative briefs for orders.
#[derive(Clone)]
pub struct BriefService {
    completions: Arc<dyn CompletionClient>,
    orders: OrderService,
}

impl BriefService {
    /// Creates a brief service over the completion client and order service.
    #[must_use]
    pub fn new(completions: Arc<dyn CompletionClient>, orders: OrderService) -> Self {
        Self {
            completions,
            orders,
        }
    }

    /// Generates a brief for an order the caller is allowed to view.
    ///
    /// Visibility and the `view_orders` gate are enforced by the order
    /// lookup; this service adds no access rules of its own.
    pub async fn generate_brief(&self, identity: &Identity, order_id: OrderId) -> AppResult<String> {
        let order = self.orders.get(identity, order_id).await?;
        let prompt = build_brief_prompt(&order);
        self.completions.complete(&prompt).await
    }
}

fn build_brief_prompt(order: &OrderRecord) -> String {
    let mut prompt = format!(
        "Write a concise creative brief for the following design order.\n\
         Title: {}\nDescription: {}\nStatus: {}\n",
        order.title,
        order.description,
        order.status.as_str()
    );

    if !order.checklist.is_empty() {
        prompt.push_str("Checklist:\n");
        for item in &order.checklist {
            prompt.push_str("- ");
            prompt.push_str(&item.label);
            prompt.push('\n');
        }
    }

    prompt
}
