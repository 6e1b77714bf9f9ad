//! Order lifecycle, checklist, attachments, and analytics.
//!
//! Every operation re-checks the caller's permission server-side; whatever
//! the web client chose to render has no bearing here.

use std::sync::Arc;

use async_trait::async_trait;
use atelier_core::{AppError, AppResult, NonEmptyString};
use atelier_domain::{
    ChecklistItemId, Identity, NotificationKind, OrderId, OrderStatus, Permission, Role, require,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notification_service::NotificationService;
use crate::user_directory::{PROFILE_NOT_FOUND, ProfileRepository};

/// Checklist entry on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItemRecord {
    /// Stable item identifier.
    pub id: ChecklistItemId,
    /// Short task label.
    pub label: String,
    /// Whether the item is finished.
    pub done: bool,
    /// Subject identifier of the assignee, if any.
    pub assigned_to: Option<String>,
}

/// Uploaded attachment reference stored on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRecord {
    /// Original file name.
    pub name: String,
    /// Public URL returned by the object-storage service.
    pub url: String,
}

/// Order document as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Stable order identifier.
    pub id: OrderId,
    /// Order title.
    pub title: String,
    /// Free-form description of the requested work.
    pub description: String,
    /// Current workflow status.
    pub status: OrderStatus,
    /// Subject identifier of the creator.
    pub created_by: String,
    /// Subject identifier of the responsible designer, if assigned.
    pub assigned_to: Option<String>,
    /// Checklist items.
    pub checklist: Vec<ChecklistItemRecord>,
    /// Uploaded attachments.
    pub attachments: Vec<AttachmentRecord>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Repository port over the order document collection.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Creates or replaces an order document.
    async fn save(&self, order: OrderRecord) -> AppResult<()>;

    /// Finds an order by identifier.
    async fn find(&self, id: OrderId) -> AppResult<Option<OrderRecord>>;

    /// Lists every stored order.
    async fn list(&self) -> AppResult<Vec<OrderRecord>>;

    /// Deletes an order document.
    async fn delete(&self, id: OrderId) -> AppResult<()>;
}

/// Port to the external object-storage service.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Uploads a blob and returns its public URL.
    async fn upload(&self, name: &str, content_type: &str, bytes: Vec<u8>) -> AppResult<String>;
}

/// Input for creating an order.
#[derive(Debug)]
pub struct CreateOrderInput {
    /// Order title.
    pub title: NonEmptyString,
    /// Free-form description.
    pub description: String,
}

/// Input for updating order content. `None` fields are left untouched.
#[derive(Debug, Default)]
pub struct UpdateOrderInput {
    /// Replacement title.
    pub title: Option<NonEmptyString>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement assignee.
    pub assigned_to: Option<String>,
}

/// Per-status order count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderStatusCount {
    /// Workflow status.
    pub status: OrderStatus,
    /// Number of orders currently in that status.
    pub count: u64,
}

/// Order counts for the analytics dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderAnalytics {
    /// Total number of orders.
    pub total: u64,
    /// Counts per status, in workflow order.
    pub by_status: Vec<OrderStatusCount>,
}

/// Application service for orders.
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    files: Arc<dyn FileStore>,
    profiles: Arc<dyn ProfileRepository>,
    notifications: NotificationService,
}

impl OrderService {
    /// Creates an order service over its collaborators.
    #[must_use]
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        files: Arc<dyn FileStore>,
        profiles: Arc<dyn ProfileRepository>,
        notifications: NotificationService,
    ) -> Self {
        Self {
            orders,
            files,
            profiles,
            notifications,
        }
    }

    /// Places a new order in `draft` status and notifies approvers.
    pub async fn create(
        &self,
        identity: &Identity,
        input: CreateOrderInput,
    ) -> AppResult<OrderRecord> {
        require(identity, Permission::CreateOrder)?;

        let now = Utc::now();
        let order = OrderRecord {
            id: OrderId::new(),
            title: input.title.into(),
            description: input.description,
            status: OrderStatus::Draft,
            created_by: identity.uid().to_owned(),
            assigned_to: None,
            checklist: Vec::new(),
            attachments: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        self.orders.save(order.clone()).await?;

        for reviewer in self.profiles.list().await? {
            if reviewer.uid() != identity.uid()
                && reviewer.role().grants(Permission::ApproveOrders)
            {
                self.notifications
                    .notify(
                        reviewer.uid(),
                        NotificationKind::OrderCreated,
                        format!("Nuevo pedido: {}", order.title),
                    )
                    .await?;
            }
        }

        Ok(order)
    }

    /// Fetches one order, applying client scoping.
    pub async fn get(&self, identity: &Identity, id: OrderId) -> AppResult<OrderRecord> {
        require(identity, Permission::ViewOrders)?;
        self.load_scoped(identity, id).await
    }

    /// Lists visible orders, newest first.
    ///
    /// A `client` identity only sees orders it created; staff roles see all.
    pub async fn list(&self, identity: &Identity) -> AppResult<Vec<OrderRecord>> {
        require(identity, Permission::ViewOrders)?;

        let mut orders = self.orders.list().await?;
        if identity.role() == Role::Client {
            orders.retain(|order| order.created_by == identity.uid());
        }
        orders.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(orders)
    }

    /// Updates order content.
    pub async fn update(
        &self,
        identity: &Identity,
        id: OrderId,
        input: UpdateOrderInput,
    ) -> AppResult<OrderRecord> {
        require(identity, Permission::EditOrder)?;

        let mut order = self.load_scoped(identity, id).await?;
        if let Some(title) = input.title {
            order.title = title.into();
        }
        if let Some(description) = input.description {
            order.description = description;
        }
        if let Some(assigned_to) = input.assigned_to {
            order.assigned_to = Some(assigned_to);
        }
        order.updated_at = Utc::now();

        self.orders.save(order.clone()).await?;
        Ok(order)
    }

    /// Moves an order to `next` if the workflow allows it.
    ///
    /// Approval requires `approve_orders`; every other move requires
    /// `edit_order`. Approval notifies the order's creator.
    pub async fn transition(
        &self,
        identity: &Identity,
        id: OrderId,
        next: OrderStatus,
    ) -> AppResult<OrderRecord> {
        let needed = if next == OrderStatus::Approved {
            Permission::ApproveOrders
        } else {
            Permission::EditOrder
        };
        require(identity, needed)?;

        let mut order = self.load_scoped(identity, id).await?;
        if !order.status.can_transition_to(next) {
            return Err(AppError::Conflict(format!(
                "order in status '{}' cannot move to '{}'",
                order.status.as_str(),
                next.as_str()
            )));
        }

        order.status = next;
        order.updated_at = Utc::now();
        self.orders.save(order.clone()).await?;

        if next == OrderStatus::Approved && order.created_by != identity.uid() {
            self.notifications
                .notify(
                    &order.created_by,
                    NotificationKind::OrderApproved,
                    format!("Tu pedido '{}' fue aprobado", order.title),
                )
                .await?;
        }

        Ok(order)
    }

    /// Deletes an order.
    pub async fn delete(&self, identity: &Identity, id: OrderId) -> AppResult<()> {
        require(identity, Permission::DeleteOrder)?;

        let _ = self.load_scoped(identity, id).await?;
        self.orders.delete(id).await
    }

    /// Adds a checklist item to an order.
    pub async fn add_checklist_item(
        &self,
        identity: &Identity,
        id: OrderId,
        label: NonEmptyString,
    ) -> AppResult<OrderRecord> {
        require(identity, Permission::EditOrder)?;

        let mut order = self.load_scoped(identity, id).await?;
        order.checklist.push(ChecklistItemRecord {
            id: ChecklistItemId::new(),
            label: label.into(),
            done: false,
            assigned_to: None,
        });
        order.updated_at = Utc::now();

        self.orders.save(order.clone()).await?;
        Ok(order)
    }

    /// Assigns a checklist item to a user and notifies them.
    pub async fn assign_checklist_item(
        &self,
        identity: &Identity,
        id: OrderId,
        item_id: ChecklistItemId,
        assignee_uid: &str,
    ) -> AppResult<OrderRecord> {
        require(identity, Permission::AssignTasks)?;

        let assignee = self
            .profiles
            .find_by_uid(assignee_uid)
            .await?
            .ok_or_else(|| AppError::NotFound(PROFILE_NOT_FOUND.to_owned()))?;

        let mut order = self.load_scoped(identity, id).await?;
        let title = order.title.clone();
        let item = order
            .checklist
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| AppError::NotFound("checklist item not found".to_owned()))?;
        item.assigned_to = Some(assignee.uid().to_owned());
        order.updated_at = Utc::now();

        self.orders.save(order.clone()).await?;

        self.notifications
            .notify(
                assignee.uid(),
                NotificationKind::TaskAssigned,
                format!("Se te asignó una tarea en '{title}'"),
            )
            .await?;

        Ok(order)
    }

    /// Uploads a file and records it as an attachment on the order.
    pub async fn attach_file(
        &self,
        identity: &Identity,
        id: OrderId,
        name: NonEmptyString,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<OrderRecord> {
        require(identity, Permission::EditOrder)?;

        let mut order = self.load_scoped(identity, id).await?;
        let name = String::from(name);
        let url = self.files.upload(&name, content_type, bytes).await?;
        order.attachments.push(AttachmentRecord { name, url });
        order.updated_at = Utc::now();

        self.orders.save(order.clone()).await?;
        Ok(order)
    }

    /// Returns order counts per status.
    pub async fn analytics(&self, identity: &Identity) -> AppResult<OrderAnalytics> {
        require(identity, Permission::ViewAnalytics)?;

        let orders = self.orders.list().await?;
        let by_status = [
            OrderStatus::Draft,
            OrderStatus::InReview,
            OrderStatus::Approved,
            OrderStatus::Delivered,
            OrderStatus::Archived,
        ]
        .into_iter()
        .map(|status| OrderStatusCount {
            status,
            count: orders.iter().filter(|order| order.status == status).count() as u64,
        })
        .collect();

        Ok(OrderAnalytics {
            total: orders.len() as u64,
            by_status,
        })
    }

    /// Loads an order, hiding other creators' orders from `client` callers.
    async fn load_scoped(&self, identity: &Identity, id: OrderId) -> AppResult<OrderRecord> {
        let order = self
            .orders
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("order not found".to_owned()))?;

        if identity.role() == Role::Client && order.created_by != identity.uid() {
            return Err(AppError::NotFound("order not found".to_owned()));
        }

        Ok(order)
    }
}
