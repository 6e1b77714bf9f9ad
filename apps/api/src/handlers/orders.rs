use std::str::FromStr;

use atelier_application::{CreateOrderInput, UpdateOrderInput};
use atelier_core::NonEmptyString;
use atelier_domain::{ChecklistItemId, Identity, OrderId, OrderStatus};
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Extension, Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use uuid::Uuid;

use crate::dto::{
    AnalyticsResponse, AssignChecklistItemRequest, AttachmentParams, ChecklistItemRequest,
    CreateOrderRequest, OrderResponse, TransitionOrderRequest, UpdateOrderRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_orders_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<Vec<OrderResponse>>> {
    let orders = state
        .order_service
        .list(&identity)
        .await?
        .into_iter()
        .map(OrderResponse::from)
        .collect();

    Ok(Json(orders))
}

pub async fn create_order_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<CreateOrderRequest>,
) -> ApiResult<(StatusCode, Json<OrderResponse>)> {
    let order = state
        .order_service
        .create(
            &identity,
            CreateOrderInput {
                title: NonEmptyString::new(payload.title)?,
                description: payload.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(OrderResponse::from(order))))
}

pub async fn get_order_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<OrderResponse>> {
    let order = state
        .order_service
        .get(&identity, OrderId::from_uuid(id))
        .await?;

    Ok(Json(OrderResponse::from(order)))
}

pub async fn update_order_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderRequest>,
) -> ApiResult<Json<OrderResponse>> {
    let order = state
        .order_service
        .update(
            &identity,
            OrderId::from_uuid(id),
            UpdateOrderInput {
                title: payload.title.map(NonEmptyString::new).transpose()?,
                description: payload.description,
                assigned_to: payload.assigned_to,
            },
        )
        .await?;

    Ok(Json(OrderResponse::from(order)))
}

pub async fn delete_order_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .order_service
        .delete(&identity, OrderId::from_uuid(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn submit_order_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<OrderResponse>> {
    let order = state
        .order_service
        .transition(&identity, OrderId::from_uuid(id), OrderStatus::InReview)
        .await?;

    Ok(Json(OrderResponse::from(order)))
}

pub async fn approve_order_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<OrderResponse>> {
    let order = state
        .order_service
        .transition(&identity, OrderId::from_uuid(id), OrderStatus::Approved)
        .await?;

    Ok(Json(OrderResponse::from(order)))
}

pub async fn transition_order_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransitionOrderRequest>,
) -> ApiResult<Json<OrderResponse>> {
    let next = OrderStatus::from_str(payload.status.as_str())?;
    let order = state
        .order_service
        .transition(&identity, OrderId::from_uuid(id), next)
        .await?;

    Ok(Json(OrderResponse::from(order)))
}

pub async fn add_checklist_item_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChecklistItemRequest>,
) -> ApiResult<Json<OrderResponse>> {
    let order = state
        .order_service
        .add_checklist_item(
            &identity,
            OrderId::from_uuid(id),
            NonEmptyString::new(payload.label)?,
        )
        .await?;

    Ok(Json(OrderResponse::from(order)))
}

pub async fn assign_checklist_item_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<AssignChecklistItemRequest>,
) -> ApiResult<Json<OrderResponse>> {
    let order = state
        .order_service
        .assign_checklist_item(
            &identity,
            OrderId::from_uuid(id),
            ChecklistItemId::from_uuid(item_id),
            payload.assignee_uid.as_str(),
        )
        .await?;

    Ok(Json(OrderResponse::from(order)))
}

pub async fn attach_file_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    Query(params): Query<AttachmentParams>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<OrderResponse>> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream");

    let order = state
        .order_service
        .attach_file(
            &identity,
            OrderId::from_uuid(id),
            NonEmptyString::new(params.name)?,
            content_type,
            body.to_vec(),
        )
        .await?;

    Ok(Json(OrderResponse::from(order)))
}

pub async fn analytics_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<AnalyticsResponse>> {
    let analytics = state.order_service.analytics(&identity).await?;
    Ok(Json(AnalyticsResponse::from(analytics)))
}
