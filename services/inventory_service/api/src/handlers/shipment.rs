//! Shipment engine HTTP handlers (C5): `/v1/shipments`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use validator::Validate;

use inventory_service_core::dto::{
    AddShipmentItemRequest, CreateShipmentRequest, Page, PageRequest, ReceiveShipmentRequest,
    RemoveShipmentItemRequest, ShipmentListFilter, ShipmentResponse, UpdateShipmentStatusRequest,
};
use inventory_service_core::models::AuthContext;
use shared_error::AppError;

use crate::state::AppState;

pub fn create_shipment_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_shipment).get(list_shipments))
        .route("/{id}", get(get_shipment))
        .route(
            "/{id}/items",
            post(add_shipment_item).delete(remove_shipment_item),
        )
        .route("/{id}/finalize", post(finalize_shipment))
        .route("/{id}/status", axum::routing::patch(update_shipment_status))
        .route("/{id}/receive", post(receive_shipment))
}

async fn create_shipment(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(req): Json<CreateShipmentRequest>,
) -> Result<(StatusCode, Json<ShipmentResponse>), AppError> {
    req.validate().map_err(|e| AppError::validation(e.to_string()))?;
    let shipment = state.shipment_service.create(&auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(shipment)))
}

async fn list_shipments(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(filter): Query<ShipmentListFilter>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<ShipmentResponse>>, AppError> {
    let shipments = state
        .shipment_service
        .get_list(filter, &auth.scope(), page)
        .await?;
    Ok(Json(shipments))
}

async fn get_shipment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<Json<ShipmentResponse>, AppError> {
    let shipment = state.shipment_service.get_by_id(&id, &auth.scope()).await?;
    Ok(Json(shipment))
}

async fn add_shipment_item(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    Json(req): Json<AddShipmentItemRequest>,
) -> Result<Json<ShipmentResponse>, AppError> {
    req.validate().map_err(|e| AppError::validation(e.to_string()))?;
    let shipment = state
        .shipment_service
        .add_item(&auth.scope(), &id, req)
        .await?;
    Ok(Json(shipment))
}

async fn remove_shipment_item(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    Json(req): Json<RemoveShipmentItemRequest>,
) -> Result<Json<ShipmentResponse>, AppError> {
    req.validate().map_err(|e| AppError::validation(e.to_string()))?;
    let shipment = state
        .shipment_service
        .remove_item(&auth.scope(), &id, &req.detail_id)
        .await?;
    Ok(Json(shipment))
}

async fn finalize_shipment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<Json<ShipmentResponse>, AppError> {
    let shipment = state.shipment_service.finalize(&auth.scope(), &id).await?;
    Ok(Json(shipment))
}

async fn update_shipment_status(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    Json(req): Json<UpdateShipmentStatusRequest>,
) -> Result<Json<ShipmentResponse>, AppError> {
    let shipment = state
        .shipment_service
        .update_status(&id, req, &auth.user_id)
        .await?;
    Ok(Json(shipment))
}

async fn receive_shipment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    Json(req): Json<ReceiveShipmentRequest>,
) -> Result<Json<ShipmentResponse>, AppError> {
    req.validate().map_err(|e| AppError::validation(e.to_string()))?;
    let shipment = state
        .shipment_service
        .receive(&auth.scope(), &id, req)
        .await?;
    Ok(Json(shipment))
}
