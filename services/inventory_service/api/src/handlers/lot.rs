//! Lot engine HTTP handlers (C4): `/v1/lots`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use validator::Validate;

use inventory_service_core::dto::{
    AddLotItemRequest, AddLotItemResponse, CreateLotRequest, FinalizeLotResponse, LotListFilter,
    LotResponse, Page, PageRequest, RemoveLotItemRequest,
};
use inventory_service_core::models::AuthContext;
use shared_error::AppError;

use crate::state::AppState;

pub fn create_lot_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_lot).get(list_lots))
        .route("/{id}", get(get_lot))
        .route("/{id}/items", post(add_lot_item).delete(remove_lot_item))
        .route("/{id}/finalize", post(finalize_lot))
}

async fn create_lot(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(req): Json<CreateLotRequest>,
) -> Result<(StatusCode, Json<LotResponse>), AppError> {
    req.validate().map_err(|e| AppError::validation(e.to_string()))?;
    let lot = state.lot_service.create(&auth.scope(), req).await?;
    Ok((StatusCode::CREATED, Json(lot)))
}

async fn list_lots(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(filter): Query<LotListFilter>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<LotResponse>>, AppError> {
    let lots = state.lot_service.get_list(filter, &auth.scope(), page).await?;
    Ok(Json(lots))
}

async fn get_lot(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<Json<LotResponse>, AppError> {
    let lot = state.lot_service.get_detail(&id, &auth.scope()).await?;
    Ok(Json(lot))
}

async fn add_lot_item(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    Json(req): Json<AddLotItemRequest>,
) -> Result<Json<AddLotItemResponse>, AppError> {
    req.validate().map_err(|e| AppError::validation(e.to_string()))?;
    let resp = state.lot_service.add_item(&auth.scope(), &id, req).await?;
    Ok(Json(resp))
}

async fn remove_lot_item(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    Json(req): Json<RemoveLotItemRequest>,
) -> Result<StatusCode, AppError> {
    req.validate().map_err(|e| AppError::validation(e.to_string()))?;
    state
        .lot_service
        .remove_item(&auth.scope(), &id, &req.buah_raw_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn finalize_lot(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<Json<FinalizeLotResponse>, AppError> {
    let resp = state.lot_service.finalize(&auth.scope(), &id).await?;
    Ok(Json(resp))
}
