//! Sale engine HTTP handlers (C6): `/v1/sales`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use validator::Validate;

use inventory_service_core::dto::{
    CreateSaleRequest, Page, PageRequest, SaleListFilter, SaleResponse, UpdateSaleRequest,
};
use inventory_service_core::models::AuthContext;
use shared_error::AppError;

use crate::state::AppState;

pub fn create_sale_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_sale).get(list_sales))
        .route("/{id}", get(get_sale).put(update_sale).delete(delete_sale))
}

async fn create_sale(
    State(state): State<AppState>,
    Json(req): Json<CreateSaleRequest>,
) -> Result<(StatusCode, Json<SaleResponse>), AppError> {
    req.validate().map_err(|e| AppError::validation(e.to_string()))?;
    let sale = state.sale_service.create(req).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

async fn list_sales(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(filter): Query<SaleListFilter>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<SaleResponse>>, AppError> {
    let sales = state.sale_service.get_list(filter, &auth.scope(), page).await?;
    Ok(Json(sales))
}

async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SaleResponse>, AppError> {
    let sale = state.sale_service.get_by_id(&id).await?;
    Ok(Json(sale))
}

async fn update_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<UpdateSaleRequest>,
) -> Result<Json<SaleResponse>, AppError> {
    let sale = state.sale_service.update(&id, patch).await?;
    Ok(Json(sale))
}

async fn delete_sale(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.sale_service.delete(&id, &auth.scope()).await?;
    Ok(StatusCode::NO_CONTENT)
}
