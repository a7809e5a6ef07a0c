//! Fruit registry HTTP handlers (C3): `/v1/buah-raw`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use validator::Validate;

use inventory_service_core::dto::{
    BulkCreateFruitRequest, CreateFruitRequest, FruitListFilter, FruitResponse, Page, PageRequest,
    UpdateFruitRequest,
};
use inventory_service_core::models::AuthContext;
use shared_error::AppError;

use crate::state::AppState;

pub fn create_fruit_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_fruit).get(list_fruits))
        .route("/bulk", post(bulk_create_fruit))
        .route("/unsorted", get(list_unsorted_fruits))
        .route("/{id}", get(get_fruit).put(update_fruit).delete(delete_fruit))
}

async fn create_fruit(
    State(state): State<AppState>,
    Json(req): Json<CreateFruitRequest>,
) -> Result<(StatusCode, Json<FruitResponse>), AppError> {
    req.validate().map_err(|e| AppError::validation(e.to_string()))?;
    let fruit = state.fruit_service.create(req).await?;
    Ok((StatusCode::CREATED, Json(fruit)))
}

async fn bulk_create_fruit(
    State(state): State<AppState>,
    Json(req): Json<BulkCreateFruitRequest>,
) -> Result<(StatusCode, Json<Vec<FruitResponse>>), AppError> {
    req.validate().map_err(|e| AppError::validation(e.to_string()))?;
    let fruits = state.fruit_service.bulk_create(req).await?;
    Ok((StatusCode::CREATED, Json(fruits)))
}

async fn list_fruits(
    State(state): State<AppState>,
    Query(filter): Query<FruitListFilter>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<FruitResponse>>, AppError> {
    let fruits = state.fruit_service.get_list(filter, page).await?;
    Ok(Json(fruits))
}

async fn list_unsorted_fruits(
    State(state): State<AppState>,
    Query(filter): Query<FruitListFilter>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<FruitResponse>>, AppError> {
    let fruits = state.fruit_service.get_unsorted(filter, page).await?;
    Ok(Json(fruits))
}

async fn get_fruit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FruitResponse>, AppError> {
    let fruit = state.fruit_service.get_by_id(&id).await?;
    Ok(Json(fruit))
}

async fn update_fruit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<UpdateFruitRequest>,
) -> Result<Json<FruitResponse>, AppError> {
    let fruit = state.fruit_service.update(&id, patch).await?;
    Ok(Json(fruit))
}

async fn delete_fruit(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.fruit_service.delete(&id, &auth.scope()).await?;
    Ok(StatusCode::NO_CONTENT)
}
