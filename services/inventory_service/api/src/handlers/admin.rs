//! Internal administrative routes not part of the spec's public surface:
//! the `ClearJenisCache` operation (SPEC_FULL supplemented feature 4)
//! that busts the one piece of shared mutable state the core owns (§5).

use axum::{extract::State, http::StatusCode, routing::post, Router};

use crate::state::AppState;

pub fn create_admin_routes() -> Router<AppState> {
    Router::new().route("/variety-cache/clear", post(clear_variety_cache))
}

async fn clear_variety_cache(State(state): State<AppState>) -> StatusCode {
    state.variety_cache.clear();
    StatusCode::NO_CONTENT
}
