//! The seam between this engine and the out-of-scope JWT/Kanidm auth
//! layer (spec §6's "caller contract"): that layer is expected to
//! authenticate the request and place the resulting user-auth record on
//! well-known headers before the request ever reaches these handlers.
//! This extractor only reads what is already there.

use axum::{extract::FromRequestParts, http::request::Parts};

use inventory_service_core::models::{AuthContext, UserRole};
use shared_error::AppError;

const HEADER_AUTH_ID: &str = "x-auth-id";
const HEADER_USER_ID: &str = "x-user-id";
const HEADER_EMAIL: &str = "x-user-email";
const HEADER_ROLES: &str = "x-user-roles";
const HEADER_LOCATION: &str = "x-location-id";

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name)?.to_str().ok()
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_id = header_str(parts, HEADER_AUTH_ID)
            .ok_or_else(|| AppError::Auth("missing x-auth-id header".to_string()))?
            .to_string();
        let user_id = header_str(parts, HEADER_USER_ID)
            .ok_or_else(|| AppError::Auth("missing x-user-id header".to_string()))?
            .to_string();
        let email = header_str(parts, HEADER_EMAIL).unwrap_or_default().to_string();
        let location_id = header_str(parts, HEADER_LOCATION).unwrap_or_default().to_string();

        let roles = header_str(parts, HEADER_ROLES)
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<UserRole>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(AppError::Auth)?;

        if roles.is_empty() {
            return Err(AppError::Auth("no roles present on request".to_string()));
        }

        Ok(AuthContext {
            auth_id,
            user_id,
            email,
            roles,
            location_id,
        })
    }
}
