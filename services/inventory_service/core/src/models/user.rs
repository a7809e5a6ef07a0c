use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of an authenticated caller. Authentication itself lives outside
/// the core; only the role set and location id are read here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Warehouse,
    Sales,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserRole::Admin => "admin",
            UserRole::Warehouse => "warehouse",
            UserRole::Sales => "sales",
        };
        f.write_str(s)
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "warehouse" => Ok(UserRole::Warehouse),
            "sales" => Ok(UserRole::Sales),
            _ => Err(format!("unknown user role: {s}")),
        }
    }
}

/// The authenticated caller's record, as placed into the request context
/// by the (out-of-scope) HTTP auth layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    pub auth_id: String,
    pub user_id: String,
    pub email: String,
    pub roles: Vec<UserRole>,
    pub location_id: String,
}

impl AuthContext {
    pub fn has_role(&self, role: &UserRole) -> bool {
        self.roles.contains(role)
    }

    pub fn scope(&self) -> crate::scope::Scope {
        crate::scope::Scope::resolve(&self.location_id)
    }
}
