use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "admin123")]
    pub password: String,
}

/// Public identity of an authenticated admin. Never carries the hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminIdentity {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "admin")]
    pub username: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    #[schema(example = "Bearer")]
    pub token_type: &'static str,
    /// Seconds until the session token expires.
    #[schema(example = 3600)]
    pub expires_in: usize,
    pub admin: AdminIdentity,
}

#[derive(Deserialize, ToSchema)]
pub struct ChangeCredentialsRequest {
    #[schema(example = "admin")]
    pub username: String,
    pub old_password: String,
    /// Minimum 6 characters.
    pub new_password: String,
    /// Must match `new_password`.
    pub confirm_password: String,
}

/// Session token claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub admin_id: u64,
    pub sub: String,
    pub exp: usize,
    pub jti: String,
}
