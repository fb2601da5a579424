use actix_web::{HttpResponse, web};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error, info, instrument};

use crate::auth::auth::AuthAdmin;
use crate::auth::jwt::generate_session_token;
use crate::auth::password::{hash_password, verify_password};
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{AdminIdentity, ChangeCredentialsRequest, LoginRequest, LoginResponse};
use crate::store;

/// Admin login
///
/// Verifies the credentials and returns a signed session token for the
/// Authorization header of privileged requests.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token issued", body = LoginResponse),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(pool, config, credentials),
    fields(username = %credentials.username)
)]
pub async fn login(
    credentials: web::Json<LoginRequest>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    info!("Login request received");

    if credentials.username.trim().is_empty() || credentials.password.is_empty() {
        info!("Validation failed: empty username or password");
        return Err(AppError::validation("username and password are required"));
    }

    debug!("Fetching admin account");

    let admin = match store::fetch_admin_by_username(pool.get_ref(), credentials.username.trim())
        .await
    {
        Ok(Some(admin)) => {
            debug!(admin_id = admin.id, "Admin account found");
            admin
        }
        // Unknown username and wrong password answer identically so the
        // response does not reveal which admin accounts exist.
        Ok(None) => {
            info!("Invalid credentials: unknown username");
            return Err(AppError::auth("invalid credentials"));
        }
        Err(e) => {
            error!(error = %e, "Database error while fetching admin account");
            return Err(AppError::Internal);
        }
    };

    debug!("Verifying password");

    if !verify_password(&credentials.password, &admin.password_hash) {
        info!("Invalid credentials: password mismatch");
        return Err(AppError::auth("invalid credentials"));
    }

    debug!("Issuing session token");

    let token = generate_session_token(
        admin.id,
        admin.username.clone(),
        &config.jwt_secret,
        config.session_ttl,
    );

    info!("Login successful");

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        token_type: "Bearer",
        expires_in: config.session_ttl,
        admin: AdminIdentity {
            id: admin.id,
            username: admin.username,
        },
    }))
}

/// Change admin credentials
///
/// Requires the current password and a confirmed new password of at
/// least six characters.
#[utoipa::path(
    put,
    path = "/auth/credentials",
    request_body = ChangeCredentialsRequest,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Invalid or incomplete request"),
        (status = 401, description = "Current password is incorrect"),
        (status = 404, description = "Admin account not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
#[instrument(
    name = "auth_change_credentials",
    skip(pool, request, _auth),
    fields(username = %request.username)
)]
pub async fn change_credentials(
    request: web::Json<ChangeCredentialsRequest>,
    pool: web::Data<MySqlPool>,
    _auth: AuthAdmin,
) -> Result<HttpResponse, AppError> {
    info!("Credential change requested");

    if request.username.trim().is_empty()
        || request.old_password.is_empty()
        || request.new_password.is_empty()
        || request.confirm_password.is_empty()
    {
        return Err(AppError::validation("all fields are required"));
    }

    if request.new_password.len() < 6 {
        return Err(AppError::validation(
            "new password must be at least 6 characters",
        ));
    }

    if request.new_password != request.confirm_password {
        return Err(AppError::validation(
            "new password and confirmation do not match",
        ));
    }

    let admin = match store::fetch_admin_by_username(pool.get_ref(), request.username.trim()).await
    {
        Ok(Some(admin)) => admin,
        Ok(None) => {
            info!("Credential change failed: unknown username");
            return Err(AppError::not_found("admin account not found"));
        }
        Err(e) => {
            error!(error = %e, "Database error while fetching admin account");
            return Err(AppError::Internal);
        }
    };

    if !verify_password(&request.old_password, &admin.password_hash) {
        info!("Credential change failed: current password mismatch");
        return Err(AppError::auth("current password is incorrect"));
    }

    let new_hash = hash_password(&request.new_password);

    if let Err(e) = store::update_admin_password(pool.get_ref(), admin.id, &new_hash).await {
        error!(error = %e, "Failed to update admin password");
        return Err(AppError::Internal);
    }

    info!(admin_id = admin.id, "Password updated");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Password updated successfully"
    })))
}
