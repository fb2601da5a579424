use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};

use crate::auth::jwt::verify_session_token;
use crate::config::Config;
use crate::errors::AppError;

/// Extractor that gates a handler on a valid admin session token. Adding
/// it as a parameter is all a privileged route needs.
pub struct AuthAdmin {
    pub admin_id: u64,
    pub username: String,
}

impl FromRequest for AuthAdmin {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(AppError::auth("missing bearer token").into())),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => return ready(Err(AppError::Internal.into())),
        };

        match verify_session_token(token, &config.jwt_secret) {
            Ok(claims) => ready(Ok(AuthAdmin {
                admin_id: claims.admin_id,
                username: claims.sub,
            })),
            Err(reason) => {
                tracing::debug!(%reason, "rejected session token");
                ready(Err(AppError::auth("invalid or expired session token").into()))
            }
        }
    }
}
