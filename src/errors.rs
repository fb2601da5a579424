use actix_web::{HttpResponse, http::StatusCode};
use derive_more::Display;
use serde_json::json;

/// Closed error taxonomy for every caller-visible failure.
///
/// Upstream failures (document service, mail) are normally absorbed before
/// the HTTP boundary; the variant exists so adapters can report them in a
/// typed way and tests can assert on the kind.
#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "{}", message)]
    Validation { message: String },

    #[display(fmt = "{}", message)]
    NotFound { message: String },

    #[display(fmt = "{}", message)]
    Auth { message: String },

    #[display(fmt = "{}", message)]
    Upstream { message: String },

    #[display(fmt = "Internal Server Error")]
    Internal,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound {
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        AppError::Auth {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        AppError::Upstream {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation",
            AppError::NotFound { .. } => "not_found",
            AppError::Auth { .. } => "auth",
            AppError::Upstream { .. } => "upstream",
            AppError::Internal => "internal",
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Auth { .. } => StatusCode::UNAUTHORIZED,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn kinds_map_to_expected_status_codes() {
        assert_eq!(
            AppError::validation("bad input").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("missing").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::auth("invalid credentials").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::upstream("mail api 500").status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn kind_strings_are_stable() {
        assert_eq!(AppError::validation("x").kind(), "validation");
        assert_eq!(AppError::not_found("x").kind(), "not_found");
        assert_eq!(AppError::auth("x").kind(), "auth");
        assert_eq!(AppError::upstream("x").kind(), "upstream");
        assert_eq!(AppError::Internal.kind(), "internal");
    }

    #[test]
    fn display_carries_the_message() {
        let err = AppError::validation("start_date cannot be after end_date");
        assert_eq!(err.to_string(), "start_date cannot be after end_date");

        // Internal never leaks details through Display.
        assert_eq!(AppError::Internal.to_string(), "Internal Server Error");
    }
}
