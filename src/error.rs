use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::views;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Phone number already exists: {0}")]
    DuplicatePhone(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Expected failures are turned into a notice and a redirect by the
    /// handlers; everything else is a fatal request failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::DuplicatePhone(_) | AppError::ValidationError(_) | AppError::AuthError(_)
        )
    }

    /// Text shown to the user when the failure is recovered into a notice.
    pub fn notice(&self) -> String {
        match self {
            AppError::DuplicatePhone(_) => "Phone number already exists".to_string(),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::AuthError(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicatePhone(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthError(_) | AppError::JwtError(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let message = match self {
            AppError::DuplicatePhone(phone) => {
                log::warn!("Duplicate phone rejected: {phone}");
                self.notice()
            }
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                msg.clone()
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                msg.clone()
            }
            AppError::JwtError(err) => {
                log::warn!("Session token rejected: {err}");
                "Invalid session".to_string()
            }
            AppError::NotFound(msg) => msg.clone(),
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                "Database error".to_string()
            }
            _ => {
                log::error!("Internal error: {self}");
                "Internal server error".to_string()
            }
        };

        HttpResponse::build(status_code)
            .content_type("text/html; charset=utf-8")
            .body(views::error_page(status_code.as_u16(), &message))
    }
}
