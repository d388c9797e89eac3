use actix_web::http::StatusCode;
use actix_web::{HttpResponse, HttpResponseBuilder};
use log::error;
use serde::Serialize;
use thiserror::Error;

use crate::server::auth::AuthError;
use crate::server::db::DbError;
use crate::types::form::FormError;
use crate::types::response::{DeleteResponse, ErrorResponse, MessageResponse};

/// Everything a handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Form(#[from] FormError),

    /// A body that is not the expected JSON document.
    #[error("invalid body: {0}")]
    Body(String),

    #[error("resource not found")]
    NotFound,
}

/// The two deployments disagree on how some failures are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Booking,
    Drinks,
}

impl ApiError {
    pub fn status(&self, surface: Surface) -> StatusCode {
        match self {
            ApiError::Auth(e) => e.status(),
            ApiError::Db(DbError::NotFound) | ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Db(DbError::Constraint(_)) => match surface {
                Surface::Booking => StatusCode::CONFLICT,
                Surface::Drinks => StatusCode::UNPROCESSABLE_ENTITY,
            },
            ApiError::Db(DbError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Db(DbError::Other(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Form(_) | ApiError::Body(_) => match surface {
                Surface::Booking => StatusCode::BAD_REQUEST,
                Surface::Drinks => StatusCode::UNPROCESSABLE_ENTITY,
            },
        }
    }
}

/// A wrapper struct for HTTP responses that provides convenient methods
/// for creating common response types
pub struct Response {
    http_response: HttpResponse,
}

impl Response {
    pub fn not_found() -> Self {
        Self::err_response(StatusCode::NOT_FOUND, Self::reason(StatusCode::NOT_FOUND))
    }

    pub fn method_not_allowed() -> Self {
        Self::err_response(
            StatusCode::METHOD_NOT_ALLOWED,
            Self::reason(StatusCode::METHOD_NOT_ALLOWED),
        )
    }

    pub fn json<T: Serialize>(data: T) -> Self {
        Self {
            http_response: HttpResponse::Ok().json(data),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self::json(MessageResponse {
            success: true,
            message: message.into(),
        })
    }

    pub fn deleted(id: u64) -> Self {
        Self::json(DeleteResponse {
            success: true,
            delete: id,
        })
    }

    /// The error body for `err`. Authorization failures carry their code,
    /// drink API failures the generic reason of their status, booking
    /// failures the error itself.
    pub fn api_error(err: &ApiError, surface: Surface) -> Self {
        let status = err.status(surface);
        let message = match (err, surface) {
            (ApiError::Auth(e), _) => e.code().to_string(),
            (_, Surface::Drinks) => Self::reason(status),
            (_, Surface::Booking) => err.to_string(),
        };
        Self::log_error(err, status);
        Self::err_response(status, message)
    }

    /// As [`Response::api_error`], with a caller-chosen message.
    pub fn api_error_with(err: &ApiError, surface: Surface, message: impl Into<String>) -> Self {
        let status = err.status(surface);
        Self::log_error(err, status);
        Self::err_response(status, message.into())
    }

    pub fn status(&self) -> StatusCode {
        self.http_response.status()
    }

    fn log_error(err: &ApiError, status: StatusCode) {
        if status.is_server_error() {
            error!("Handle request failed: {err:#}");
        }
    }

    fn reason(status: StatusCode) -> String {
        match status {
            StatusCode::BAD_REQUEST => "bad request",
            StatusCode::UNAUTHORIZED => "unauthorized",
            StatusCode::FORBIDDEN => "forbidden",
            StatusCode::NOT_FOUND => "resource not found",
            StatusCode::METHOD_NOT_ALLOWED => "method not allowed",
            StatusCode::CONFLICT => "conflict",
            StatusCode::UNPROCESSABLE_ENTITY => "unprocessable",
            StatusCode::SERVICE_UNAVAILABLE => "service unavailable",
            _ => "internal server error",
        }
        .to_string()
    }

    fn err_response(status: StatusCode, message: String) -> Self {
        let resp = ErrorResponse {
            success: false,
            error: status.as_u16(),
            message,
        };
        Self {
            http_response: HttpResponseBuilder::new(status).json(resp),
        }
    }
}

impl From<Response> for HttpResponse {
    fn from(val: Response) -> Self {
        val.http_response
    }
}
