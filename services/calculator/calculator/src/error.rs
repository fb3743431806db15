use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{response, Request};

use calculator_engine::{ErrorResponse, QueryError};
use telemetry::IsErr;

#[derive(Debug)]
pub enum ApiError {
    InternalError(String),
    InvalidQuery(QueryError),
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        ApiError::InvalidQuery(e)
    }
}

impl From<Box<dyn std::error::Error>> for ApiError {
    fn from(e: Box<dyn std::error::Error>) -> Self {
        ApiError::InternalError(e.to_string())
    }
}

impl IsErr for ApiError {
    fn is_err(&self) -> bool {
        matches!(self, ApiError::InternalError(_))
    }
}

impl<'r> response::Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let (body, status) = match self {
            ApiError::InternalError(e) => {
                error!("Internal Error: {}", e);
                (
                    ErrorResponse {
                        code: "internal_error".to_string(),
                        message: "Internal Server Error".to_string(),
                    },
                    Status::InternalServerError,
                )
            }
            ApiError::InvalidQuery(e) => (ErrorResponse::from(&e), Status::BadRequest),
        };
        response::status::Custom(status, Json(body)).respond_to(req)
    }
}
