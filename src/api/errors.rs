use super::responses::ErrorResponse;

use crate::errors::ServiceError;

use actix_web::{error::ResponseError, http::header::ContentType, http::StatusCode, HttpResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiResponseError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ResponseError for ApiResponseError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(ErrorResponse {
                detail: self.to_string(),
            })
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            ApiResponseError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiResponseError::Service(ServiceError::Simulation(_)) => StatusCode::BAD_REQUEST,
            ApiResponseError::Service(ServiceError::Mailbox { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
