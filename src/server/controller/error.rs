use actix_web::{error, HttpResponse};
use actix_web::http::StatusCode;
use derive_more::{Display, Error};
use serde::Serialize;
use crate::server::database::store::StoreError;
use crate::server::menu::upstream::UpstreamError;

#[derive(Debug, Display, Error)]
pub(crate) enum CustomError {
    #[display("invalid request: {_0}")]
    BadRequest(#[error(not(source))] String),
    #[display("Order not found")]
    NotFound,
    #[display("{_0}")]
    Upstream(UpstreamError),
    #[display("{_0}")]
    Internal(#[error(not(source))] String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl From<StoreError> for CustomError {
    fn from(e: StoreError) -> Self {
        CustomError::Internal(e.to_string())
    }
}

impl From<UpstreamError> for CustomError {
    fn from(e: UpstreamError) -> Self {
        CustomError::Upstream(e)
    }
}

impl error::ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match *self {
            CustomError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CustomError::NotFound => StatusCode::NOT_FOUND,
            CustomError::Upstream(UpstreamError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            CustomError::Upstream(_) => StatusCode::BAD_GATEWAY,
            CustomError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.to_string(),
        })
    }
}
