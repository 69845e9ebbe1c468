use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

pub type ApiResult<T> = Result<JsonApiResponse<T>, AppError>;

#[derive(Debug, Serialize)]
pub struct JsonApiResponse<T: Serialize> {
    pub status: u16,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> JsonApiResponse<T> {
    pub fn ok(data: T) -> ApiResult<T> {
        Ok(Self {
            status: StatusCode::OK.as_u16(),
            message: "ok".to_string(),
            data,
        })
    }

    pub fn with_status(status: StatusCode, message: impl Into<String>, data: T) -> ApiResult<T> {
        Ok(Self {
            status: status.as_u16(),
            message: message.into(),
            data,
        })
    }
}

impl JsonApiResponse<serde_json::Value> {
    pub(crate) fn from_error(err: &AppError) -> Self {
        let status = status_for(err);
        Self {
            status: status.as_u16(),
            message: err.message().to_string(),
            data: serde_json::Value::Null,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        JsonApiResponse::from_error(&self).into_response()
    }
}

impl<T: Serialize> IntoResponse for JsonApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

pub(crate) fn log_app_error(err: &AppError, status: StatusCode) {
    tracing::error!(status = status.as_u16(), error = %err, "request failed");
}

fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
