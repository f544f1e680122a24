//! 后端错误响应
//!
//! 与 FastAPI 的错误体保持一致：业务错误为 `{"detail": "..."}`，
//! 参数校验错误为 `{"detail": [{"loc": [...], "msg": "...", "type": "..."}]}`。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use kazlearn_shared::dto::{ErrorBody, ValidationIssue};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    Internal(String),

    #[error("validation failed: {} issue(s)", .0.len())]
    Validation(Vec<ValidationIssue>),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 单字段校验错误，`loc` 形如 `["body", "kazakh_word"]`
    pub fn invalid(location: &str, field: &str, msg: &str, kind: &str) -> Self {
        Self::Validation(vec![ValidationIssue {
            loc: vec![json!(location), json!(field)],
            msg: msg.to_string(),
            kind: kind.to_string(),
        }])
    }

    pub fn not_found(entity: &str, id: i64) -> Self {
        Self::NotFound(format!("{entity} {id} not found"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        debug!(status = status.as_u16(), error = %self, "请求被拒绝");
        let body = match self {
            Self::Validation(issues) => ErrorBody::validation(issues),
            other => ErrorBody::message(other.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        Self::Internal(format!("csv export failed: {err}"))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
