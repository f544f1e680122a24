//! Bearer 令牌检查
//!
//! 模拟后端不签发令牌：默认接受任意非空令牌，也可固定为某个值。

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::ApiError;

/// 令牌策略
#[derive(Debug, Clone, Default)]
pub struct AuthPolicy {
    expected: Option<Arc<str>>,
}

impl AuthPolicy {
    /// 接受任意非空令牌
    pub fn any_token() -> Self {
        Self::default()
    }

    /// 只接受指定令牌
    pub fn fixed(token: impl Into<Arc<str>>) -> Self {
        Self {
            expected: Some(token.into()),
        }
    }

    pub fn accepts(&self, token: &str) -> bool {
        if token.trim().is_empty() {
            return false;
        }
        match &self.expected {
            Some(expected) => expected.as_ref() == token,
            None => true,
        }
    }
}

/// 从 `Authorization: Bearer <token>` 中取出令牌
fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

pub async fn require_bearer(
    State(policy): State<AuthPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let rejection = match bearer_token(&request) {
        Some(token) if policy.accepts(token) => None,
        Some(_) => {
            debug!(path = %request.uri().path(), "令牌无效");
            Some("Could not validate credentials")
        }
        None => Some("Not authenticated"),
    };
    match rejection {
        Some(detail) => ApiError::Unauthorized(detail.to_string()).into_response(),
        None => next.run(request).await,
    }
}
