//! 模拟后端的 REST 接口
//!
//! 路由挂在 `/api/v1` 下：公共只读接口无需认证，`/admin/*` 与媒体接口要求 Bearer 令牌。

pub mod auth;
pub mod category_service;
pub mod guide_service;
pub mod media_service;
pub mod public_service;
pub mod translation_service;
pub mod word_service;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::error::{ApiError, ApiResult};
use crate::store::BackendStore;

pub use auth::{AuthPolicy, require_bearer};
pub use category_service::category_routes;
pub use guide_service::guide_routes;
pub use media_service::media_routes;
pub use public_service::public_routes;
pub use translation_service::translation_routes;
pub use word_service::word_routes;

/// 接口前缀
pub const API_PREFIX: &str = "/api/v1";

/// 请求体上限，需大于音频上限，超限的文件由媒体接口给出明确提示
pub const BODY_LIMIT: usize = 20 * 1024 * 1024;

/// 单页最大条数
pub const MAX_LIMIT: i64 = 100;

/// 未指定 limit 时的条数
pub const DEFAULT_LIMIT: i64 = 50;

pub type SharedStore = Arc<BackendStore>;

/// 组装完整应用
pub fn app(store: SharedStore, auth: AuthPolicy) -> Router {
    let protected = Router::new()
        .merge(word_routes())
        .merge(translation_routes())
        .merge(category_routes())
        .merge(guide_routes())
        .merge(media_routes())
        .route_layer(middleware::from_fn_with_state(auth, require_bearer));

    let api = Router::new()
        .merge(public_routes())
        .merge(protected)
        .with_state(store);

    Router::new()
        .route("/health", get(health_check))
        .nest(API_PREFIX, api)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "mock-backend"}))
}

/// 校验分页参数，返回 (skip, limit)
pub(crate) fn paging(skip: Option<i64>, limit: Option<i64>) -> ApiResult<(usize, usize)> {
    let skip = skip.unwrap_or(0);
    if skip < 0 {
        return Err(ApiError::invalid(
            "query",
            "skip",
            "ensure this value is greater than or equal to 0",
            "value_error.number.not_ge",
        ));
    }
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(ApiError::invalid(
            "query",
            "limit",
            &format!("ensure this value is between 1 and {MAX_LIMIT}"),
            "value_error.number.not_le",
        ));
    }
    Ok((skip as usize, limit as usize))
}

/// 不区分大小写的包含匹配
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// 去掉空白后的非空搜索词
pub(crate) fn search_term(search: &Option<String>) -> Option<&str> {
    search.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
