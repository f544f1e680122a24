//! 路由测试辅助

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, Response},
};
use serde_json::Value;
use tower::ServiceExt;

use super::{AuthPolicy, SharedStore, app};
use crate::seed::{SeedOptions, seed};
use crate::store::BackendStore;

pub const TOKEN: &str = "test-token";

/// 带演示数据的应用与其数据集
pub fn seeded_app() -> (Router, SharedStore) {
    let store = Arc::new(BackendStore::new());
    seed(&store, &SeedOptions::default());
    (app(store.clone(), AuthPolicy::any_token()), store)
}

pub async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

/// 带令牌的管理端请求
pub async fn admin(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    call(app, method, uri, Some(TOKEN), body).await
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn read_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
