//! REST 网关
//!
//! [`Gateway`] 是控制台与后端之间唯一的接缝：视图模型和领域客户端只构造
//! [`ApiRequest`]，发送、鉴权头注入与错误体解析都在这里完成。
//! 单元测试用 `MockGateway` 替换真实实现。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use kazlearn_shared::config::ApiConfig;

use super::token::TokenStore;
use crate::error::{AdminError, Result};

/// 请求体
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(UploadForm),
}

/// multipart 上传内容：文件放在 `file` 字段，其余为文本字段
#[derive(Debug, Clone, PartialEq)]
pub struct UploadForm {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub fields: Vec<(String, String)>,
}

impl UploadForm {
    pub fn new(file_name: &str, mime_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes,
            fields: Vec::new(),
        }
    }

    /// 追加文本字段，空值不发送
    pub fn text(mut self, name: &str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.is_empty() {
                self.fields.push((name.to_string(), value));
            }
        }
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn into_form(self) -> Result<Form> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime_type)?;
        let mut form = Form::new().part("file", part);
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        Ok(form)
    }
}

/// 一次 REST 调用
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// 相对于 `api.base_url` 的路径，如 `/admin/words/7`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            timeout: None,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query.extend(query);
        self
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn with_upload(mut self, form: UploadForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// 查询参数的值
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// 用于断言的简写，如 `POST /admin/translations`
    pub fn is(&self, method: Method, path: &str) -> bool {
        self.method == method && self.path == path
    }
}

/// 2xx 响应
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiReply {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// 以 JSON 序列化的 200 响应
    pub fn json(value: &impl serde::Serialize) -> Self {
        Self {
            status: 200,
            body: serde_json::to_vec(value).unwrap_or_default(),
        }
    }
}

/// REST 网关接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Gateway: Send + Sync {
    /// 发送请求；非 2xx 响应转换为 [`AdminError`]
    async fn send(&self, request: ApiRequest) -> Result<ApiReply>;
}

/// 基于 reqwest 的网关实现
///
/// 每次请求时从 [`TokenStore`] 读取令牌，登录/登出立即生效
pub struct HttpGateway {
    client: Client,
    base_url: String,
    tokens: TokenStore,
}

impl HttpGateway {
    pub fn new(config: &ApiConfig, tokens: TokenStore) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn send(&self, request: ApiRequest) -> Result<ApiReply> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(method = %request.method, path = %request.path, "API 请求");

        let mut builder = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = self.tokens.token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form.into_form()?),
        };

        let response = builder.send().await.inspect_err(|e| {
            warn!(method = %request.method, path = %request.path, error = %e, "API 请求失败");
        })?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        if status.is_success() {
            Ok(ApiReply::new(status.as_u16(), body))
        } else {
            let err = error_from_response(status, &body);
            warn!(
                method = %request.method,
                path = %request.path,
                status = status.as_u16(),
                error = %err,
                "API 返回错误"
            );
            Err(err)
        }
    }
}

/// 把非 2xx 响应转换为错误，401 单独归类
pub fn error_from_response(status: StatusCode, body: &[u8]) -> AdminError {
    let detail = extract_detail(body)
        .or_else(|| {
            let text = String::from_utf8_lossy(body).trim().to_string();
            (!text.is_empty()).then_some(text)
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    if status == StatusCode::UNAUTHORIZED {
        AdminError::Unauthorized(detail)
    } else {
        AdminError::Api {
            status: status.as_u16(),
            detail,
        }
    }
}

/// 从错误体中提取 `detail`
///
/// 字符串原样返回；校验错误列表拼接为 `field: msg; field: msg`
fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(describe_issue).collect();
            Some(parts.join("; "))
        }
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn describe_issue(item: &Value) -> String {
    let msg = item
        .get("msg")
        .and_then(Value::as_str)
        .unwrap_or("invalid value");
    // loc 的首段是 body/query，取最后一段作为字段名
    let field = item
        .get("loc")
        .and_then(Value::as_array)
        .and_then(|loc| loc.last())
        .map(|last| match last {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
    match field {
        Some(field) => format!("{field}: {msg}"),
        None => msg.to_string(),
    }
}
