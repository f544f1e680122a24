//! 类型化 REST 客户端
//!
//! 在 [`Gateway`] 之上提供按 HTTP 动词命名的辅助方法，负责 JSON 编解码。

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::gateway::{ApiRequest, Gateway, UploadForm};
use crate::error::{AdminError, Result};

/// 默认上传超时
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// API 客户端
#[derive(Clone)]
pub struct ApiClient {
    gateway: Arc<dyn Gateway>,
    upload_timeout: Duration,
}

impl ApiClient {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            upload_timeout: DEFAULT_UPLOAD_TIMEOUT,
        }
    }

    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T> {
        self.execute(ApiRequest::new(Method::GET, path).with_query(query))
            .await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.execute(ApiRequest::new(Method::POST, path).with_json(body))
            .await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.execute(ApiRequest::new(Method::PUT, path).with_json(body))
            .await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.execute(ApiRequest::new(Method::PATCH, path).with_json(body))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T> {
        self.execute(ApiRequest::new(Method::DELETE, path).with_query(query))
            .await
    }

    /// 下载原始字节（导出文件）
    pub async fn download(&self, path: &str, query: Vec<(String, String)>) -> Result<Vec<u8>> {
        let reply = self
            .gateway
            .send(ApiRequest::new(Method::GET, path).with_query(query))
            .await?;
        Ok(reply.body)
    }

    /// multipart 上传，带上传超时
    pub async fn upload<T: DeserializeOwned>(&self, path: &str, form: UploadForm) -> Result<T> {
        self.execute(
            ApiRequest::new(Method::POST, path)
                .with_upload(form)
                .with_timeout(self.upload_timeout),
        )
        .await
    }

    async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let reply = self.gateway.send(request).await?;
        decode(&reply.body)
    }
}

/// 空响应体按 JSON `null` 解码，便于 `()` / `Option<T>`
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_slice(body)?)
}

/// 把可序列化的过滤条件编码为查询参数
///
/// 跳过 `null`；字符串不带引号，其余标量用 JSON 文本
pub fn encode_query<T: Serialize>(params: &T) -> Result<Vec<(String, String)>> {
    match serde_json::to_value(params)? {
        Value::Object(map) => Ok(map
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(s) => Some((key, s)),
                other => Some((key, other.to_string())),
            })
            .collect()),
        Value::Null => Ok(Vec::new()),
        other => Err(AdminError::Internal(format!(
            "query parameters must serialize to an object, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::gateway::{ApiReply, MockGateway, RequestBody};
    use kazlearn_shared::dto::{SortDirection, WordListParams};
    use serde_json::json;

    #[test]
    fn test_encode_query_skips_nulls() {
        let params = WordListParams {
            skip: Some(20),
            limit: Some(20),
            search: Some("kitap".to_string()),
            sort_direction: Some(SortDirection::Desc),
            ..Default::default()
        };
        let mut query = encode_query(&params).unwrap();
        query.sort();
        assert_eq!(
            query,
            vec![
                ("limit".to_string(), "20".to_string()),
                ("search".to_string(), "kitap".to_string()),
                ("skip".to_string(), "20".to_string()),
                ("sort_direction".to_string(), "desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_encode_query_rejects_non_objects() {
        assert!(encode_query(&vec![1, 2]).is_err());
        assert!(encode_query(&()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(|req| {
                req.is(Method::POST, "/admin/translations")
                    && req.json_body() == Some(&json!({"translation": "hello"}))
            })
            .times(1)
            .returning(|_| Ok(ApiReply::json(&json!({"id": 5}))));

        let client = ApiClient::new(Arc::new(gateway));
        let reply: Value = client
            .post("/admin/translations", &json!({"translation": "hello"}))
            .await
            .unwrap();
        assert_eq!(reply["id"], 5);
    }

    #[tokio::test]
    async fn test_empty_body_decodes_to_unit() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .returning(|_| Ok(ApiReply::new(204, Vec::new())));

        let client = ApiClient::new(Arc::new(gateway));
        client
            .delete::<()>("/admin/translations/3", Vec::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upload_carries_timeout() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(|req| {
                req.timeout == Some(Duration::from_secs(12))
                    && matches!(req.body, RequestBody::Multipart(ref f) if f.file_name == "a.mp3")
            })
            .times(1)
            .returning(|_| Ok(ApiReply::json(&json!({"ok": true}))));

        let client = ApiClient::new(Arc::new(gateway)).with_upload_timeout(Duration::from_secs(12));
        let form = UploadForm::new("a.mp3", "audio/mpeg", vec![0; 4]);
        let _: Value = client.upload("/word-sounds/1", form).await.unwrap();
    }

    #[tokio::test]
    async fn test_error_propagates() {
        let mut gateway = MockGateway::new();
        gateway.expect_send().returning(|_| {
            Err(AdminError::Api {
                status: 404,
                detail: "Word not found".into(),
            })
        });

        let client = ApiClient::new(Arc::new(gateway));
        let err = client
            .get::<Value>("/admin/words/9", Vec::new())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
