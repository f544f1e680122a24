//! 管理端单词接口

use kazlearn_shared::dto::{
    BulkDeleteRequest, BulkDeleteResponse, CountResponse, ExportFormat, LanguageParam,
    WordListParams, WordPayload,
};
use kazlearn_shared::models::{Word, WordDetail, WordSummary};
use serde::de::IgnoredAny;

use super::client::{ApiClient, encode_query};
use crate::error::Result;

/// 管理端单词 API
#[derive(Clone)]
pub struct AdminWordsApi {
    client: ApiClient,
}

impl AdminWordsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &WordListParams) -> Result<Vec<WordSummary>> {
        self.client.get("/admin/words", encode_query(params)?).await
    }

    pub async fn count(&self, params: &WordListParams) -> Result<i64> {
        let reply: CountResponse = self
            .client
            .get("/admin/words/count", encode_query(&params.for_count())?)
            .await?;
        Ok(reply.count)
    }

    /// 单词详情（含译文、媒体、例句）
    pub async fn get(&self, id: i64, language_code: Option<&str>) -> Result<WordDetail> {
        let params = LanguageParam {
            language_code: language_code.map(str::to_string),
        };
        self.client
            .get(&format!("/admin/words/{}", id), encode_query(&params)?)
            .await
    }

    pub async fn create(&self, payload: &WordPayload) -> Result<Word> {
        self.client.post("/admin/words", payload).await
    }

    pub async fn update(&self, id: i64, payload: &WordPayload) -> Result<Word> {
        self.client
            .put(&format!("/admin/words/{}", id), payload)
            .await
    }

    /// 删除单词；存在学习进度时后端返回 409，需 `force = true`
    pub async fn delete(&self, id: i64, force: bool) -> Result<()> {
        let query = if force {
            vec![("force".to_string(), "true".to_string())]
        } else {
            Vec::new()
        };
        let _: IgnoredAny = self
            .client
            .delete(&format!("/admin/words/{}", id), query)
            .await?;
        Ok(())
    }

    /// 批量删除，一次请求
    pub async fn bulk_delete(&self, word_ids: &[i64], force: bool) -> Result<BulkDeleteResponse> {
        self.client
            .post(
                "/admin/words/bulk-delete",
                &BulkDeleteRequest {
                    word_ids: word_ids.to_vec(),
                    force,
                },
            )
            .await
    }

    /// 按当前过滤条件导出
    pub async fn export(&self, format: ExportFormat, params: &WordListParams) -> Result<Vec<u8>> {
        let mut query = encode_query(&params.for_count())?;
        query.push(("format".to_string(), format.as_str().to_string()));
        self.client.download("/admin/words/export", query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiReply, MockGateway};
    use crate::error::AdminError;
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn api(gateway: MockGateway) -> AdminWordsApi {
        AdminWordsApi::new(ApiClient::new(Arc::new(gateway)))
    }

    #[tokio::test]
    async fn test_plain_delete_has_no_force_param() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(|req| req.is(Method::DELETE, "/admin/words/4") && req.query.is_empty())
            .times(1)
            .returning(|_| Ok(ApiReply::json(&json!({"message": "Word deleted"}))));

        api(gateway).delete(4, false).await.unwrap();
    }

    #[tokio::test]
    async fn test_force_delete_sets_param() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(|req| req.query_value("force") == Some("true"))
            .times(1)
            .returning(|_| Ok(ApiReply::json(&json!({"message": "Word deleted"}))));

        api(gateway).delete(4, true).await.unwrap();
    }

    #[tokio::test]
    async fn test_blocked_delete_surfaces_conflict() {
        let mut gateway = MockGateway::new();
        gateway.expect_send().returning(|_| {
            Err(AdminError::Api {
                status: 409,
                detail: "Word has 2 progress records".into(),
            })
        });

        let err = api(gateway).delete(4, false).await.unwrap_err();
        assert!(err.is_blocked_by_dependents());
    }

    #[tokio::test]
    async fn test_export_carries_format_and_filters() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(|req| {
                req.is(Method::GET, "/admin/words/export")
                    && req.query_value("format") == Some("json")
                    && req.query_value("category_id") == Some("2")
                    && req.query_value("limit").is_none()
            })
            .times(1)
            .returning(|_| Ok(ApiReply::new(200, b"[]".to_vec())));

        let params = WordListParams {
            category_id: Some(2),
            limit: Some(20),
            ..Default::default()
        };
        let bytes = api(gateway)
            .export(ExportFormat::Json, &params)
            .await
            .unwrap();
        assert_eq!(bytes, b"[]");
    }

    #[tokio::test]
    async fn test_detail_language_param() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(|req| req.path == "/admin/words/7" && req.query_value("language_code") == Some("ru"))
            .returning(|_| {
                Ok(ApiReply::json(&json!({
                    "id": 7, "kazakh_word": "alma", "category_id": 1,
                    "word_type_id": 1, "difficulty_level_id": 1
                })))
            });

        let detail = api(gateway).get(7, Some("ru")).await.unwrap();
        assert_eq!(detail.word.kazakh_word, "alma");
    }
}
