//! 学习指南接口

use kazlearn_shared::dto::{AddGuideWordsRequest, AddGuideWordsResponse, UpdateGuideWordRequest};
use kazlearn_shared::models::{Guide, GuideWordMapping};
use serde::de::IgnoredAny;

use super::client::ApiClient;
use crate::error::Result;

/// 指南 API
#[derive(Clone)]
pub struct GuidesApi {
    client: ApiClient,
}

impl GuidesApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Guide>> {
        self.client.get("/admin/guides", Vec::new()).await
    }

    pub async fn words(&self, guide_id: i64) -> Result<Vec<GuideWordMapping>> {
        self.client
            .get(&format!("/admin/guides/{}/words", guide_id), Vec::new())
            .await
    }

    /// 批量加入单词，一次请求
    pub async fn add_words(
        &self,
        guide_id: i64,
        word_ids: &[i64],
        importance_score: i32,
    ) -> Result<AddGuideWordsResponse> {
        self.client
            .post(
                &format!("/admin/guides/{}/words", guide_id),
                &AddGuideWordsRequest {
                    word_ids: word_ids.to_vec(),
                    importance_score,
                },
            )
            .await
    }

    pub async fn update_word(
        &self,
        guide_id: i64,
        word_id: i64,
        req: &UpdateGuideWordRequest,
    ) -> Result<GuideWordMapping> {
        self.client
            .put(&format!("/admin/guides/{}/words/{}", guide_id, word_id), req)
            .await
    }

    pub async fn remove_word(&self, guide_id: i64, word_id: i64) -> Result<()> {
        let _: IgnoredAny = self
            .client
            .delete(
                &format!("/admin/guides/{}/words/{}", guide_id, word_id),
                Vec::new(),
            )
            .await?;
        Ok(())
    }
}
