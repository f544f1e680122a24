//! 单词媒体接口：图片与音频

use kazlearn_shared::models::{WordImage, WordSound};
use serde::de::IgnoredAny;

use super::client::ApiClient;
use super::gateway::UploadForm;
use crate::error::Result;

/// 媒体 API
#[derive(Clone)]
pub struct MediaApi {
    client: ApiClient,
}

impl MediaApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // ========== 图片 ==========

    pub async fn images(&self, word_id: i64) -> Result<Vec<WordImage>> {
        self.client
            .get(&format!("/word-images/{}", word_id), Vec::new())
            .await
    }

    pub async fn upload_image(&self, word_id: i64, form: UploadForm) -> Result<WordImage> {
        self.client
            .upload(&format!("/word-images/{}", word_id), form)
            .await
    }

    pub async fn delete_image(&self, word_id: i64, image_id: i64) -> Result<()> {
        let _: IgnoredAny = self
            .client
            .delete(&format!("/word-images/{}/{}", word_id, image_id), Vec::new())
            .await?;
        Ok(())
    }

    /// 设为主图，后端负责清除其他图片的主图标记
    pub async fn set_primary_image(&self, word_id: i64, image_id: i64) -> Result<WordImage> {
        self.client
            .put(
                &format!("/word-images/{}/{}/primary", word_id, image_id),
                &serde_json::json!({}),
            )
            .await
    }

    // ========== 音频 ==========

    pub async fn sounds(&self, word_id: i64) -> Result<Vec<WordSound>> {
        self.client
            .get(&format!("/word-sounds/{}", word_id), Vec::new())
            .await
    }

    pub async fn upload_sound(&self, word_id: i64, form: UploadForm) -> Result<WordSound> {
        self.client
            .upload(&format!("/word-sounds/{}", word_id), form)
            .await
    }

    pub async fn delete_sound(&self, word_id: i64, sound_id: i64) -> Result<()> {
        let _: IgnoredAny = self
            .client
            .delete(&format!("/word-sounds/{}/{}", word_id, sound_id), Vec::new())
            .await?;
        Ok(())
    }
}
