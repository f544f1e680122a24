//! 公共接口：分类、单词、参考数据

use kazlearn_shared::dto::{PublicCategoryParams, PublicWordParams};
use kazlearn_shared::models::{Category, DifficultyLevel, Language, WordSummary, WordType};

use super::client::{ApiClient, encode_query};
use crate::error::Result;

/// 公共 API
#[derive(Clone)]
pub struct PublicApi {
    client: ApiClient,
}

impl PublicApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn categories(&self, params: &PublicCategoryParams) -> Result<Vec<Category>> {
        self.client.get("/categories", encode_query(params)?).await
    }

    pub async fn words(&self, params: &PublicWordParams) -> Result<Vec<WordSummary>> {
        self.client.get("/words", encode_query(params)?).await
    }

    pub async fn languages(&self) -> Result<Vec<Language>> {
        self.client.get("/languages", Vec::new()).await
    }

    pub async fn word_types(&self) -> Result<Vec<WordType>> {
        self.client.get("/word-types", Vec::new()).await
    }

    pub async fn difficulty_levels(&self) -> Result<Vec<DifficultyLevel>> {
        self.client.get("/difficulty-levels", Vec::new()).await
    }
}
