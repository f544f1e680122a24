//! 管理端接口：分类与译文

use kazlearn_shared::dto::{
    BulkStatusRequest, BulkStatusResponse, CategoryListParams, CategoryPayload,
    CategoryStatusRequest, CountResponse, CreateTranslationRequest, UpdateTranslationRequest,
};
use kazlearn_shared::models::{Category, Translation};
use serde::de::IgnoredAny;

use super::client::{ApiClient, encode_query};
use crate::error::Result;

/// 管理端 API（分类、译文）
#[derive(Clone)]
pub struct AdminApi {
    client: ApiClient,
}

impl AdminApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // ========== 分类 ==========

    pub async fn categories(&self, params: &CategoryListParams) -> Result<Vec<Category>> {
        self.client
            .get("/admin/categories", encode_query(params)?)
            .await
    }

    pub async fn category_count(&self, params: &CategoryListParams) -> Result<i64> {
        let reply: CountResponse = self
            .client
            .get("/admin/categories/count", encode_query(&params.for_count())?)
            .await?;
        Ok(reply.count)
    }

    pub async fn category(&self, id: i64) -> Result<Category> {
        self.client
            .get(&format!("/admin/categories/{}", id), Vec::new())
            .await
    }

    /// 创建分类，译名一并提交
    pub async fn create_category(&self, payload: &CategoryPayload) -> Result<Category> {
        self.client.post("/admin/categories", payload).await
    }

    pub async fn update_category(&self, id: i64, payload: &CategoryPayload) -> Result<Category> {
        self.client
            .put(&format!("/admin/categories/{}", id), payload)
            .await
    }

    pub async fn set_category_status(&self, id: i64, is_active: bool) -> Result<Category> {
        self.client
            .patch(
                &format!("/admin/categories/{}/status", id),
                &CategoryStatusRequest { is_active },
            )
            .await
    }

    /// 批量启用/停用，一次请求
    pub async fn bulk_category_status(
        &self,
        category_ids: &[i64],
        is_active: bool,
    ) -> Result<BulkStatusResponse> {
        self.client
            .post(
                "/admin/categories/bulk-status",
                &BulkStatusRequest {
                    category_ids: category_ids.to_vec(),
                    is_active,
                },
            )
            .await
    }

    pub async fn delete_category(&self, id: i64) -> Result<()> {
        let _: IgnoredAny = self
            .client
            .delete(&format!("/admin/categories/{}", id), Vec::new())
            .await?;
        Ok(())
    }

    // ========== 译文 ==========

    pub async fn create_translation(&self, req: &CreateTranslationRequest) -> Result<Translation> {
        self.client.post("/admin/translations", req).await
    }

    pub async fn update_translation(
        &self,
        id: i64,
        req: &UpdateTranslationRequest,
    ) -> Result<Translation> {
        self.client
            .put(&format!("/admin/translations/{}", id), req)
            .await
    }

    pub async fn delete_translation(&self, id: i64) -> Result<()> {
        let _: IgnoredAny = self
            .client
            .delete(&format!("/admin/translations/{}", id), Vec::new())
            .await?;
        Ok(())
    }
}
