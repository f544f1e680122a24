//! 指南单词页
//!
//! 按 `order_in_guide` 排序展示指南中的单词，支持调整顺序、批量加入与批量移除。

use kazlearn_shared::dto::UpdateGuideWordRequest;
use kazlearn_shared::i18n::Params;
use kazlearn_shared::models::GuideWordMapping;
use tracing::{debug, info};

use super::{BulkOutcome, selection::Selection};
use crate::api::GuidesApi;
use crate::error::{AdminError, Result};
use crate::forms::GuideMappingForm;
use crate::forms::guide::check_importance;
use crate::state::ConsoleState;

/// 指南单词页
pub struct GuideWordsPage {
    state: ConsoleState,
    api: GuidesApi,
    guide_id: i64,
    rows: Vec<GuideWordMapping>,
    selection: Selection,
}

impl GuideWordsPage {
    pub fn new(state: ConsoleState, guide_id: i64) -> Self {
        let api = state.guides_api();
        Self {
            state,
            api,
            guide_id,
            rows: Vec::new(),
            selection: Selection::new(),
        }
    }

    pub async fn mount(&mut self) -> Result<()> {
        self.refresh().await
    }

    pub async fn refresh(&mut self) -> Result<()> {
        match self.api.words(self.guide_id).await {
            Ok(mut rows) => {
                rows.sort_by_key(|m| (m.order_in_guide, m.id));
                self.rows = rows;
                Ok(())
            }
            Err(e) => {
                self.state.toaster.error_from(&e);
                Err(e)
            }
        }
    }

    /// 批量加入单词（一次请求）
    pub async fn add_words(&mut self, word_ids: &[i64], importance_score: i32) -> Result<usize> {
        check_importance(importance_score).into_result()?;
        let reply = match self
            .api
            .add_words(self.guide_id, word_ids, importance_score)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                self.state.toaster.error_from(&e);
                return Err(e);
            }
        };
        let added = reply.added.len();
        self.state
            .toaster
            .success("admin:guides.words_added", &Params::new().count(added as u64));
        self.refresh().await?;
        Ok(added)
    }

    /// 修改条目的顺序与重要度
    pub async fn update_mapping(&mut self, word_id: i64, form: GuideMappingForm) -> Result<()> {
        let req = form.request()?;
        match self.api.update_word(self.guide_id, word_id, &req).await {
            Ok(_) => {
                self.state
                    .toaster
                    .success("admin:guides.order_updated", &Params::new());
                self.refresh().await
            }
            Err(e) => {
                self.state.toaster.error_from(&e);
                Err(e)
            }
        }
    }

    /// 与上一个条目交换顺序
    pub async fn move_up(&mut self, word_id: i64) -> Result<()> {
        let index = self.position(word_id)?;
        if index == 0 {
            return Ok(());
        }
        self.swap(index, index - 1).await
    }

    /// 与下一个条目交换顺序
    pub async fn move_down(&mut self, word_id: i64) -> Result<()> {
        let index = self.position(word_id)?;
        if index + 1 >= self.rows.len() {
            return Ok(());
        }
        self.swap(index, index + 1).await
    }

    /// 两次 PUT，顺序执行；第一次失败则不发第二次
    async fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        let first = self.rows[a].clone();
        let second = self.rows[b].clone();
        debug!(
            guide_id = self.guide_id,
            first = first.word_id,
            second = second.word_id,
            "交换指南条目顺序"
        );

        let first_req = UpdateGuideWordRequest {
            order_in_guide: Some(second.order_in_guide),
            importance_score: None,
        };
        let second_req = UpdateGuideWordRequest {
            order_in_guide: Some(first.order_in_guide),
            importance_score: None,
        };
        let result = match self
            .api
            .update_word(self.guide_id, first.word_id, &first_req)
            .await
        {
            Ok(_) => {
                self.api
                    .update_word(self.guide_id, second.word_id, &second_req)
                    .await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(_) => {
                self.state
                    .toaster
                    .success("admin:guides.order_updated", &Params::new());
                self.refresh().await
            }
            Err(e) => {
                self.state.toaster.error_from(&e);
                // 第一次可能已生效，以服务端为准
                if let Err(refresh_err) = self.refresh().await {
                    debug!(error = %refresh_err, "顺序调整失败后刷新失败");
                }
                Err(e)
            }
        }
    }

    /// 批量移除：逐个请求
    pub async fn remove_selected(&mut self) -> Result<BulkOutcome> {
        let mut outcome = BulkOutcome::default();
        for word_id in self.selection.ids() {
            match self.api.remove_word(self.guide_id, word_id).await {
                Ok(()) => outcome.succeeded.push(word_id),
                Err(e) => {
                    self.state.toaster.error(
                        "admin:guides.remove_failed",
                        &Params::new().with("id", word_id).with("detail", e.detail()),
                    );
                    outcome.failed.push((word_id, e.detail()));
                }
            }
        }
        if !outcome.succeeded.is_empty() {
            self.state
                .toaster
                .success("admin:guides.word_removed", &Params::new());
        }
        self.selection.deselect_all(&outcome.succeeded);
        info!(
            guide_id = self.guide_id,
            removed = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "批量移除指南单词"
        );
        if let Err(e) = self.refresh().await {
            debug!(error = %e, "批量移除后刷新失败");
        }
        Ok(outcome)
    }

    fn position(&self, word_id: i64) -> Result<usize> {
        self.rows
            .iter()
            .position(|m| m.word_id == word_id)
            .ok_or_else(|| AdminError::InvalidState(format!("word {word_id} is not in this guide")))
    }

    pub fn guide_id(&self) -> i64 {
        self.guide_id
    }

    pub fn rows(&self) -> &[GuideWordMapping] {
        &self.rows
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiReply, MockGateway};
    use crate::state::test_support::state_with;
    use reqwest::Method;
    use serde_json::json;

    fn mappings() -> serde_json::Value {
        json!([
            {"id": 3, "guide_id": 1, "word_id": 30, "order_in_guide": 3, "importance_score": 5},
            {"id": 1, "guide_id": 1, "word_id": 10, "order_in_guide": 1, "importance_score": 5},
            {"id": 2, "guide_id": 1, "word_id": 20, "order_in_guide": 2, "importance_score": 5}
        ])
    }

    fn mapping_reply() -> ApiReply {
        ApiReply::json(&json!({
            "id": 1, "guide_id": 1, "word_id": 10, "order_in_guide": 1, "importance_score": 5
        }))
    }

    #[tokio::test]
    async fn test_rows_sorted_by_order() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(|req| req.is(Method::GET, "/admin/guides/1/words"))
            .returning(|_| Ok(ApiReply::json(&mappings())));

        let mut page = GuideWordsPage::new(state_with(gateway), 1);
        page.mount().await.unwrap();
        let order: Vec<i64> = page.rows().iter().map(|m| m.word_id).collect();
        assert_eq!(order, vec![10, 20, 30]);
    }

    #[tokio::test]
    async fn test_move_down_swaps_with_two_puts() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(|req| req.method == Method::GET)
            .returning(|_| Ok(ApiReply::json(&mappings())));
        gateway
            .expect_send()
            .withf(|req| {
                req.is(Method::PUT, "/admin/guides/1/words/10")
                    && req.json_body() == Some(&json!({"order_in_guide": 2}))
            })
            .times(1)
            .returning(|_| Ok(mapping_reply()));
        gateway
            .expect_send()
            .withf(|req| {
                req.is(Method::PUT, "/admin/guides/1/words/20")
                    && req.json_body() == Some(&json!({"order_in_guide": 1}))
            })
            .times(1)
            .returning(|_| Ok(mapping_reply()));

        let mut page = GuideWordsPage::new(state_with(gateway), 1);
        page.mount().await.unwrap();
        page.move_down(10).await.unwrap();
    }

    #[tokio::test]
    async fn test_move_up_at_top_is_noop() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(|req| req.method == Method::GET)
            .times(1)
            .returning(|_| Ok(ApiReply::json(&mappings())));

        let mut page = GuideWordsPage::new(state_with(gateway), 1);
        page.mount().await.unwrap();
        page.move_up(10).await.unwrap();
        assert!(page.move_up(99).await.is_err());
    }

    #[tokio::test]
    async fn test_add_words_validates_importance() {
        let gateway = MockGateway::new();
        let mut page = GuideWordsPage::new(state_with(gateway), 1);
        let err = page.add_words(&[1, 2], 11).await.unwrap_err();
        assert!(matches!(err, AdminError::Validation(ref e) if e.contains("importance_score")));
    }

    #[tokio::test]
    async fn test_remove_selected_one_request_each() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(|req| req.method == Method::GET)
            .returning(|_| Ok(ApiReply::json(&json!([]))));
        gateway
            .expect_send()
            .withf(|req| req.method == Method::DELETE && req.path.starts_with("/admin/guides/1/words/"))
            .times(2)
            .returning(|_| Ok(ApiReply::json(&json!({"message": "removed"}))));

        let state = state_with(gateway);
        let mut page = GuideWordsPage::new(state.clone(), 1);
        page.selection_mut().select_all([10, 20]);
        let outcome = page.remove_selected().await.unwrap();
        assert_eq!(outcome.succeeded, vec![10, 20]);
        assert!(page.selection().is_empty());
        assert_eq!(
            state.toaster.last().unwrap().message,
            "Word removed from the guide"
        );
    }
}
