//! 分类列表页

use kazlearn_shared::dto::CategoryListParams;
use kazlearn_shared::i18n::Params;
use kazlearn_shared::models::Category;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::{BulkOutcome, Pagination, SortState, selection::Selection};
use crate::api::AdminApi;
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::state::ConsoleState;

/// 分类列表页
pub struct CategoriesPage {
    state: ConsoleState,
    api: AdminApi,
    search: Option<String>,
    active_only: bool,
    sort: SortState,
    pagination: Pagination,
    rows: Vec<Category>,
    total: i64,
    selection: Selection,
}

impl CategoriesPage {
    pub fn new(state: ConsoleState) -> Self {
        let api = state.admin_api();
        let pagination = Pagination::new(state.settings.page_size);
        Self {
            state,
            api,
            search: None,
            active_only: false,
            sort: SortState::new("category_name"),
            pagination,
            rows: Vec::new(),
            total: 0,
            selection: Selection::new(),
        }
    }

    /// 首次拉取前设置搜索词，不发请求
    pub fn with_search(mut self, search: &str) -> Self {
        let search = search.trim();
        self.search = (!search.is_empty()).then(|| search.to_string());
        self
    }

    pub fn with_active_only(mut self, active_only: bool) -> Self {
        self.active_only = active_only;
        self
    }

    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub async fn mount(&mut self) -> Result<()> {
        self.refresh().await
    }

    pub fn params(&self) -> CategoryListParams {
        CategoryListParams {
            skip: Some(self.pagination.offset()),
            limit: Some(i64::from(self.pagination.limit())),
            search: self.search.clone(),
            active_only: self.active_only.then_some(true),
            sort_by: Some(self.sort.column.clone()),
            sort_direction: Some(self.sort.direction),
            language_code: Some(self.state.settings.language_code.clone()),
        }
    }

    /// 并发拉取计数与当前页
    pub async fn refresh(&mut self) -> Result<()> {
        let params = self.params();
        let result = tokio::try_join!(
            self.api.category_count(&params),
            self.api.categories(&params)
        );
        match result {
            Ok((total, rows)) => {
                debug!(total, rows = rows.len(), "分类列表已刷新");
                self.total = total;
                self.rows = rows;
                Ok(())
            }
            Err(e) => {
                self.state.toaster.error_from(&e);
                Err(e)
            }
        }
    }

    pub async fn apply_search(&mut self, search: &str) -> Result<()> {
        let search = search.trim();
        self.search = (!search.is_empty()).then(|| search.to_string());
        self.pagination.page = 1;
        self.refresh().await
    }

    pub async fn set_active_only(&mut self, active_only: bool) -> Result<()> {
        self.active_only = active_only;
        self.pagination.page = 1;
        self.refresh().await
    }

    pub async fn sort_by(&mut self, column: &str) -> Result<()> {
        self.sort.toggle(column);
        self.refresh().await
    }

    pub async fn go_to_page(&mut self, page: u32) -> Result<()> {
        self.pagination.page = page.max(1);
        self.refresh().await
    }

    pub fn search_debouncer(&self) -> (Debouncer<String>, mpsc::UnboundedReceiver<String>) {
        Debouncer::new(self.state.settings.search_debounce)
    }

    pub fn select_all_visible(&mut self) {
        self.selection.select_all(self.rows.iter().map(|c| c.id));
    }

    /// 单个分类的启用状态
    pub async fn set_status(&mut self, id: i64, is_active: bool) -> Result<()> {
        match self.api.set_category_status(id, is_active).await {
            Ok(_) => {
                let key = if is_active {
                    "admin:categories.activated"
                } else {
                    "admin:categories.deactivated"
                };
                self.state.toaster.success(key, &Params::new().count(1));
                self.refresh().await
            }
            Err(e) => {
                self.state.toaster.error_from(&e);
                Err(e)
            }
        }
    }

    /// 批量启用/停用选中分类（一次请求）
    pub async fn bulk_set_active(&mut self, is_active: bool) -> Result<BulkOutcome> {
        let ids = self.selection.ids();
        if ids.is_empty() {
            return Ok(BulkOutcome::default());
        }

        let reply = match self.api.bulk_category_status(&ids, is_active).await {
            Ok(reply) => reply,
            Err(e) => {
                self.state.toaster.error_from(&e);
                return Err(e);
            }
        };
        info!(requested = ids.len(), updated = reply.updated, is_active, "批量切换分类状态");

        let key = if is_active {
            "admin:categories.activated"
        } else {
            "admin:categories.deactivated"
        };
        self.state
            .toaster
            .success(key, &Params::new().count(reply.updated.max(0) as u64));

        let outcome = if reply.updated >= ids.len() as i64 {
            BulkOutcome {
                succeeded: ids,
                failed: Vec::new(),
            }
        } else {
            self.verify_status(ids, is_active).await
        };

        if let Err(e) = self.refresh().await {
            debug!(error = %e, "批量操作后刷新失败");
        }
        Ok(outcome)
    }

    /// 后端更新数少于请求数时逐个核对实际状态
    async fn verify_status(&self, ids: Vec<i64>, is_active: bool) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();
        for id in ids {
            let detail = match self.api.category(id).await {
                Ok(category) if category.is_active == is_active => {
                    outcome.succeeded.push(id);
                    continue;
                }
                Ok(_) => "status unchanged".to_string(),
                Err(e) => e.detail(),
            };
            warn!(category_id = id, detail = %detail, "分类状态未更新");
            self.state.toaster.warning(
                "admin:categories.status_failed",
                &Params::new().with("id", id).with("detail", detail.as_str()),
            );
            outcome.failed.push((id, detail));
        }
        outcome
    }

    /// 批量删除：逐个请求，失败的继续处理其余
    pub async fn bulk_delete(&mut self) -> Result<BulkOutcome> {
        let mut outcome = BulkOutcome::default();
        for id in self.selection.ids() {
            match self.api.delete_category(id).await {
                Ok(()) => outcome.succeeded.push(id),
                Err(e) => {
                    self.state.toaster.error(
                        "admin:categories.delete_failed",
                        &Params::new().with("id", id).with("detail", e.detail()),
                    );
                    outcome.failed.push((id, e.detail()));
                }
            }
        }

        if !outcome.succeeded.is_empty() {
            self.state
                .toaster
                .success("admin:categories.deleted", &Params::new());
        }
        self.selection.deselect_all(&outcome.succeeded);
        info!(
            deleted = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "批量删除分类"
        );

        if let Err(e) = self.refresh().await {
            debug!(error = %e, "批量删除后刷新失败");
        }
        Ok(outcome)
    }

    pub fn rows(&self) -> &[Category] {
        &self.rows
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn total_pages(&self) -> i64 {
        self.pagination.total_pages(self.total)
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
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
    use crate::api::{ApiReply, ApiRequest, MockGateway};
    use crate::error::AdminError;
    use crate::state::test_support::state_with;
    use reqwest::Method;
    use serde_json::json;

    fn is_refresh(req: &ApiRequest) -> bool {
        req.method == Method::GET && req.path.starts_with("/admin/categories")
    }

    fn refresh_reply(req: ApiRequest) -> crate::error::Result<ApiReply> {
        if req.path.ends_with("/count") {
            Ok(ApiReply::json(&json!({"count": 2})))
        } else {
            Ok(ApiReply::json(&json!([
                {"id": 1, "category_name": "animals", "is_active": true},
                {"id": 2, "category_name": "food", "is_active": false}
            ])))
        }
    }

    #[tokio::test]
    async fn test_active_only_filter() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(|req| is_refresh(req) && req.query_value("active_only") == Some("true"))
            .times(2)
            .returning(refresh_reply);

        let mut page = CategoriesPage::new(state_with(gateway));
        page.set_active_only(true).await.unwrap();
        assert_eq!(page.total(), 2);
        assert_eq!(page.rows().len(), 2);
    }

    #[tokio::test]
    async fn test_bulk_deactivate_is_one_request() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(is_refresh)
            .returning(refresh_reply);
        gateway
            .expect_send()
            .withf(|req| req.is(Method::POST, "/admin/categories/bulk-status"))
            .times(1)
            .returning(|_| Ok(ApiReply::json(&json!({"updated": 2}))));

        let state = state_with(gateway);
        let mut page = CategoriesPage::new(state.clone());
        page.mount().await.unwrap();
        page.select_all_visible();

        let outcome = page.bulk_set_active(false).await.unwrap();
        assert_eq!(outcome.succeeded, vec![1, 2]);
        assert_eq!(page.selection().len(), 2);
        assert_eq!(
            state.toaster.last().unwrap().message,
            "2 categories deactivated"
        );
    }

    #[tokio::test]
    async fn test_bulk_delete_one_request_per_id() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(is_refresh)
            .returning(refresh_reply);
        gateway
            .expect_send()
            .withf(|req| req.is(Method::DELETE, "/admin/categories/1"))
            .times(1)
            .returning(|_| Ok(ApiReply::json(&json!({"message": "deleted"}))));
        gateway
            .expect_send()
            .withf(|req| req.is(Method::DELETE, "/admin/categories/2"))
            .times(1)
            .returning(|_| {
                Err(AdminError::Api {
                    status: 400,
                    detail: "Category has words".into(),
                })
            });

        let state = state_with(gateway);
        let mut page = CategoriesPage::new(state.clone());
        page.selection_mut().select_all([1, 2]);

        let outcome = page.bulk_delete().await.unwrap();
        assert_eq!(outcome.succeeded, vec![1]);
        assert_eq!(outcome.failed, vec![(2, "Category has words".to_string())]);
        assert_eq!(page.selection().ids(), vec![2]);

        let toasts = state.toaster.drain();
        assert_eq!(
            toasts[0].message,
            "Could not delete category 2: Category has words"
        );
        assert_eq!(toasts[1].message, "Category deleted");
    }

    #[tokio::test]
    async fn test_bulk_status_shortfall_reports_unchanged_ids() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(|req| {
                req.method == Method::GET
                    && (req.path == "/admin/categories" || req.path == "/admin/categories/count")
            })
            .returning(refresh_reply);
        gateway
            .expect_send()
            .withf(|req| req.is(Method::POST, "/admin/categories/bulk-status"))
            .times(1)
            .returning(|_| Ok(ApiReply::json(&json!({"updated": 1}))));
        gateway
            .expect_send()
            .withf(|req| req.is(Method::GET, "/admin/categories/1"))
            .times(1)
            .returning(|_| {
                Ok(ApiReply::json(
                    &json!({"id": 1, "category_name": "animals", "is_active": false}),
                ))
            });
        gateway
            .expect_send()
            .withf(|req| req.is(Method::GET, "/admin/categories/99"))
            .times(1)
            .returning(|_| {
                Err(AdminError::Api {
                    status: 404,
                    detail: "Category 99 not found".into(),
                })
            });

        let state = state_with(gateway);
        let mut page = CategoriesPage::new(state.clone());
        page.selection_mut().select_all([1, 99]);

        let outcome = page.bulk_set_active(false).await.unwrap();
        assert_eq!(outcome.succeeded, vec![1]);
        assert_eq!(outcome.failed, vec![(99, "Category 99 not found".to_string())]);
        assert!(!outcome.is_complete());

        let toasts = state.toaster.drain();
        assert_eq!(toasts[0].message, "1 category deactivated");
        assert_eq!(
            toasts[1].message,
            "Could not change status of category 99: Category 99 not found"
        );
    }
}
