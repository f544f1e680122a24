//! 单词列表页

use kazlearn_shared::dto::{ExportFormat, WordListParams};
use kazlearn_shared::i18n::Params;
use kazlearn_shared::models::WordSummary;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::{BulkOutcome, Pagination, SortState, selection::Selection};
use crate::api::AdminWordsApi;
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::forms::ReferenceData;
use crate::state::ConsoleState;

/// 单词过滤条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFilters {
    pub search: Option<String>,
    pub category_id: Option<i64>,
    pub word_type_id: Option<i64>,
    pub difficulty_level_id: Option<i64>,
}

impl WordFilters {
    /// 设置搜索词，空白视为不过滤
    pub fn search(mut self, search: &str) -> Self {
        let search = search.trim();
        self.search = (!search.is_empty()).then(|| search.to_string());
        self
    }

    pub fn category(mut self, category_id: Option<i64>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn word_type(mut self, word_type_id: Option<i64>) -> Self {
        self.word_type_id = word_type_id;
        self
    }

    pub fn difficulty(mut self, difficulty_level_id: Option<i64>) -> Self {
        self.difficulty_level_id = difficulty_level_id;
        self
    }
}

/// 批量删除结果：完成，或因依赖记录被拒绝、需强制删除
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkDeleteStatus {
    Done(BulkOutcome),
    Blocked { detail: String },
}

/// 单词列表页
pub struct WordsPage {
    state: ConsoleState,
    api: AdminWordsApi,
    filters: WordFilters,
    sort: SortState,
    pagination: Pagination,
    rows: Vec<WordSummary>,
    total: i64,
    options: ReferenceData,
    selection: Selection,
}

impl WordsPage {
    pub fn new(state: ConsoleState) -> Self {
        let api = state.words_api();
        let pagination = Pagination::new(state.settings.page_size);
        Self {
            state,
            api,
            filters: WordFilters::default(),
            sort: SortState::new("kazakh_word"),
            pagination,
            rows: Vec::new(),
            total: 0,
            options: ReferenceData::default(),
            selection: Selection::new(),
        }
    }

    /// 首次拉取前设置过滤条件，不发请求
    pub fn with_filters(mut self, filters: WordFilters) -> Self {
        self.filters = filters;
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

    /// 挂载：拉取过滤选项与第一页
    pub async fn mount(&mut self) -> Result<()> {
        match ReferenceData::fetch(&self.state).await {
            Ok(options) => self.options = options,
            Err(e) => {
                self.state.toaster.error_from(&e);
                return Err(e);
            }
        }
        self.refresh().await
    }

    /// 当前查询参数
    pub fn params(&self) -> WordListParams {
        WordListParams {
            skip: Some(self.pagination.offset()),
            limit: Some(i64::from(self.pagination.limit())),
            search: self.filters.search.clone(),
            category_id: self.filters.category_id,
            word_type_id: self.filters.word_type_id,
            difficulty_level_id: self.filters.difficulty_level_id,
            sort_by: Some(self.sort.column.clone()),
            sort_direction: Some(self.sort.direction),
            language_code: Some(self.state.settings.language_code.clone()),
        }
    }

    /// 并发拉取计数与当前页
    pub async fn refresh(&mut self) -> Result<()> {
        let params = self.params();
        let result = tokio::try_join!(self.api.count(&params), self.api.list(&params));
        match result {
            Ok((total, rows)) => {
                debug!(total, rows = rows.len(), page = self.pagination.page, "单词列表已刷新");
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

    /// 应用（已防抖的）搜索词，回到第一页
    pub async fn apply_search(&mut self, search: &str) -> Result<()> {
        self.filters = self.filters.clone().search(search);
        self.pagination.page = 1;
        self.refresh().await
    }

    pub async fn set_filters(&mut self, filters: WordFilters) -> Result<()> {
        self.filters = filters;
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

    pub async fn set_page_size(&mut self, page_size: u32) -> Result<()> {
        self.pagination = Pagination::new(page_size);
        self.refresh().await
    }

    /// 搜索输入的防抖器，间隔取 `ui.search_debounce_ms`
    pub fn search_debouncer(&self) -> (Debouncer<String>, mpsc::UnboundedReceiver<String>) {
        Debouncer::new(self.state.settings.search_debounce)
    }

    pub fn select_all_visible(&mut self) {
        self.selection.select_all(self.rows.iter().map(|r| r.id));
    }

    /// 批量删除选中的单词（一次请求）
    ///
    /// 存在学习进度时返回 [`BulkDeleteStatus::Blocked`]，调用方以 `force = true` 重新提交
    pub async fn bulk_delete(&mut self, force: bool) -> Result<BulkDeleteStatus> {
        let ids = self.selection.ids();
        if ids.is_empty() {
            return Ok(BulkDeleteStatus::Done(BulkOutcome::default()));
        }

        let reply = match self.api.bulk_delete(&ids, force).await {
            Ok(reply) => reply,
            Err(e) if !force && e.is_blocked_by_dependents() => {
                let detail = e.detail();
                self.state
                    .toaster
                    .warning("admin:words.delete_blocked", &Params::new().with("detail", &detail));
                return Ok(BulkDeleteStatus::Blocked { detail });
            }
            Err(e) => {
                self.state.toaster.error_from(&e);
                return Err(e);
            }
        };

        let outcome = BulkOutcome {
            succeeded: reply.deleted,
            failed: reply
                .failed
                .into_iter()
                .map(|f| (f.id, f.detail))
                .collect(),
        };
        info!(
            deleted = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            force,
            "批量删除单词"
        );

        let toaster = &self.state.toaster;
        if !outcome.succeeded.is_empty() {
            toaster.success(
                "admin:words.bulk_deleted",
                &Params::new().count(outcome.succeeded.len() as u64),
            );
        }
        if !outcome.failed.is_empty() {
            toaster.error(
                "admin:words.bulk_failed",
                &Params::new().count(outcome.failed.len() as u64),
            );
        }

        self.selection.deselect_all(&outcome.succeeded);
        if let Err(e) = self.refresh().await {
            debug!(error = %e, "批量删除后刷新失败");
        }
        Ok(BulkDeleteStatus::Done(outcome))
    }

    /// 按当前过滤条件导出
    pub async fn export(&self, format: ExportFormat) -> Result<Vec<u8>> {
        self.api.export(format, &self.params()).await
    }

    pub fn rows(&self) -> &[WordSummary] {
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

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn filters(&self) -> &WordFilters {
        &self.filters
    }

    pub fn options(&self) -> &ReferenceData {
        &self.options
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }
}
