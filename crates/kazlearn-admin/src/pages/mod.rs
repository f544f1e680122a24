//! 列表页视图模型
//!
//! 挂载或任何过滤/排序/翻页变化时，并发发出计数查询和分页查询，
//! 以服务端结果整体替换行数据。批量操作完成后整体重新拉取，而不是本地修补。

pub mod categories;
pub mod guide_words;
pub mod selection;
pub mod words;

pub use categories::CategoriesPage;
pub use guide_words::GuideWordsPage;
pub use selection::Selection;
pub use words::{BulkDeleteStatus, WordFilters, WordsPage};

use kazlearn_shared::dto::SortDirection;

/// 页码上限
pub const MAX_PAGE_SIZE: u32 = 100;

/// 分页参数（页码从 1 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Pagination {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// 查询的 skip
    pub fn offset(&self) -> i64 {
        i64::from(self.page.max(1) - 1) * i64::from(self.limit())
    }

    /// 查询的 limit（1..=100）
    pub fn limit(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// 按总数计算总页数
    pub fn total_pages(&self, total: i64) -> i64 {
        let size = i64::from(self.limit());
        if total <= 0 { 0 } else { (total + size - 1) / size }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(20)
    }
}

/// 排序状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
            direction: SortDirection::Asc,
        }
    }

    /// 同一列翻转方向，新列从升序开始
    pub fn toggle(&mut self, column: &str) {
        if self.column == column {
            self.direction = self.direction.toggled();
        } else {
            self.column = column.to_string();
            self.direction = SortDirection::Asc;
        }
    }
}

/// 批量操作结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    pub succeeded: Vec<i64>,
    pub failed: Vec<(i64, String)>,
}

impl BulkOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
