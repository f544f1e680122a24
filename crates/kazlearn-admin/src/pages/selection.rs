//! 行选择集合
//!
//! 本地持有的有序 id 集合，与拉取到的行无关：翻页、重新拉取都不会调整它，
//! 只有用户显式操作才会清空。

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<i64>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 切换选中状态，返回切换后是否选中
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn select(&mut self, id: i64) {
        self.ids.insert(id);
    }

    pub fn deselect(&mut self, id: i64) {
        self.ids.remove(&id);
    }

    pub fn select_all(&mut self, ids: impl IntoIterator<Item = i64>) {
        self.ids.extend(ids);
    }

    /// 移除一批 id（批量删除成功后）
    pub fn deselect_all(&mut self, ids: &[i64]) {
        for id in ids {
            self.ids.remove(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    /// 升序 id 列表
    pub fn ids(&self) -> Vec<i64> {
        self.ids.iter().copied().collect()
    }
}
