//! 内存存储
//!
//! 使用 DashMap 实现的并发内存表，按自增整数 ID 存取。

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;

/// 通用内存表
///
/// 克隆共享同一份数据。列表按 ID 升序返回，保证分页结果稳定。
#[derive(Debug)]
pub struct MemoryStore<T> {
    data: Arc<DashMap<i64, T>>,
    seq: Arc<AtomicI64>,
}

impl<T: Clone> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            data: Arc::new(DashMap::new()),
            seq: Arc::new(AtomicI64::new(0)),
        }
    }

    /// 分配下一个 ID
    pub fn next_id(&self) -> i64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// 分配 ID 并插入
    pub fn create(&self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id();
        let value = build(id);
        self.data.insert(id, value.clone());
        value
    }

    /// 插入或覆盖；ID 序列推进到不小于 `id`
    pub fn insert(&self, id: i64, value: T) {
        self.seq.fetch_max(id, Ordering::SeqCst);
        self.data.insert(id, value);
    }

    /// 返回克隆，不持有锁
    pub fn get(&self, id: i64) -> Option<T> {
        self.data.get(&id).map(|v| v.clone())
    }

    /// 原地修改，返回修改后的克隆
    pub fn update(&self, id: i64, f: impl FnOnce(&mut T)) -> Option<T> {
        self.data.get_mut(&id).map(|mut entry| {
            f(entry.value_mut());
            entry.value().clone()
        })
    }

    pub fn remove(&self, id: i64) -> Option<T> {
        self.data.remove(&id).map(|(_, v)| v)
    }

    /// 按 ID 升序列出
    pub fn list(&self) -> Vec<T> {
        self.list_by(|_| true)
    }

    pub fn list_by<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        let mut rows: Vec<(i64, T)> = self
            .data
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        rows.into_iter().map(|(_, v)| v).collect()
    }

    /// 删除满足条件的记录，返回删除条数
    pub fn remove_by<F>(&self, predicate: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        let before = self.data.len();
        self.data.retain(|_, v| !predicate(v));
        before - self.data.len()
    }

    pub fn count_by<F>(&self, predicate: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        self.data.iter().filter(|entry| predicate(entry.value())).count()
    }

    pub fn count(&self) -> usize {
        self.data.len()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.data.contains_key(&id)
    }

    pub fn clear(&self) {
        self.data.clear();
    }
}

impl<T> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            seq: Arc::clone(&self.seq),
        }
    }
}
