//! 学习指南与指南-单词映射

use serde::{Deserialize, Serialize};

/// 学习指南
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub id: i64,
    pub guide_key: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub word_count: i64,
}

/// 指南中的单词条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideWordMapping {
    pub id: i64,
    pub guide_id: i64,
    pub word_id: i64,
    #[serde(default)]
    pub kazakh_word: Option<String>,
    /// 从 1 开始的顺序
    pub order_in_guide: i32,
    /// 0-10
    pub importance_score: i32,
}

fn default_active() -> bool {
    true
}
