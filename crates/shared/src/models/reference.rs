//! 参考数据：语言、词性、难度等级（控制台只读）

use serde::{Deserialize, Serialize};

/// 界面/译文语言
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: i64,
    /// "en" / "kk" / "ru"
    pub language_code: String,
    pub language_name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// 词性
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordType {
    pub id: i64,
    pub type_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// 难度等级
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyLevel {
    pub id: i64,
    pub level_number: i32,
    pub level_name: String,
}

fn default_active() -> bool {
    true
}
