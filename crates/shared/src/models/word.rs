//! 单词相关实体定义
//!
//! 包含单词本体、列表行摘要、详情以及译文与例句

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::{WordImage, WordSound};

/// 哈萨克语单词
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub id: i64,
    /// 拉丁字母拼写
    pub kazakh_word: String,
    /// 西里尔字母拼写
    #[serde(default)]
    pub kazakh_cyrillic: Option<String>,
    pub category_id: i64,
    pub word_type_id: i64,
    pub difficulty_level_id: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// 单词列表行
///
/// 后端在列表查询时附带的展示字段，`primary_translation` 取请求的 `language_code`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSummary {
    pub id: i64,
    pub kazakh_word: String,
    #[serde(default)]
    pub kazakh_cyrillic: Option<String>,
    pub category_id: i64,
    #[serde(default)]
    pub category_name: Option<String>,
    pub word_type_id: i64,
    #[serde(default)]
    pub word_type_name: Option<String>,
    pub difficulty_level_id: i64,
    #[serde(default)]
    pub difficulty_level: Option<i32>,
    #[serde(default)]
    pub primary_translation: Option<String>,
    #[serde(default)]
    pub translation_count: i64,
    #[serde(default)]
    pub image_count: i64,
    #[serde(default)]
    pub sound_count: i64,
}

/// 译文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub id: i64,
    pub word_id: i64,
    pub language_id: i64,
    #[serde(default)]
    pub language_code: String,
    /// 主译文
    pub translation: String,
    /// 备选译文
    #[serde(default)]
    pub alternative_translations: Vec<String>,
}

/// 例句（控制台只读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleSentence {
    pub id: i64,
    pub word_id: i64,
    pub kazakh_sentence: String,
    #[serde(default)]
    pub difficulty_level: Option<i32>,
    #[serde(default)]
    pub usage_context: Option<String>,
    /// 语言代码 -> 例句译文
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

/// 单词详情
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordDetail {
    #[serde(flatten)]
    pub word: Word,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub word_type_name: Option<String>,
    #[serde(default)]
    pub translations: Vec<Translation>,
    #[serde(default)]
    pub images: Vec<WordImage>,
    #[serde(default)]
    pub sounds: Vec<WordSound>,
    #[serde(default)]
    pub example_sentences: Vec<ExampleSentence>,
}

impl WordDetail {
    /// 按语言代码查找译文
    pub fn translation_for(&self, language_code: &str) -> Option<&Translation> {
        self.translations
            .iter()
            .find(|t| t.language_code == language_code)
    }
}
