//! 单词媒体：图片与音频

use serde::{Deserialize, Serialize};

/// 单词图片
///
/// 每个单词最多一张主图，由后端的"设为主图"接口保证
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordImage {
    pub id: i64,
    pub word_id: i64,
    pub image_url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
}

/// 单词发音
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSound {
    pub id: i64,
    pub word_id: i64,
    pub sound_url: String,
    #[serde(default)]
    pub sound_type: Option<String>,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
}
