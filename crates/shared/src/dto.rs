//! REST 接口请求/响应 DTO
//!
//! 查询参数、请求体与响应体定义。字段名与后端 JSON（snake_case）保持一致。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{CategoryTranslation, GuideWordMapping};

// ==================== 查询参数 ====================

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// 翻转方向
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// 管理端单词列表/计数过滤
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_type_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_level_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl WordListParams {
    /// 计数查询不需要分页与排序
    pub fn for_count(&self) -> Self {
        Self {
            skip: None,
            limit: None,
            sort_by: None,
            sort_direction: None,
            ..self.clone()
        }
    }
}

/// 管理端分类列表/计数过滤
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl CategoryListParams {
    pub fn for_count(&self) -> Self {
        Self {
            skip: None,
            limit: None,
            sort_by: None,
            sort_direction: None,
            ..self.clone()
        }
    }
}

/// 公共分类查询
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicCategoryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_only: Option<bool>,
}

/// 公共单词查询
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicWordParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// 单词详情的语言参数
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageParam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

/// 强制删除参数
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ForceParam {
    #[serde(default)]
    pub force: bool,
}

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// 导出文件的扩展名
    pub fn extension(self) -> &'static str {
        self.as_str()
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unsupported export format: {other}")),
        }
    }
}

/// 导出格式参数（与 [`WordListParams`] 一同放在查询串中）
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ExportFormatParam {
    #[serde(default)]
    pub format: ExportFormat,
}

// ==================== 请求体 ====================

/// 创建/更新单词（PUT 为整体替换）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordPayload {
    pub kazakh_word: String,
    #[serde(default)]
    pub kazakh_cyrillic: Option<String>,
    pub category_id: i64,
    pub word_type_id: i64,
    pub difficulty_level_id: i64,
}

/// 新增译文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTranslationRequest {
    pub word_id: i64,
    pub language_id: i64,
    pub translation: String,
    #[serde(default)]
    pub alternative_translations: Vec<String>,
}

/// 更新译文（语言不可改）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateTranslationRequest {
    pub translation: String,
    #[serde(default)]
    pub alternative_translations: Vec<String>,
}

/// 创建/更新分类，译名随分类一起提交
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub category_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub translations: Vec<CategoryTranslation>,
}

/// 切换分类启用状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CategoryStatusRequest {
    pub is_active: bool,
}

/// 批量切换分类状态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkStatusRequest {
    pub category_ids: Vec<i64>,
    pub is_active: bool,
}

/// 批量删除单词
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    pub word_ids: Vec<i64>,
    #[serde(default)]
    pub force: bool,
}

/// 批量加入指南
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddGuideWordsRequest {
    pub word_ids: Vec<i64>,
    #[serde(default = "default_importance")]
    pub importance_score: i32,
}

/// 更新指南条目
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGuideWordRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_in_guide: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance_score: Option<i32>,
}

// ==================== 响应体 ====================

/// 计数响应
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: i64,
}

/// 批量删除中单条失败
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkFailure {
    pub id: i64,
    pub detail: String,
}

/// 批量删除结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    #[serde(default)]
    pub deleted: Vec<i64>,
    #[serde(default)]
    pub failed: Vec<BulkFailure>,
}

/// 批量状态结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkStatusResponse {
    pub updated: i64,
}

/// 批量加入指南的结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddGuideWordsResponse {
    #[serde(default)]
    pub added: Vec<GuideWordMapping>,
}

/// 删除类接口的通用消息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// 错误响应体：`detail` 为字符串或校验错误列表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: Value,
}

/// 校验错误列表中的一项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub loc: Vec<Value>,
    pub msg: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl ErrorBody {
    pub fn message(detail: impl Into<String>) -> Self {
        Self {
            detail: Value::String(detail.into()),
        }
    }

    pub fn validation(issues: Vec<ValidationIssue>) -> Self {
        Self {
            detail: serde_json::to_value(issues).unwrap_or(Value::Null),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_importance() -> i32 {
    5
}
