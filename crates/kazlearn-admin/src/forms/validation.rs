//! 字段级校验错误表

use std::collections::BTreeMap;
use std::fmt;

use kazlearn_shared::i18n::Localizer;
use validator::{ValidationError, ValidationErrors};

use crate::error::{AdminError, Result};

/// 单个字段的错误
///
/// `code` 对应本地化键 `admin:validation.<code>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub code: String,
    pub message: Option<String>,
}

impl FieldError {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            message: None,
        }
    }

    /// 本地化后的错误文本，没有对应条目时使用附带消息或错误码
    pub fn localized(&self, i18n: &Localizer) -> String {
        let key = format!("admin:validation.{}", self.code);
        let text = i18n.t(&key);
        if text != key {
            return text;
        }
        self.message.clone().unwrap_or_else(|| self.code.clone())
    }
}

impl From<&ValidationError> for FieldError {
    fn from(err: &ValidationError) -> Self {
        Self {
            code: err.code.to_string(),
            message: err.message.as_ref().map(|m| m.to_string()),
        }
    }
}

/// 字段名 -> 第一个错误
///
/// 嵌套行使用 `translations.0.translation` 形式的键
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, FieldError>);

impl FieldErrors {
    /// 记录错误，同一字段只保留第一个
    pub fn insert(&mut self, field: &str, code: &str) {
        self.insert_error(field, FieldError::new(code));
    }

    pub fn insert_error(&mut self, field: &str, error: FieldError) {
        self.0.entry(field.to_string()).or_insert(error);
    }

    /// 合并另一张错误表，字段名加上前缀
    pub fn merge_prefixed(&mut self, prefix: &str, other: FieldErrors) {
        for (field, error) in other.0 {
            self.insert_error(&format!("{prefix}.{field}"), error);
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> Option<(&str, &FieldError)> {
        self.0.iter().next().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// 有错误时转换为 [`AdminError::Validation`]
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AdminError::Validation(self))
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut map = FieldErrors::default();
        for (field, list) in errors.field_errors() {
            if let Some(first) = list.first() {
                map.insert_error(&field.to_string(), FieldError::from(first));
            }
        }
        map
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, error)| format!("{}: {}", field, error.code))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}
