//! 管理控制台错误类型定义
//!
//! 错误分为三类（见 [`ErrorClass`]）：
//! - 校验错误：客户端检查失败，字段级错误表，阻止提交
//! - 被拒绝：后端返回非 2xx，`detail` 作为提示消息展示，本次操作放弃
//! - 意外错误：网络、解码、IO 等，记录日志并展示通用提示

use kazlearn_shared::i18n::{Localizer, Params};
use reqwest::StatusCode;

use crate::forms::FieldErrors;

/// 错误分类，决定提示消息的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Validation,
    Rejected,
    Unexpected,
}

/// 管理控制台错误类型
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    // 客户端错误
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("file rejected: {0}")]
    FileRejected(String),
    #[error("invalid state: {0}")]
    InvalidState(String),

    // 后端拒绝
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("request rejected ({status}): {detail}")]
    Api { status: u16, detail: String },

    // 系统错误
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Shared(#[from] kazlearn_shared::SharedError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AdminError {
    /// 后端返回的 HTTP 状态码（仅后端拒绝类错误）
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED.as_u16()),
            _ => None,
        }
    }

    /// 返回错误码
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::FileRejected(_) => "FILE_REJECTED",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Api { status, .. } => match *status {
                404 => "NOT_FOUND",
                409 => "CONFLICT",
                400 | 422 => "BAD_REQUEST",
                s if s >= 500 => "SERVER_ERROR",
                _ => "API_ERROR",
            },
            Self::Network(_) => "NETWORK_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Shared(e) => e.code(),
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(_) | Self::FileRejected(_) | Self::InvalidState(_) => {
                ErrorClass::Validation
            }
            Self::Unauthorized(_) | Self::Api { .. } => ErrorClass::Rejected,
            _ => ErrorClass::Unexpected,
        }
    }

    /// 后端因存在依赖记录（学习进度）拒绝删除
    ///
    /// 以 `detail` 中的 "progress records" 为准；其他冲突（如重名）不提供强制删除
    pub fn is_blocked_by_dependents(&self) -> bool {
        match self {
            Self::Api { detail, .. } => detail.to_lowercase().contains(PROGRESS_RECORDS),
            _ => false,
        }
    }

    /// 用于消息参数的错误细节，后端拒绝时为 `detail`
    pub fn detail(&self) -> String {
        match self {
            Self::Api { detail, .. } | Self::Unauthorized(detail) => detail.clone(),
            other => other.to_string(),
        }
    }

    /// 提示消息文本
    ///
    /// 后端拒绝时直接展示 `detail`；意外错误只展示通用提示，细节记录日志
    pub fn user_message(&self, i18n: &Localizer) -> String {
        match self {
            Self::Validation(errors) => match errors.first() {
                Some((field, error)) => i18n.t_with(
                    "errors.field",
                    &Params::new()
                        .with("field", field)
                        .with("message", error.localized(i18n)),
                ),
                None => i18n.t("errors.validation"),
            },
            Self::FileRejected(message) | Self::InvalidState(message) => message.clone(),
            Self::Unauthorized(_) => i18n.t("errors.unauthorized"),
            Self::Api { detail, .. } => detail.clone(),
            Self::Network(_) | Self::Timeout(_) => {
                tracing::error!(error = %self, "请求未能到达后端");
                i18n.t("errors.network")
            }
            other => {
                tracing::error!(error = %other, "意外错误");
                i18n.t("errors.generic")
            }
        }
    }
}

impl From<reqwest::Error> for AdminError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::Internal(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AdminError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(FieldErrors::from(errors))
    }
}

/// 控制台 Result 类型别名
pub type Result<T> = std::result::Result<T, AdminError>;

const PROGRESS_RECORDS: &str = "progress records";
