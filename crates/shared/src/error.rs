//! 统一错误处理模块
//!
//! 定义共享库内的错误类型：配置加载、本地化资源、持久化存储。

use thiserror::Error;

/// 共享库错误类型
#[derive(Debug, Error)]
pub enum SharedError {
    // ==================== 配置错误 ====================
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // ==================== 本地化错误 ====================
    #[error("invalid resource bundle {locale}/{namespace}: {message}")]
    InvalidBundle {
        locale: String,
        namespace: String,
        message: String,
    },

    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    #[error("localization store already initialized")]
    AlreadyInitialized,

    // ==================== 存储错误 ====================
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot locate the user home directory for token storage")]
    NoHomeDirectory,

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    // ==================== 通用错误 ====================
    #[error("internal error: {0}")]
    Internal(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, SharedError>;

impl SharedError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::InvalidBundle { .. } => "INVALID_BUNDLE",
            Self::UnknownLocale(_) => "UNKNOWN_LOCALE",
            Self::AlreadyInitialized => "ALREADY_INITIALIZED",
            Self::Io(_) => "IO_ERROR",
            Self::NoHomeDirectory => "NO_HOME_DIRECTORY",
            Self::Json(_) => "JSON_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
