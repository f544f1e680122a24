//! 提示消息
//!
//! 进程内的提示日志，可克隆共享。每条提示同时作为 tracing 事件输出；
//! 命令行前端取出后打印，测试直接断言。

use std::sync::Arc;

use kazlearn_shared::i18n::{Localizer, Params};
use parking_lot::Mutex;
use tracing::{error, info, warn};

use crate::error::AdminError;

/// 提示级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// 一条提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

/// 提示日志
#[derive(Clone)]
pub struct Toaster {
    i18n: Arc<Localizer>,
    log: Arc<Mutex<Vec<Toast>>>,
}

impl Toaster {
    pub fn new(i18n: Arc<Localizer>) -> Self {
        Self {
            i18n,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// 追加已本地化的消息
    pub fn push(&self, level: ToastLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            ToastLevel::Success | ToastLevel::Info => info!(kind = level.label(), %message, "toast"),
            ToastLevel::Warning => warn!(%message, "toast"),
            ToastLevel::Error => error!(%message, "toast"),
        }
        self.log.lock().push(Toast { level, message });
    }

    pub fn success(&self, key: &str, params: &Params) {
        self.push(ToastLevel::Success, self.i18n.t_with(key, params));
    }

    pub fn info(&self, key: &str, params: &Params) {
        self.push(ToastLevel::Info, self.i18n.t_with(key, params));
    }

    pub fn warning(&self, key: &str, params: &Params) {
        self.push(ToastLevel::Warning, self.i18n.t_with(key, params));
    }

    pub fn error(&self, key: &str, params: &Params) {
        self.push(ToastLevel::Error, self.i18n.t_with(key, params));
    }

    /// 按错误分类生成错误提示
    pub fn error_from(&self, err: &AdminError) {
        self.push(ToastLevel::Error, err.user_message(&self.i18n));
    }

    /// 取出并清空
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.log.lock())
    }

    pub fn snapshot(&self) -> Vec<Toast> {
        self.log.lock().clone()
    }

    pub fn last(&self) -> Option<Toast> {
        self.log.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.log.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.lock().is_empty()
    }

    pub fn i18n(&self) -> &Localizer {
        &self.i18n
    }
}
