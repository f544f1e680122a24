//! 单词删除确认与强制删除流程
//!
//! ```text
//! Idle --request--> Confirming --confirm--> Deleted
//!                        |
//!                        | detail 含 "progress records"
//!                        v
//!                     Blocked --set_force(true) + confirm--> Deleted
//! ```
//!
//! 任意状态 `cancel()` 回到 `Idle`。`Blocked` 下未勾选强制删除时确认会在本地被拒绝，
//! 行数据保留直到强制删除成功。

use kazlearn_shared::i18n::Params;
use tracing::{info, warn};

use crate::api::AdminWordsApi;
use crate::error::{AdminError, Result};
use crate::state::ConsoleState;

/// 删除流程状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteState {
    Idle,
    Confirming { word_id: i64 },
    Blocked { word_id: i64, detail: String, force: bool },
    Deleted { word_id: i64 },
}

/// 单词删除流程
pub struct DeleteWordFlow {
    state: ConsoleState,
    api: AdminWordsApi,
    current: DeleteState,
}

impl DeleteWordFlow {
    pub fn new(state: ConsoleState) -> Self {
        let api = state.words_api();
        Self {
            state,
            api,
            current: DeleteState::Idle,
        }
    }

    pub fn state(&self) -> &DeleteState {
        &self.current
    }

    /// 是否展示强制删除选项
    pub fn force_available(&self) -> bool {
        matches!(self.current, DeleteState::Blocked { .. })
    }

    /// 打开确认对话框
    pub fn request(&mut self, word_id: i64) {
        self.current = DeleteState::Confirming { word_id };
    }

    /// 勾选/取消强制删除，仅在被阻止时可用
    pub fn set_force(&mut self, enabled: bool) -> Result<()> {
        match &mut self.current {
            DeleteState::Blocked { force, .. } => {
                *force = enabled;
                Ok(())
            }
            other => Err(AdminError::InvalidState(format!(
                "force delete is only offered for blocked deletes (state: {other:?})"
            ))),
        }
    }

    pub fn cancel(&mut self) {
        self.current = DeleteState::Idle;
    }

    /// 确认删除
    pub async fn confirm(&mut self) -> Result<&DeleteState> {
        match self.current.clone() {
            DeleteState::Confirming { word_id } => match self.api.delete(word_id, false).await {
                Ok(()) => Ok(self.deleted(word_id, false)),
                Err(e) if e.is_blocked_by_dependents() => {
                    let detail = e.detail();
                    warn!(word_id, %detail, "删除被依赖记录阻止");
                    self.state
                        .toaster
                        .warning("admin:words.delete_blocked", &Params::new().with("detail", &detail));
                    self.current = DeleteState::Blocked {
                        word_id,
                        detail,
                        force: false,
                    };
                    Ok(&self.current)
                }
                Err(e) => {
                    self.state.toaster.error_from(&e);
                    Err(e)
                }
            },
            DeleteState::Blocked { force: false, .. } => {
                let message = self.state.t("admin:words.force_required");
                self.state
                    .toaster
                    .push(crate::notify::ToastLevel::Warning, message.clone());
                Err(AdminError::InvalidState(message))
            }
            DeleteState::Blocked {
                word_id,
                force: true,
                ..
            } => match self.api.delete(word_id, true).await {
                Ok(()) => Ok(self.deleted(word_id, true)),
                Err(e) => {
                    self.state.toaster.error_from(&e);
                    Err(e)
                }
            },
            DeleteState::Idle | DeleteState::Deleted { .. } => Err(AdminError::InvalidState(
                "no delete is awaiting confirmation".into(),
            )),
        }
    }

    fn deleted(&mut self, word_id: i64, force: bool) -> &DeleteState {
        info!(word_id, force, "单词已删除");
        self.state
            .toaster
            .success("admin:words.deleted", &Params::new());
        self.current = DeleteState::Deleted { word_id };
        &self.current
    }
}
