//! 哈萨克语词汇平台管理控制台核心
//!
//! 无界面的控制台内核：REST 网关客户端、列表页、编辑弹窗、媒体管理、
//! 删除确认流程、搜索防抖与提示消息。命令行前端位于 [`cli`]。
//!
//! 所有视图模型都持有一个 [`ConsoleState`] 的克隆，通过它访问 API 客户端、
//! 提示消息和本地化查找器。

pub mod api;
pub mod cli;
pub mod debounce;
pub mod delete;
pub mod error;
pub mod forms;
pub mod media;
pub mod notify;
pub mod pages;
pub mod state;

pub use error::{AdminError, ErrorClass, Result};
pub use state::ConsoleState;
