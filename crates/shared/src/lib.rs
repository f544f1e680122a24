//! 共享库
//!
//! 包含控制台与模拟后端共用的配置、错误处理、可观测性初始化、本地化资源存储以及 REST 接口模型。

pub mod config;
pub mod dto;
pub mod error;
pub mod i18n;
pub mod models;
pub mod observability;
pub mod test_utils;

pub use error::{Result, SharedError};
