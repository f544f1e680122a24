//! Kazlearn 模拟后端
//!
//! 内存实现的词汇平台 REST 接口，供管理控制台在开发与集成测试中使用。
//!
//! # 主要模块
//!
//! - `store`: 内存数据集
//! - `services`: axum 路由与处理器
//! - `seed`: 演示数据
//!
//! # 使用示例
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use mock_backend::seed::{SeedOptions, seed};
//! use mock_backend::services::{AuthPolicy, app};
//! use mock_backend::store::BackendStore;
//!
//! let store = Arc::new(BackendStore::new());
//! seed(&store, &SeedOptions::default());
//! let router = app(store, AuthPolicy::any_token());
//! ```

pub mod cli;
pub mod error;
pub mod seed;
pub mod services;
pub mod store;
