//! CLI 模块
//!
//! - `server` - 启动模拟后端
//! - `dump` - 输出演示数据（JSON）
//!
//! # 使用示例
//!
//! ```bash
//! # 启动服务器（带演示数据）
//! mock-backend server --port 8000
//!
//! # 只有参考数据，并固定令牌
//! mock-backend server --empty --token dev-token
//!
//! # 导出演示数据
//! mock-backend dump -o seed.json
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands};
pub use runner::CommandRunner;
