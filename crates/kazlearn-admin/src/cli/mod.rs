//! 命令行前端
//!
//! 把控制台内核的视图模型暴露为子命令，每个子命令对应一次界面操作，
//! 执行后打印产生的提示消息。
//!
//! # 使用示例
//!
//! ```bash
//! kazlearn-admin login --token <TOKEN>
//! kazlearn-admin words list --search сәлем --category 1 --page 2
//! kazlearn-admin words create сәлем --category 1 --word-type 2 --difficulty 1 -t en=hello
//! kazlearn-admin words delete 42 --force
//! kazlearn-admin images upload 42 ./cat.png --primary
//! kazlearn-admin --locale kk categories list --active-only
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands};
pub use runner::CommandRunner;
