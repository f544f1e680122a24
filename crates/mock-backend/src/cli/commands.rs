//! CLI 命令定义

use clap::{Parser, Subcommand};

/// 词汇平台模拟后端
#[derive(Parser, Debug)]
#[command(name = "mock-backend")]
#[command(version, about = "Kazlearn 词汇平台模拟后端")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 启动 HTTP 服务（接口前缀 /api/v1）
    Server {
        /// 服务端口
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// 只写入参考数据，不写入分类、单词与指南
        #[arg(long)]
        empty: bool,

        /// 带学习进度的单词数（这些单词删除时需要强制）
        #[arg(long, default_value = "1")]
        progress_words: usize,

        /// 只接受该令牌；不指定时接受任意非空令牌
        #[arg(long)]
        token: Option<String>,
    },

    /// 输出演示数据
    Dump {
        /// 输出到文件（默认标准输出）
        #[arg(short, long)]
        output: Option<String>,
    },
}
