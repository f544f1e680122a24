//! 命令执行器

use std::fs;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tracing::info;

use crate::seed::{SeedOptions, seed};
use crate::services::{API_PREFIX, AuthPolicy, app};
use crate::store::BackendStore;

/// 命令执行器
pub struct CommandRunner;

impl CommandRunner {
    pub fn new() -> Self {
        Self
    }

    /// 执行 server 命令
    pub async fn run_server(
        &self,
        port: u16,
        empty: bool,
        progress_words: usize,
        token: Option<String>,
    ) -> Result<()> {
        let store = Arc::new(BackendStore::new());
        let options = if empty {
            SeedOptions::reference_only()
        } else {
            SeedOptions {
                vocabulary: true,
                progress_words,
            }
        };
        let words = seed(&store, &options);

        let auth = match token {
            Some(token) => AuthPolicy::fixed(token),
            None => AuthPolicy::any_token(),
        };
        let router = app(store, auth);

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.context("绑定端口失败")?;

        info!(words, "模拟后端已启动: http://{}{}", addr, API_PREFIX);
        info!("  GET  /health - 健康检查");
        info!("  GET  {API_PREFIX}/categories | /words | /languages - 公共接口");
        info!("  *    {API_PREFIX}/admin/* - 管理接口（Bearer 令牌）");
        info!("  *    {API_PREFIX}/word-images | /word-sounds - 媒体接口（Bearer 令牌）");
        info!("按 Ctrl+C 停止服务");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("服务器运行失败")?;

        info!("模拟后端已停止");
        Ok(())
    }

    /// 执行 dump 命令
    pub fn run_dump(&self, output: Option<String>) -> Result<()> {
        let store = BackendStore::new();
        seed(&store, &SeedOptions::default());
        let text = serde_json::to_string_pretty(&snapshot(&store)).context("序列化失败")?;

        match output {
            Some(path) => {
                fs::write(&path, text).with_context(|| format!("写入文件失败: {path}"))?;
                info!(path, "演示数据已写入");
            }
            None => println!("{text}"),
        }
        Ok(())
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn snapshot(store: &BackendStore) -> Value {
    json!({
        "languages": store.languages.list(),
        "word_types": store.word_types.list(),
        "difficulty_levels": store.difficulty_levels.list(),
        "categories": store.categories.list(),
        "words": store.words.list(),
        "translations": store.translations.list(),
        "guides": store.guides.list(),
        "guide_words": store.guide_words.list(),
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "安装 CTRL+C 信号处理器失败");
        return;
    }
    info!("收到关闭信号，正在停止服务...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");

        CommandRunner::new()
            .run_dump(Some(path.display().to_string()))
            .unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["languages"].as_array().unwrap().len(), 3);
        assert_eq!(value["words"].as_array().unwrap().len(), 15);
    }
}
