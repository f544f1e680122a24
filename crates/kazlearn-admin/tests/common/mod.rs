//! 集成测试环境
//!
//! 在随机端口启动内存模拟后端，控制台通过真实 HTTP 访问它。

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use kazlearn_admin::ConsoleState;
use kazlearn_admin::api::TokenStore;
use kazlearn_shared::config::AppConfig;
use mock_backend::seed::{SeedOptions, seed};
use mock_backend::services::{API_PREFIX, AuthPolicy, app};
use mock_backend::store::BackendStore;
use tokio::net::TcpListener;

pub const TOKEN: &str = "integration-token";

/// 运行中的模拟后端
pub struct TestBackend {
    pub addr: SocketAddr,
    pub store: Arc<BackendStore>,
}

impl TestBackend {
    /// 带演示数据启动（第 1 个单词有学习进度）
    pub async fn start() -> Self {
        Self::start_with(SeedOptions::default()).await
    }

    pub async fn start_with(options: SeedOptions) -> Self {
        let store = Arc::new(BackendStore::new());
        seed(&store, &options);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = app(store.clone(), AuthPolicy::fixed(TOKEN));
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                eprintln!("mock backend stopped: {e}");
            }
        });

        Self { addr, store }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, API_PREFIX)
    }

    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::default();
        config.api.base_url = self.base_url();
        config.api.timeout_seconds = Some(10);
        config
    }

    /// 已登录的控制台
    pub fn console(&self) -> ConsoleState {
        self.console_with_tokens(logged_in())
    }

    pub fn console_with_tokens(&self, tokens: TokenStore) -> ConsoleState {
        ConsoleState::from_config(&self.config(), tokens).unwrap()
    }
}

pub fn logged_in() -> TokenStore {
    let tokens = TokenStore::in_memory();
    tokens.save(TOKEN).unwrap();
    tokens
}
