//! 控制台共享状态
//!
//! 视图模型共享的句柄：API 客户端、提示日志与本地化查找器，通过克隆在组件间传递。
//! 没有跨组件的数据缓存，服务端是唯一的数据来源。

use std::sync::Arc;
use std::time::Duration;

use kazlearn_shared::config::{AppConfig, UiConfig};
use kazlearn_shared::i18n::{Localizer, Params};

use crate::api::{
    AdminApi, AdminWordsApi, ApiClient, GuidesApi, HttpGateway, MediaApi, PublicApi, TokenStore,
};
use crate::error::Result;
use crate::notify::Toaster;

/// 界面行为设置
#[derive(Debug, Clone)]
pub struct UiSettings {
    pub page_size: u32,
    pub search_debounce: Duration,
    /// 列表中 `primary_translation` 使用的语言
    pub language_code: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self::from(&UiConfig::default())
    }
}

impl From<&UiConfig> for UiSettings {
    fn from(config: &UiConfig) -> Self {
        Self {
            page_size: config.page_size.clamp(1, 100),
            search_debounce: Duration::from_millis(config.search_debounce_ms),
            language_code: config.locale.clone(),
        }
    }
}

/// 控制台共享状态
#[derive(Clone)]
pub struct ConsoleState {
    pub client: ApiClient,
    pub toaster: Toaster,
    pub i18n: Arc<Localizer>,
    pub settings: UiSettings,
}

impl ConsoleState {
    pub fn new(client: ApiClient, i18n: Arc<Localizer>, settings: UiSettings) -> Self {
        Self {
            client,
            toaster: Toaster::new(i18n.clone()),
            i18n,
            settings,
        }
    }

    /// 根据配置创建，使用独立的本地化查找器（内置资源包 + 可选目录）
    pub fn from_config(config: &AppConfig, tokens: TokenStore) -> Result<Self> {
        let i18n = Arc::new(Localizer::from_config(&config.ui)?);
        Self::with_localizer(config, tokens, i18n)
    }

    /// 根据配置创建，共享已初始化的查找器（命令行入口传入进程级存储）
    pub fn with_localizer(
        config: &AppConfig,
        tokens: TokenStore,
        i18n: Arc<Localizer>,
    ) -> Result<Self> {
        let gateway = HttpGateway::new(&config.api, tokens)?;
        let client = ApiClient::new(Arc::new(gateway))
            .with_upload_timeout(Duration::from_secs(config.api.upload_timeout_seconds));

        Ok(Self::new(client, i18n, UiSettings::from(&config.ui)))
    }

    pub fn public_api(&self) -> PublicApi {
        PublicApi::new(self.client.clone())
    }

    pub fn admin_api(&self) -> AdminApi {
        AdminApi::new(self.client.clone())
    }

    pub fn words_api(&self) -> AdminWordsApi {
        AdminWordsApi::new(self.client.clone())
    }

    pub fn media_api(&self) -> MediaApi {
        MediaApi::new(self.client.clone())
    }

    pub fn guides_api(&self) -> GuidesApi {
        GuidesApi::new(self.client.clone())
    }

    pub fn t(&self, key: &str) -> String {
        self.i18n.t(key)
    }

    pub fn t_with(&self, key: &str, params: &Params) -> String {
        self.i18n.t_with(key, params)
    }
}
