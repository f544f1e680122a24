//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::SharedError;
use crate::observability::ObservabilityConfig;

/// 后端 API 配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// REST 后端根地址，如 http://localhost:8000/api/v1
    pub base_url: String,
    /// 全局请求超时；为空时依赖网络层默认行为
    pub timeout_seconds: Option<u64>,
    /// 文件上传超时
    pub upload_timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/v1".to_string(),
            timeout_seconds: None,
            upload_timeout_seconds: 30,
        }
    }
}

/// 认证令牌存储配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// 持久化键值存储文件（对应浏览器 localStorage），未配置时位于 ~/.kazlearn/storage.json
    pub storage_path: Option<PathBuf>,
}

impl AuthConfig {
    /// 解析令牌存储文件路径
    ///
    /// 找不到用户主目录时返回错误，不会退回到当前目录
    pub fn resolve_storage_path(&self) -> crate::Result<PathBuf> {
        match &self.storage_path {
            Some(path) => Ok(path.clone()),
            None => default_storage_path(dirs::home_dir()),
        }
    }
}

fn default_storage_path(home: Option<PathBuf>) -> crate::Result<PathBuf> {
    let home = home.ok_or(SharedError::NoHomeDirectory)?;
    Ok(home.join(".kazlearn").join("storage.json"))
}

/// 界面行为配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub locale: String,
    pub fallback_locale: String,
    /// 搜索输入防抖间隔
    pub search_debounce_ms: u64,
    pub page_size: u32,
    /// 额外的资源包目录，结构为 <dir>/<locale>/<namespace>.json
    pub locales_dir: Option<PathBuf>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            fallback_locale: "en".to_string(),
            search_debounce_ms: 500,
            page_size: 20,
            locales_dir: None,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub ui: UiConfig,
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "kazlearn-admin".to_string(),
            environment: "development".to_string(),
            api: ApiConfig::default(),
            auth: AuthConfig::default(),
            ui: UiConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. config/{service_name}.toml（服务特定配置）
    /// 4. 环境变量（KAZLEARN__ 前缀，如 KAZLEARN__API__BASE_URL -> api.base_url）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("KAZLEARN_ENV").unwrap_or_else(|_| "development".to_string());
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        Self::load_from(service_name, &env, Path::new(&config_dir))
    }

    /// 从指定目录加载配置（测试中直接指定目录，避免依赖进程环境）
    pub fn load_from(
        service_name: &str,
        environment: &str,
        config_dir: &Path,
    ) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", environment)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(
                File::from(config_dir.join(format!("{}.toml", environment))).required(false),
            )
            .add_source(
                File::from(config_dir.join(format!("{}.toml", service_name))).required(false),
            )
            // 双下划线分隔，字段名本身可以包含单下划线
            .add_source(
                Environment::with_prefix("KAZLEARN")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.observability.service_name = config.service_name.clone();
        config.ui.page_size = config.ui.page_size.clamp(1, 100);

        Ok(config)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.upload_timeout_seconds, 30);
        assert!(config.api.timeout_seconds.is_none());
        assert_eq!(config.ui.search_debounce_ms, 500);
        assert_eq!(config.ui.page_size, 20);
        assert!(config.auth.storage_path.is_none());
    }

    #[test]
    fn test_storage_path_under_home() {
        let path = default_storage_path(Some(PathBuf::from("/home/aigerim"))).unwrap();
        assert_eq!(path, PathBuf::from("/home/aigerim/.kazlearn/storage.json"));
    }

    #[test]
    fn test_storage_path_without_home_is_error() {
        let err = default_storage_path(None).unwrap_err();
        assert!(matches!(err, SharedError::NoHomeDirectory));
        assert_eq!(err.code(), "NO_HOME_DIRECTORY");
    }

    #[test]
    fn test_configured_storage_path_wins() {
        let auth = AuthConfig {
            storage_path: Some(PathBuf::from("/tmp/kazlearn.json")),
        };
        assert_eq!(
            auth.resolve_storage_path().unwrap(),
            PathBuf::from("/tmp/kazlearn.json")
        );
    }

    #[test]
    fn test_load_from_missing_dir_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from("kazlearn-admin", "test", dir.path()).unwrap();
        assert_eq!(config.service_name, "kazlearn-admin");
        assert_eq!(config.environment, "test");
        assert_eq!(config.observability.service_name, "kazlearn-admin");
        assert_eq!(config.ui.locale, "en");
    }

    #[test]
    fn test_environment_file_overrides_default_file() {
        let dir = tempfile::tempdir().unwrap();

        let mut default = std::fs::File::create(dir.path().join("default.toml")).unwrap();
        writeln!(default, "[api]\nbase_url = \"http://default\"\n[ui]\npage_size = 50").unwrap();

        let mut staging = std::fs::File::create(dir.path().join("staging.toml")).unwrap();
        writeln!(staging, "[api]\nbase_url = \"http://staging\"\nupload_timeout_seconds = 45")
            .unwrap();

        let config = AppConfig::load_from("kazlearn-admin", "staging", dir.path()).unwrap();
        assert_eq!(config.api.base_url, "http://staging");
        assert_eq!(config.api.upload_timeout_seconds, 45);
        assert_eq!(config.ui.page_size, 50);
        assert!(!config.is_production());
    }

    #[test]
    fn test_page_size_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let mut default = std::fs::File::create(dir.path().join("default.toml")).unwrap();
        writeln!(default, "[ui]\npage_size = 1000").unwrap();

        let config = AppConfig::load_from("kazlearn-admin", "development", dir.path()).unwrap();
        assert_eq!(config.ui.page_size, 100);
    }
}
