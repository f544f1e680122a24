//! 本地化资源存储
//!
//! 启动时把各语言、各命名空间的 JSON 字典合并成一张只读查找表，
//! 通过 `t(key, params)` 访问，支持 `{{name}}` 参数插值与复数后缀。
//!
//! ## 查找规则
//!
//! - 键形如 `admin:words.created`，省略命名空间时使用 `common`
//! - 回退链：当前语言 → 回退语言 → 键本身
//! - 参数包含 `count` 时，先在当前语言中依次查 `_zero`（count 为 0）与复数类别后缀
//!   （`_one` / `_few` / `_many` / `_other`），再在回退语言中同样查找，最后查无后缀的键
//!
//! 初始化后存储不再修改，切换语言只替换当前激活的语言。

pub mod plural;
mod store;

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock, OnceLock};

use arc_swap::ArcSwap;
use regex::{Captures, Regex};
use tracing::{debug, info};

use crate::config::UiConfig;
use crate::error::{Result, SharedError};
pub use store::{DEFAULT_NAMESPACE, ResourceStore, ResourceStoreBuilder};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_.]+)\s*\}\}").expect("placeholder pattern is valid")
});

static GLOBAL: OnceLock<Arc<Localizer>> = OnceLock::new();

/// 插值参数
#[derive(Debug, Clone, Default)]
pub struct Params {
    values: BTreeMap<String, String>,
    count: Option<u64>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }

    /// 设置数量，同时启用复数形式选择
    pub fn count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self.values.insert("count".to_string(), count.to_string());
        self
    }
}

/// 带当前语言的查找器
#[derive(Debug)]
pub struct Localizer {
    store: Arc<ResourceStore>,
    active: ArcSwap<String>,
    fallback: String,
}

impl Localizer {
    pub fn new(store: ResourceStore, locale: &str, fallback: &str) -> Result<Self> {
        let store = Arc::new(store);
        let locale = resolve_locale(&store, locale)?;
        let fallback = resolve_locale(&store, fallback)?;

        Ok(Self {
            store,
            active: ArcSwap::from_pointee(locale),
            fallback,
        })
    }

    /// 使用内置资源包构造
    pub fn builtin(locale: &str) -> Result<Self> {
        Self::new(ResourceStore::builtin()?, locale, "en")
    }

    /// 内置资源包叠加 `locales_dir`，语言与回退语言取自配置
    pub fn from_config(config: &UiConfig) -> Result<Self> {
        let mut builder = ResourceStore::builder().with_builtin()?;
        if let Some(dir) = &config.locales_dir {
            builder = builder.with_dir(dir)?;
        }
        Self::new(builder.build(), &config.locale, &config.fallback_locale)
    }

    pub fn locale(&self) -> Arc<String> {
        self.active.load_full()
    }

    /// 切换当前语言；未知语言返回错误，当前语言保持不变
    pub fn set_locale(&self, locale: &str) -> Result<()> {
        let locale = resolve_locale(&self.store, locale)?;
        info!(locale = %locale, "Active locale switched");
        self.active.store(Arc::new(locale));
        Ok(())
    }

    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &Params::default())
    }

    pub fn t_with(&self, key: &str, params: &Params) -> String {
        let key = qualify(key);
        let locale = self.locale();

        let template = match params.count {
            Some(count) => self.lookup_plural(&locale, &key, count),
            None => self.lookup(&locale, &key),
        };

        match template {
            Some(template) => interpolate(template, params),
            None => {
                debug!(key = %key, locale = %locale, "Missing translation key");
                key
            }
        }
    }

    fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        self.store
            .get(locale, key)
            .or_else(|| self.store.get(&self.fallback, key))
    }

    fn lookup_plural(&self, locale: &str, key: &str, count: u64) -> Option<&str> {
        // 每种语言依次查 `_zero`、自身复数类别、`_other`；当前语言全部落空才轮到回退语言
        self.plural_form(locale, key, count)
            .or_else(|| self.plural_form(&self.fallback, key, count))
            .or_else(|| self.lookup(locale, key))
    }

    fn plural_form(&self, locale: &str, key: &str, count: u64) -> Option<&str> {
        let zero = if count == 0 {
            self.store.get(locale, &format!("{key}_zero"))
        } else {
            None
        };
        let category = plural::category(locale, count);
        zero.or_else(|| self.store.get(locale, &format!("{key}_{}", category.suffix())))
            .or_else(|| self.store.get(locale, &format!("{key}_other")))
    }
}

/// 初始化进程级本地化存储，只能调用一次
pub fn init(localizer: Localizer) -> Result<Arc<Localizer>> {
    let localizer = Arc::new(localizer);
    GLOBAL
        .set(localizer.clone())
        .map_err(|_| SharedError::AlreadyInitialized)?;
    info!(locale = %localizer.locale(), "Localization store initialized");
    Ok(localizer)
}

pub fn global() -> Option<Arc<Localizer>> {
    GLOBAL.get().cloned()
}

/// 使用进程级存储翻译；未初始化时原样返回键
pub fn t(key: &str, params: &Params) -> String {
    match GLOBAL.get() {
        Some(localizer) => localizer.t_with(key, params),
        None => qualify(key),
    }
}

fn qualify(key: &str) -> String {
    if key.contains(':') {
        key.to_string()
    } else {
        format!("{DEFAULT_NAMESPACE}:{key}")
    }
}

/// `kk-KZ` 先按原样匹配，再按语言部分匹配
fn resolve_locale(store: &ResourceStore, locale: &str) -> Result<String> {
    if store.has_locale(locale) {
        return Ok(locale.to_string());
    }
    let language = plural::language_of(locale).to_ascii_lowercase();
    if store.has_locale(&language) {
        return Ok(language);
    }
    Err(SharedError::UnknownLocale(locale.to_string()))
}

fn interpolate(template: &str, params: &Params) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match params.values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
