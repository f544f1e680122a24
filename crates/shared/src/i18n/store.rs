//! 资源包存储
//!
//! 将按语言、按命名空间拆分的 JSON 字典合并为单一查找表。
//! 嵌套对象被展平成点分键，最终键形如 `admin:words.created`。

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Result, SharedError};

/// 默认命名空间，键中未写命名空间时使用
pub const DEFAULT_NAMESPACE: &str = "common";

/// 随二进制一同分发的资源包
const BUILTIN_BUNDLES: &[(&str, &str, &str)] = &[
    ("en", "common", include_str!("../../locales/en/common.json")),
    ("en", "admin", include_str!("../../locales/en/admin.json")),
    ("kk", "common", include_str!("../../locales/kk/common.json")),
    ("kk", "admin", include_str!("../../locales/kk/admin.json")),
    ("ru", "common", include_str!("../../locales/ru/common.json")),
    ("ru", "admin", include_str!("../../locales/ru/admin.json")),
];

/// 合并后的只读资源表
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    /// locale -> (namespace:key -> value)
    catalogs: HashMap<String, HashMap<String, String>>,
}

impl ResourceStore {
    pub fn builder() -> ResourceStoreBuilder {
        ResourceStoreBuilder::default()
    }

    /// 仅包含内置资源包的存储
    pub fn builtin() -> Result<Self> {
        Ok(Self::builder().with_builtin()?.build())
    }

    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.catalogs
            .get(locale)
            .and_then(|catalog| catalog.get(key))
            .map(String::as_str)
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.catalogs.contains_key(locale)
    }

    pub fn locales(&self) -> BTreeSet<&str> {
        self.catalogs.keys().map(String::as_str).collect()
    }

    pub fn key_count(&self, locale: &str) -> usize {
        self.catalogs.get(locale).map_or(0, HashMap::len)
    }
}

/// 资源存储构建器，初始化完成后存储不可变
#[derive(Debug, Default)]
pub struct ResourceStoreBuilder {
    catalogs: HashMap<String, HashMap<String, String>>,
}

impl ResourceStoreBuilder {
    /// 加载内置资源包
    pub fn with_builtin(mut self) -> Result<Self> {
        for (locale, namespace, json) in BUILTIN_BUNDLES {
            self.add_bundle(locale, namespace, json)?;
        }
        Ok(self)
    }

    /// 合并一个 JSON 字典，后加入的同名键覆盖先前的值
    pub fn add_bundle(&mut self, locale: &str, namespace: &str, json: &str) -> Result<()> {
        let invalid = |message: String| SharedError::InvalidBundle {
            locale: locale.to_string(),
            namespace: namespace.to_string(),
            message,
        };

        let value: Value = serde_json::from_str(json).map_err(|e| invalid(e.to_string()))?;
        if !value.is_object() {
            return Err(invalid("top-level value must be an object".to_string()));
        }

        let catalog = self.catalogs.entry(locale.to_string()).or_default();
        let mut added = 0usize;
        flatten(&value, &mut String::new(), &mut |key, text| {
            catalog.insert(format!("{namespace}:{key}"), text);
            added += 1;
        });

        debug!(locale, namespace, keys = added, "Resource bundle merged");
        Ok(())
    }

    /// 从目录加载资源包：`<dir>/<locale>/<namespace>.json`
    pub fn with_dir(mut self, dir: &Path) -> Result<Self> {
        for locale_entry in std::fs::read_dir(dir)? {
            let locale_entry = locale_entry?;
            if !locale_entry.file_type()?.is_dir() {
                continue;
            }
            let locale = locale_entry.file_name().to_string_lossy().into_owned();

            for file in std::fs::read_dir(locale_entry.path())? {
                let path = file?.path();
                if path.extension().and_then(|e| e.to_str()) != Some("json") {
                    continue;
                }
                let Some(namespace) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let json = std::fs::read_to_string(&path)?;
                self.add_bundle(&locale, namespace, &json)?;
            }
        }

        info!(dir = %dir.display(), "Resource bundles loaded from directory");
        Ok(self)
    }

    pub fn build(self) -> ResourceStore {
        ResourceStore {
            catalogs: self.catalogs,
        }
    }
}

/// 递归展平 JSON：对象用点连接，数组用下标
fn flatten(value: &Value, prefix: &mut String, emit: &mut impl FnMut(String, String)) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let len = prefix.len();
                if !prefix.is_empty() {
                    prefix.push('.');
                }
                prefix.push_str(key);
                flatten(child, prefix, emit);
                prefix.truncate(len);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                let len = prefix.len();
                prefix.push('.');
                prefix.push_str(&index.to_string());
                flatten(child, prefix, emit);
                prefix.truncate(len);
            }
        }
        Value::String(text) => emit(prefix.clone(), text.clone()),
        Value::Null => {}
        other => emit(prefix.clone(), other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_keys_are_flattened_with_namespace() {
        let mut builder = ResourceStore::builder();
        builder
            .add_bundle("en", "admin", r#"{"words": {"created": "ok", "limit": 5}}"#)
            .unwrap();
        let store = builder.build();

        assert_eq!(store.get("en", "admin:words.created"), Some("ok"));
        assert_eq!(store.get("en", "admin:words.limit"), Some("5"));
        assert_eq!(store.get("en", "common:words.created"), None);
    }

    #[test]
    fn test_later_bundle_overrides_earlier() {
        let mut builder = ResourceStore::builder();
        builder.add_bundle("kk", "common", r#"{"a": "бір"}"#).unwrap();
        builder.add_bundle("kk", "common", r#"{"a": "екі", "b": "үш"}"#).unwrap();
        let store = builder.build();

        assert_eq!(store.get("kk", "common:a"), Some("екі"));
        assert_eq!(store.key_count("kk"), 2);
    }

    #[test]
    fn test_non_object_bundle_is_rejected() {
        let mut builder = ResourceStore::builder();
        let err = builder.add_bundle("en", "common", r#"["a"]"#).unwrap_err();
        assert_eq!(err.code(), "INVALID_BUNDLE");
    }

    #[test]
    fn test_builtin_bundles_cover_all_locales() {
        let store = ResourceStore::builtin().unwrap();
        assert_eq!(store.locales().into_iter().collect::<Vec<_>>(), vec!["en", "kk", "ru"]);
        assert!(store.get("kk", "admin:words.deleted").is_some());
        assert!(store.get("ru", "common:errors.generic").is_some());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("en")).unwrap();
        std::fs::write(
            dir.path().join("en").join("admin.json"),
            r#"{"words": {"deleted": "Gone"}}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("README.txt"), "ignored").unwrap();

        let store = ResourceStore::builder()
            .with_builtin()
            .unwrap()
            .with_dir(dir.path())
            .unwrap()
            .build();
        assert_eq!(store.get("en", "admin:words.deleted"), Some("Gone"));
        assert!(store.get("en", "admin:words.created").is_some());
    }
}
