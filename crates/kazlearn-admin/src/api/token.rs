//! 认证令牌存储
//!
//! 浏览器 localStorage 以 JSON 键值文件表示。规范键为 `kazakh_learn_token`；
//! 旧键 `access_token` 仅作为读取回退，使用时记录警告。写入总是使用规范键并
//! 删除旧键，登出同时删除两者。
//!
//! 文件后端在首次读取后把内容缓存在内存中，之后每次请求只读缓存；
//! 本存储的写入同时更新文件与缓存。

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::Result;

/// 规范令牌键
pub const TOKEN_KEY: &str = "kazakh_learn_token";
/// 旧版令牌键
pub const LEGACY_TOKEN_KEY: &str = "access_token";

type Entries = BTreeMap<String, String>;

#[derive(Debug, Clone)]
enum Backing {
    File {
        path: PathBuf,
        cache: Arc<Mutex<Option<Entries>>>,
    },
    Memory(Arc<Mutex<Entries>>),
}

/// 令牌存储
#[derive(Debug, Clone)]
pub struct TokenStore {
    backing: Backing,
}

impl TokenStore {
    /// 以文件为后端
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            backing: Backing::File {
                path: path.into(),
                cache: Arc::new(Mutex::new(None)),
            },
        }
    }

    /// 进程内存储（测试与一次性会话）
    pub fn in_memory() -> Self {
        Self {
            backing: Backing::Memory(Arc::new(Mutex::new(Entries::new()))),
        }
    }

    /// 当前令牌，读取失败视为未登录
    pub fn token(&self) -> Option<String> {
        match self.read() {
            Ok(entries) => resolve(&entries),
            Err(e) => {
                warn!(error = %e, "读取令牌存储失败");
                None
            }
        }
    }

    /// 保存令牌
    pub fn save(&self, token: &str) -> Result<()> {
        let mut entries = self.read()?;
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        entries.remove(LEGACY_TOKEN_KEY);
        self.write(&entries)?;
        debug!("令牌已保存");
        Ok(())
    }

    /// 清除两个键
    pub fn clear(&self) -> Result<()> {
        let mut entries = self.read()?;
        entries.remove(TOKEN_KEY);
        entries.remove(LEGACY_TOKEN_KEY);
        self.write(&entries)
    }

    /// 直接写入任意键（用于导入旧数据）
    pub fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read()?;
        entries.insert(key.to_string(), value.to_string());
        self.write(&entries)
    }

    pub fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.read()?.contains_key(key))
    }

    fn read(&self) -> Result<Entries> {
        match &self.backing {
            Backing::Memory(entries) => Ok(entries.lock().clone()),
            Backing::File { path, cache } => {
                if let Some(entries) = cache.lock().as_ref() {
                    return Ok(entries.clone());
                }
                let entries = read_file(path)?;
                *cache.lock() = Some(entries.clone());
                Ok(entries)
            }
        }
    }

    fn write(&self, entries: &Entries) -> Result<()> {
        match &self.backing {
            Backing::Memory(shared) => {
                *shared.lock() = entries.clone();
                Ok(())
            }
            Backing::File { path, cache } => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, serde_json::to_vec_pretty(entries)?)?;
                *cache.lock() = Some(entries.clone());
                Ok(())
            }
        }
    }
}

fn read_file(path: &Path) -> Result<Entries> {
    match std::fs::read(path) {
        Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Entries::new()),
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Entries::new()),
        Err(e) => Err(e.into()),
    }
}

fn resolve(entries: &Entries) -> Option<String> {
    if let Some(token) = entries.get(TOKEN_KEY).filter(|t| !t.is_empty()) {
        return Some(token.clone());
    }
    let legacy = entries.get(LEGACY_TOKEN_KEY).filter(|t| !t.is_empty())?;
    warn!(
        legacy_key = LEGACY_TOKEN_KEY,
        canonical_key = TOKEN_KEY,
        "令牌仅存在于旧键下，请重新登录以迁移"
    );
    Some(legacy.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::file(dir.path().join("nested").join("storage.json"));
        assert!(store.token().is_none());
    }

    #[test]
    fn test_save_writes_canonical_key_and_drops_legacy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let store = TokenStore::file(&path);
        store.set_raw(LEGACY_TOKEN_KEY, "old").unwrap();

        store.save("fresh").unwrap();

        assert_eq!(store.token().as_deref(), Some("fresh"));
        assert!(!store.contains_key(LEGACY_TOKEN_KEY).unwrap());
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains(TOKEN_KEY));
    }

    #[test]
    fn test_legacy_key_is_read_as_fallback() {
        let store = TokenStore::in_memory();
        store.set_raw(LEGACY_TOKEN_KEY, "legacy-token").unwrap();
        assert_eq!(store.token().as_deref(), Some("legacy-token"));
    }

    #[test]
    fn test_canonical_key_wins() {
        let store = TokenStore::in_memory();
        store.set_raw(LEGACY_TOKEN_KEY, "legacy").unwrap();
        store.set_raw(TOKEN_KEY, "canonical").unwrap();
        assert_eq!(store.token().as_deref(), Some("canonical"));
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let store = TokenStore::in_memory();
        store.set_raw(LEGACY_TOKEN_KEY, "a").unwrap();
        store.set_raw(TOKEN_KEY, "b").unwrap();
        store.set_raw("theme", "dark").unwrap();

        store.clear().unwrap();

        assert!(store.token().is_none());
        assert!(store.contains_key("theme").unwrap());
    }

    #[test]
    fn test_file_is_read_once_then_served_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, format!(r#"{{"{TOKEN_KEY}": "cached"}}"#)).unwrap();
        let store = TokenStore::file(&path);
        assert_eq!(store.token().as_deref(), Some("cached"));

        std::fs::remove_file(&path).unwrap();
        assert_eq!(store.token().as_deref(), Some("cached"));

        let shared = store.clone();
        shared.save("rotated").unwrap();
        assert_eq!(store.token().as_deref(), Some("rotated"));
        shared.clear().unwrap();
        assert!(store.token().is_none());
    }

    #[test]
    fn test_corrupt_file_reads_as_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(TokenStore::file(&path).token().is_none());
        assert!(TokenStore::file(&path).save("x").is_err());
    }
}
