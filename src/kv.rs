use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

/// String key-value persistence, one JSON document per key.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> anyhow::Result<()>;
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
    /// Serialises read-modify-write cycles within this process.
    async fn write_lock<'a>(&'a self) -> MutexGuard<'a, ()>;
}

pub async fn get_json<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> anyhow::Result<Option<T>> {
    match store.get(key).await? {
        Some(raw) => {
            let value = serde_json::from_str(&raw).with_context(|| format!("decode {key}"))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

pub async fn set_json<T: Serialize + Sync>(
    store: &dyn KvStore,
    key: &str,
    value: &T,
) -> anyhow::Result<()> {
    let raw = serde_json::to_string(value).with_context(|| format!("encode {key}"))?;
    store.set(key, raw).await
}

/// Loads `key` (or `init()` when absent), applies `f` and writes the result back.
pub async fn update_json<T, R, I, F>(
    store: &dyn KvStore,
    key: &str,
    init: I,
    f: F,
) -> anyhow::Result<R>
where
    T: Serialize + DeserializeOwned + Send + Sync,
    R: Send,
    I: FnOnce() -> T + Send,
    F: FnOnce(&mut T) -> R + Send,
{
    let _guard = store.write_lock().await;
    let mut value = get_json::<T>(store, key).await?.unwrap_or_else(init);
    let out = f(&mut value);
    set_json(store, key, &value).await?;
    Ok(out)
}

/// Stores each key as `<dir>/<key>.json`.
pub struct FileStore {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub async fn open(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create data dir {}", dir.display()))?;
        Ok(Self {
            dir,
            lock: Mutex::new(()),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }
}

/// Reversible file name for `key`: bytes outside `[A-Za-z0-9.@-]` become `_XX` hex.
fn file_stem(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'.' | b'@' => out.push(b as char),
            _ => out.push_str(&format!("_{b:02X}")),
        }
    }
    out
}

#[async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    async fn set(&self, key: &str, value: String) -> anyhow::Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value.as_bytes())
            .await
            .with_context(|| format!("write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("rename into {}", path.display()))?;
        debug!(key, "kv set");
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("remove {}", path.display())),
        }
    }

    async fn write_lock<'a>(&'a self) -> MutexGuard<'a, ()> {
        self.lock.lock().await
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    lock: Mutex<()>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> anyhow::Result<()> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn write_lock<'a>(&'a self) -> MutexGuard<'a, ()> {
        self.lock.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        set_json(&store, "mindbite_account_a@b.co", &vec![1, 2, 3])
            .await
            .unwrap();

        let reopened = FileStore::open(dir.path()).await.unwrap();
        let back: Option<Vec<i32>> = get_json(&reopened, "mindbite_account_a@b.co")
            .await
            .unwrap();
        assert_eq!(back, Some(vec![1, 2, 3]));
    }

    #[test]
    fn file_names_escape_instead_of_collapsing() {
        assert_eq!(file_stem("mindbite_meals:ab"), "mindbite_5Fmeals_3Aab");
        assert_ne!(
            file_stem("mindbite_account_a+b@x.io"),
            file_stem("mindbite_account_a_b@x.io")
        );
        assert_eq!(file_stem("../etc"), ".._2Fetc");
    }

    #[tokio::test]
    async fn accounts_differing_in_plus_and_underscore_are_distinct() {
        use crate::auth::repo_types::{AccountRecord, UserProfile};
        use time::macros::datetime;

        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        let joined = datetime!(2024-01-01 0:00 UTC);
        let plus = UserProfile::new("Plus".into(), "a+b@x.io".into(), joined);
        let underscore = UserProfile::new("Under".into(), "a_b@x.io".into(), joined);

        assert!(AccountRecord::create(&store, "h1".into(), plus).await.unwrap().is_some());
        assert!(AccountRecord::create(&store, "h2".into(), underscore).await.unwrap().is_some());

        let found = AccountRecord::find_by_email(&store, "a_b@x.io").await.unwrap().unwrap();
        assert_eq!(found.user.email, "a_b@x.io");
        assert_eq!(found.password_hash, "h2");
    }

    #[tokio::test]
    async fn file_store_missing_key_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        assert!(store.get("nope").await.unwrap().is_none());
        store.set("k:1", "\"v\"".into()).await.unwrap();
        store.remove("k:1").await.unwrap();
        store.remove("k:1").await.unwrap();
        assert!(store.get("k:1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_json_starts_from_init_and_writes_back() {
        let store = MemoryStore::new();
        let len = update_json(&store, "list", Vec::<u8>::new, |v| {
            v.push(7);
            v.len()
        })
        .await
        .unwrap();
        assert_eq!(len, 1);
        let len = update_json(&store, "list", Vec::<u8>::new, |v| {
            v.push(8);
            v.len()
        })
        .await
        .unwrap();
        assert_eq!(len, 2);
        let stored: Vec<u8> = get_json(&store, "list").await.unwrap().unwrap();
        assert_eq!(stored, vec![7, 8]);
    }

    #[tokio::test]
    async fn corrupt_document_is_an_error() {
        let store = MemoryStore::new();
        store.set("bad", "{not json".into()).await.unwrap();
        let err = get_json::<Vec<u8>>(&store, "bad").await.unwrap_err();
        assert!(err.to_string().contains("decode bad"));
    }
}
