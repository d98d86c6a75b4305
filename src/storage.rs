use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;
use tracing::debug;

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> anyhow::Result<()>;
    async fn get_object(&self, key: &str) -> anyhow::Result<Option<Bytes>>;
}

/// Writes image blobs under a local directory.
#[derive(Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub async fn new(root: impl AsRef<Path>) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("create image dir {}", root.display()))?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> anyhow::Result<PathBuf> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            anyhow::bail!("invalid image key {key:?}");
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> anyhow::Result<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("create image parent")?;
        }
        tokio::fs::write(&path, &body)
            .await
            .with_context(|| format!("write image {}", path.display()))?;
        debug!(key, content_type, bytes = body.len(), "image stored");
        Ok(())
    }

    async fn get_object(&self, key: &str) -> anyhow::Result<Option<Bytes>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read image {}", path.display())),
        }
    }
}

#[derive(Default)]
pub struct MemoryImageStore(Mutex<HashMap<String, Bytes>>);

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn put_object(&self, key: &str, body: Bytes, _content_type: &str) -> anyhow::Result<()> {
        self.0.lock().await.insert(key.to_string(), body);
        Ok(())
    }

    async fn get_object(&self, key: &str) -> anyhow::Result<Option<Bytes>> {
        Ok(self.0.lock().await.get(key).cloned())
    }
}

/// Maps a MIME type to the file extension used for stored images.
pub fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/heic" => "heic",
        "image/jpeg" | "image/jpg" => "jpg",
        _ => "bin",
    }
}

/// MIME type served for a stored key, judged by its extension.
pub fn content_type_for(key: &str) -> &'static str {
    match key.rsplit_once('.').map(|(_, ext)| ext) {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        Some("jpg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
