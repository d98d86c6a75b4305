use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;
use crate::kv::{FileStore, KvStore, MemoryStore};
use crate::storage::{ImageStore, LocalImageStore, MemoryImageStore};
use std::sync::Arc;
use time::OffsetDateTime;

/// `DATA_DIR` value that keeps everything in process memory.
pub const MEMORY_DATA_DIR: &str = ":memory:";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn KvStore>,
    pub images: Arc<dyn ImageStore>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let (store, images) = if config.data_dir.as_os_str() == MEMORY_DATA_DIR {
            tracing::warn!("DATA_DIR is {MEMORY_DATA_DIR}; nothing will survive a restart");
            (
                Arc::new(MemoryStore::new()) as Arc<dyn KvStore>,
                Arc::new(MemoryImageStore::default()) as Arc<dyn ImageStore>,
            )
        } else {
            (
                Arc::new(FileStore::open(config.data_dir.join("kv")).await?) as Arc<dyn KvStore>,
                Arc::new(LocalImageStore::new(config.data_dir.join("images")).await?)
                    as Arc<dyn ImageStore>,
            )
        };

        Ok(Self {
            config,
            store,
            images,
            clock: Arc::new(SystemClock),
        })
    }

    pub fn now(&self) -> OffsetDateTime {
        self.clock.now()
    }

    /// `now()` expressed in the local offset.
    pub fn local_now(&self) -> OffsetDateTime {
        self.clock.local_now()
    }

    /// Sleeps for the configured artificial "AI" latency.
    pub async fn simulate_latency(&self) {
        if !self.config.simulated_latency.is_zero() {
            tokio::time::sleep(self.config.simulated_latency).await;
        }
    }

    /// In-memory state frozen at 2024-03-10 12:00 IST, without demo seeding.
    #[cfg(test)]
    pub fn fake() -> Self {
        Self::fake_at(time::macros::datetime!(2024-03-10 06:30 UTC), false)
    }

    #[cfg(test)]
    pub fn fake_at(now: OffsetDateTime, seed_demo_data: bool) -> Self {
        use crate::clock::FixedClock;

        let config = Arc::new(AppConfig {
            data_dir: MEMORY_DATA_DIR.into(),
            jwt: crate::config::JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                refresh_ttl_minutes: 60,
            },
            seed_demo_data,
            simulated_latency: std::time::Duration::ZERO,
        });

        Self {
            config,
            store: Arc::new(MemoryStore::new()),
            images: Arc::new(MemoryImageStore::default()),
            clock: Arc::new(FixedClock(now)),
        }
    }
}
