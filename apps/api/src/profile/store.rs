//! Profile store: pluggable backend holding the singleton profile document.
//!
//! `AppState` holds an `Arc<dyn ProfileStore>`, chosen at startup:
//! `PgProfileStore` when `DATABASE_URL` is set, `MemoryProfileStore` otherwise.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::models::profile::{Profile, ProfileDocument};

/// At most one document exists at any time. Implementations must make
/// `insert_if_absent` atomic with respect to concurrent writers.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find(&self) -> Result<Option<ProfileDocument>>;

    /// Returns `None` without writing when a profile already exists.
    async fn insert_if_absent(&self, profile: Profile) -> Result<Option<ProfileDocument>>;

    /// Replaces the whole document, creating it if absent.
    async fn upsert(&self, profile: Profile) -> Result<ProfileDocument>;
}

/// In-process store. Used when no database is configured, and by tests.
#[derive(Default)]
pub struct MemoryProfileStore {
    doc: RwLock<Option<ProfileDocument>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn find(&self) -> Result<Option<ProfileDocument>> {
        Ok(self.doc.read().await.clone())
    }

    async fn insert_if_absent(&self, profile: Profile) -> Result<Option<ProfileDocument>> {
        let mut slot = self.doc.write().await;
        if slot.is_some() {
            return Ok(None);
        }
        let now = Utc::now();
        let doc = ProfileDocument {
            id: Uuid::new_v4(),
            profile,
            created_at: now,
            updated_at: now,
        };
        *slot = Some(doc.clone());
        info!("Created profile {}", doc.id);
        Ok(Some(doc))
    }

    async fn upsert(&self, profile: Profile) -> Result<ProfileDocument> {
        let mut slot = self.doc.write().await;
        let now = Utc::now();
        let doc = match slot.take() {
            Some(existing) => ProfileDocument {
                profile,
                updated_at: now,
                ..existing
            },
            None => ProfileDocument {
                id: Uuid::new_v4(),
                profile,
                created_at: now,
                updated_at: now,
            },
        };
        *slot = Some(doc.clone());
        info!("Replaced profile {}", doc.id);
        Ok(doc)
    }
}
