use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::models::profile::{Profile, ProfileDocument};
use crate::profile::store::ProfileStore;

const RETURNING: &str = "RETURNING id, data, created_at, updated_at";

#[derive(Debug, FromRow)]
struct ProfileRow {
    id: Uuid,
    data: Json<Profile>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for ProfileDocument {
    fn from(row: ProfileRow) -> Self {
        ProfileDocument {
            id: row.id,
            profile: row.data.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Postgres-backed store. The document lives in a single JSONB row.
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find(&self) -> Result<Option<ProfileDocument>> {
        let row: Option<ProfileRow> = sqlx::query_as(
            "SELECT id, data, created_at, updated_at FROM profiles WHERE singleton LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(ProfileDocument::from))
    }

    async fn insert_if_absent(&self, profile: Profile) -> Result<Option<ProfileDocument>> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "INSERT INTO profiles (id, data) VALUES ($1, $2) \
             ON CONFLICT (singleton) DO NOTHING {RETURNING}"
        ))
        .bind(Uuid::new_v4())
        .bind(Json(&profile))
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = &row {
            info!("Created profile {}", row.id);
        }
        Ok(row.map(ProfileDocument::from))
    }

    async fn upsert(&self, profile: Profile) -> Result<ProfileDocument> {
        let row: ProfileRow = sqlx::query_as(&format!(
            "INSERT INTO profiles (id, data) VALUES ($1, $2) \
             ON CONFLICT (singleton) DO UPDATE SET data = EXCLUDED.data, updated_at = now() \
             {RETURNING}"
        ))
        .bind(Uuid::new_v4())
        .bind(Json(&profile))
        .fetch_one(&self.pool)
        .await?;

        info!("Replaced profile {}", row.id);
        Ok(row.into())
    }
}
