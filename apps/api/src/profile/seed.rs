use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing::info;

use crate::models::profile::{Profile, ProfileDocument};
use crate::profile::store::ProfileStore;

/// Reads and validates a profile document from a JSON file.
pub fn load_seed_file(path: &Path) -> Result<Profile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file '{}'", path.display()))?;
    let profile: Profile = serde_json::from_str(&raw)
        .with_context(|| format!("Seed file '{}' is not a valid profile", path.display()))?;
    profile.validate().map_err(|e| anyhow!(e))?;
    Ok(profile)
}

/// Upserts the profile found in `path`, replacing any existing document.
pub async fn seed_profile(store: &dyn ProfileStore, path: &Path) -> Result<ProfileDocument> {
    let profile = load_seed_file(path)?;
    let doc = store.upsert(profile).await?;
    info!("Seeded profile {} from {}", doc.id, path.display());
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::store::MemoryProfileStore;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_seed(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_seed_upserts_into_empty_store() {
        let file = write_seed(
            r#"{
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "skills": ["Mathematics"],
                "projects": [{ "title": "Notes on the Engine", "skills": ["Algorithms"] }],
                "links": { "github": "https://github.com/ada" }
            }"#,
        );
        let store = MemoryProfileStore::new();

        let doc = seed_profile(&store, file.path()).await.unwrap();
        assert_eq!(doc.profile.name, "Ada Lovelace");
        assert_eq!(store.find().await.unwrap().unwrap().id, doc.id);
    }

    #[tokio::test]
    async fn test_seed_replaces_existing_profile() {
        let store = MemoryProfileStore::new();
        let first = store
            .upsert(Profile {
                name: "Old".into(),
                email: "old@example.com".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let file = write_seed(r#"{ "name": "New", "email": "new@example.com" }"#);
        let doc = seed_profile(&store, file.path()).await.unwrap();
        assert_eq!(doc.id, first.id);
        assert_eq!(doc.profile.name, "New");
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let file = write_seed("{ not json");
        let err = load_seed_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("not a valid profile"));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let file = write_seed(r#"{ "name": "", "email": "a@example.com" }"#);
        assert!(load_seed_file(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = load_seed_file(Path::new("/nonexistent/seed.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read seed file"));
    }
}
