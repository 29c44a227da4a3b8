//! Painting store abstraction and the filesystem gallery implementing it.

use async_trait::async_trait;
use chrono::Utc;
use fs2::FileExt;
use log::{debug, info, warn};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tokio::task;

use super::types::{PaintingRecord, PersistError};
use crate::util;

/// Index file listing every painting in a gallery directory.
pub const INDEX_FILE: &str = "paintings.json";
const LOCK_FILE: &str = "paintings.lock";

/// Abstraction over where paintings are persisted. Mocked in tests.
#[async_trait]
pub trait PaintingStore: Send + Sync {
    /// Stores an encoded PNG under `owner`.
    async fn write_painting(
        &self,
        owner: &str,
        image_png: Vec<u8>,
    ) -> Result<PaintingRecord, PersistError>;

    /// Lists stored paintings, optionally restricted to one owner.
    async fn list_paintings(&self, owner: Option<&str>)
    -> Result<Vec<PaintingRecord>, PersistError>;
}

/// Directory-backed painting store.
///
/// One PNG per painting plus a JSON index. Writers hold an exclusive lock on
/// a sibling lock file while they update the index.
#[derive(Debug, Clone)]
pub struct GalleryStore {
    directory: PathBuf,
}

impl GalleryStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn index_path(&self) -> PathBuf {
        self.directory.join(INDEX_FILE)
    }

    fn lock_path(&self) -> PathBuf {
        self.directory.join(LOCK_FILE)
    }

    /// Blocking write used by the async trait method.
    pub fn write_blocking(
        &self,
        owner: &str,
        image_png: &[u8],
    ) -> Result<PaintingRecord, PersistError> {
        let owner = owner.trim();
        if owner.is_empty() {
            return Err(PersistError::MissingOwner);
        }
        let slug = util::sanitize_identifier(owner)
            .ok_or_else(|| PersistError::InvalidOwner(owner.to_string()))?;

        fs::create_dir_all(&self.directory)?;

        let lock_path = self.lock_path();
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;
        lock_file.lock_exclusive()?;

        let result = self.write_locked(owner, &slug, image_png);

        lock_file.unlock().unwrap_or_else(|err| {
            warn!(
                "failed to unlock gallery index {}: {}",
                lock_path.display(),
                err
            )
        });

        result
    }

    fn write_locked(
        &self,
        owner: &str,
        slug: &str,
        image_png: &[u8],
    ) -> Result<PaintingRecord, PersistError> {
        let mut records = self.read_index()?;
        let created = Utc::now();
        let id = format!(
            "{}-{:05}",
            created.format("%Y%m%d%H%M%S"),
            records.len() + 1
        );
        let file = format!("{slug}-{id}.png");
        let image_path = self.directory.join(&file);

        fs::write(&image_path, image_png)?;

        let record = PaintingRecord {
            id,
            owner: owner.to_string(),
            created_at: created.to_rfc3339(),
            file,
        };
        records.push(record.clone());
        if let Err(err) = self.write_index(&records) {
            // Without an index entry the image is unreachable.
            if let Err(remove_err) = fs::remove_file(&image_path) {
                warn!(
                    "failed to remove unindexed painting {}: {}",
                    image_path.display(),
                    remove_err
                );
            }
            return Err(err);
        }

        info!(
            "Stored painting {} for {} ({} bytes)",
            record.id,
            record.owner,
            image_png.len()
        );
        Ok(record)
    }

    /// Reads the index; a missing index is an empty gallery.
    pub fn read_index(&self) -> Result<Vec<PaintingRecord>, PersistError> {
        let path = self.index_path();
        if !path.exists() {
            debug!("No gallery index at {}", path.display());
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn write_index(&self, records: &[PaintingRecord]) -> Result<(), PersistError> {
        let path = self.index_path();
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[async_trait]
impl PaintingStore for GalleryStore {
    async fn write_painting(
        &self,
        owner: &str,
        image_png: Vec<u8>,
    ) -> Result<PaintingRecord, PersistError> {
        let store = self.clone();
        let owner = owner.to_string();
        task::spawn_blocking(move || store.write_blocking(&owner, &image_png))
            .await
            .map_err(|e| PersistError::Task(e.to_string()))?
    }

    async fn list_paintings(
        &self,
        owner: Option<&str>,
    ) -> Result<Vec<PaintingRecord>, PersistError> {
        let store = self.clone();
        let records = task::spawn_blocking(move || store.read_index())
            .await
            .map_err(|e| PersistError::Task(e.to_string()))??;

        Ok(match owner.map(str::trim) {
            Some(owner) => records.into_iter().filter(|r| r.owner == owner).collect(),
            None => records,
        })
    }
}
