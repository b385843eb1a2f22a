//! Filesystem media storage for portfolio uploads.
//!
//! Files are stored under a per-category directory and addressed by a
//! durable `/media/<category>/<id>-<name>` URL, so moving an item
//! between categories never breaks an already published page.

use std::error::Error as StdError;
use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use futures::{StreamExt, pin_mut, stream};
use sha2::{Digest, Sha256};
use slug::slugify;
use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt};
use uuid::Uuid;

use crate::domain::types::MediaCategory;

#[derive(Debug, Error)]
pub enum MediaStorageError {
    #[error("invalid stored path")]
    InvalidPath,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("uploaded file exceeds configured body limit")]
    PayloadTooLarge {
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
    #[error("uploaded file stream failed")]
    PayloadStream {
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
    #[error("uploaded file is empty")]
    EmptyPayload,
    #[error("uploaded file size exceeds supported range")]
    SizeOverflow,
}

/// Result of storing an uploaded media file.
#[derive(Debug, Clone)]
pub struct StoredMedia {
    /// Path relative to the storage root, also the `/media/` URL suffix.
    pub stored_path: String,
    pub checksum: String,
    pub size_bytes: i64,
}

impl StoredMedia {
    pub fn public_url(&self) -> String {
        format!("/media/{}", self.stored_path)
    }
}

/// Filesystem-backed media storage.
#[derive(Debug)]
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    /// Initialise storage rooted at the provided directory, creating it
    /// if necessary.
    pub fn new(root: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Stream an upload to disk under the category directory.
    pub async fn store_stream<S>(
        &self,
        category: MediaCategory,
        original_name: &str,
        stream: S,
    ) -> Result<StoredMedia, MediaStorageError>
    where
        S: futures::Stream<Item = Result<Bytes, MediaStorageError>>,
    {
        let stored_path = build_stored_path(category, original_name);
        let absolute = self.resolve(&stored_path)?;

        if let Some(parent) = absolute.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&absolute).await?;
        let mut hasher = Sha256::new();
        let mut total_bytes: u64 = 0;
        let mut saw_payload = false;

        pin_mut!(stream);
        while let Some(chunk_result) = stream.next().await {
            let chunk = match chunk_result {
                Ok(chunk) => chunk,
                Err(err) => {
                    drop(file);
                    let _ = fs::remove_file(&absolute).await;
                    return Err(err);
                }
            };

            if chunk.is_empty() {
                continue;
            }

            saw_payload = true;
            total_bytes = total_bytes
                .checked_add(chunk.len() as u64)
                .ok_or(MediaStorageError::SizeOverflow)?;
            file.write_all(&chunk).await?;
            hasher.update(&chunk);
        }

        file.flush().await?;

        if !saw_payload {
            drop(file);
            let _ = fs::remove_file(&absolute).await;
            return Err(MediaStorageError::EmptyPayload);
        }

        let checksum = hex::encode(hasher.finalize());
        let size_bytes =
            i64::try_from(total_bytes).map_err(|_| MediaStorageError::SizeOverflow)?;
        metrics::counter!("kadro_media_uploads_total").increment(1);

        Ok(StoredMedia {
            stored_path,
            checksum,
            size_bytes,
        })
    }

    /// Store a fully-buffered payload. Intended for tests and small assets.
    pub async fn store(
        &self,
        category: MediaCategory,
        original_name: &str,
        data: Bytes,
    ) -> Result<StoredMedia, MediaStorageError> {
        let stream = stream::once(async move { Ok::<_, MediaStorageError>(data) });
        self.store_stream(category, original_name, stream).await
    }

    /// Absolute filesystem path for a stored file, for serving.
    pub fn absolute_path(&self, stored_path: &str) -> Result<PathBuf, MediaStorageError> {
        self.resolve(stored_path)
    }

    /// Remove a stored file. Missing files are treated as success.
    pub async fn delete(&self, stored_path: &str) -> Result<(), MediaStorageError> {
        let absolute = self.resolve(stored_path)?;
        match fs::remove_file(&absolute).await {
            Ok(_) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(MediaStorageError::Io(err)),
        }
    }

    fn resolve(&self, stored_path: &str) -> Result<PathBuf, MediaStorageError> {
        let relative = Path::new(stored_path);
        if relative.is_absolute()
            || relative
                .components()
                .any(|component| matches!(component, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(MediaStorageError::InvalidPath);
        }

        Ok(self.root.join(relative))
    }
}

fn build_stored_path(category: MediaCategory, original_name: &str) -> String {
    let identifier = Uuid::new_v4();
    let filename = sanitize_filename(original_name);
    format!("{}/{identifier}-{filename}", category.as_str())
}

fn sanitize_filename(original: &str) -> String {
    let path = Path::new(original);
    let stem = path
        .file_stem()
        .and_then(|value| value.to_str())
        .unwrap_or("upload");
    let mut base = slugify(stem);
    if base.is_empty() {
        base = "upload".to_string();
    }

    let extension = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.trim_matches('.').to_ascii_lowercase())
        .filter(|value| !value.is_empty());

    match extension {
        Some(ext) => format!("{base}.{ext}"),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stored_files_land_under_the_category_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path().to_path_buf()).unwrap();

        let stored = storage
            .store(
                MediaCategory::Posters,
                "Festival Poster.PNG",
                Bytes::from_static(b"fake png"),
            )
            .await
            .unwrap();

        assert!(stored.stored_path.starts_with("posters/"));
        assert!(stored.stored_path.ends_with("-festival-poster.png"));
        assert!(stored.public_url().starts_with("/media/posters/"));
        assert_eq!(stored.size_bytes, 8);
        let absolute = storage.absolute_path(&stored.stored_path).unwrap();
        assert!(absolute.exists());
    }

    #[tokio::test]
    async fn empty_uploads_are_rejected_and_cleaned_up() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path().to_path_buf()).unwrap();

        let err = storage
            .store(MediaCategory::Logos, "empty.png", Bytes::new())
            .await
            .unwrap_err();
        assert!(matches!(err, MediaStorageError::EmptyPayload));
    }

    #[tokio::test]
    async fn parent_dir_components_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path().to_path_buf()).unwrap();
        assert!(matches!(
            storage.absolute_path("../outside.png"),
            Err(MediaStorageError::InvalidPath)
        ));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path().to_path_buf()).unwrap();
        let stored = storage
            .store(MediaCategory::Logos, "logo.svg", Bytes::from_static(b"<svg/>"))
            .await
            .unwrap();
        storage.delete(&stored.stored_path).await.unwrap();
        storage.delete(&stored.stored_path).await.unwrap();
    }
}
