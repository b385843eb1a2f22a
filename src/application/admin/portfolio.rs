//! Admin portfolio service.
//!
//! Items are either uploaded media (image/video files stored by the
//! media storage and referenced by a durable `/media/...` URL) or
//! embedded external references, whose embed and thumbnail URLs derive
//! from the pasted link.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::application::repos::{
    AuditEntry, AuditRepo, CreatePortfolioItemParams, PortfolioRepo, RepoError,
    UpdatePortfolioItemParams,
};
use crate::domain::entities::PortfolioItemRecord;
use crate::domain::types::{MediaCategory, MediaKind};
use crate::domain::video;

#[derive(Debug, Error)]
pub enum PortfolioAdminError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("portfolio item not found")]
    NotFound,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl PortfolioAdminError {
    fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Form values after upload handling: `media_url` is set when a file was
/// stored, `reference_url` when an external link was pasted.
#[derive(Debug, Clone, Default)]
pub struct PortfolioItemDraft {
    pub category: MediaCategory,
    pub title: String,
    pub description: String,
    pub media_kind: MediaKind,
    pub media_url: Option<String>,
    pub reference_url: Option<String>,
    pub sort_order: i32,
}

pub struct PortfolioAdminService {
    portfolio: Arc<dyn PortfolioRepo>,
    audit: Arc<dyn AuditRepo>,
    actor: String,
}

impl PortfolioAdminService {
    pub fn new(portfolio: Arc<dyn PortfolioRepo>, audit: Arc<dyn AuditRepo>, actor: String) -> Self {
        Self {
            portfolio,
            audit,
            actor,
        }
    }

    pub async fn list_by_category(
        &self,
        category: MediaCategory,
    ) -> Result<Vec<PortfolioItemRecord>, PortfolioAdminError> {
        Ok(self.portfolio.list_by_category(category).await?)
    }

    pub async fn find(&self, id: Uuid) -> Result<PortfolioItemRecord, PortfolioAdminError> {
        self.portfolio
            .find_item(id)
            .await?
            .ok_or(PortfolioAdminError::NotFound)
    }

    pub async fn counts(&self) -> Result<HashMap<MediaCategory, i64>, PortfolioAdminError> {
        let mut counts: HashMap<MediaCategory, i64> =
            MediaCategory::ALL.iter().map(|c| (*c, 0)).collect();
        for (category, count) in self.portfolio.count_by_category().await? {
            counts.insert(category, count);
        }
        Ok(counts)
    }

    pub async fn create(
        &self,
        draft: PortfolioItemDraft,
    ) -> Result<PortfolioItemRecord, PortfolioAdminError> {
        let params = validate(draft)?;
        let record = self.portfolio.create_item(params).await?;
        self.record_audit("portfolio.create", &record).await?;
        Ok(record)
    }

    /// Update an item. A draft without new media keeps the stored media
    /// fields unchanged.
    pub async fn update(
        &self,
        id: Uuid,
        mut draft: PortfolioItemDraft,
    ) -> Result<PortfolioItemRecord, PortfolioAdminError> {
        let existing = self.find(id).await?;
        if draft.media_url.is_none() && draft.reference_url.is_none() {
            draft.media_url = Some(existing.media_url.clone());
            if draft.media_kind == MediaKind::Embed {
                draft.reference_url = existing.embed_url.clone();
            }
        }
        let params = validate(draft)?;
        let record = self
            .portfolio
            .update_item(UpdatePortfolioItemParams {
                id,
                category: params.category,
                title: params.title,
                description: params.description,
                media_url: params.media_url,
                media_kind: params.media_kind,
                embed_url: params.embed_url,
                thumbnail_url: params.thumbnail_url,
                sort_order: params.sort_order,
            })
            .await?;
        self.record_audit("portfolio.update", &record).await?;
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> Result<PortfolioItemRecord, PortfolioAdminError> {
        let existing = self.find(id).await?;
        self.portfolio.delete_item(id).await?;
        self.record_audit("portfolio.delete", &existing).await?;
        Ok(existing)
    }

    async fn record_audit(
        &self,
        action: &str,
        record: &PortfolioItemRecord,
    ) -> Result<(), PortfolioAdminError> {
        self.audit
            .append(AuditEntry {
                actor: self.actor.clone(),
                action: action.to_string(),
                entity_type: "portfolio_item".to_string(),
                entity_id: Some(record.id.to_string()),
                payload: serde_json::to_value(record).ok(),
            })
            .await?;
        Ok(())
    }
}

fn validate(draft: PortfolioItemDraft) -> Result<CreatePortfolioItemParams, PortfolioAdminError> {
    let title = draft.title.trim().to_string();
    if title.is_empty() {
        return Err(PortfolioAdminError::validation("a title is required"));
    }
    let description = {
        let trimmed = draft.description.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };

    let (media_url, embed_url, thumbnail_url) = match draft.media_kind {
        MediaKind::Image | MediaKind::Video => {
            let url = draft.media_url.filter(|url| !url.trim().is_empty()).ok_or_else(|| {
                PortfolioAdminError::validation("an uploaded file is required for this media kind")
            })?;
            (url, None, None)
        }
        MediaKind::Embed => {
            let reference = draft
                .reference_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .ok_or_else(|| {
                    PortfolioAdminError::validation("a video link is required for embedded items")
                })?;
            let embed = video::embed_url(reference);
            let thumbnail = video::thumbnail_url(reference);
            (embed.clone(), Some(embed), thumbnail)
        }
    };

    Ok(CreatePortfolioItemParams {
        category: draft.category,
        title,
        description,
        media_url,
        media_kind: draft.media_kind,
        embed_url,
        thumbnail_url,
        sort_order: draft.sort_order,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use time::OffsetDateTime;

    use super::*;

    #[derive(Default)]
    struct StubPortfolioRepo {
        items: Mutex<Vec<PortfolioItemRecord>>,
    }

    #[async_trait]
    impl PortfolioRepo for StubPortfolioRepo {
        async fn list_items(&self) -> Result<Vec<PortfolioItemRecord>, RepoError> {
            Ok(self.items.lock().unwrap().clone())
        }

        async fn list_by_category(
            &self,
            category: MediaCategory,
        ) -> Result<Vec<PortfolioItemRecord>, RepoError> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|item| item.category == category)
                .cloned()
                .collect())
        }

        async fn find_item(&self, id: Uuid) -> Result<Option<PortfolioItemRecord>, RepoError> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .find(|item| item.id == id)
                .cloned())
        }

        async fn create_item(
            &self,
            params: CreatePortfolioItemParams,
        ) -> Result<PortfolioItemRecord, RepoError> {
            let record = PortfolioItemRecord {
                id: Uuid::new_v4(),
                category: params.category,
                title: params.title,
                description: params.description,
                media_url: params.media_url,
                media_kind: params.media_kind,
                embed_url: params.embed_url,
                thumbnail_url: params.thumbnail_url,
                sort_order: params.sort_order,
                created_at: OffsetDateTime::UNIX_EPOCH,
                updated_at: OffsetDateTime::UNIX_EPOCH,
            };
            self.items.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn update_item(
            &self,
            params: UpdatePortfolioItemParams,
        ) -> Result<PortfolioItemRecord, RepoError> {
            let mut items = self.items.lock().unwrap();
            let item = items
                .iter_mut()
                .find(|item| item.id == params.id)
                .ok_or(RepoError::NotFound)?;
            item.category = params.category;
            item.title = params.title;
            item.description = params.description;
            item.media_url = params.media_url;
            item.media_kind = params.media_kind;
            item.embed_url = params.embed_url;
            item.thumbnail_url = params.thumbnail_url;
            item.sort_order = params.sort_order;
            Ok(item.clone())
        }

        async fn delete_item(&self, id: Uuid) -> Result<(), RepoError> {
            self.items.lock().unwrap().retain(|item| item.id != id);
            Ok(())
        }

        async fn count_by_category(&self) -> Result<Vec<(MediaCategory, i64)>, RepoError> {
            let items = self.items.lock().unwrap();
            Ok(MediaCategory::ALL
                .iter()
                .map(|category| {
                    (
                        *category,
                        items.iter().filter(|item| item.category == *category).count() as i64,
                    )
                })
                .collect())
        }
    }

    #[derive(Default)]
    struct StubAuditRepo {
        entries: Mutex<Vec<AuditEntry>>,
    }

    #[async_trait]
    impl AuditRepo for StubAuditRepo {
        async fn append(&self, entry: AuditEntry) -> Result<(), RepoError> {
            self.entries.lock().unwrap().push(entry);
            Ok(())
        }

        async fn recent(
            &self,
            _limit: i64,
        ) -> Result<Vec<crate::domain::entities::AuditLogRecord>, RepoError> {
            Ok(Vec::new())
        }
    }

    fn service() -> (PortfolioAdminService, Arc<StubAuditRepo>) {
        let audit = Arc::new(StubAuditRepo::default());
        let service = PortfolioAdminService::new(
            Arc::new(StubPortfolioRepo::default()),
            Arc::clone(&audit) as Arc<dyn AuditRepo>,
            "admin".to_string(),
        );
        (service, audit)
    }

    #[tokio::test]
    async fn embedded_items_derive_embed_and_thumbnail_urls() {
        let (service, audit) = service();
        let record = service
            .create(PortfolioItemDraft {
                category: MediaCategory::Shorts,
                title: "Launch teaser".to_string(),
                media_kind: MediaKind::Embed,
                reference_url: Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string()),
                ..PortfolioItemDraft::default()
            })
            .await
            .unwrap();

        assert_eq!(
            record.embed_url.as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
        );
        assert_eq!(
            record.thumbnail_url.as_deref(),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg")
        );
        assert_eq!(audit.entries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unrecognized_references_are_stored_unchanged_without_thumbnail() {
        let (service, _audit) = service();
        let record = service
            .create(PortfolioItemDraft {
                category: MediaCategory::LongVideos,
                title: "Vimeo cut".to_string(),
                media_kind: MediaKind::Embed,
                reference_url: Some("https://vimeo.com/12345".to_string()),
                ..PortfolioItemDraft::default()
            })
            .await
            .unwrap();

        assert_eq!(record.media_url, "https://vimeo.com/12345");
        assert_eq!(record.thumbnail_url, None);
    }

    #[tokio::test]
    async fn image_items_require_an_uploaded_file() {
        let (service, audit) = service();
        let err = service
            .create(PortfolioItemDraft {
                category: MediaCategory::Logos,
                title: "Logo set".to_string(),
                media_kind: MediaKind::Image,
                ..PortfolioItemDraft::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioAdminError::Validation(_)));
        assert!(audit.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_without_new_media_keeps_the_stored_file() {
        let (service, _audit) = service();
        let created = service
            .create(PortfolioItemDraft {
                category: MediaCategory::Posters,
                title: "Poster".to_string(),
                media_kind: MediaKind::Image,
                media_url: Some("/media/posters/poster.png".to_string()),
                ..PortfolioItemDraft::default()
            })
            .await
            .unwrap();

        let updated = service
            .update(
                created.id,
                PortfolioItemDraft {
                    category: MediaCategory::Posters,
                    title: "Poster, renamed".to_string(),
                    media_kind: MediaKind::Image,
                    ..PortfolioItemDraft::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Poster, renamed");
        assert_eq!(updated.media_url, "/media/posters/poster.png");
    }

    #[tokio::test]
    async fn counts_cover_every_category() {
        let (service, _audit) = service();
        let counts = service.counts().await.unwrap();
        assert_eq!(counts.len(), MediaCategory::ALL.len());
    }
}
