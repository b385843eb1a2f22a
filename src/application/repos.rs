//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{
    AuditLogRecord, ContactSubmissionRecord, PortfolioItemRecord, SiteContentRecord,
};
use crate::domain::types::{MediaCategory, MediaKind, SubmissionStatus};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("resource not found")]
    NotFound,
    #[error("integrity error: {message}")]
    Integrity { message: String },
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct UpsertSectionParams {
    pub section_key: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub content: Value,
}

#[derive(Debug, Clone)]
pub struct CreatePortfolioItemParams {
    pub category: MediaCategory,
    pub title: String,
    pub description: Option<String>,
    pub media_url: String,
    pub media_kind: MediaKind,
    pub embed_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone)]
pub struct UpdatePortfolioItemParams {
    pub id: Uuid,
    pub category: MediaCategory,
    pub title: String,
    pub description: Option<String>,
    pub media_url: String,
    pub media_kind: MediaKind,
    pub embed_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone)]
pub struct NewSubmissionParams {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub project: Option<String>,
    pub service: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub actor: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub payload: Option<Value>,
}

#[async_trait]
pub trait ContentRepo: Send + Sync {
    /// All section rows, ordered by section key.
    async fn list_sections(&self) -> Result<Vec<SiteContentRecord>, RepoError>;
    async fn find_section(&self, section_key: &str)
    -> Result<Option<SiteContentRecord>, RepoError>;
    async fn upsert_section(
        &self,
        params: UpsertSectionParams,
    ) -> Result<SiteContentRecord, RepoError>;
}

#[async_trait]
pub trait PortfolioRepo: Send + Sync {
    async fn list_items(&self) -> Result<Vec<PortfolioItemRecord>, RepoError>;
    async fn list_by_category(
        &self,
        category: MediaCategory,
    ) -> Result<Vec<PortfolioItemRecord>, RepoError>;
    async fn find_item(&self, id: Uuid) -> Result<Option<PortfolioItemRecord>, RepoError>;
    async fn create_item(
        &self,
        params: CreatePortfolioItemParams,
    ) -> Result<PortfolioItemRecord, RepoError>;
    async fn update_item(
        &self,
        params: UpdatePortfolioItemParams,
    ) -> Result<PortfolioItemRecord, RepoError>;
    async fn delete_item(&self, id: Uuid) -> Result<(), RepoError>;
    async fn count_by_category(&self) -> Result<Vec<(MediaCategory, i64)>, RepoError>;
}

#[async_trait]
pub trait ContactRepo: Send + Sync {
    async fn insert_submission(
        &self,
        params: NewSubmissionParams,
    ) -> Result<ContactSubmissionRecord, RepoError>;
    /// Newest first.
    async fn list_submissions(&self) -> Result<Vec<ContactSubmissionRecord>, RepoError>;
    async fn find_submission(
        &self,
        id: Uuid,
    ) -> Result<Option<ContactSubmissionRecord>, RepoError>;
    async fn set_status(
        &self,
        id: Uuid,
        status: SubmissionStatus,
    ) -> Result<ContactSubmissionRecord, RepoError>;
    async fn delete_submission(&self, id: Uuid) -> Result<(), RepoError>;
    async fn count_with_status(&self, status: SubmissionStatus) -> Result<i64, RepoError>;
}

#[async_trait]
pub trait AuditRepo: Send + Sync {
    async fn append(&self, entry: AuditEntry) -> Result<(), RepoError>;
    async fn recent(&self, limit: i64) -> Result<Vec<AuditLogRecord>, RepoError>;
}
