//! Persisted records. Field layout mirrors the database schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::types::{MediaCategory, MediaKind, SubmissionStatus};

/// One row per site section. `content` is JSONB whose shape is dictated
/// by the section's schema entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteContentRecord {
    pub id: Uuid,
    pub section_key: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub content: Value,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioItemRecord {
    pub id: Uuid,
    pub category: MediaCategory,
    pub title: String,
    pub description: Option<String>,
    pub media_url: String,
    pub media_kind: MediaKind,
    pub embed_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub sort_order: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSubmissionRecord {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub project: Option<String>,
    pub service: String,
    pub description: String,
    pub status: SubmissionStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Append-only trail of admin mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogRecord {
    pub id: Uuid,
    pub actor: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub payload: Option<Value>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
