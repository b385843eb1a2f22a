//! Admin site-content service.
//!
//! The editor flow: a snapshot seeds the form, a save merges the edited
//! payload into the stored row and reloads the public cache. The merge
//! keeps the no-erase rule for list sections, so an editor that never
//! loaded its items cannot wipe them.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::warn;

use crate::application::content_cache::ContentCache;
use crate::application::repos::{
    AuditEntry, AuditRepo, ContentRepo, RepoError, UpsertSectionParams,
};
use crate::application::site;
use crate::domain::content::merge_section_content;
use crate::domain::entities::SiteContentRecord;
use crate::domain::sections::{SectionKey, SectionSchema};

const SOURCE: &str = "application::admin::content";

#[derive(Debug, Error)]
pub enum ContentAdminError {
    #[error("unknown section `{0}`")]
    UnknownSection(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct SectionSummary {
    pub key: SectionKey,
    pub label: &'static str,
    pub item_count: Option<usize>,
    pub customized: bool,
    pub updated_at: Option<OffsetDateTime>,
}

/// Everything the editor form needs when it opens.
#[derive(Debug, Clone)]
pub struct EditorSnapshot {
    pub key: SectionKey,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    /// Schema-shaped payload: a (possibly empty) array for list sections,
    /// an object for simple sections, the plan tree for pricing.
    pub payload: Value,
}

#[derive(Debug, Clone)]
pub struct SaveSectionParams {
    pub key: SectionKey,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub edited: Value,
}

pub struct ContentAdminService {
    content: Arc<dyn ContentRepo>,
    audit: Arc<dyn AuditRepo>,
    cache: Arc<ContentCache>,
    actor: String,
}

impl ContentAdminService {
    pub fn new(
        content: Arc<dyn ContentRepo>,
        audit: Arc<dyn AuditRepo>,
        cache: Arc<ContentCache>,
        actor: String,
    ) -> Self {
        Self {
            content,
            audit,
            cache,
            actor,
        }
    }

    pub fn parse_key(raw: &str) -> Result<SectionKey, ContentAdminError> {
        SectionKey::try_from(raw).map_err(|_| ContentAdminError::UnknownSection(raw.to_string()))
    }

    pub async fn list_sections(&self) -> Result<Vec<SectionSummary>, ContentAdminError> {
        let rows = self.content.list_sections().await?;
        let summaries = SectionKey::ALL
            .iter()
            .map(|key| {
                let row = rows.iter().find(|row| row.section_key == key.as_str());
                let item_count = key.schema().and_then(|schema| match schema {
                    SectionSchema::List { content_key, .. } => Some(
                        row.map(|row| list_len(&row.content, content_key))
                            .unwrap_or_else(|| {
                                site::defaults_for(*key)
                                    .content
                                    .map(|content| list_len(content, content_key))
                                    .unwrap_or(0)
                            }),
                    ),
                    _ => None,
                });
                SectionSummary {
                    key: *key,
                    label: key.label(),
                    item_count,
                    customized: row.is_some(),
                    updated_at: row.map(|row| row.updated_at),
                }
            })
            .collect();
        Ok(summaries)
    }

    /// Snapshot the stored row (or the compiled-in defaults) for editing.
    pub async fn editor_snapshot(&self, key: SectionKey) -> Result<EditorSnapshot, ContentAdminError> {
        let row = self.content.find_section(key.as_str()).await?;
        let defaults = site::defaults_for(key);

        let payload = match key.schema() {
            Some(SectionSchema::List { content_key, .. }) => row
                .as_ref()
                .and_then(|row| row.content.get(content_key))
                .filter(|value| value.is_array())
                .cloned()
                .unwrap_or(Value::Array(Vec::new())),
            Some(schema) => row
                .as_ref()
                .and_then(|row| row.content.get(schema.content_key()))
                .cloned()
                .or_else(|| {
                    defaults
                        .content
                        .and_then(|content| content.get(schema.content_key()))
                        .cloned()
                })
                .unwrap_or(Value::Null),
            None => Value::Null,
        };

        Ok(EditorSnapshot {
            key,
            title: row
                .as_ref()
                .and_then(|row| row.title.clone())
                .unwrap_or_default(),
            subtitle: row
                .as_ref()
                .and_then(|row| row.subtitle.clone())
                .unwrap_or_default(),
            description: row
                .as_ref()
                .and_then(|row| row.description.clone())
                .unwrap_or_default(),
            payload,
        })
    }

    /// Persist an edit, append an audit row and reload the public cache.
    pub async fn save_section(
        &self,
        params: SaveSectionParams,
    ) -> Result<SiteContentRecord, ContentAdminError> {
        let existing = self
            .content
            .find_section(params.key.as_str())
            .await?
            .map(|row| row.content)
            .unwrap_or(Value::Null);

        let content = match params.key.schema() {
            Some(schema) => merge_section_content(&existing, schema, params.edited),
            None => existing,
        };

        let record = self
            .content
            .upsert_section(UpsertSectionParams {
                section_key: params.key.as_str().to_string(),
                title: blank_to_none(&params.title),
                subtitle: blank_to_none(&params.subtitle),
                description: blank_to_none(&params.description),
                content,
            })
            .await?;

        self.audit
            .append(AuditEntry {
                actor: self.actor.clone(),
                action: "content.save".to_string(),
                entity_type: "site_content".to_string(),
                entity_id: Some(record.section_key.clone()),
                payload: Some(record.content.clone()),
            })
            .await?;

        // The row is already persisted; a failed reload only leaves the
        // public cache stale until the next one.
        if let Err(err) = self.cache.invalidate_and_reload().await {
            warn!(
                target = SOURCE,
                section = record.section_key,
                error = %err,
                "content cache reload after save failed"
            );
        }

        Ok(record)
    }
}

fn list_len(content: &Value, content_key: &str) -> usize {
    content
        .get(content_key)
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0)
}

fn blank_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
