use async_trait::async_trait;
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{AuditEntry, AuditRepo, RepoError},
    domain::entities::AuditLogRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct AuditLogRow {
    id: Uuid,
    actor: String,
    action: String,
    entity_type: String,
    entity_id: Option<String>,
    payload: Option<Value>,
    created_at: OffsetDateTime,
}

impl From<AuditLogRow> for AuditLogRecord {
    fn from(row: AuditLogRow) -> Self {
        Self {
            id: row.id,
            actor: row.actor,
            action: row.action,
            entity_type: row.entity_type,
            entity_id: row.entity_id,
            payload: row.payload,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl AuditRepo for PostgresRepositories {
    async fn append(&self, entry: AuditEntry) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO audit_log (id, actor, action, entity_type, entity_id, payload, created_at)
            VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, now())
            "#,
        )
        .bind(&entry.actor)
        .bind(&entry.action)
        .bind(&entry.entity_type)
        .bind(&entry.entity_id)
        .bind(&entry.payload)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<AuditLogRecord>, RepoError> {
        let rows = sqlx::query_as::<_, AuditLogRow>(
            r#"
            SELECT id, actor, action, entity_type, entity_id, payload, created_at
            FROM audit_log
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(AuditLogRecord::from).collect())
    }
}
