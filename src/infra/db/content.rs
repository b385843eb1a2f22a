use async_trait::async_trait;
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{ContentRepo, RepoError, UpsertSectionParams},
    domain::entities::SiteContentRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct SiteContentRow {
    id: Uuid,
    section_key: String,
    title: Option<String>,
    subtitle: Option<String>,
    description: Option<String>,
    content: Value,
    updated_at: OffsetDateTime,
}

impl From<SiteContentRow> for SiteContentRecord {
    fn from(row: SiteContentRow) -> Self {
        Self {
            id: row.id,
            section_key: row.section_key,
            title: row.title,
            subtitle: row.subtitle,
            description: row.description,
            content: row.content,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, section_key, title, subtitle, description, content, updated_at FROM site_content";

#[async_trait]
impl ContentRepo for PostgresRepositories {
    async fn list_sections(&self) -> Result<Vec<SiteContentRecord>, RepoError> {
        let rows = sqlx::query_as::<_, SiteContentRow>(&format!(
            "{SELECT_COLUMNS} ORDER BY section_key"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(SiteContentRecord::from).collect())
    }

    async fn find_section(
        &self,
        section_key: &str,
    ) -> Result<Option<SiteContentRecord>, RepoError> {
        let row = sqlx::query_as::<_, SiteContentRow>(&format!(
            "{SELECT_COLUMNS} WHERE section_key = $1"
        ))
        .bind(section_key)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(row.map(SiteContentRecord::from))
    }

    async fn upsert_section(
        &self,
        params: UpsertSectionParams,
    ) -> Result<SiteContentRecord, RepoError> {
        let row = sqlx::query_as::<_, SiteContentRow>(
            r#"
            INSERT INTO site_content (id, section_key, title, subtitle, description, content, updated_at)
            VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, now())
            ON CONFLICT (section_key) DO UPDATE SET
                title = EXCLUDED.title,
                subtitle = EXCLUDED.subtitle,
                description = EXCLUDED.description,
                content = EXCLUDED.content,
                updated_at = now()
            RETURNING id, section_key, title, subtitle, description, content, updated_at
            "#,
        )
        .bind(&params.section_key)
        .bind(&params.title)
        .bind(&params.subtitle)
        .bind(&params.description)
        .bind(&params.content)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(SiteContentRecord::from(row))
    }
}
