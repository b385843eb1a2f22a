use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{
        CreatePortfolioItemParams, PortfolioRepo, RepoError, UpdatePortfolioItemParams,
    },
    domain::entities::PortfolioItemRecord,
    domain::types::{MediaCategory, MediaKind},
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct PortfolioItemRow {
    id: Uuid,
    category: MediaCategory,
    title: String,
    description: Option<String>,
    media_url: String,
    media_kind: MediaKind,
    embed_url: Option<String>,
    thumbnail_url: Option<String>,
    sort_order: i32,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<PortfolioItemRow> for PortfolioItemRecord {
    fn from(row: PortfolioItemRow) -> Self {
        Self {
            id: row.id,
            category: row.category,
            title: row.title,
            description: row.description,
            media_url: row.media_url,
            media_kind: row.media_kind,
            embed_url: row.embed_url,
            thumbnail_url: row.thumbnail_url,
            sort_order: row.sort_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, category, title, description, media_url, media_kind, \
     embed_url, thumbnail_url, sort_order, created_at, updated_at FROM portfolio_items";

#[async_trait]
impl PortfolioRepo for PostgresRepositories {
    async fn list_items(&self) -> Result<Vec<PortfolioItemRecord>, RepoError> {
        let rows = sqlx::query_as::<_, PortfolioItemRow>(&format!(
            "{SELECT_COLUMNS} ORDER BY sort_order, created_at"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(PortfolioItemRecord::from).collect())
    }

    async fn list_by_category(
        &self,
        category: MediaCategory,
    ) -> Result<Vec<PortfolioItemRecord>, RepoError> {
        let rows = sqlx::query_as::<_, PortfolioItemRow>(&format!(
            "{SELECT_COLUMNS} WHERE category = $1 ORDER BY sort_order, created_at"
        ))
        .bind(category)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(PortfolioItemRecord::from).collect())
    }

    async fn find_item(&self, id: Uuid) -> Result<Option<PortfolioItemRecord>, RepoError> {
        let row = sqlx::query_as::<_, PortfolioItemRow>(&format!(
            "{SELECT_COLUMNS} WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(row.map(PortfolioItemRecord::from))
    }

    async fn create_item(
        &self,
        params: CreatePortfolioItemParams,
    ) -> Result<PortfolioItemRecord, RepoError> {
        let row = sqlx::query_as::<_, PortfolioItemRow>(
            r#"
            INSERT INTO portfolio_items (
                id, category, title, description, media_url, media_kind,
                embed_url, thumbnail_url, sort_order, created_at, updated_at
            ) VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, $6, $7, $8, now(), now())
            RETURNING id, category, title, description, media_url, media_kind,
                      embed_url, thumbnail_url, sort_order, created_at, updated_at
            "#,
        )
        .bind(params.category)
        .bind(&params.title)
        .bind(&params.description)
        .bind(&params.media_url)
        .bind(params.media_kind)
        .bind(&params.embed_url)
        .bind(&params.thumbnail_url)
        .bind(params.sort_order)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(PortfolioItemRecord::from(row))
    }

    async fn update_item(
        &self,
        params: UpdatePortfolioItemParams,
    ) -> Result<PortfolioItemRecord, RepoError> {
        let row = sqlx::query_as::<_, PortfolioItemRow>(
            r#"
            UPDATE portfolio_items SET
                category = $2,
                title = $3,
                description = $4,
                media_url = $5,
                media_kind = $6,
                embed_url = $7,
                thumbnail_url = $8,
                sort_order = $9,
                updated_at = now()
            WHERE id = $1
            RETURNING id, category, title, description, media_url, media_kind,
                      embed_url, thumbnail_url, sort_order, created_at, updated_at
            "#,
        )
        .bind(params.id)
        .bind(params.category)
        .bind(&params.title)
        .bind(&params.description)
        .bind(&params.media_url)
        .bind(params.media_kind)
        .bind(&params.embed_url)
        .bind(&params.thumbnail_url)
        .bind(params.sort_order)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(PortfolioItemRecord::from(row))
    }

    async fn delete_item(&self, id: Uuid) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM portfolio_items WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn count_by_category(&self) -> Result<Vec<(MediaCategory, i64)>, RepoError> {
        let rows = sqlx::query_as::<_, (MediaCategory, i64)>(
            "SELECT category, COUNT(*) FROM portfolio_items GROUP BY category",
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(rows)
    }
}
