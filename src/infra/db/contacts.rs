use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{ContactRepo, NewSubmissionParams, RepoError},
    domain::entities::ContactSubmissionRecord,
    domain::types::SubmissionStatus,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct ContactSubmissionRow {
    id: Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    project: Option<String>,
    service: String,
    description: String,
    status: SubmissionStatus,
    created_at: OffsetDateTime,
}

impl From<ContactSubmissionRow> for ContactSubmissionRecord {
    fn from(row: ContactSubmissionRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            project: row.project,
            service: row.service,
            description: row.description,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, name, email, phone, project, service, description, \
     status, created_at FROM contact_submissions";

#[async_trait]
impl ContactRepo for PostgresRepositories {
    async fn insert_submission(
        &self,
        params: NewSubmissionParams,
    ) -> Result<ContactSubmissionRecord, RepoError> {
        let row = sqlx::query_as::<_, ContactSubmissionRow>(
            r#"
            INSERT INTO contact_submissions (
                id, name, email, phone, project, service, description, status, created_at
            ) VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, $6, 'new', now())
            RETURNING id, name, email, phone, project, service, description, status, created_at
            "#,
        )
        .bind(&params.name)
        .bind(&params.email)
        .bind(&params.phone)
        .bind(&params.project)
        .bind(&params.service)
        .bind(&params.description)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(ContactSubmissionRecord::from(row))
    }

    async fn list_submissions(&self) -> Result<Vec<ContactSubmissionRecord>, RepoError> {
        let rows = sqlx::query_as::<_, ContactSubmissionRow>(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(ContactSubmissionRecord::from).collect())
    }

    async fn find_submission(
        &self,
        id: Uuid,
    ) -> Result<Option<ContactSubmissionRecord>, RepoError> {
        let row = sqlx::query_as::<_, ContactSubmissionRow>(&format!(
            "{SELECT_COLUMNS} WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(row.map(ContactSubmissionRecord::from))
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: SubmissionStatus,
    ) -> Result<ContactSubmissionRecord, RepoError> {
        let row = sqlx::query_as::<_, ContactSubmissionRow>(
            r#"
            UPDATE contact_submissions SET status = $2
            WHERE id = $1
            RETURNING id, name, email, phone, project, service, description, status, created_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(ContactSubmissionRecord::from(row))
    }

    async fn delete_submission(&self, id: Uuid) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM contact_submissions WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn count_with_status(&self, status: SubmissionStatus) -> Result<i64, RepoError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM contact_submissions WHERE status = $1",
        )
        .bind(status)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(count)
    }
}
