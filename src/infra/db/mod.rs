//! Postgres-backed repository implementations.

mod audit;
mod contacts;
mod content;
mod portfolio;

use std::sync::Arc;

use sqlx::{
    error::ErrorKind,
    postgres::{PgPool, PgPoolOptions},
    query,
};

use crate::application::repos::RepoError;

/// Collapse driver failures onto the repository error surface.
///
/// The section upsert resolves its only contended insert with `ON
/// CONFLICT` and no table carries a foreign key, so a constraint
/// violation here means the database no longer matches the migrations.
fn map_sqlx_error(err: sqlx::Error) -> RepoError {
    match err {
        sqlx::Error::RowNotFound => RepoError::NotFound,
        sqlx::Error::Database(db) => match db.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => RepoError::Integrity {
                message: db.message().to_string(),
            },
            _ => RepoError::Persistence(db.message().to_string()),
        },
        other => RepoError::from_persistence(other),
    }
}

#[derive(Clone)]
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
    }

    pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        query("SELECT 1").execute(self.pool()).await.map(|_| ())
    }
}
