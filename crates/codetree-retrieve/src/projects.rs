//! Project metadata lookup against the relational store.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;

use codetree_core::config::PostgresSettings;
use codetree_core::{ProjectId, ProjectMeta};

use crate::error::Result;

/// Resolves a project id to its repository metadata.
#[async_trait]
pub trait ProjectLookup: Send + Sync {
    async fn find(&self, project_id: &ProjectId) -> Result<Option<ProjectMeta>>;
}

#[async_trait]
impl<T: ProjectLookup + ?Sized> ProjectLookup for Arc<T> {
    async fn find(&self, project_id: &ProjectId) -> Result<Option<ProjectMeta>> {
        (**self).find(project_id).await
    }
}

#[derive(Debug, Clone, FromRow)]
struct ProjectRow {
    id: String,
    repo_name: Option<String>,
    branch_name: Option<String>,
}

impl From<ProjectRow> for ProjectMeta {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: ProjectId(row.id),
            repo_name: row.repo_name.unwrap_or_default(),
            branch_name: row.branch_name.unwrap_or_default(),
        }
    }
}

/// `ProjectLookup` over the `projects` table in Postgres.
#[derive(Clone)]
pub struct PgProjectStore {
    pool: PgPool,
}

impl PgProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `settings.url`.
    pub async fn connect(settings: &PostgresSettings) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(&settings.url)
            .await?;
        tracing::info!("Connected to Postgres");
        Ok(Self { pool })
    }
}

#[async_trait]
impl ProjectLookup for PgProjectStore {
    async fn find(&self, project_id: &ProjectId) -> Result<Option<ProjectMeta>> {
        // Returned to the pool when `conn` drops, including on error.
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, ProjectRow>(
            "SELECT id, repo_name, branch_name FROM projects WHERE id = $1",
        )
        .bind(project_id.as_str())
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row.map(ProjectMeta::from))
    }
}
