//! Persistence for lead statuses.
use crate::status::{LeadId, LeadStatus};
use sqlx::{sqlite::SqliteQueryResult, SqlitePool};

/// Storage for leads, as seen by the status endpoint.
///
/// The endpoint only ever changes the status of a lead that already exists;
/// creating and deleting leads happens elsewhere.
#[async_trait::async_trait]
pub trait LeadStore: Send + Sync {
    /// Set the status of the lead identified by `id`.
    ///
    /// The change must be applied by a single conditional statement, so that
    /// concurrent updates to the same lead never interleave: the last writer
    /// wins.
    async fn update_status(&self, id: &LeadId, status: LeadStatus) -> Result<(), UpdateStatusError>;
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateStatusError {
    #[error("there is no lead with id `{id}`")]
    UnknownId { id: LeadId },
    #[error("failed to update the status of a lead")]
    Other(#[from] sqlx::Error),
}

#[derive(Debug, Clone)]
/// A lead store backed by SQLite.
///
/// Leads live in a single `leads` table. The table is normally created by
/// whatever captures the leads; [`migrate`](Self::migrate) creates it for
/// local databases and tests.
pub struct SqliteLeadStore(SqlitePool);

impl SqliteLeadStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self(pool)
    }

    /// Return the query that creates the `leads` table.
    ///
    /// It can be run any number of times: an existing table is left alone.
    pub fn migration_query() -> &'static str {
        "CREATE TABLE IF NOT EXISTS leads (
    id INTEGER PRIMARY KEY,
    name TEXT,
    phone TEXT,
    email TEXT,
    message TEXT,
    status TEXT NOT NULL DEFAULT 'new' CHECK (status IN ('new', 'contacted', 'closed')),
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);"
    }

    /// Create the `leads` table, unless it already exists.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        use sqlx::Executor as _;

        self.0.execute(Self::migration_query()).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl LeadStore for SqliteLeadStore {
    #[tracing::instrument(
        name = "Update lead status",
        level = tracing::Level::INFO,
        skip_all,
        fields(lead.id = %id, lead.status = %status)
    )]
    async fn update_status(&self, id: &LeadId, status: LeadStatus) -> Result<(), UpdateStatusError> {
        let result = sqlx::query("UPDATE leads SET status = ?1 WHERE id = ?2")
            .bind(status.as_str())
            .bind(id.as_str())
            .execute(&self.0)
            .await?;
        as_unknown_id_error(&result, id)
    }
}

fn as_unknown_id_error(r: &SqliteQueryResult, id: &LeadId) -> Result<(), UpdateStatusError> {
    if r.rows_affected() == 0 {
        return Err(UpdateStatusError::UnknownId { id: id.to_owned() });
    }
    Ok(())
}
