//! Generic JSON document collection on top of one SQLite table.
//!
//! Each table has the same shape: a storage-generated `id`, the entity's
//! `natural_key` (unique), the serialized document and its write time.
//! Entity-specific reads live next to the entity's [`Document`] impl as
//! inherent methods on `Collection<Entity>`.

use std::marker::PhantomData;
use std::ops::Deref;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::query::QueryAs;
use sqlx::sqlite::SqliteArguments;
use sqlx::{FromRow, Sqlite, SqlitePool};
use tracing::{debug, warn};

use crate::db::StoreError;

/// An entity that can be persisted in a [`Collection`].
pub trait Document: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    /// Table name.
    const COLLECTION: &'static str;

    fn natural_key(&self) -> String;

    /// Stamp the document's `last_updated` field.
    fn touch(&mut self, at: DateTime<Utc>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertOutcome {
    Created,
    Updated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkOutcome {
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
}

impl BulkOutcome {
    pub fn written(&self) -> usize {
        self.created + self.updated
    }
}

/// A document together with its storage id. Serializes as the document's
/// fields plus `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    pub id: i64,
    #[serde(flatten)]
    pub doc: T,
}

impl<T> Deref for Stored<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.doc
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct RawDocument {
    id: i64,
    doc: String,
}

impl RawDocument {
    fn decode<T: Document>(self) -> Result<Stored<T>, StoreError> {
        let doc = serde_json::from_str(&self.doc).map_err(|source| StoreError::Codec {
            collection: T::COLLECTION,
            source,
        })?;
        Ok(Stored { id: self.id, doc })
    }
}

pub(crate) type DocumentQuery<'q> = QueryAs<'q, Sqlite, RawDocument, SqliteArguments<'q>>;

pub struct Collection<T> {
    pool: SqlitePool,
    _doc: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _doc: PhantomData,
        }
    }
}

impl<T: Document> Collection<T> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _doc: PhantomData,
        }
    }

    /// Insert or replace the document stored under its natural key,
    /// stamping `last_updated` with the current time.
    pub async fn upsert(&self, doc: T) -> Result<UpsertOutcome, StoreError> {
        self.upsert_at(doc, Utc::now()).await
    }

    pub async fn upsert_at(&self, mut doc: T, at: DateTime<Utc>) -> Result<UpsertOutcome, StoreError> {
        let key = doc.natural_key();
        validate_key(&key)?;

        doc.touch(at);
        let json = serde_json::to_string(&doc).map_err(|source| StoreError::Codec {
            collection: T::COLLECTION,
            source,
        })?;

        // Insert-or-update commits as one unit.
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(&format!(
            "INSERT INTO {} (natural_key, doc, last_updated) VALUES (?1, ?2, ?3)
             ON CONFLICT(natural_key) DO NOTHING",
            T::COLLECTION
        ))
        .bind(&key)
        .bind(&json)
        .bind(at)
        .execute(&mut *tx)
        .await?;

        let outcome = if inserted.rows_affected() == 1 {
            UpsertOutcome::Created
        } else {
            let updated = sqlx::query(&format!(
                "UPDATE {} SET doc = ?2, last_updated = ?3 WHERE natural_key = ?1",
                T::COLLECTION
            ))
            .bind(&key)
            .bind(&json)
            .bind(at)
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() != 1 {
                return Err(StoreError::Database(sqlx::Error::RowNotFound));
            }
            UpsertOutcome::Updated
        };

        tx.commit().await?;
        Ok(outcome)
    }

    /// Best-effort bulk write: a failing document is logged and skipped.
    pub async fn upsert_many(&self, docs: Vec<T>) -> BulkOutcome {
        let at = Utc::now();
        let mut outcome = BulkOutcome::default();

        for doc in docs {
            let key = doc.natural_key();
            match self.upsert_at(doc, at).await {
                Ok(UpsertOutcome::Created) => outcome.created += 1,
                Ok(UpsertOutcome::Updated) => outcome.updated += 1,
                Err(e) => {
                    outcome.failed += 1;
                    warn!(collection = T::COLLECTION, key = %key, error = %e, "Failed to upsert document");
                }
            }
        }

        debug!(
            collection = T::COLLECTION,
            created = outcome.created,
            updated = outcome.updated,
            failed = outcome.failed,
            "Bulk upsert finished"
        );
        outcome
    }

    /// Lookup by storage id.
    pub async fn get(&self, id: i64) -> Result<Option<Stored<T>>, StoreError> {
        let sql = self.select("WHERE id = ?1");
        self.fetch_optional(sqlx::query_as(&sql).bind(id)).await
    }

    pub async fn get_by_key(&self, key: &str) -> Result<Option<Stored<T>>, StoreError> {
        validate_key(key)?;
        let sql = self.select("WHERE natural_key = ?1");
        self.fetch_optional(sqlx::query_as(&sql).bind(key)).await
    }

    pub async fn all(&self) -> Result<Vec<Stored<T>>, StoreError> {
        let sql = self.select("ORDER BY id");
        self.fetch_all(sqlx::query_as(&sql)).await
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", T::COLLECTION))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Returns whether a document was removed.
    pub async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        validate_key(key)?;
        let result = sqlx::query(&format!("DELETE FROM {} WHERE natural_key = ?1", T::COLLECTION))
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `SELECT id, doc FROM <table> <clause>`
    pub(crate) fn select(&self, clause: &str) -> String {
        format!("SELECT id, doc FROM {} {clause}", T::COLLECTION)
    }

    pub(crate) async fn fetch_all(&self, query: DocumentQuery<'_>) -> Result<Vec<Stored<T>>, StoreError> {
        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(RawDocument::decode).collect()
    }

    pub(crate) async fn fetch_optional(
        &self,
        query: DocumentQuery<'_>,
    ) -> Result<Option<Stored<T>>, StoreError> {
        query
            .fetch_optional(&self.pool)
            .await?
            .map(RawDocument::decode)
            .transpose()
    }
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.trim().is_empty() {
        return Err(StoreError::InvalidKey("natural key must not be empty".to_string()));
    }
    Ok(())
}
