use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::application::{ApplicationKey, Document, Identifier};

pub const UNIQUE_PAIR_INDEX: &str = "applications_candidate_job_key";

/// Document collection for applications.
///
/// At most one document may exist per (candidate, job) pair. `create` checks
/// for an existing pair first, but only the persistent unique constraint set up
/// by `ensure_uniqueness_constraint` closes the race between concurrent
/// creates.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn create(&self, document: &Document) -> Result<()>;

    async fn get_by_job_id(&self, job_id: &Identifier) -> Result<Vec<Document>>;

    /// `Ok(None)` means nothing matched; store failures are `Err`.
    async fn get_by_id(&self, application_id: &str) -> Result<Option<Document>>;

    async fn get_by_candidate_id(&self, candidate_id: &Identifier) -> Result<Vec<Document>>;

    async fn ensure_uniqueness_constraint(&self) -> Result<()>;
}

#[derive(Clone)]
pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists_for_pair(&self, key: &ApplicationKey) -> Result<bool> {
        let existing = sqlx::query_scalar::<_, String>(
            "SELECT application_id FROM applications WHERE candidate_key = $1 AND job_key = $2 LIMIT 1",
        )
        .bind(key.candidate_id.as_str())
        .bind(key.job_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(existing.is_some())
    }
}

fn storage_error(err: sqlx::Error) -> Error {
    Error::StorageUnavailable(err.to_string())
}

fn insert_error(err: sqlx::Error) -> Error {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some(UNIQUE_PAIR_INDEX) => Error::Duplicate,
                _ => Error::Conflict("applicationId already exists".to_string()),
            };
        }
    }
    storage_error(err)
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn create(&self, document: &Document) -> Result<()> {
        let key = ApplicationKey::from_storage(document)?;

        if self.exists_for_pair(&key).await? {
            return Err(Error::Duplicate);
        }

        sqlx::query(
            r#"
            INSERT INTO applications (application_id, candidate_key, job_key, document)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&key.application_id)
        .bind(key.candidate_id.as_str())
        .bind(key.job_id.as_str())
        .bind(Json(document))
        .execute(&self.pool)
        .await
        .map_err(insert_error)?;

        debug!(application_id = %key.application_id, "Application inserted");
        Ok(())
    }

    async fn get_by_job_id(&self, job_id: &Identifier) -> Result<Vec<Document>> {
        let rows = sqlx::query_scalar::<_, Json<Document>>(
            "SELECT document FROM applications WHERE job_key = $1 ORDER BY created_at, application_id",
        )
        .bind(job_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn get_by_id(&self, application_id: &str) -> Result<Option<Document>> {
        let row = sqlx::query_scalar::<_, Json<Document>>(
            "SELECT document FROM applications WHERE application_id = $1",
        )
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(row.map(|Json(doc)| doc))
    }

    async fn get_by_candidate_id(&self, candidate_id: &Identifier) -> Result<Vec<Document>> {
        let rows = sqlx::query_scalar::<_, Json<Document>>(
            "SELECT document FROM applications WHERE candidate_key = $1 ORDER BY created_at, application_id",
        )
        .bind(candidate_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn ensure_uniqueness_constraint(&self) -> Result<()> {
        let statement = format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {} ON applications (candidate_key, job_key)",
            UNIQUE_PAIR_INDEX
        );
        sqlx::query(&statement)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        info!(index = UNIQUE_PAIR_INDEX, "Application uniqueness constraint ensured");
        Ok(())
    }
}

/// Process-local collection for development and tests. The pair check and the
/// insert happen under one lock, which plays the role of the unique index.
#[derive(Clone, Default)]
pub struct InMemoryApplicationStore {
    documents: Arc<Mutex<Vec<(ApplicationKey, Document)>>>,
}

impl InMemoryApplicationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize> {
        let docs = self
            .documents
            .lock()
            .map_err(|_| Error::StorageUnavailable("application store lock poisoned".to_string()))?;
        Ok(docs.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn select<F>(&self, predicate: F) -> Result<Vec<Document>>
    where
        F: Fn(&ApplicationKey) -> bool,
    {
        let docs = self
            .documents
            .lock()
            .map_err(|_| Error::StorageUnavailable("application store lock poisoned".to_string()))?;
        Ok(docs
            .iter()
            .filter(|(key, _)| predicate(key))
            .map(|(_, doc)| doc.clone())
            .collect())
    }
}

#[async_trait]
impl ApplicationStore for InMemoryApplicationStore {
    async fn create(&self, document: &Document) -> Result<()> {
        let key = ApplicationKey::from_storage(document)?;
        let mut docs = self
            .documents
            .lock()
            .map_err(|_| Error::StorageUnavailable("application store lock poisoned".to_string()))?;

        if docs
            .iter()
            .any(|(k, _)| k.candidate_id == key.candidate_id && k.job_id == key.job_id)
        {
            return Err(Error::Duplicate);
        }
        if docs.iter().any(|(k, _)| k.application_id == key.application_id) {
            return Err(Error::Conflict("applicationId already exists".to_string()));
        }

        docs.push((key, document.clone()));
        Ok(())
    }

    async fn get_by_job_id(&self, job_id: &Identifier) -> Result<Vec<Document>> {
        self.select(|key| &key.job_id == job_id)
    }

    async fn get_by_id(&self, application_id: &str) -> Result<Option<Document>> {
        Ok(self
            .select(|key| key.application_id == application_id)?
            .into_iter()
            .next())
    }

    async fn get_by_candidate_id(&self, candidate_id: &Identifier) -> Result<Vec<Document>> {
        self.select(|key| &key.candidate_id == candidate_id)
    }

    async fn ensure_uniqueness_constraint(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn second_create_for_same_pair_is_rejected() {
        let store = InMemoryApplicationStore::new();
        store
            .create(&doc(json!({ "application_id": "a1", "candidate_id": 456, "job_id": 123 })))
            .await
            .unwrap();

        let err = store
            .create(&doc(json!({ "application_id": "a2", "candidate_id": "456", "job_id": 123 })))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Duplicate));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn reused_application_id_is_a_conflict() {
        let store = InMemoryApplicationStore::new();
        store
            .create(&doc(json!({ "application_id": "a1", "candidate_id": 1, "job_id": 1 })))
            .await
            .unwrap();
        let err = store
            .create(&doc(json!({ "application_id": "a1", "candidate_id": 2, "job_id": 1 })))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn poisoned_lock_reports_storage_unavailable() {
        let store = InMemoryApplicationStore::new();
        let documents = store.documents.clone();
        let _ = std::thread::spawn(move || {
            let _guard = documents.lock().unwrap();
            panic!("poison the store");
        })
        .join();

        assert!(matches!(store.len(), Err(Error::StorageUnavailable(_))));
        assert!(matches!(store.is_empty(), Err(Error::StorageUnavailable(_))));
    }

    #[tokio::test]
    async fn lookups_filter_by_key() {
        let store = InMemoryApplicationStore::new();
        for (id, candidate, job) in [("a1", 1, 10), ("a2", 2, 10), ("a3", 1, 20)] {
            store
                .create(&doc(json!({ "application_id": id, "candidate_id": candidate, "job_id": job })))
                .await
                .unwrap();
        }

        let by_job = store.get_by_job_id(&Identifier::from(10)).await.unwrap();
        assert_eq!(by_job.len(), 2);
        assert_eq!(by_job[0]["application_id"], json!("a1"));
        assert_eq!(by_job[1]["application_id"], json!("a2"));

        let by_candidate = store.get_by_candidate_id(&Identifier::from(1)).await.unwrap();
        assert_eq!(by_candidate.len(), 2);

        assert!(store.get_by_id("a3").await.unwrap().is_some());
        assert!(store.get_by_id("missing").await.unwrap().is_none());
    }
}
