//! Persistent embedding store — one vector per job, keyed by job id.
//!
//! The Postgres implementation makes insert-if-absent atomic with a
//! conflict-target insert on the `job_embeddings` primary key, so concurrent
//! `store_job` calls for the same job cannot produce duplicates. A SHA-256
//! digest of the raw text is stored alongside the vector for idempotence
//! diagnostics.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::info;

use crate::matching::error::MatchError;

/// Keyed persistence for job embeddings.
///
/// `put` is a documented silent no-op when an embedding already exists for
/// the job: it returns `Ok(false)` instead of failing, and the stored vector
/// is never mutated. Storage I/O failures surface as `MatchError::Storage`.
#[async_trait]
pub trait EmbeddingStore: Send + Sync {
    async fn exists(&self, job_id: i64) -> Result<bool, MatchError>;

    /// Inserts the embedding if absent. Returns `true` when this call stored
    /// the vector, `false` when one was already present (no-op).
    async fn put(&self, job_id: i64, vector: &[f32], raw_text: &str) -> Result<bool, MatchError>;

    async fn get(&self, job_id: i64) -> Result<Option<Vec<f32>>, MatchError>;
}

/// Postgres-backed embedding store.
pub struct PgEmbeddingStore {
    pool: PgPool,
}

impl PgEmbeddingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmbeddingStore for PgEmbeddingStore {
    async fn exists(&self, job_id: i64) -> Result<bool, MatchError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM job_embeddings WHERE job_id = $1)")
            .bind(job_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| MatchError::Storage(e.to_string()))
    }

    async fn put(&self, job_id: i64, vector: &[f32], raw_text: &str) -> Result<bool, MatchError> {
        // ON CONFLICT DO NOTHING makes check-and-insert atomic; losing a race
        // to a concurrent insert is indistinguishable from a prior insert.
        let result = sqlx::query(
            r#"
            INSERT INTO job_embeddings (job_id, embedding, source_digest)
            VALUES ($1, $2, $3)
            ON CONFLICT (job_id) DO NOTHING
            "#,
        )
        .bind(job_id)
        .bind(vector)
        .bind(text_digest(raw_text))
        .execute(&self.pool)
        .await
        .map_err(|e| MatchError::Storage(e.to_string()))?;

        let inserted = result.rows_affected() == 1;
        if inserted {
            info!("Stored {}-dim embedding for job {job_id}", vector.len());
        }
        Ok(inserted)
    }

    async fn get(&self, job_id: i64) -> Result<Option<Vec<f32>>, MatchError> {
        sqlx::query_scalar("SELECT embedding FROM job_embeddings WHERE job_id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| MatchError::Storage(e.to_string()))
    }
}

/// Hex SHA-256 of the source text the embedding was generated from.
pub fn text_digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_stable() {
        assert_eq!(text_digest("abc"), text_digest("abc"));
        assert_ne!(text_digest("abc"), text_digest("abd"));
    }

    #[test]
    fn test_digest_is_hex_sha256() {
        let d = text_digest("");
        assert_eq!(d.len(), 64);
        assert_eq!(
            d,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
