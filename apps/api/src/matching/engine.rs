//! Matching orchestrator — composes summarizer, embedder, store, and job
//! lookup into the two subsystem operations.
//!
//! All collaborators are injected traits constructed at startup; nothing in
//! here reaches for a global. Tests run the engine entirely on in-memory
//! fakes.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::matching::embedder::Embedder;
use crate::matching::error::MatchError;
use crate::matching::similarity;
use crate::matching::store::EmbeddingStore;
use crate::matching::summarizer::Summarizer;

/// Read-only lookup of job descriptions from the relational store.
/// The engine reads descriptions; it does not own job persistence.
#[async_trait]
pub trait JobDirectory: Send + Sync {
    async fn description(&self, job_id: i64) -> Result<Option<String>, MatchError>;
}

/// sqlx-backed job lookup.
pub struct PgJobDirectory {
    pool: PgPool,
}

impl PgJobDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobDirectory for PgJobDirectory {
    async fn description(&self, job_id: i64) -> Result<Option<String>, MatchError> {
        sqlx::query_scalar("SELECT description FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| MatchError::Storage(e.to_string()))
    }
}

/// The matching orchestrator.
pub struct MatchEngine {
    summarizer: Arc<dyn Summarizer>,
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn EmbeddingStore>,
    jobs: Arc<dyn JobDirectory>,
}

impl MatchEngine {
    pub fn new(
        summarizer: Arc<dyn Summarizer>,
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn EmbeddingStore>,
        jobs: Arc<dyn JobDirectory>,
    ) -> Self {
        Self {
            summarizer,
            embedder,
            store,
            jobs,
        }
    }

    /// Summarizes and embeds a job description, then stores the vector if no
    /// embedding exists for `job_id` yet.
    ///
    /// Best-effort side channel: every failure is logged and swallowed so the
    /// caller's job-creation flow never fails because of it. A job whose
    /// embedding was never stored surfaces later as `EmbeddingNotFound` on
    /// match. The embedding store and the relational store share no
    /// transaction; eventual consistency between them is accepted.
    pub async fn store_job(&self, job_text: &str, job_id: i64) {
        if let Err(e) = self.try_store_job(job_text, job_id).await {
            warn!("Embedding storage for job {job_id} failed: {e}");
        }
    }

    async fn try_store_job(&self, job_text: &str, job_id: i64) -> Result<(), MatchError> {
        let synopsis = self.summarizer.summarize(job_text).await?;
        let vector = self.embedder.embed(&synopsis).await?;

        if self.store.exists(job_id).await? {
            info!("Job {job_id} already has a stored embedding, skipping");
            return Ok(());
        }

        // put is atomic; false means a concurrent call won the insert.
        if !self.store.put(job_id, &vector, job_text).await? {
            info!("Job {job_id} embedding stored concurrently, skipping");
        }
        Ok(())
    }

    /// Scores résumé text against a job's stored embedding, returning a match
    /// percentage in [0, 100].
    ///
    /// Domain failures come back as typed `MatchError` values, never panics,
    /// so the HTTP layer can map them to responses.
    pub async fn match_resume_to_job(
        &self,
        resume_text: &str,
        job_id: i64,
    ) -> Result<f64, MatchError> {
        if self.jobs.description(job_id).await?.is_none() {
            return Err(MatchError::JobNotFound(job_id));
        }

        let synopsis = self.summarizer.summarize(resume_text).await?;
        let resume_embedding = self.embedder.embed(&synopsis).await?;

        let job_embedding = self
            .store
            .get(job_id)
            .await?
            .ok_or(MatchError::EmbeddingNotFound(job_id))?;

        let percentage = similarity::score(&resume_embedding, &job_embedding)?;
        info!("Resume match for job {job_id}: {percentage}%");
        Ok(percentage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Deterministic fake: synopsis is the lowercased input.
    struct FakeSummarizer {
        fail: bool,
    }

    #[async_trait]
    impl Summarizer for FakeSummarizer {
        async fn summarize(&self, text: &str) -> Result<String, MatchError> {
            if self.fail {
                return Err(MatchError::Summarization("model offline".to_string()));
            }
            if text.trim().is_empty() {
                return Err(MatchError::Summarization("input text is empty".to_string()));
            }
            Ok(text.to_lowercase())
        }
    }

    /// Deterministic fake: 4-dim vector derived from simple text statistics,
    /// so related texts land near each other.
    struct FakeEmbedder;

    #[async_trait]
    impl Embedder for FakeEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, MatchError> {
            if text.trim().is_empty() {
                return Err(MatchError::Embedding("input text is empty".to_string()));
            }
            let len = text.len() as f32;
            let vowels = text.chars().filter(|c| "aeiou".contains(*c)).count() as f32;
            let spaces = text.chars().filter(|c| c.is_whitespace()).count() as f32;
            Ok(vec![1.0, vowels / len, spaces / len, len.ln()])
        }
    }

    #[derive(Default)]
    struct InMemoryStore {
        entries: Mutex<HashMap<i64, Vec<f32>>>,
    }

    #[async_trait]
    impl EmbeddingStore for InMemoryStore {
        async fn exists(&self, job_id: i64) -> Result<bool, MatchError> {
            Ok(self.entries.lock().unwrap().contains_key(&job_id))
        }

        async fn put(
            &self,
            job_id: i64,
            vector: &[f32],
            _raw_text: &str,
        ) -> Result<bool, MatchError> {
            let mut entries = self.entries.lock().unwrap();
            if entries.contains_key(&job_id) {
                return Ok(false);
            }
            entries.insert(job_id, vector.to_vec());
            Ok(true)
        }

        async fn get(&self, job_id: i64) -> Result<Option<Vec<f32>>, MatchError> {
            Ok(self.entries.lock().unwrap().get(&job_id).cloned())
        }
    }

    struct FakeJobDirectory {
        jobs: HashMap<i64, String>,
    }

    #[async_trait]
    impl JobDirectory for FakeJobDirectory {
        async fn description(&self, job_id: i64) -> Result<Option<String>, MatchError> {
            Ok(self.jobs.get(&job_id).cloned())
        }
    }

    fn engine_with(
        store: Arc<InMemoryStore>,
        jobs: Vec<(i64, &str)>,
        summarizer_fails: bool,
    ) -> MatchEngine {
        MatchEngine::new(
            Arc::new(FakeSummarizer {
                fail: summarizer_fails,
            }),
            Arc::new(FakeEmbedder),
            store,
            Arc::new(FakeJobDirectory {
                jobs: jobs
                    .into_iter()
                    .map(|(id, d)| (id, d.to_string()))
                    .collect(),
            }),
        )
    }

    #[tokio::test]
    async fn test_store_job_persists_one_embedding() {
        let store = Arc::new(InMemoryStore::default());
        let engine = engine_with(store.clone(), vec![], false);

        engine.store_job("Looking for a Python backend engineer", 42).await;

        assert!(store.exists(42).await.unwrap());
    }

    #[tokio::test]
    async fn test_store_job_is_idempotent() {
        let store = Arc::new(InMemoryStore::default());
        let engine = engine_with(store.clone(), vec![], false);

        engine.store_job("Senior Rust engineer", 7).await;
        let first = store.get(7).await.unwrap().unwrap();
        engine.store_job("Senior Rust engineer, now with perks", 7).await;

        // Second call must not replace the stored vector.
        assert_eq!(store.get(7).await.unwrap().unwrap(), first);
        assert_eq!(store.entries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_store_job_failure_is_swallowed() {
        let store = Arc::new(InMemoryStore::default());
        let engine = engine_with(store.clone(), vec![], true);

        // Summarizer is down; the call must neither panic nor store anything.
        engine.store_job("text", 1).await;
        assert!(!store.exists(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_match_unknown_job_is_job_not_found() {
        let engine = engine_with(Arc::new(InMemoryStore::default()), vec![], false);

        let err = engine
            .match_resume_to_job("5 years Python experience", 9999)
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::JobNotFound(9999)));
    }

    #[tokio::test]
    async fn test_match_without_stored_embedding_is_embedding_not_found() {
        let engine = engine_with(
            Arc::new(InMemoryStore::default()),
            vec![(3, "Data engineer")],
            false,
        );

        let err = engine
            .match_resume_to_job("ETL pipelines in Spark", 3)
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::EmbeddingNotFound(3)));
    }

    #[tokio::test]
    async fn test_store_then_match_yields_percentage_in_range() {
        let store = Arc::new(InMemoryStore::default());
        let engine = engine_with(
            store.clone(),
            vec![(42, "Looking for a Python backend engineer")],
            false,
        );

        engine
            .store_job("Looking for a Python backend engineer", 42)
            .await;
        let pct = engine
            .match_resume_to_job("5 years Python backend experience", 42)
            .await
            .unwrap();

        assert!((0.0..=100.0).contains(&pct), "got {pct}");
    }

    #[tokio::test]
    async fn test_identical_texts_match_100() {
        let store = Arc::new(InMemoryStore::default());
        let engine = engine_with(store.clone(), vec![(5, "Kernel developer")], false);

        engine.store_job("Kernel developer", 5).await;
        let pct = engine.match_resume_to_job("Kernel developer", 5).await.unwrap();

        assert_eq!(pct, 100.0);
    }

    #[tokio::test]
    async fn test_empty_resume_text_is_summarization_error() {
        let store = Arc::new(InMemoryStore::default());
        let engine = engine_with(store.clone(), vec![(5, "Kernel developer")], false);
        engine.store_job("Kernel developer", 5).await;

        let err = engine.match_resume_to_job("  ", 5).await.unwrap_err();
        assert!(matches!(err, MatchError::Summarization(_)));
    }
}
