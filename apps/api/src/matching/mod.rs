//! Résumé-to-job semantic matching: summarize → embed → store → score.

pub mod embedder;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod similarity;
pub mod store;
pub mod summarizer;
