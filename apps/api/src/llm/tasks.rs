//! Generation tasks built on the LLM client: résumé improvement, job-targeted
//! rewrites, and cover letters.

use crate::errors::AppError;
use crate::llm::prompts::{
    COVER_LETTER_SYSTEM, COVER_LETTER_TEMPLATE, IMPROVE_RESUME_SYSTEM, IMPROVE_RESUME_TEMPLATE,
    OPTIMIZE_FOR_JOB_SYSTEM, OPTIMIZE_FOR_JOB_TEMPLATE,
};
use crate::llm::{LlmClient, ModelOverride};

/// Rewrites a résumé's experience section into polished markdown.
pub async fn improve_resume(
    llm: &LlmClient,
    resume_text: &str,
    overrides: &ModelOverride,
) -> Result<String, AppError> {
    let prompt = IMPROVE_RESUME_TEMPLATE.replace("{resume_text}", resume_text);
    llm.chat(IMPROVE_RESUME_SYSTEM, &prompt, overrides)
        .await
        .map_err(|e| AppError::Llm(format!("Resume improvement failed: {e}")))
}

/// Rewrites a résumé to target a specific job description.
pub async fn optimize_resume_for_job(
    llm: &LlmClient,
    resume_text: &str,
    job_description: &str,
    overrides: &ModelOverride,
) -> Result<String, AppError> {
    let prompt = OPTIMIZE_FOR_JOB_TEMPLATE
        .replace("{job_description}", job_description)
        .replace("{resume_text}", resume_text);
    llm.chat(OPTIMIZE_FOR_JOB_SYSTEM, &prompt, overrides)
        .await
        .map_err(|e| AppError::Llm(format!("Job-targeted optimization failed: {e}")))
}

/// Drafts a markdown cover letter from a job description and experience text.
pub async fn generate_cover_letter(
    llm: &LlmClient,
    job_description: &str,
    experience: &str,
    overrides: &ModelOverride,
) -> Result<String, AppError> {
    let prompt = COVER_LETTER_TEMPLATE
        .replace("{job_description}", job_description)
        .replace("{experience}", experience);
    llm.chat(COVER_LETTER_SYSTEM, &prompt, overrides)
        .await
        .map_err(|e| AppError::Llm(format!("Cover letter generation failed: {e}")))
}
