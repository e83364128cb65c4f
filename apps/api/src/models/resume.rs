use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    /// Raw text pulled out of an uploaded PDF.
    pub parsed_text: Option<String>,
    /// LLM-rewritten experience section, when the user has run improve.
    pub improved_experience: Option<String>,
    pub ai_cover_letter: Option<String>,
    /// Set on job-targeted résumés produced by the optimize endpoint.
    pub user_id: Option<i64>,
    pub job_id: Option<i64>,
    pub parent_resume_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl ResumeRow {
    /// Text used for matching and generation: the improved experience when
    /// present, otherwise the original section.
    pub fn effective_experience(&self) -> Option<&str> {
        self.improved_experience
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.experience.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn resume(experience: Option<&str>, improved: Option<&str>) -> ResumeRow {
        ResumeRow {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            linkedin_url: None,
            skills: None,
            experience: experience.map(String::from),
            education: None,
            parsed_text: None,
            improved_experience: improved.map(String::from),
            ai_cover_letter: None,
            user_id: None,
            job_id: None,
            parent_resume_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_prefers_improved_experience() {
        let r = resume(Some("raw"), Some("polished"));
        assert_eq!(r.effective_experience(), Some("polished"));
    }

    #[test]
    fn test_falls_back_to_original() {
        let r = resume(Some("raw"), None);
        assert_eq!(r.effective_experience(), Some("raw"));

        let r = resume(Some("raw"), Some("   "));
        assert_eq!(r.effective_experience(), Some("raw"));
    }

    #[test]
    fn test_none_when_no_experience() {
        assert_eq!(resume(None, None).effective_experience(), None);
    }
}
