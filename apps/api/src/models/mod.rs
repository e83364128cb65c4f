pub mod cover_letter;
pub mod job;
pub mod job_match;
pub mod resume;
pub mod user;
