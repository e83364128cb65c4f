pub mod handlers;
pub mod pdf;
