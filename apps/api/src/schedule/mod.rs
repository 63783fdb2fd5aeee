// Study schedule generation pipeline.
// syllabus text → prompt_builder → client (provider call + decode + checks) → enrich.
// All provider calls go through llm_client; this module never builds HTTP requests itself.

pub mod client;
pub mod enrich;
pub mod handlers;
pub mod models;
pub mod prompt_builder;
pub mod prompts;
pub mod validation;
