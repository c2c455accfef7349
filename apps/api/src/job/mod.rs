pub mod analyzer;
pub mod equivalents;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod tailoring;
