pub mod ats_score;
pub mod classifier;
pub mod extract;
pub mod handlers;
pub mod impact;
pub mod parser;
pub mod pipeline;
pub mod prompts;
