// Gap analysis & scoring engine.
// Pure, synchronous computations over one JD and one resume per call. No I/O here.

pub mod ats;
pub mod config;
pub mod document;
pub mod engine;
pub mod gaps;
pub mod handlers;
pub mod scan;
pub mod similarity;
pub mod stop_words;
pub mod vectorizer;

use thiserror::Error;

/// Errors the engine surfaces to its caller. Degenerate input is not an
/// error: it scores zero.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid scoring configuration: {0}")]
    InvalidConfig(String),
}
