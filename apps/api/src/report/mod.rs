// Resume feedback engine
// Implements: shape normalization, suggestion classification, ranking, scoring, strengths.
// Everything here except `handlers` is pure and synchronous; no I/O, no shared state.

pub mod classifier;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod ranker;
pub mod scorer;
pub mod strengths;

// Re-export the public API consumed by handlers in other modules.
pub use models::Report;
pub use normalizer::normalize;
