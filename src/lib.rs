//! # Peerbench
//!
//! Simulated multi-model benchmark engine: pick 4-5 models from a static
//! catalog, submit a prompt, and get back fabricated per-model responses,
//! a complete peer cross-evaluation matrix, an aggregated leaderboard,
//! and a meta-evaluator's final ranking of the top three candidates.
//!
//! Everything is fabricated locally and deterministically; there are no
//! network calls to model providers. Identical inputs always reproduce
//! identical outcomes.
//!
//! ## Architecture
//!
//! ```text
//! Selection + Prompt
//!        ↓
//! Response Synthesizer (one fabricated response per model)
//!        ↓
//! Cross-Evaluation Matrix (every model judges every other)
//!        ↓
//! Aggregator (per-model means, leaderboard order, top three)
//!        ↓
//! Meta-Evaluator Ranker (final adjudicated placements 1-3)
//!        ↓
//! SimulationOutcome
//! ```

pub mod adjudicate;
pub mod aggregate;
pub mod catalog;
pub mod crosseval;
pub mod engine;
pub mod prompt;
pub mod report;
pub mod scoring;
pub mod synth;

pub use adjudicate::{adjudicate, FinalRankingEntry};
pub use aggregate::{aggregate_scores, rank, top_three, AggregatedScore};
pub use catalog::{
    meta_evaluator, model_by_id, selectable_models, Model, META_EVALUATOR_ID,
};
pub use crosseval::{build_matrix, weighted_overall, CrossEvaluation, MetricScores};
pub use engine::{
    simulate_evaluation, simulate_evaluation_with, SelectionError, SimulationError,
    SimulationOutcome, MAX_SELECTION, MIN_SELECTION,
};
pub use prompt::{Modality, PromptError, PromptPayload};
pub use report::{ReportMetadata, SimulationReport};
pub use scoring::{derive_seed, ScoringConfig, ScoringError};
pub use synth::{synthesize_responses, ModelResponse};
