//! Simulation pipeline entry point.
//!
//! One synchronous computation per invocation: validate the selection and
//! prompt, synthesize responses, build the cross-evaluation matrix,
//! aggregate it, and hand the top three to the meta evaluator. The engine
//! is stateless and idempotent; concurrent invocations share nothing but
//! the read-only catalog.

use crate::adjudicate::{adjudicate, FinalRankingEntry};
use crate::aggregate::{aggregate_scores, top_three, AggregatedScore};
use crate::catalog::{self, Model, META_EVALUATOR_ID};
use crate::crosseval::{build_matrix, CrossEvaluation};
use crate::prompt::{PromptError, PromptPayload};
use crate::scoring::ScoringConfig;
use crate::synth::{synthesize_responses, ModelResponse};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Minimum number of selected models
pub const MIN_SELECTION: usize = 4;
/// Maximum number of selected models
pub const MAX_SELECTION: usize = 5;

/// Reasons a selection is rejected
#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("expected between {MIN_SELECTION} and {MAX_SELECTION} models, got {0}")]
    Size(usize),

    #[error("duplicate model id in selection: {0}")]
    Duplicate(String),

    #[error("unknown model id: {0}")]
    Unknown(String),

    #[error("model is not a selectable candidate: {0}")]
    NotSelectable(String),
}

/// Errors surfaced by [`simulate_evaluation`]
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("invalid selection: {0}")]
    InvalidSelection(#[from] SelectionError),

    #[error("invalid prompt: {0}")]
    InvalidPrompt(#[from] PromptError),
}

/// Complete result of one simulated benchmark run.
///
/// Immutable once produced; consumed wholesale by the rendering layer.
/// `aggregates` is the one authoritative per-model list, in selection
/// order; `top_three` and `final_ranking` are in ranked order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationOutcome {
    /// One fabricated response per selected model, in selection order
    pub responses: Vec<ModelResponse>,
    /// Complete judge x target matrix, `N * (N - 1)` entries
    pub cross_evaluations: Vec<CrossEvaluation>,
    /// One aggregate per selected model, in selection order
    pub aggregates: Vec<AggregatedScore>,
    /// The `min(3, N)` leaderboard leaders, ranked
    pub top_three: Vec<AggregatedScore>,
    /// Meta-evaluator adjudication of the top three
    pub final_ranking: Vec<FinalRankingEntry>,
}

/// Run one simulated evaluation with the default scoring configuration.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidSelection`] if the selection size is
/// outside [4, 5], contains duplicates, an unknown id, or the meta
/// evaluator; [`SimulationError::InvalidPrompt`] if the prompt text is
/// empty after trimming. Validation happens before any synthesis: a
/// rejected call never yields a partial outcome.
pub fn simulate_evaluation(
    selected: &[&str],
    prompt: &PromptPayload,
) -> Result<SimulationOutcome, SimulationError> {
    simulate_evaluation_with(selected, prompt, &ScoringConfig::default())
}

/// Run one simulated evaluation with an explicit scoring configuration.
///
/// # Errors
///
/// Same contract as [`simulate_evaluation`].
pub fn simulate_evaluation_with(
    selected: &[&str],
    prompt: &PromptPayload,
    config: &ScoringConfig,
) -> Result<SimulationOutcome, SimulationError> {
    let models = validate_selection(selected)?;
    prompt.validate()?;
    tracing::debug!(models = selected.len(), "selection validated");

    let responses = synthesize_responses(&models, prompt, config);
    tracing::debug!(responses = responses.len(), "responses synthesized");

    let cross_evaluations = build_matrix(&responses, config);
    tracing::debug!(entries = cross_evaluations.len(), "cross-evaluation matrix built");

    let selected_ids: Vec<String> = responses.iter().map(|r| r.model_id.clone()).collect();
    let aggregates = aggregate_scores(&selected_ids, &cross_evaluations);
    let top = top_three(&aggregates);

    let final_ranking = adjudicate(&top, &responses, prompt, config);
    tracing::debug!(
        winner = ?final_ranking.first().map(|e| e.model_id.as_str()),
        "adjudication complete"
    );

    Ok(SimulationOutcome {
        responses,
        cross_evaluations,
        aggregates,
        top_three: top,
        final_ranking,
    })
}

fn validate_selection(selected: &[&str]) -> Result<Vec<&'static Model>, SelectionError> {
    if !(MIN_SELECTION..=MAX_SELECTION).contains(&selected.len()) {
        return Err(SelectionError::Size(selected.len()));
    }

    let mut seen = HashSet::new();
    let mut models = Vec::with_capacity(selected.len());

    for id in selected {
        if !seen.insert(*id) {
            return Err(SelectionError::Duplicate((*id).to_string()));
        }
        match catalog::model_by_id(id) {
            None => return Err(SelectionError::Unknown((*id).to_string())),
            Some(_) if *id == META_EVALUATOR_ID => {
                return Err(SelectionError::NotSelectable((*id).to_string()));
            }
            Some(model) => models.push(model),
        }
    }

    Ok(models)
}
