//! Meta-evaluator adjudication of the top candidates.
//!
//! The designated meta evaluator re-scores the top three peer-ranked
//! models and may disagree with the peer-mean ordering; it only ever
//! chooses among the candidates the aggregator already selected, never
//! promoting a model from outside the top three. Placements are a
//! contiguous 1..=N permutation and confidences reflect the margin
//! between adjacent adjudicated scores.

use crate::aggregate::AggregatedScore;
use crate::catalog;
use crate::prompt::PromptPayload;
use crate::scoring::{derive_seed, round2, ScoringConfig};
use crate::synth::ModelResponse;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Maximum deviation the meta evaluator applies to a peer-mean overall
const ADJUSTMENT: f64 = 0.6;

/// Confidence bounds for adjudicated placements
const CONFIDENCE_FLOOR: f64 = 0.55;
const CONFIDENCE_CEIL: f64 = 0.97;

/// Final placement of one top-three candidate by the meta evaluator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinalRankingEntry {
    /// Candidate model id
    pub model_id: String,
    /// Placement, 1 = winner; contiguous and unique across entries
    pub placement: u8,
    /// Meta evaluator's confidence in this placement, in [0, 1]
    pub confidence: f64,
    /// Adjudication rationale
    pub rationale: String,
}

/// Re-rank the top candidates under the meta-evaluator persona.
///
/// Deterministic: the adjudicated score is the candidate's peer-mean
/// overall plus a seeded adjustment derived from
/// `(meta evaluator id, candidate id, prompt text)`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn adjudicate(
    top: &[AggregatedScore],
    responses: &[ModelResponse],
    prompt: &PromptPayload,
    config: &ScoringConfig,
) -> Vec<FinalRankingEntry> {
    let meta = catalog::meta_evaluator();

    let mut scored: Vec<(f64, &AggregatedScore)> = top
        .iter()
        .map(|candidate| {
            let mut rng = ChaCha8Rng::seed_from_u64(derive_seed(
                config.seed,
                &[meta.id, &candidate.model_id, prompt.trimmed_text()],
            ));
            let adjusted = candidate.overall + rng.gen_range(-ADJUSTMENT..ADJUSTMENT);
            (adjusted, candidate)
        })
        .collect();

    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.1.model_id.cmp(&b.1.model_id))
    });

    let adjusted_scores: Vec<f64> = scored.iter().map(|(score, _)| *score).collect();

    scored
        .iter()
        .enumerate()
        .map(|(index, (score, candidate))| {
            let placement = (index + 1) as u8;
            let confidence = placement_confidence(index, &adjusted_scores);
            let rationale =
                compose_rationale(meta.name, candidate, responses, *score, placement);

            FinalRankingEntry {
                model_id: candidate.model_id.clone(),
                placement,
                confidence,
                rationale,
            }
        })
        .collect()
}

/// Confidence from the margin to the nearest adjacent adjudicated score
fn placement_confidence(index: usize, scores: &[f64]) -> f64 {
    let margin = if scores.len() < 2 {
        ADJUSTMENT
    } else if index == 0 {
        scores[0] - scores[1]
    } else {
        scores[index - 1] - scores[index]
    };

    round2((CONFIDENCE_FLOOR + margin * 0.25).clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEIL))
}

fn compose_rationale(
    meta_name: &str,
    candidate: &AggregatedScore,
    responses: &[ModelResponse],
    adjusted: f64,
    placement: u8,
) -> String {
    let candidate_name = catalog::display_name(&candidate.model_id);
    let highlight = responses
        .iter()
        .find(|r| r.model_id == candidate.model_id)
        .and_then(|r| r.highlights.first())
        .map_or_else(
            || "its overall showing".to_string(),
            |h| format!("\"{h}\""),
        );

    match placement {
        1 => format!(
            "{meta_name} places {candidate_name} first: peers scored it {:.2} and the adjudicated read ({adjusted:.2}) confirms it, citing {highlight}.",
            candidate.overall
        ),
        2 => format!(
            "{meta_name} ranks {candidate_name} second; {highlight} stands out, but the adjudicated score ({adjusted:.2}) trails the winner.",
        ),
        _ => format!(
            "{meta_name} assigns {candidate_name} third place: solid peer marks ({:.2}), though {highlight} was not enough to close the gap.",
            candidate.overall
        ),
    }
}
