//! Aggregation of the cross-evaluation matrix into a leaderboard.
//!
//! Each model's aggregate is the arithmetic mean of every evaluation
//! targeting it (`N - 1` incoming judgments for N selected models; a model
//! never judges itself). Ranking uses a documented total order so the
//! leaderboard and top-three selection are stable.

use crate::crosseval::{CrossEvaluation, MetricScores};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Per-model aggregate over all incoming peer evaluations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregatedScore {
    /// Target model id
    pub model_id: String,
    /// Mean of each metric dimension across judges
    pub mean_metrics: MetricScores,
    /// Mean of the judges' overall scores
    pub overall: f64,
}

/// Aggregate the matrix into one score per model id, in the given order.
///
/// A model with zero incoming evaluations yields all-zero scores rather
/// than a division error; with the enforced selection size of 4-5 that
/// branch is unreachable, but a future caller violating the invariant gets
/// a defined default instead of a crash.
#[must_use]
pub fn aggregate_scores(
    model_ids: &[String],
    evaluations: &[CrossEvaluation],
) -> Vec<AggregatedScore> {
    model_ids
        .iter()
        .map(|id| aggregate_for_target(id, evaluations))
        .collect()
}

fn aggregate_for_target(model_id: &str, evaluations: &[CrossEvaluation]) -> AggregatedScore {
    let incoming: Vec<&CrossEvaluation> = evaluations
        .iter()
        .filter(|e| e.target_model_id == model_id)
        .collect();

    let mean_of = |extract: fn(&MetricScores) -> f64| {
        compute_mean(&incoming.iter().map(|e| extract(&e.metrics)).collect::<Vec<f64>>())
    };

    AggregatedScore {
        model_id: model_id.to_string(),
        mean_metrics: MetricScores {
            quality: mean_of(|m| m.quality),
            clarity: mean_of(|m| m.clarity),
            relevance: mean_of(|m| m.relevance),
            accuracy: mean_of(|m| m.accuracy),
        },
        overall: compute_mean(&incoming.iter().map(|e| e.overall).collect::<Vec<f64>>()),
    }
}

/// Total ranking order: overall desc, then mean accuracy desc, then id asc.
#[must_use]
pub fn ranking_order(a: &AggregatedScore, b: &AggregatedScore) -> Ordering {
    b.overall
        .partial_cmp(&a.overall)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            b.mean_metrics
                .accuracy
                .partial_cmp(&a.mean_metrics.accuracy)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.model_id.cmp(&b.model_id))
}

/// Aggregates sorted into leaderboard order.
#[must_use]
pub fn rank(aggregates: &[AggregatedScore]) -> Vec<AggregatedScore> {
    let mut ranked = aggregates.to_vec();
    ranked.sort_by(ranking_order);
    ranked
}

/// The `min(3, N)` highest-ranked aggregates, eligible for adjudication.
#[must_use]
pub fn top_three(aggregates: &[AggregatedScore]) -> Vec<AggregatedScore> {
    let mut ranked = rank(aggregates);
    ranked.truncate(3);
    ranked
}

/// Mean of samples; empty input yields 0.0
#[allow(clippy::cast_precision_loss)]
fn compute_mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}
