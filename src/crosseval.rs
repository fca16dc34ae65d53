//! Peer cross-evaluation matrix.
//!
//! Every selected model judges every other selected model's response,
//! producing a complete ordered-pair matrix with no self-pairs: N models
//! yield `N * (N - 1)` evaluations. Scores are a reproducible function of
//! `(judge id, target id, target content)`.
//!
//! Per-dimension scores sit on a per-target anchor band (so judges roughly
//! agree on how good a response is) with per-judge jitter on top, which
//! keeps the aggregated leaderboard stable while still giving each judge a
//! distinct voice.

use crate::catalog;
use crate::scoring::{derive_seed, round1, round2, ScoringConfig};
use crate::synth::ModelResponse;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Anchor band for per-target response quality
const ANCHOR_MIN: f64 = 5.5;
const ANCHOR_MAX: f64 = 8.5;

/// Judge-specific jitter applied around the anchor, per dimension
const JITTER: f64 = 1.2;

/// Scores for the four evaluation dimensions, each in [0, 10].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MetricScores {
    pub quality: f64,
    pub clarity: f64,
    pub relevance: f64,
    pub accuracy: f64,
}

impl MetricScores {
    /// Values in metric order: quality, clarity, relevance, accuracy
    #[must_use]
    pub const fn values(&self) -> [f64; 4] {
        [self.quality, self.clarity, self.relevance, self.accuracy]
    }

    /// Name of the highest-scoring dimension
    #[must_use]
    pub fn strongest_dimension(&self) -> &'static str {
        let names = ["quality", "clarity", "relevance", "accuracy"];
        let values = self.values();
        let mut best = 0;
        for (i, value) in values.iter().enumerate() {
            if *value > values[best] {
                best = i;
            }
        }
        names[best]
    }

    /// Whether every dimension lies in [0, 10]
    #[must_use]
    pub fn in_range(&self) -> bool {
        self.values().iter().all(|v| (0.0..=10.0).contains(v))
    }
}

/// One peer judgment: `judge` scoring `target`'s response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrossEvaluation {
    /// Model acting as judge
    pub judge_model_id: String,
    /// Model whose response is being scored
    pub target_model_id: String,
    /// Per-dimension scores in [0, 10]
    pub metrics: MetricScores,
    /// Fixed-weight combination of the four dimensions, in [0, 10]
    pub overall: f64,
    /// Short judgment referencing the target's content
    pub rationale: String,
}

/// Build the complete judge x target matrix over the given responses.
///
/// Produces one [`CrossEvaluation`] per ordered pair of distinct models,
/// in (judge, target) iteration order over the input sequence.
#[must_use]
pub fn build_matrix(responses: &[ModelResponse], config: &ScoringConfig) -> Vec<CrossEvaluation> {
    let mut matrix = Vec::with_capacity(responses.len() * responses.len().saturating_sub(1));

    for judge in responses {
        for target in responses {
            if judge.model_id == target.model_id {
                continue;
            }
            matrix.push(evaluate_pair(judge, target, config));
        }
    }

    matrix
}

fn evaluate_pair(
    judge: &ModelResponse,
    target: &ModelResponse,
    config: &ScoringConfig,
) -> CrossEvaluation {
    // All judges score the same target around the same anchor; the pair
    // seed only drives the judge's deviation from it.
    let anchor = target_anchor(target, config);
    let mut rng = ChaCha8Rng::seed_from_u64(derive_seed(
        config.seed,
        &[&judge.model_id, &target.model_id, &target.content],
    ));

    let draw =
        |rng: &mut ChaCha8Rng| round1((anchor + rng.gen_range(-JITTER..JITTER)).clamp(0.0, 10.0));
    let metrics = MetricScores {
        quality: draw(&mut rng),
        clarity: draw(&mut rng),
        relevance: draw(&mut rng),
        accuracy: draw(&mut rng),
    };

    let overall = weighted_overall(&metrics, config);
    let rationale = compose_rationale(judge, target, &metrics, &mut rng);

    CrossEvaluation {
        judge_model_id: judge.model_id.clone(),
        target_model_id: target.model_id.clone(),
        metrics,
        overall,
        rationale,
    }
}

/// Per-target quality anchor derived from the target's identity and content
fn target_anchor(target: &ModelResponse, config: &ScoringConfig) -> f64 {
    let mut rng = ChaCha8Rng::seed_from_u64(derive_seed(
        config.seed,
        &[&target.model_id, &target.content],
    ));
    rng.gen_range(ANCHOR_MIN..ANCHOR_MAX)
}

/// Fold the four dimensions into one overall score using the configured weights
#[must_use]
pub fn weighted_overall(metrics: &MetricScores, config: &ScoringConfig) -> f64 {
    let combined: f64 = metrics
        .values()
        .iter()
        .zip(config.weights())
        .map(|(value, weight)| value * weight)
        .sum();
    round2(combined)
}

fn compose_rationale(
    judge: &ModelResponse,
    target: &ModelResponse,
    metrics: &MetricScores,
    rng: &mut ChaCha8Rng,
) -> String {
    let judge_name = catalog::display_name(&judge.model_id);
    let target_name = catalog::display_name(&target.model_id);
    let strongest = metrics.strongest_dimension();
    let excerpt = content_excerpt(&target.content);

    match rng.gen_range(0..3) {
        0 => format!(
            "{judge_name} finds {target_name}'s answer (\"{excerpt}\") well grounded; {strongest} is its clearest strength."
        ),
        1 => format!(
            "{judge_name} notes that {target_name} stays on task (\"{excerpt}\"), scoring it highest on {strongest}."
        ),
        _ => format!(
            "Per {judge_name}, {target_name}'s response (\"{excerpt}\") holds up under scrutiny, particularly on {strongest}."
        ),
    }
}

fn content_excerpt(content: &str) -> String {
    const MAX: usize = 48;
    if content.chars().count() <= MAX {
        return content.to_string();
    }
    let cut: String = content.chars().take(MAX).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::catalog::model_by_id;
    use crate::prompt::PromptPayload;
    use crate::synth::synthesize_responses;

    fn responses(ids: &[&str]) -> Vec<ModelResponse> {
        let models: Vec<_> = ids.iter().map(|id| model_by_id(id).unwrap()).collect();
        let prompt = PromptPayload::text("Summarize quarterly earnings");
        synthesize_responses(&models, &prompt, &ScoringConfig::default())
    }

    #[test]
    fn test_matrix_size_four_models() {
        let matrix = build_matrix(
            &responses(&["claude-opus-4", "gpt-4o", "deepseek-v3", "grok-3"]),
            &ScoringConfig::default(),
        );
        assert_eq!(matrix.len(), 12);
    }

    #[test]
    fn test_matrix_size_five_models() {
        let matrix = build_matrix(
            &responses(&[
                "claude-opus-4",
                "gpt-4o",
                "deepseek-v3",
                "grok-3",
                "qwen2.5-max",
            ]),
            &ScoringConfig::default(),
        );
        assert_eq!(matrix.len(), 20);
    }

    #[test]
    fn test_no_self_pairs() {
        let matrix = build_matrix(
            &responses(&["claude-opus-4", "gpt-4o", "deepseek-v3", "grok-3"]),
            &ScoringConfig::default(),
        );
        assert!(matrix
            .iter()
            .all(|e| e.judge_model_id != e.target_model_id));
    }

    #[test]
    fn test_scores_in_range() {
        let matrix = build_matrix(
            &responses(&["claude-opus-4", "gpt-4o", "deepseek-v3", "grok-3"]),
            &ScoringConfig::default(),
        );
        for entry in &matrix {
            assert!(entry.metrics.in_range(), "metrics out of range: {entry:?}");
            assert!((0.0..=10.0).contains(&entry.overall));
        }
    }

    #[test]
    fn test_deterministic() {
        let batch = responses(&["claude-opus-4", "gpt-4o", "deepseek-v3", "grok-3"]);
        let config = ScoringConfig::default();
        assert_eq!(build_matrix(&batch, &config), build_matrix(&batch, &config));
    }

    #[test]
    fn test_judges_disagree_on_same_target() {
        let matrix = build_matrix(
            &responses(&["claude-opus-4", "gpt-4o", "deepseek-v3", "grok-3"]),
            &ScoringConfig::default(),
        );
        let incoming: Vec<_> = matrix
            .iter()
            .filter(|e| e.target_model_id == "gpt-4o")
            .collect();
        assert_eq!(incoming.len(), 3);
        // Jitter should keep judges from producing identical score vectors
        assert!(incoming
            .windows(2)
            .any(|pair| pair[0].metrics != pair[1].metrics));
    }

    #[test]
    fn test_weighted_overall_equal_weights() {
        let metrics = MetricScores {
            quality: 8.0,
            clarity: 6.0,
            relevance: 7.0,
            accuracy: 9.0,
        };
        let overall = weighted_overall(&metrics, &ScoringConfig::default());
        assert_eq!(overall, 7.5);
    }

    #[test]
    fn test_weighted_overall_skewed_weights() {
        let metrics = MetricScores {
            quality: 10.0,
            clarity: 0.0,
            relevance: 0.0,
            accuracy: 0.0,
        };
        let config = ScoringConfig {
            quality_weight: 0.7,
            clarity_weight: 0.1,
            relevance_weight: 0.1,
            accuracy_weight: 0.1,
            seed: 42,
        };
        assert_eq!(weighted_overall(&metrics, &config), 7.0);
    }

    #[test]
    fn test_strongest_dimension() {
        let metrics = MetricScores {
            quality: 5.0,
            clarity: 9.0,
            relevance: 7.0,
            accuracy: 8.0,
        };
        assert_eq!(metrics.strongest_dimension(), "clarity");
    }

    #[test]
    fn test_rationale_references_both_models() {
        let matrix = build_matrix(
            &responses(&["claude-opus-4", "gpt-4o", "deepseek-v3", "grok-3"]),
            &ScoringConfig::default(),
        );
        let entry = matrix
            .iter()
            .find(|e| e.judge_model_id == "claude-opus-4" && e.target_model_id == "gpt-4o")
            .unwrap();
        assert!(entry.rationale.contains("Claude Opus 4"));
        assert!(entry.rationale.contains("GPT-4o"));
    }
}
