//! Response synthesis.
//!
//! Fabricates one plausible response per selected model. No inference
//! happens anywhere: content is templated from the model's catalog entry
//! and the prompt text, with all variation drawn from a ChaCha8 RNG seeded
//! by `(model id, prompt text)` so identical inputs reproduce identical
//! output.

use crate::catalog::Model;
use crate::prompt::{Modality, PromptPayload};
use crate::scoring::{derive_seed, ScoringConfig};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Maximum prompt characters echoed into fabricated content
const SNIPPET_CHARS: usize = 60;

/// A fabricated response from one model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelResponse {
    /// Responding model id
    pub model_id: String,
    /// Fabricated response content
    pub content: String,
    /// 2-4 reviewer-facing highlights of the response
    pub highlights: Vec<String>,
    /// Modalities the model supports, copied from the catalog
    pub modality_support: Vec<String>,
}

/// Synthesize one response per model, in input order.
///
/// Pure function of `(models, prompt, config)`: no wall-clock time, no
/// unseeded randomness. Callers resolve and validate the selection before
/// this point.
#[must_use]
pub fn synthesize_responses(
    models: &[&'static Model],
    prompt: &PromptPayload,
    config: &ScoringConfig,
) -> Vec<ModelResponse> {
    models
        .iter()
        .map(|model| synthesize_response(model, prompt, config))
        .collect()
}

fn synthesize_response(
    model: &'static Model,
    prompt: &PromptPayload,
    config: &ScoringConfig,
) -> ModelResponse {
    let mut rng = ChaCha8Rng::seed_from_u64(derive_seed(
        config.seed,
        &[model.id, prompt.trimmed_text()],
    ));

    let content = synthesize_content(model, prompt, &mut rng);
    let highlights = pick_highlights(model, &mut rng);

    ModelResponse {
        model_id: model.id.to_string(),
        content,
        highlights,
        modality_support: model
            .modality_support
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

fn synthesize_content(model: &Model, prompt: &PromptPayload, rng: &mut ChaCha8Rng) -> String {
    let snippet = prompt_snippet(prompt.trimmed_text());
    let lead_capability = model.capabilities.first().copied().unwrap_or("general");

    let opener = match rng.gen_range(0..4) {
        0 => format!(
            "{} tackles \"{snippet}\" head-on, stating its reading of the request before answering.",
            model.name
        ),
        1 => format!(
            "{} ({}) opens with a short framing of \"{snippet}\" and commits to a position early.",
            model.name, model.vendor
        ),
        2 => format!(
            "Leaning on its {lead_capability} focus, {} breaks \"{snippet}\" into discrete sub-questions.",
            model.name
        ),
        _ => format!(
            "{} restates \"{snippet}\" in its own terms, then works through it stepwise.",
            model.name
        ),
    };

    let capabilities = model.capabilities.join(", ");
    let body = if rng.gen_range(0..2) == 0 {
        format!(
            "It draws on {capabilities} to support each claim and closes with a concise recommendation."
        )
    } else {
        format!(
            "Each point is backed by its {capabilities} strengths, ending in a short summary of trade-offs."
        )
    };

    let mut content = format!("{opener} {body}");

    if prompt.modality == Modality::Multimodal {
        let attachment = prompt
            .image_file_name
            .as_deref()
            .map_or_else(String::new, |name| format!(" ({name})"));
        if model.supports_images() {
            content.push_str(&format!(
                " The attached image{attachment} is described and folded into the argument."
            ));
        } else {
            content.push_str(&format!(
                " The attachment{attachment} is acknowledged, but the model reasons from the text alone."
            ));
        }
    }

    content
}

fn pick_highlights(model: &Model, rng: &mut ChaCha8Rng) -> Vec<String> {
    let mut pool: Vec<String> = model
        .capabilities
        .iter()
        .map(|cap| format!("strong {cap} coverage"))
        .collect();
    pool.extend(
        [
            "cites concrete figures",
            "keeps a tight scope",
            "structured, skimmable layout",
            "flags its own uncertainty",
            "closes with actionable next steps",
        ]
        .map(String::from),
    );

    let count = rng.gen_range(2..=4);
    pool.choose_multiple(rng, count).cloned().collect()
}

fn prompt_snippet(text: &str) -> String {
    if text.chars().count() <= SNIPPET_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(SNIPPET_CHARS).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn models(ids: &[&str]) -> Vec<&'static Model> {
        ids.iter()
            .map(|id| catalog::model_by_id(id).expect("known model"))
            .collect()
    }

    #[test]
    fn test_one_response_per_model_in_order() {
        let selected = models(&["claude-opus-4", "gpt-4o", "deepseek-v3", "grok-3"]);
        let prompt = PromptPayload::text("Summarize quarterly earnings");
        let responses = synthesize_responses(&selected, &prompt, &ScoringConfig::default());

        assert_eq!(responses.len(), 4);
        let ids: Vec<&str> = responses.iter().map(|r| r.model_id.as_str()).collect();
        assert_eq!(ids, vec!["claude-opus-4", "gpt-4o", "deepseek-v3", "grok-3"]);
    }

    #[test]
    fn test_deterministic_for_identical_inputs() {
        let selected = models(&["claude-opus-4", "gpt-4o", "deepseek-v3", "grok-3"]);
        let prompt = PromptPayload::text("Summarize quarterly earnings");
        let config = ScoringConfig::default();

        let first = synthesize_responses(&selected, &prompt, &config);
        let second = synthesize_responses(&selected, &prompt, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_content_varies_by_prompt() {
        let selected = models(&["claude-opus-4"]);
        let config = ScoringConfig::default();

        let a = synthesize_responses(&selected, &PromptPayload::text("First prompt"), &config);
        let b = synthesize_responses(&selected, &PromptPayload::text("Second prompt"), &config);
        assert_ne!(a[0].content, b[0].content);
    }

    #[test]
    fn test_highlight_count_bounds() {
        let selected = models(&[
            "claude-opus-4",
            "gpt-4o",
            "llama-4-maverick",
            "mistral-large-2",
            "deepseek-v3",
        ]);
        let prompt = PromptPayload::text("Compare distributed consensus protocols");
        let responses = synthesize_responses(&selected, &prompt, &ScoringConfig::default());

        for response in &responses {
            assert!((2..=4).contains(&response.highlights.len()));
        }
    }

    #[test]
    fn test_content_references_model_and_prompt() {
        let selected = models(&["mistral-large-2"]);
        let prompt = PromptPayload::text("Draft a migration plan");
        let responses = synthesize_responses(&selected, &prompt, &ScoringConfig::default());

        assert!(responses[0].content.contains("Mistral Large 2"));
        assert!(responses[0].content.contains("Draft a migration plan"));
    }

    #[test]
    fn test_multimodal_phrasing_depends_on_support() {
        let selected = models(&["gpt-4o", "deepseek-v3"]);
        let prompt = PromptPayload::multimodal(
            "What does this chart show?",
            Some("chart.png".to_string()),
            None,
        );
        let responses = synthesize_responses(&selected, &prompt, &ScoringConfig::default());

        assert!(responses[0].content.contains("folded into the argument"));
        assert!(responses[1].content.contains("reasons from the text alone"));
    }

    #[test]
    fn test_long_prompt_truncated_in_content() {
        let selected = models(&["grok-3"]);
        let long_text = "a".repeat(200);
        let prompt = PromptPayload::text(long_text);
        let responses = synthesize_responses(&selected, &prompt, &ScoringConfig::default());

        assert!(responses[0].content.contains("..."));
        assert!(!responses[0].content.contains(&"a".repeat(100)));
    }

    #[test]
    fn test_modality_support_copied_from_catalog() {
        let selected = models(&["gpt-4o"]);
        let prompt = PromptPayload::text("hello");
        let responses = synthesize_responses(&selected, &prompt, &ScoringConfig::default());

        assert_eq!(responses[0].modality_support, vec!["text", "image", "audio"]);
    }
}
