//! Static model catalog for the benchmark arena.
//!
//! The catalog is a process-wide constant table: loaded into the binary at
//! compile time, never mutated. One entry is the designated meta evaluator,
//! which adjudicates the final ranking and is excluded from the selectable
//! candidate list.

use serde::Serialize;

/// A single catalog entry describing a candidate model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Model {
    /// Stable identifier (e.g., `claude-opus-4`)
    pub id: &'static str,
    /// Human-readable display name
    pub name: &'static str,
    /// Vendor / lab name
    pub vendor: &'static str,
    /// Capability tags
    pub capabilities: &'static [&'static str],
    /// Supported input modalities, in display order
    pub modality_support: &'static [&'static str],
    /// Release label
    pub release: &'static str,
    /// Short description for catalog listings
    pub description: &'static str,
}

impl Model {
    /// Whether this model accepts image inputs
    #[must_use]
    pub fn supports_images(&self) -> bool {
        self.modality_support.contains(&"image")
    }
}

/// Identifier of the model that performs the final adjudication.
pub const META_EVALUATOR_ID: &str = "gemini-2.5-pro";

/// Selectable candidates. The meta evaluator lives in its own static below
/// so it can never leak into a candidate listing.
static CATALOG: &[Model] = &[
    Model {
        id: "claude-opus-4",
        name: "Claude Opus 4",
        vendor: "Anthropic",
        capabilities: &["reasoning", "code", "long-context"],
        modality_support: &["text", "image"],
        release: "2025-05",
        description: "Frontier reasoning model with strong coding and analysis depth",
    },
    Model {
        id: "gpt-4o",
        name: "GPT-4o",
        vendor: "OpenAI",
        capabilities: &["reasoning", "multimodal", "tool-use"],
        modality_support: &["text", "image", "audio"],
        release: "2024-05",
        description: "Omni-modal generalist tuned for fast interactive use",
    },
    Model {
        id: "llama-4-maverick",
        name: "Llama 4 Maverick",
        vendor: "Meta",
        capabilities: &["reasoning", "multilingual", "open-weights"],
        modality_support: &["text", "image"],
        release: "2025-04",
        description: "Open-weight mixture-of-experts flagship",
    },
    Model {
        id: "mistral-large-2",
        name: "Mistral Large 2",
        vendor: "Mistral AI",
        capabilities: &["code", "multilingual", "function-calling"],
        modality_support: &["text"],
        release: "2024-07",
        description: "Dense European flagship with strong code generation",
    },
    Model {
        id: "deepseek-v3",
        name: "DeepSeek-V3",
        vendor: "DeepSeek",
        capabilities: &["reasoning", "code", "open-weights"],
        modality_support: &["text"],
        release: "2024-12",
        description: "Cost-efficient MoE model with competitive reasoning",
    },
    Model {
        id: "command-r-plus",
        name: "Command R+",
        vendor: "Cohere",
        capabilities: &["retrieval", "tool-use", "multilingual"],
        modality_support: &["text"],
        release: "2024-04",
        description: "Retrieval-optimized model built for grounded enterprise answers",
    },
    Model {
        id: "grok-3",
        name: "Grok 3",
        vendor: "xAI",
        capabilities: &["reasoning", "realtime-knowledge"],
        modality_support: &["text", "image"],
        release: "2025-02",
        description: "Reasoning-focused model with current-events emphasis",
    },
    Model {
        id: "qwen2.5-max",
        name: "Qwen2.5-Max",
        vendor: "Alibaba",
        capabilities: &["reasoning", "multilingual", "code"],
        modality_support: &["text", "image"],
        release: "2025-01",
        description: "Large-scale MoE generalist with broad language coverage",
    },
];

static META_EVALUATOR: Model = Model {
    id: META_EVALUATOR_ID,
    name: "Gemini 2.5 Pro",
    vendor: "Google",
    capabilities: &["reasoning", "multimodal", "long-context"],
    modality_support: &["text", "image", "audio", "video"],
    release: "2025-03",
    description: "Designated meta evaluator: re-ranks the top peer-scored candidates",
};

/// All selectable candidate models, in catalog order.
///
/// The meta evaluator is intentionally absent; resolve it via
/// [`meta_evaluator`].
#[must_use]
pub fn selectable_models() -> &'static [Model] {
    CATALOG
}

/// The designated meta evaluator.
#[must_use]
pub fn meta_evaluator() -> &'static Model {
    &META_EVALUATOR
}

/// Look up any catalog entry (candidates and meta evaluator) by id.
///
/// Absent lookups return `None`; consumers fall back to rendering the raw
/// id string rather than treating a miss as fatal.
#[must_use]
pub fn model_by_id(id: &str) -> Option<&'static Model> {
    CATALOG
        .iter()
        .find(|m| m.id == id)
        .or_else(|| (META_EVALUATOR.id == id).then_some(&META_EVALUATOR))
}

/// Display name for an id, falling back to the raw id for absent entries.
#[must_use]
pub fn display_name(id: &str) -> &str {
    model_by_id(id).map_or(id, |m| m.name)
}
