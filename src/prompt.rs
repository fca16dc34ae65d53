//! Prompt payload types.
//!
//! The prompt is read-only input to the engine. Image attachments are
//! opaque: the engine never parses or validates the data URL.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised during prompt validation
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("prompt text is empty after trimming")]
    EmptyText,
}

/// Input modality of a prompt
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    /// Text-only prompt
    Text,
    /// Text plus an image attachment
    Multimodal,
}

/// A user submission: prompt text plus an optional image attachment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptPayload {
    /// Prompt text (must be non-empty after trimming)
    pub text: String,
    /// Declared modality
    pub modality: Modality,
    /// Original file name of the attachment, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_file_name: Option<String>,
    /// Attachment as a data URL; treated as an opaque payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data_url: Option<String>,
}

impl PromptPayload {
    /// Create a text-only prompt
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            modality: Modality::Text,
            image_file_name: None,
            image_data_url: None,
        }
    }

    /// Create a multimodal prompt with an attachment
    #[must_use]
    pub fn multimodal(
        text: impl Into<String>,
        image_file_name: Option<String>,
        image_data_url: Option<String>,
    ) -> Self {
        Self {
            text: text.into(),
            modality: Modality::Multimodal,
            image_file_name,
            image_data_url,
        }
    }

    /// Prompt text with surrounding whitespace removed
    #[must_use]
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    /// Validate the payload.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::EmptyText`] if the text is empty or
    /// whitespace-only.
    pub fn validate(&self) -> Result<(), PromptError> {
        if self.trimmed_text().is_empty() {
            return Err(PromptError::EmptyText);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_prompt_valid() {
        let prompt = PromptPayload::text("Summarize quarterly earnings");
        assert!(prompt.validate().is_ok());
        assert_eq!(prompt.modality, Modality::Text);
    }

    #[test]
    fn test_whitespace_only_rejected() {
        let prompt = PromptPayload::text("   ");
        assert!(matches!(prompt.validate(), Err(PromptError::EmptyText)));
    }

    #[test]
    fn test_empty_rejected() {
        let prompt = PromptPayload::text("");
        assert!(prompt.validate().is_err());
    }

    #[test]
    fn test_trimmed_text() {
        let prompt = PromptPayload::text("  compare these charts  ");
        assert_eq!(prompt.trimmed_text(), "compare these charts");
    }

    #[test]
    fn test_multimodal_carries_attachment() {
        let prompt = PromptPayload::multimodal(
            "What does this chart show?",
            Some("chart.png".to_string()),
            Some("data:image/png;base64,AAAA".to_string()),
        );
        assert!(prompt.validate().is_ok());
        assert_eq!(prompt.modality, Modality::Multimodal);
        assert_eq!(prompt.image_file_name.as_deref(), Some("chart.png"));
    }

    #[test]
    fn test_modality_serde_snake_case() {
        let json = serde_json::to_string(&Modality::Multimodal).unwrap();
        assert_eq!(json, "\"multimodal\"");
    }
}
