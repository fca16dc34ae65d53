//! Report rendering for simulation outcomes.
//!
//! Strictly a consumer of [`SimulationOutcome`]: nothing here feeds back
//! into the engine. Renders the leaderboard, the fabricated responses,
//! and the meta-evaluator adjudication as JSON, markdown, or plain text.

use crate::aggregate::rank;
use crate::catalog::display_name;
use crate::engine::SimulationOutcome;
use crate::prompt::{Modality, PromptPayload};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as FmtWrite;
use tabled::{Table, Tabled};

/// A rendered simulation report: outcome plus presentation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Report metadata
    pub metadata: ReportMetadata,
    /// The outcome being rendered
    pub outcome: SimulationOutcome,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Report title
    pub title: String,
    /// Prompt text the run was submitted with
    pub prompt_text: String,
    /// Prompt modality
    pub modality: Modality,
    /// Report generation timestamp
    pub generated_at: DateTime<Utc>,
    /// Engine version
    pub engine_version: String,
}

/// Leaderboard row for table output
#[derive(Tabled)]
struct LeaderboardRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Quality")]
    quality: String,
    #[tabled(rename = "Clarity")]
    clarity: String,
    #[tabled(rename = "Relevance")]
    relevance: String,
    #[tabled(rename = "Accuracy")]
    accuracy: String,
    #[tabled(rename = "Overall")]
    overall: String,
    #[tabled(rename = "Top 3")]
    top_three: String,
}

/// Final adjudication row for table output
#[derive(Tabled)]
struct RankingRow {
    #[tabled(rename = "Place")]
    place: u8,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
}

impl SimulationReport {
    /// Wrap an outcome with presentation metadata, stamped now.
    #[must_use]
    pub fn new(outcome: SimulationOutcome, prompt: &PromptPayload) -> Self {
        Self {
            metadata: ReportMetadata {
                title: "Simulated Multi-Model Benchmark".to_string(),
                prompt_text: prompt.trimmed_text().to_string(),
                modality: prompt.modality,
                generated_at: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            outcome,
        }
    }

    /// Render as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Render as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        writeln!(output, "# {}", self.metadata.title).ok();
        writeln!(output).ok();
        writeln!(output, "**Prompt:** {}", self.metadata.prompt_text).ok();
        writeln!(
            output,
            "**Generated:** {}",
            self.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
        .ok();
        writeln!(output, "**Engine Version:** {}", self.metadata.engine_version).ok();
        writeln!(output).ok();

        writeln!(output, "## Leaderboard").ok();
        writeln!(output).ok();
        let table = Table::new(self.leaderboard_rows()).to_string();
        writeln!(output, "{table}").ok();
        writeln!(output).ok();

        writeln!(output, "## Final Adjudication").ok();
        writeln!(output).ok();
        for entry in &self.outcome.final_ranking {
            writeln!(
                output,
                "{}. **{}** (confidence {:.2}) - {}",
                entry.placement,
                display_name(&entry.model_id),
                entry.confidence,
                entry.rationale
            )
            .ok();
        }
        writeln!(output).ok();

        writeln!(output, "## Responses").ok();
        writeln!(output).ok();
        for response in &self.outcome.responses {
            writeln!(output, "### {}", display_name(&response.model_id)).ok();
            writeln!(output).ok();
            writeln!(output, "{}", response.content).ok();
            writeln!(output).ok();
            for highlight in &response.highlights {
                writeln!(output, "- {highlight}").ok();
            }
            writeln!(output).ok();
        }

        writeln!(output, "## Cross-Evaluations").ok();
        writeln!(output).ok();
        writeln!(
            output,
            "{} peer judgments across {} models.",
            self.outcome.cross_evaluations.len(),
            self.outcome.aggregates.len()
        )
        .ok();

        output
    }

    /// Render as plain text.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        writeln!(
            output,
            "═══════════════════════════════════════════════════════════════"
        )
        .ok();
        writeln!(output, "  {}", self.metadata.title).ok();
        writeln!(
            output,
            "═══════════════════════════════════════════════════════════════"
        )
        .ok();
        writeln!(output).ok();
        writeln!(output, "Prompt: {}", self.metadata.prompt_text).ok();
        writeln!(output).ok();

        writeln!(output, "LEADERBOARD").ok();
        writeln!(
            output,
            "───────────────────────────────────────────────────────────────"
        )
        .ok();
        let table = Table::new(self.leaderboard_rows()).to_string();
        writeln!(output, "{table}").ok();
        writeln!(output).ok();

        writeln!(
            output,
            "FINAL ADJUDICATION ({})",
            display_name(crate::catalog::META_EVALUATOR_ID)
        )
        .ok();
        writeln!(
            output,
            "───────────────────────────────────────────────────────────────"
        )
        .ok();
        let ranking_rows: Vec<RankingRow> = self
            .outcome
            .final_ranking
            .iter()
            .map(|entry| RankingRow {
                place: entry.placement,
                model: display_name(&entry.model_id).to_string(),
                confidence: format!("{:.2}", entry.confidence),
            })
            .collect();
        let table = Table::new(ranking_rows).to_string();
        writeln!(output, "{table}").ok();
        writeln!(output).ok();

        for entry in &self.outcome.final_ranking {
            writeln!(output, "  {}. {}", entry.placement, entry.rationale).ok();
        }

        output
    }

    fn leaderboard_rows(&self) -> Vec<LeaderboardRow> {
        let ranked = rank(&self.outcome.aggregates);
        ranked
            .iter()
            .enumerate()
            .map(|(index, aggregate)| {
                let in_top_three = self
                    .outcome
                    .top_three
                    .iter()
                    .any(|t| t.model_id == aggregate.model_id);
                LeaderboardRow {
                    rank: index + 1,
                    model: display_name(&aggregate.model_id).to_string(),
                    quality: format!("{:.2}", aggregate.mean_metrics.quality),
                    clarity: format!("{:.2}", aggregate.mean_metrics.clarity),
                    relevance: format!("{:.2}", aggregate.mean_metrics.relevance),
                    accuracy: format!("{:.2}", aggregate.mean_metrics.accuracy),
                    overall: format!("{:.2}", aggregate.overall),
                    top_three: if in_top_three { "✓" } else { "" }.to_string(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::simulate_evaluation;

    fn sample_report() -> SimulationReport {
        let prompt = PromptPayload::text("Summarize quarterly earnings");
        let outcome =
            simulate_evaluation(&["claude-opus-4", "gpt-4o", "deepseek-v3", "grok-3"], &prompt)
                .unwrap();
        SimulationReport::new(outcome, &prompt)
    }

    #[test]
    fn test_to_json() {
        let report = sample_report();
        let json = report.to_json().unwrap();
        assert!(json.contains("claude-opus-4"));
        assert!(json.contains("final_ranking"));
    }

    #[test]
    fn test_to_markdown_sections() {
        let markdown = sample_report().to_markdown();
        assert!(markdown.contains("# Simulated Multi-Model Benchmark"));
        assert!(markdown.contains("## Leaderboard"));
        assert!(markdown.contains("## Final Adjudication"));
        assert!(markdown.contains("## Responses"));
        assert!(markdown.contains("Summarize quarterly earnings"));
    }

    #[test]
    fn test_to_text_contains_leaderboard() {
        let text = sample_report().to_text();
        assert!(text.contains("LEADERBOARD"));
        assert!(text.contains("FINAL ADJUDICATION"));
        assert!(text.contains("Gemini 2.5 Pro"));
    }

    #[test]
    fn test_leaderboard_marks_exactly_three() {
        let report = sample_report();
        let rows = report.leaderboard_rows();
        let marked = rows.iter().filter(|r| r.top_three == "✓").count();
        assert_eq!(marked, 3);
    }

    #[test]
    fn test_metadata_carries_prompt() {
        let report = sample_report();
        assert_eq!(report.metadata.prompt_text, "Summarize quarterly earnings");
        assert_eq!(report.metadata.modality, Modality::Text);
    }
}
