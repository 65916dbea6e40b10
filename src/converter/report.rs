//! Conversion report types

use super::front_matter::FrontMatterState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Type of warning during conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Content was discarded without being converted
    DroppedContent,
    /// The front matter block was never opened or never closed
    UnterminatedFrontMatter,
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarningKind::DroppedContent => write!(f, "dropped_content"),
            WarningKind::UnterminatedFrontMatter => write!(f, "unterminated_front_matter"),
        }
    }
}

/// A warning generated during conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertWarning {
    /// Line number (1-indexed, 0 when it concerns the whole file)
    pub line: usize,
    pub kind: WarningKind,
    pub message: String,
}

impl std::fmt::Display for ConvertWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.message)
        } else {
            write!(f, "Line {}: {}", self.line, self.message)
        }
    }
}

/// Statistics about the conversion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStatistics {
    /// Total lines in input
    pub total_lines: usize,
    /// Lines that reached the body rules
    pub body_lines: usize,
    /// Lines discarded before or inside the front matter
    pub dropped_lines: usize,
    /// Count of each rule that fired
    pub rule_counts: HashMap<String, usize>,
}

impl ConversionStatistics {
    /// Increment the count for a rule
    pub fn increment_rule(&mut self, rule: &str) {
        *self.rule_counts.entry(rule.to_string()).or_insert(0) += 1;
    }

    pub fn rule_count(&self, rule: &str) -> usize {
        self.rule_counts.get(rule).copied().unwrap_or(0)
    }
}

/// Complete conversion report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    pub input_file: String,
    pub output_file: String,
    /// Timestamp of conversion
    pub timestamp: String,
    pub duration_ms: u64,
    /// Front matter state after the last line
    pub front_matter: FrontMatterState,
    pub statistics: ConversionStatistics,
    pub warnings: Vec<ConvertWarning>,
}

impl ConversionReport {
    /// Create a new empty report
    pub fn new(input: &str, output: &str) -> Self {
        Self {
            input_file: input.to_string(),
            output_file: output.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            duration_ms: 0,
            front_matter: FrontMatterState::default(),
            statistics: ConversionStatistics::default(),
            warnings: Vec::new(),
        }
    }

    /// Add a warning to the report
    pub fn add_warning(&mut self, line: usize, kind: WarningKind, message: impl Into<String>) {
        let warning = ConvertWarning {
            line,
            kind,
            message: message.into(),
        };
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert to human-readable text format
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("Conversion Report\n");
        output.push_str("=================\n");
        output.push_str(&format!("Input:  {}\n", self.input_file));
        output.push_str(&format!("Output: {}\n", self.output_file));
        output.push_str(&format!("Date:   {}\n", self.timestamp));
        output.push_str(&format!("Time:   {}ms\n\n", self.duration_ms));

        output.push_str("Statistics\n");
        output.push_str("----------\n");
        output.push_str(&format!(
            "Total lines:     {}\n",
            self.statistics.total_lines
        ));
        output.push_str(&format!("Body lines:      {}\n", self.statistics.body_lines));
        output.push_str(&format!(
            "Dropped lines:   {}\n",
            self.statistics.dropped_lines
        ));
        output.push_str(&format!("Front matter:    {}\n\n", self.front_matter));

        if !self.statistics.rule_counts.is_empty() {
            output.push_str("Rules\n");
            output.push_str("-----\n");
            let mut rules: Vec<_> = self.statistics.rule_counts.iter().collect();
            rules.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
            for (rule, count) in rules {
                output.push_str(&format!("✓ {}: {}\n", rule, count));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("Warnings\n");
            output.push_str("--------\n");
            for warning in &self.warnings {
                output.push_str(&format!("⚠ {}\n", warning));
            }
        }

        output
    }
}
