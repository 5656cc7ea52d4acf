//! Scoring configuration: every threshold, weight, and placeholder the engine uses.
//!
//! Defaults reproduce the reference scoring behavior exactly. A TOML file can
//! override any subset of fields; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::scoring::ScoringError;

/// Bumped whenever a default below changes meaning.
pub const SCORING_CONFIG_VERSION: u32 = 1;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub version: u32,
    /// JD terms weighted strictly below this are treated as noise.
    pub presence_threshold: f64,
    pub severity: SeverityConfig,
    pub penalty: PenaltyConfig,
    pub weights: AtsWeights,
    pub placeholders: PlaceholderScores,
    pub scan: ScanConfig,
    /// Below this many suggestions, one filler suggestion is appended.
    pub min_suggestions: usize,
    pub skill_matching: SkillMatching,
}

/// How JD primary skills are compared with resume skills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillMatching {
    /// Verbatim comparison: "Python" and "python" are different skills.
    #[default]
    Exact,
    CaseInsensitive,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            version: SCORING_CONFIG_VERSION,
            presence_threshold: 0.05,
            severity: SeverityConfig::default(),
            penalty: PenaltyConfig::default(),
            weights: AtsWeights::default(),
            placeholders: PlaceholderScores::default(),
            scan: ScanConfig::default(),
            min_suggestions: 3,
            skill_matching: SkillMatching::Exact,
        }
    }
}

/// Break points on the JD-side term weight. Comparisons are strict `>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityConfig {
    pub high_breakpoint: f64,
    pub medium_breakpoint: f64,
    pub high_delta: i32,
    pub medium_delta: i32,
    pub low_delta: i32,
}

impl Default for SeverityConfig {
    fn default() -> Self {
        Self {
            high_breakpoint: 0.30,
            medium_breakpoint: 0.15,
            high_delta: -25,
            medium_delta: -10,
            low_delta: -5,
        }
    }
}

/// gap_penalty = max(0, 100 − (critical × critical_multiplier + medium × medium_multiplier))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyConfig {
    pub critical_multiplier: f64,
    pub medium_multiplier: f64,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            critical_multiplier: 5.0,
            medium_multiplier: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtsWeights {
    pub skill_match: f64,
    pub keyword_coverage: f64,
    pub experience_relevance: f64,
    pub format_compliance: f64,
    pub content_quality: f64,
    pub gap_penalty: f64,
    pub completeness: f64,
}

impl Default for AtsWeights {
    fn default() -> Self {
        Self {
            skill_match: 0.30,
            keyword_coverage: 0.20,
            experience_relevance: 0.15,
            format_compliance: 0.15,
            content_quality: 0.10,
            gap_penalty: 0.05,
            completeness: 0.05,
        }
    }
}

impl AtsWeights {
    fn as_array(&self) -> [(&'static str, f64); 7] {
        [
            ("skill_match", self.skill_match),
            ("keyword_coverage", self.keyword_coverage),
            ("experience_relevance", self.experience_relevance),
            ("format_compliance", self.format_compliance),
            ("content_quality", self.content_quality),
            ("gap_penalty", self.gap_penalty),
            ("completeness", self.completeness),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().map(|(_, w)| w).sum()
    }
}

/// Fixed stand-ins for sub-scores that have no model behind them yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderScores {
    pub experience_relevance: f64,
    pub format_compliance: f64,
    pub content_quality: f64,
    pub completeness: f64,
}

impl Default for PlaceholderScores {
    fn default() -> Self {
        Self {
            experience_relevance: 80.0,
            format_compliance: 95.0,
            content_quality: 75.0,
            completeness: 90.0,
        }
    }
}

/// Recruiter scan constants. Independent of the gap classifier's numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub base_rating: f64,
    pub experience_bonus: f64,
    pub experience_penalty: f64,
    pub education_bonus: f64,
    pub skills_bonus: f64,
    pub max_rating: f64,
    /// Ratings strictly above this move forward.
    pub move_forward_above: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            base_rating: 3.0,
            experience_bonus: 1.0,
            experience_penalty: 0.5,
            education_bonus: 0.5,
            skills_bonus: 0.5,
            max_rating: 5.0,
            move_forward_above: 3.5,
        }
    }
}

impl ScoringConfig {
    /// Reads a TOML override file and validates the merged result.
    pub fn from_toml_file(path: &Path) -> Result<Self, ScoringError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScoringError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ScoringError> {
        let config: ScoringConfig = toml::from_str(content)
            .map_err(|e| ScoringError::InvalidConfig(format!("failed to parse scoring config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        for (name, weight) in self.weights.as_array() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ScoringError::InvalidConfig(format!(
                    "weight '{name}' must be a non-negative number, got {weight}"
                )));
            }
        }

        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScoringError::InvalidConfig(format!(
                "ATS weights must sum to 1.0, got {sum}"
            )));
        }

        let unit_range = [
            ("presence_threshold", self.presence_threshold),
            ("severity.high_breakpoint", self.severity.high_breakpoint),
            ("severity.medium_breakpoint", self.severity.medium_breakpoint),
        ];
        for (name, value) in unit_range {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScoringError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        if self.severity.high_breakpoint < self.severity.medium_breakpoint {
            return Err(ScoringError::InvalidConfig(
                "severity.high_breakpoint must not be below severity.medium_breakpoint".to_string(),
            ));
        }

        let deltas = [
            ("severity.high_delta", self.severity.high_delta),
            ("severity.medium_delta", self.severity.medium_delta),
            ("severity.low_delta", self.severity.low_delta),
        ];
        for (name, delta) in deltas {
            if delta >= 0 {
                return Err(ScoringError::InvalidConfig(format!(
                    "{name} must be negative, got {delta}"
                )));
            }
        }

        let placeholders = [
            ("placeholders.experience_relevance", self.placeholders.experience_relevance),
            ("placeholders.format_compliance", self.placeholders.format_compliance),
            ("placeholders.content_quality", self.placeholders.content_quality),
            ("placeholders.completeness", self.placeholders.completeness),
        ];
        for (name, value) in placeholders {
            if !(0.0..=100.0).contains(&value) {
                return Err(ScoringError::InvalidConfig(format!(
                    "{name} must be within [0, 100], got {value}"
                )));
            }
        }

        Ok(())
    }
}
