//! Gap Classifier: turns JD terms into strengths and severity-tagged gaps.
//!
//! Algorithm:
//! 1. Fit TF-IDF over {JD, resume} and take the cosine match score.
//! 2. Walk JD terms in vocabulary order, skipping terms below the presence threshold.
//! 3. Present in resume → strength. Absent → gap, severity from the JD-side weight.
//! 4. Project gaps (critical first, then medium) into suggestions, keyword gaps
//!    and missing skills; pad short suggestion lists with one filler tip.

use serde::{Deserialize, Serialize};

use crate::scoring::config::{ScoringConfig, SeverityConfig};
use crate::scoring::similarity::{is_present, match_score};
use crate::scoring::vectorizer::TfIdfVectorizer;
use crate::scoring::ScoringError;

const FILLER_SUGGESTION_ID: u32 = 999;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
}

impl From<Severity> for Priority {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::High => Priority::High,
            Severity::Medium | Severity::Low => Priority::Medium,
        }
    }
}

/// A JD requirement term missing from the resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapRecord {
    pub requirement: String,
    pub similarity: f64,
    /// Score delta, always negative.
    pub impact: i32,
    pub severity: Severity,
    pub action: String,
}

/// A JD requirement term found in the resume. Serialized as {area, score, description}.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthRecord {
    #[serde(skip_serializing, default)]
    pub requirement: String,
    pub area: String,
    pub score: u32,
    pub description: String,
    /// Always 1.0: presence counts as a full match, whatever the resume weight.
    #[serde(skip)]
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementSuggestion {
    pub id: u32,
    pub title: String,
    pub category: String,
    pub priority: Priority,
    pub current: String,
    pub suggested: String,
    pub impact: String,
    #[serde(rename = "aiGenerated")]
    pub ai_generated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordGap {
    pub keyword: String,
    pub found: bool,
    pub occurrences: u32,
    pub recommended: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingSkill {
    pub skill: String,
    pub importance: Priority,
    pub suggestions: String,
}

/// Full gap report. The `critical` and `medium` gap records are kept for
/// callers and logging; they are not part of the serialized report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub overall_match_score: f64,
    pub improvement_suggestions: Vec<ImprovementSuggestion>,
    pub strengths: Vec<StrengthRecord>,
    pub keyword_gaps: Vec<KeywordGap>,
    pub missing_skills: Vec<MissingSkill>,
    #[serde(skip)]
    pub critical: Vec<GapRecord>,
    #[serde(skip)]
    pub medium: Vec<GapRecord>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Text-similarity capability: JD text vs resume text → gap report.
pub trait TextSimilarityScorer: Send + Sync {
    fn analyze_gaps(&self, jd_text: &str, resume_text: &str) -> GapAnalysis;
}

// ────────────────────────────────────────────────────────────────────────────
// TF-IDF implementation
// ────────────────────────────────────────────────────────────────────────────

pub struct TfIdfGapAnalyzer {
    vectorizer: TfIdfVectorizer,
    presence_threshold: f64,
    severity: SeverityConfig,
    min_suggestions: usize,
}

impl TfIdfGapAnalyzer {
    pub fn new(config: &ScoringConfig) -> Result<Self, ScoringError> {
        Ok(Self {
            vectorizer: TfIdfVectorizer::new()?,
            presence_threshold: config.presence_threshold,
            severity: config.severity.clone(),
            min_suggestions: config.min_suggestions,
        })
    }

    /// Terms weighted strictly below the threshold are noise.
    pub fn is_requirement(&self, jd_weight: f64) -> bool {
        jd_weight >= self.presence_threshold
    }

    pub fn classify(&self, jd_weight: f64) -> (Severity, i32) {
        classify_severity(jd_weight, &self.severity)
    }
}

impl TextSimilarityScorer for TfIdfGapAnalyzer {
    fn analyze_gaps(&self, jd_text: &str, resume_text: &str) -> GapAnalysis {
        let weights = self.vectorizer.fit_transform(jd_text, resume_text);
        let overall_match_score = match_score(&weights);

        let mut strengths = Vec::new();
        let mut critical = Vec::new();
        let mut medium = Vec::new();

        for (term, jd_weight, resume_weight) in weights.iter() {
            if !self.is_requirement(jd_weight) {
                continue;
            }

            if is_present(resume_weight) {
                strengths.push(strength_for(term));
                continue;
            }

            let (severity, impact) = self.classify(jd_weight);
            let gap = GapRecord {
                requirement: term.to_string(),
                similarity: 0.0,
                impact,
                severity,
                action: format!("Add experience with {term}"),
            };
            if severity == Severity::High {
                critical.push(gap);
            } else {
                medium.push(gap);
            }
        }

        let mut improvement_suggestions = Vec::new();
        let mut keyword_gaps = Vec::new();
        let mut missing_skills = Vec::new();

        for (i, gap) in critical.iter().chain(medium.iter()).enumerate() {
            let priority = Priority::from(gap.severity);
            let term = &gap.requirement;

            improvement_suggestions.push(ImprovementSuggestion {
                id: i as u32,
                title: format!("Missing Keyword: {term}"),
                category: "Keywords".to_string(),
                priority,
                current: "Not found in resume".to_string(),
                suggested: format!("Include '{term}' in your experience or skills section."),
                impact: "High penalty on ATS score".to_string(),
                ai_generated: false,
            });

            keyword_gaps.push(KeywordGap {
                keyword: term.clone(),
                found: false,
                occurrences: 0,
                recommended: "1+".to_string(),
            });

            missing_skills.push(MissingSkill {
                skill: term.clone(),
                importance: priority,
                suggestions: format!("Add {term} to your Skills section."),
            });
        }

        if improvement_suggestions.len() < self.min_suggestions {
            improvement_suggestions.push(filler_suggestion());
        }

        tracing::debug!(
            match_score = overall_match_score,
            strengths = strengths.len(),
            critical = critical.len(),
            medium = medium.len(),
            "gap analysis complete"
        );

        GapAnalysis {
            overall_match_score,
            improvement_suggestions,
            strengths,
            keyword_gaps,
            missing_skills,
            critical,
            medium,
        }
    }
}

/// Fixed break points, strict `>` on both.
pub fn classify_severity(jd_weight: f64, severity: &SeverityConfig) -> (Severity, i32) {
    if jd_weight > severity.high_breakpoint {
        (Severity::High, severity.high_delta)
    } else if jd_weight > severity.medium_breakpoint {
        (Severity::Medium, severity.medium_delta)
    } else {
        (Severity::Low, severity.low_delta)
    }
}

fn strength_for(term: &str) -> StrengthRecord {
    StrengthRecord {
        requirement: term.to_string(),
        area: format!("Proficiency in {term}"),
        score: 100,
        description: format!("You have successfully highlighted {term}."),
        similarity: 1.0,
    }
}

fn filler_suggestion() -> ImprovementSuggestion {
    ImprovementSuggestion {
        id: FILLER_SUGGESTION_ID,
        title: "Quantify Achievements".to_string(),
        category: "Content".to_string(),
        priority: Priority::Medium,
        current: "Generic descriptions".to_string(),
        suggested: "Add metrics (e.g., 'Improved performance by 20%')".to_string(),
        impact: "Increases impact score".to_string(),
        ai_generated: true,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
