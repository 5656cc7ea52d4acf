//! ATS Aggregator: blends sub-scores into one weighted overall score.
//!
//! The aggregator only owns the formula. Sub-scores come from pluggable
//! capabilities so placeholder numbers can be replaced by real models:
//! - `SkillMatcher`: JD primary skills vs resume skills
//! - `StructuralScorer`: experience relevance, format, content quality, completeness
//! - keyword coverage: reused from the gap analysis match score

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::scoring::config::{AtsWeights, PenaltyConfig, PlaceholderScores};
use crate::scoring::document::{JobDescription, ResumeDocument};
use crate::scoring::gaps::{GapAnalysis, Priority};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skill_match: f64,
    pub keyword_coverage: f64,
    pub experience_relevance: f64,
    pub format_compliance: f64,
    pub content_quality: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsScore {
    pub overall_score: f64,
    pub breakdown: ScoreBreakdown,
}

// ────────────────────────────────────────────────────────────────────────────
// Capabilities
// ────────────────────────────────────────────────────────────────────────────

pub trait SkillMatcher: Send + Sync {
    /// 0–100.
    fn skill_match(&self, resume: &ResumeDocument, jd: &JobDescription) -> f64;
}

/// Structural sub-scores, each 0–100.
pub trait StructuralScorer: Send + Sync {
    fn experience_relevance(&self, resume: &ResumeDocument) -> f64;
    fn format_compliance(&self, resume: &ResumeDocument) -> f64;
    fn content_quality(&self, resume: &ResumeDocument) -> f64;
    fn completeness(&self, resume: &ResumeDocument) -> f64;
}

/// Share of distinct JD primary skills listed verbatim in the resume.
/// Comparison is exact, so "Python" and "python" do not match.
/// An empty JD skill set is a vacuous full match.
pub struct SkillOverlapMatcher;

impl SkillMatcher for SkillOverlapMatcher {
    fn skill_match(&self, resume: &ResumeDocument, jd: &JobDescription) -> f64 {
        let jd_skills: HashSet<&str> = jd.primary_skills.iter().map(String::as_str).collect();
        let resume_skills: HashSet<&str> = resume.skills.iter().map(String::as_str).collect();
        overlap_percent(&jd_skills, &resume_skills)
    }
}

/// Same overlap, with both sides trimmed and lowercased first.
pub struct CaseInsensitiveSkillMatcher;

impl SkillMatcher for CaseInsensitiveSkillMatcher {
    fn skill_match(&self, resume: &ResumeDocument, jd: &JobDescription) -> f64 {
        let jd_skills = normalized_set(&jd.primary_skills);
        let resume_skills = normalized_set(&resume.skills);
        overlap_percent(&jd_skills, &resume_skills)
    }
}

fn overlap_percent<T: Eq + Hash>(jd_skills: &HashSet<T>, resume_skills: &HashSet<T>) -> f64 {
    if jd_skills.is_empty() {
        return 100.0;
    }
    let matched = jd_skills.intersection(resume_skills).count();
    matched as f64 / jd_skills.len() as f64 * 100.0
}

fn normalized_set(skills: &[String]) -> HashSet<String> {
    skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Returns fixed configured values regardless of the resume.
pub struct PlaceholderStructuralScorer(pub PlaceholderScores);

impl StructuralScorer for PlaceholderStructuralScorer {
    fn experience_relevance(&self, _resume: &ResumeDocument) -> f64 {
        self.0.experience_relevance
    }

    fn format_compliance(&self, _resume: &ResumeDocument) -> f64 {
        self.0.format_compliance
    }

    fn content_quality(&self, _resume: &ResumeDocument) -> f64 {
        self.0.content_quality
    }

    fn completeness(&self, _resume: &ResumeDocument) -> f64 {
        self.0.completeness
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregation
// ────────────────────────────────────────────────────────────────────────────

/// max(0, 100 − (high × m_c + medium × m_m)), counted over improvement
/// suggestions by priority. The filler suggestion is Medium and counts too.
pub fn gap_penalty_score(gaps: &GapAnalysis, penalty: &PenaltyConfig) -> f64 {
    let (high, medium) = gaps
        .improvement_suggestions
        .iter()
        .fold((0u32, 0u32), |(h, m), s| match s.priority {
            Priority::High => (h + 1, m),
            Priority::Medium => (h, m + 1),
        });
    let deduction =
        f64::from(high) * penalty.critical_multiplier + f64::from(medium) * penalty.medium_multiplier;
    (100.0 - deduction).max(0.0)
}

pub struct AtsAggregator<'a> {
    pub weights: &'a AtsWeights,
    pub penalty: &'a PenaltyConfig,
    pub skills: &'a dyn SkillMatcher,
    pub structure: &'a dyn StructuralScorer,
}

impl AtsAggregator<'_> {
    /// Gap analysis must already be computed: keyword coverage is its match score.
    pub fn score(
        &self,
        resume: &ResumeDocument,
        jd: &JobDescription,
        gaps: &GapAnalysis,
    ) -> AtsScore {
        let w = self.weights;

        let breakdown = ScoreBreakdown {
            skill_match: self.skills.skill_match(resume, jd),
            keyword_coverage: gaps.overall_match_score,
            experience_relevance: self.structure.experience_relevance(resume),
            format_compliance: self.structure.format_compliance(resume),
            content_quality: self.structure.content_quality(resume),
        };
        let gap_penalty = gap_penalty_score(gaps, self.penalty);
        let completeness = self.structure.completeness(resume);

        let overall = w.skill_match * breakdown.skill_match
            + w.keyword_coverage * breakdown.keyword_coverage
            + w.experience_relevance * breakdown.experience_relevance
            + w.format_compliance * breakdown.format_compliance
            + w.content_quality * breakdown.content_quality
            + w.gap_penalty * gap_penalty
            + w.completeness * completeness;

        AtsScore {
            overall_score: round_one_decimal(overall),
            breakdown,
        }
    }
}

/// Half-way cases go to the even neighbour: 93.25 → 93.2.
fn round_one_decimal(value: f64) -> f64 {
    if value.is_finite() {
        (value * 10.0).round_ties_even() / 10.0
    } else {
        0.0
    }
}
