//! Scoring engine: one stateless service object wiring the scoring capabilities.
//!
//! Built once at startup and shared as `Arc<ScoringEngine>` in `AppState`.
//! Every call re-fits its own vectors, so concurrent requests share nothing mutable.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scoring::ats::{
    AtsAggregator, AtsScore, CaseInsensitiveSkillMatcher, PlaceholderStructuralScorer,
    SkillMatcher, SkillOverlapMatcher, StructuralScorer,
};
use crate::scoring::config::{ScoringConfig, SkillMatching};
use crate::scoring::document::{JobDescription, ResumeDocument};
use crate::scoring::gaps::{GapAnalysis, TextSimilarityScorer, TfIdfGapAnalyzer};
use crate::scoring::scan::{ScanSimulation, ScanSimulator};
use crate::scoring::ScoringError;

/// Gap analysis plus the aggregate ATS score derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub ats_score: AtsScore,
    pub gap_analysis: GapAnalysis,
}

/// Everything the score endpoint returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub ats_score: AtsScore,
    pub gap_analysis: GapAnalysis,
    pub interviewer_simulation: ScanSimulation,
}

pub struct ScoringEngine {
    config: ScoringConfig,
    text_scorer: Arc<dyn TextSimilarityScorer>,
    skill_matcher: Arc<dyn SkillMatcher>,
    structural_scorer: Arc<dyn StructuralScorer>,
    scan: ScanSimulator,
}

impl ScoringEngine {
    /// Engine with the default TF-IDF, skill-overlap and placeholder capabilities.
    /// The skill matcher follows `config.skill_matching`.
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringError> {
        config.validate()?;
        let text_scorer = Arc::new(TfIdfGapAnalyzer::new(&config)?);
        let structural_scorer = Arc::new(PlaceholderStructuralScorer(config.placeholders.clone()));
        let skill_matching = config.skill_matching;
        let engine = Self {
            scan: ScanSimulator::new(config.scan.clone()),
            config,
            text_scorer,
            skill_matcher: Arc::new(SkillOverlapMatcher),
            structural_scorer,
        };

        Ok(match skill_matching {
            SkillMatching::Exact => engine,
            SkillMatching::CaseInsensitive => {
                engine.with_skill_matcher(Arc::new(CaseInsensitiveSkillMatcher))
            }
        })
    }

    pub fn with_skill_matcher(mut self, matcher: Arc<dyn SkillMatcher>) -> Self {
        self.skill_matcher = matcher;
        self
    }

    #[allow(dead_code)]
    pub fn with_structural_scorer(mut self, scorer: Arc<dyn StructuralScorer>) -> Self {
        self.structural_scorer = scorer;
        self
    }

    #[allow(dead_code)]
    pub fn with_text_scorer(mut self, scorer: Arc<dyn TextSimilarityScorer>) -> Self {
        self.text_scorer = scorer;
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn analyze_gaps(&self, resume: &ResumeDocument, jd: &JobDescription) -> GapAnalysis {
        self.text_scorer
            .analyze_gaps(&jd.text, &resume.text_projection())
    }

    /// Gap analysis first, then aggregation over its result.
    pub fn score(&self, resume: &ResumeDocument, jd: &JobDescription) -> ScoreReport {
        let gap_analysis = self.analyze_gaps(resume, jd);
        let aggregator = AtsAggregator {
            weights: &self.config.weights,
            penalty: &self.config.penalty,
            skills: self.skill_matcher.as_ref(),
            structure: self.structural_scorer.as_ref(),
        };
        let ats_score = aggregator.score(resume, jd, &gap_analysis);

        debug!(
            overall_score = ats_score.overall_score,
            match_score = gap_analysis.overall_match_score,
            critical_gaps = gap_analysis.critical.len(),
            medium_gaps = gap_analysis.medium.len(),
            "resume scored"
        );

        ScoreReport {
            ats_score,
            gap_analysis,
        }
    }

    pub fn simulate_scan(&self, resume: &ResumeDocument) -> ScanSimulation {
        self.scan.simulate_scan(resume)
    }

    /// Runs scoring and the scan side by side; they share no inputs but the resume.
    pub fn evaluate(&self, resume: &ResumeDocument, jd: &JobDescription) -> Evaluation {
        let (report, interviewer_simulation) = std::thread::scope(|s| {
            let scan = s.spawn(|| self.simulate_scan(resume));
            let report = self.score(resume, jd);
            let scan = scan
                .join()
                .unwrap_or_else(|_| self.simulate_scan(resume));
            (report, scan)
        });

        Evaluation {
            ats_score: report.ats_score,
            gap_analysis: report.gap_analysis,
            interviewer_simulation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const JD_TEXT: &str = "Senior Python Developer with FastAPI, React, AWS, Docker, CI/CD";

    fn engine() -> ScoringEngine {
        ScoringEngine::new(ScoringConfig::default()).unwrap()
    }

    fn resume() -> ResumeDocument {
        ResumeDocument::from_value(json!({
            "skills": ["Python", "Docker", "AWS"],
            "experience": [],
            "education": [{"degree": "BSc Computer Science"}]
        }))
        .unwrap()
    }

    fn jd(skills: &[&str]) -> JobDescription {
        JobDescription {
            text: JD_TEXT.to_string(),
            primary_skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_end_to_end_partial_match() {
        let report = engine().score(&resume(), &jd(&["Python", "FastAPI", "React", "AWS", "Docker"]));
        let gaps = &report.gap_analysis;

        let strengths: Vec<&str> = gaps.strengths.iter().map(|s| s.requirement.as_str()).collect();
        for term in ["python", "docker", "aws"] {
            assert!(strengths.contains(&term));
        }
        let missing: Vec<&str> = gaps.missing_skills.iter().map(|m| m.skill.as_str()).collect();
        for term in ["fastapi", "react", "ci", "cd"] {
            assert!(missing.contains(&term));
        }
        assert!(gaps.overall_match_score > 0.0 && gaps.overall_match_score < 100.0);

        assert_eq!(report.ats_score.breakdown.skill_match, 60.0);
        assert_eq!(
            report.ats_score.breakdown.keyword_coverage,
            gaps.overall_match_score
        );
        assert!((0.0..=100.0).contains(&report.ats_score.overall_score));
    }

    #[test]
    fn test_default_skill_match_is_case_sensitive() {
        let report = engine().score(&resume(), &jd(&["python", "docker", "aws"]));
        assert_eq!(report.ats_score.breakdown.skill_match, 0.0);
    }

    #[test]
    fn test_case_insensitive_skill_matching_from_config() {
        let config = ScoringConfig {
            skill_matching: SkillMatching::CaseInsensitive,
            ..ScoringConfig::default()
        };
        let e = ScoringEngine::new(config).unwrap();
        let report = e.score(&resume(), &jd(&["python", "docker", "aws", "react"]));
        assert_eq!(report.ats_score.breakdown.skill_match, 75.0);
    }

    #[test]
    fn test_section_names_count_as_resume_text() {
        let jd = JobDescription {
            text: "Senior Python developer with experience in distributed systems".to_string(),
            primary_skills: vec![],
        };
        let gaps = engine().analyze_gaps(&resume(), &jd);
        assert!(gaps.strengths.iter().any(|s| s.requirement == "experience"));
        assert!(!gaps.missing_skills.iter().any(|m| m.skill == "experience"));
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let e = engine();
        let first = e.evaluate(&resume(), &jd(&["python"]));
        let second = e.evaluate(&resume(), &jd(&["python"]));
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_primary_skills_is_full_skill_match() {
        let report = engine().score(&resume(), &jd(&[]));
        assert_eq!(report.ats_score.breakdown.skill_match, 100.0);
    }

    #[test]
    fn test_degenerate_jd_scores_zero_coverage() {
        let jd = JobDescription {
            text: "the and of with".to_string(),
            primary_skills: vec![],
        };
        let report = engine().score(&resume(), &jd);
        assert_eq!(report.gap_analysis.overall_match_score, 0.0);
        assert_eq!(report.ats_score.breakdown.keyword_coverage, 0.0);
    }

    #[test]
    fn test_evaluate_includes_scan() {
        let eval = engine().evaluate(&resume(), &jd(&[]));
        let p = &eval.interviewer_simulation.recruiter_perspective;
        assert_eq!(p.rating, 3.0);
        assert_eq!(p.concerns, vec!["Lack of experience details"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ScoringConfig::default();
        config.weights.content_quality = 0.5;
        assert!(ScoringEngine::new(config).is_err());
    }

    struct FixedStructure;

    impl StructuralScorer for FixedStructure {
        fn experience_relevance(&self, _resume: &ResumeDocument) -> f64 {
            0.0
        }
        fn format_compliance(&self, _resume: &ResumeDocument) -> f64 {
            0.0
        }
        fn content_quality(&self, _resume: &ResumeDocument) -> f64 {
            0.0
        }
        fn completeness(&self, _resume: &ResumeDocument) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_structural_scorer_is_swappable() {
        let e = engine().with_structural_scorer(Arc::new(FixedStructure));
        let report = e.score(&resume(), &jd(&[]));
        assert_eq!(report.ats_score.breakdown.experience_relevance, 0.0);
        assert_eq!(report.ats_score.breakdown.format_compliance, 0.0);
    }

    struct FixedSkills(f64);

    impl SkillMatcher for FixedSkills {
        fn skill_match(&self, _resume: &ResumeDocument, _jd: &JobDescription) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_skill_matcher_is_swappable() {
        let e = engine().with_skill_matcher(Arc::new(FixedSkills(42.0)));
        let report = e.score(&resume(), &jd(&["python"]));
        assert_eq!(report.ats_score.breakdown.skill_match, 42.0);
    }

    struct FixedText;

    impl TextSimilarityScorer for FixedText {
        fn analyze_gaps(&self, _jd_text: &str, _resume_text: &str) -> GapAnalysis {
            GapAnalysis {
                overall_match_score: 12.5,
                improvement_suggestions: vec![],
                strengths: vec![],
                keyword_gaps: vec![],
                missing_skills: vec![],
                critical: vec![],
                medium: vec![],
            }
        }
    }

    #[test]
    fn test_text_scorer_is_swappable() {
        let e = engine().with_text_scorer(Arc::new(FixedText));
        let report = e.score(&resume(), &jd(&[]));
        assert_eq!(report.gap_analysis.overall_match_score, 12.5);
        assert_eq!(report.ats_score.breakdown.keyword_coverage, 12.5);
        // no suggestions, full skill match: 30 + 2.5 + 12 + 14.25 + 7.5 + 5 + 4.5
        assert_eq!(report.ats_score.overall_score, 75.8);
    }
}
