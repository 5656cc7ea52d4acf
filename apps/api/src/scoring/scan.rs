//! Scan Simulator: a recruiter's quick first pass over resume structure.
//! Does not look at the JD.

use serde::{Deserialize, Serialize};

use crate::scoring::config::ScanConfig;
use crate::scoring::document::ResumeDocument;

const DEFAULT_IMPRESSION: &str = "The resume looks structured.";
const EXPERIENCE_IMPRESSION: &str = "Solid experience section stands out.";
const SCAN_TIME_NOTE: &str = " A recruiter would likely spend about 15 seconds scanning this.";

const LIKELY_QUESTIONS: &[&str] = &[
    "Can you walk me through your most recent project?",
    "How did you handle a difficult technical challenge?",
    "Why did you choose this tech stack?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Move Forward")]
    MoveForward,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruiterPerspective {
    pub first_impression: String,
    pub concerns: Vec<String>,
    pub recommendation: Recommendation,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikelyQuestion {
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSimulation {
    pub recruiter_perspective: RecruiterPerspective,
    pub likely_questions: Vec<LikelyQuestion>,
}

pub struct ScanSimulator {
    config: ScanConfig,
}

impl ScanSimulator {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn simulate_scan(&self, resume: &ResumeDocument) -> ScanSimulation {
        let c = &self.config;
        let mut rating = c.base_rating;
        let mut concerns = Vec::new();
        let mut impression = DEFAULT_IMPRESSION;

        if resume.experience.is_empty() {
            concerns.push("Lack of experience details".to_string());
            rating -= c.experience_penalty;
        } else {
            rating += c.experience_bonus;
            impression = EXPERIENCE_IMPRESSION;
        }

        if resume.education.is_empty() {
            concerns.push("Education section missing".to_string());
        } else {
            rating += c.education_bonus;
        }

        if resume.skills.is_empty() {
            concerns.push("Skills section underpopulated".to_string());
        } else {
            rating += c.skills_bonus;
        }

        let recommendation = if rating > c.move_forward_above {
            Recommendation::MoveForward
        } else {
            Recommendation::NeedsImprovement
        };

        ScanSimulation {
            recruiter_perspective: RecruiterPerspective {
                first_impression: format!("{impression}{SCAN_TIME_NOTE}"),
                concerns,
                recommendation,
                rating: rating.min(c.max_rating),
            },
            likely_questions: LIKELY_QUESTIONS
                .iter()
                .map(|q| LikelyQuestion {
                    question: q.to_string(),
                })
                .collect(),
        }
    }
}
