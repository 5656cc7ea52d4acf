//! Engine input documents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::scoring::ScoringError;

/// A structured resume. `skills`, `experience` and `education` are required;
/// everything else is carried along only for the text projection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub skills: Vec<String>,
    pub experience: Vec<Value>,
    pub education: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResumeDocument {
    /// Validates the shape of a raw resume payload.
    pub fn from_value(value: Value) -> Result<Self, ScoringError> {
        if !value.is_object() {
            return Err(ScoringError::InvalidInput(
                "resume must be a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value)
            .map_err(|e| ScoringError::InvalidInput(format!("malformed resume: {e}")))
    }

    /// Flattens the whole resume, object keys included, into one
    /// space-separated document. Section names such as "experience" and
    /// "skills" are therefore always part of the text.
    pub fn text_projection(&self) -> String {
        let mut parts: Vec<String> = vec!["skills".to_string()];
        parts.extend(self.skills.iter().cloned());

        parts.push("experience".to_string());
        self.experience.iter().for_each(|v| collect_text(v, &mut parts));

        parts.push("education".to_string());
        self.education.iter().for_each(|v| collect_text(v, &mut parts));

        for (key, value) in &self.extra {
            parts.push(key.clone());
            collect_text(value, &mut parts);
        }
        parts.join(" ")
    }
}

fn collect_text(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Number(n) => out.push(n.to_string()),
        Value::Bool(b) => out.push(b.to_string()),
        Value::Array(items) => items.iter().for_each(|v| collect_text(v, out)),
        Value::Object(map) => {
            for (key, v) in map {
                out.push(key.clone());
                collect_text(v, out);
            }
        }
        Value::Null => {}
    }
}

/// Job description as handed over by the extraction layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobDescription {
    pub text: String,
    #[serde(default)]
    pub primary_skills: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_resume_parses() {
        let resume = ResumeDocument::from_value(json!({
            "skills": ["Rust"],
            "experience": [],
            "education": [{"school": "MIT"}],
            "personalInfo": {"name": "Ada"}
        }))
        .unwrap();
        assert_eq!(resume.skills, vec!["Rust"]);
        assert!(resume.extra.contains_key("personalInfo"));
    }

    #[test]
    fn test_missing_required_key_is_invalid_input() {
        let err = ResumeDocument::from_value(json!({
            "skills": ["Rust"],
            "experience": []
        }))
        .unwrap_err();
        assert!(matches!(err, ScoringError::InvalidInput(_)));
    }

    #[test]
    fn test_wrong_shape_is_invalid_input() {
        let err = ResumeDocument::from_value(json!({
            "skills": "Rust, Go",
            "experience": [],
            "education": []
        }))
        .unwrap_err();
        assert!(matches!(err, ScoringError::InvalidInput(_)));
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(ResumeDocument::from_value(json!(["skills"])).is_err());
    }

    #[test]
    fn test_projection_includes_keys_and_values() {
        let resume = ResumeDocument::from_value(json!({
            "skills": ["Python"],
            "experience": [{"company": "Acme", "years": 4, "remote": true}],
            "education": [],
            "summary": "Backend engineer",
            "links": null
        }))
        .unwrap();
        let words: Vec<String> = resume
            .text_projection()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        for word in [
            "skills", "Python", "experience", "company", "Acme", "years", "4", "remote", "true",
            "education", "summary", "Backend", "engineer", "links",
        ] {
            assert!(words.iter().any(|w| w == word), "missing {word}");
        }
        assert!(!words.iter().any(|w| w == "null"));
    }

    #[test]
    fn test_empty_sections_still_project_section_names() {
        let resume = ResumeDocument::default();
        assert_eq!(resume.text_projection(), "skills experience education");
    }

    #[test]
    fn test_jd_primary_skills_default_empty() {
        let jd: JobDescription = serde_json::from_value(json!({"text": "x"})).unwrap();
        assert!(jd.primary_skills.is_empty());
    }
}
