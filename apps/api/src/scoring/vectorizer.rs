//! Text Vectorizer: TF-IDF term weights for one JD/resume pair.
//!
//! Fitting happens per call over the two-document corpus {JD, resume}; nothing
//! corpus-wide survives between calls. Only the compiled token pattern and the
//! stop-word set are built once.
//!
//! Weighting:
//! - tokens: lowercase runs of ≥2 word characters, stop words dropped
//! - tf: raw count within the document
//! - idf: ln((1 + n) / (1 + df)) + 1, n = 2
//! - each vector L2-normalised (a zero vector stays zero)

use std::collections::{BTreeMap, HashMap, HashSet};

use regex::Regex;

use crate::scoring::stop_words::stop_word_set;
use crate::scoring::ScoringError;

const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Two aligned weight vectors over a shared, sorted vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct TermWeights {
    pub vocabulary: Vec<String>,
    pub jd: Vec<f64>,
    pub resume: Vec<f64>,
}

impl TermWeights {
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Iterates `(term, jd_weight, resume_weight)` in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64, f64)> + '_ {
        self.vocabulary
            .iter()
            .zip(self.jd.iter().zip(self.resume.iter()))
            .map(|(term, (jd, resume))| (term.as_str(), *jd, *resume))
    }
}

pub struct TfIdfVectorizer {
    token_pattern: Regex,
    stop_words: HashSet<&'static str>,
}

impl TfIdfVectorizer {
    pub fn new() -> Result<Self, ScoringError> {
        let token_pattern = Regex::new(TOKEN_PATTERN)
            .map_err(|e| ScoringError::InvalidConfig(format!("bad token pattern: {e}")))?;
        Ok(Self {
            token_pattern,
            stop_words: stop_word_set(),
        })
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.token_pattern
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .map(str::to_string)
            .collect()
    }

    pub fn fit_transform(&self, jd_text: &str, resume_text: &str) -> TermWeights {
        let jd_counts = count_terms(self.tokenize(jd_text));
        let resume_counts = count_terms(self.tokenize(resume_text));

        // BTreeMap gives the sorted vocabulary and each term's document frequency
        let mut doc_freq: BTreeMap<&str, u32> = BTreeMap::new();
        for term in jd_counts.keys().chain(resume_counts.keys()) {
            *doc_freq.entry(term.as_str()).or_insert(0) += 1;
        }

        let n_docs = 2.0_f64;
        let mut vocabulary = Vec::with_capacity(doc_freq.len());
        let mut jd = Vec::with_capacity(doc_freq.len());
        let mut resume = Vec::with_capacity(doc_freq.len());

        for (term, df) in &doc_freq {
            let idf = ((1.0 + n_docs) / (1.0 + f64::from(*df))).ln() + 1.0;
            let tf_jd = jd_counts.get(*term).copied().unwrap_or(0);
            let tf_resume = resume_counts.get(*term).copied().unwrap_or(0);
            vocabulary.push(term.to_string());
            jd.push(f64::from(tf_jd) * idf);
            resume.push(f64::from(tf_resume) * idf);
        }

        l2_normalize(&mut jd);
        l2_normalize(&mut resume);

        tracing::debug!(
            vocabulary = vocabulary.len(),
            jd_terms = jd_counts.len(),
            resume_terms = resume_counts.len(),
            "fitted tf-idf vectors"
        );

        TermWeights {
            vocabulary,
            jd,
            resume,
        }
    }
}

fn count_terms(tokens: Vec<String>) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

fn l2_normalize(vector: &mut [f64]) {
    let norm = vector.iter().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 && norm.is_finite() {
        vector.iter_mut().for_each(|w| *w /= norm);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer() -> TfIdfVectorizer {
        TfIdfVectorizer::new().unwrap()
    }

    #[test]
    fn test_tokenize_lowercases_and_drops_stop_words() {
        let tokens = vectorizer().tokenize("Senior Python Developer with FastAPI");
        assert_eq!(tokens, vec!["senior", "python", "developer", "fastapi"]);
    }

    #[test]
    fn test_tokenize_drops_single_characters() {
        let tokens = vectorizer().tokenize("C R CI/CD");
        assert_eq!(tokens, vec!["ci", "cd"]);
    }

    #[test]
    fn test_vectors_are_aligned() {
        let w = vectorizer().fit_transform("rust tokio axum", "python rust");
        assert_eq!(w.vocabulary.len(), w.jd.len());
        assert_eq!(w.vocabulary.len(), w.resume.len());
        assert_eq!(w.vocabulary, vec!["axum", "python", "rust", "tokio"]);
    }

    #[test]
    fn test_weights_are_unit_normalised_and_bounded() {
        let w = vectorizer().fit_transform("rust rust tokio axum", "python rust");
        let norm: f64 = w.jd.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
        assert!(w.jd.iter().chain(w.resume.iter()).all(|x| (0.0..=1.0).contains(x)));
    }

    #[test]
    fn test_shared_terms_weigh_less_than_unique_terms() {
        let w = vectorizer().fit_transform("rust tokio", "rust");
        let rust = w.iter().find(|(t, _, _)| *t == "rust").unwrap().1;
        let tokio = w.iter().find(|(t, _, _)| *t == "tokio").unwrap().1;
        assert!(tokio > rust);
        // idf(shared) = 1, idf(unique) = ln(1.5) + 1
        let expected_ratio = 1.5_f64.ln() + 1.0;
        assert!((tokio / rust - expected_ratio).abs() < 1e-12);
    }

    #[test]
    fn test_stop_word_only_documents_give_empty_vocabulary() {
        let w = vectorizer().fit_transform("the and of", "with a the");
        assert!(w.is_empty());
    }

    #[test]
    fn test_empty_resume_keeps_jd_terms_with_zero_resume_weights() {
        let w = vectorizer().fit_transform("kubernetes terraform", "");
        assert_eq!(w.vocabulary.len(), 2);
        assert!(w.resume.iter().all(|x| *x == 0.0));
    }
}
