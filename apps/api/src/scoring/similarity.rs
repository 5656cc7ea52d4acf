//! Similarity Engine: cosine match score and per-term presence.

use crate::scoring::vectorizer::TermWeights;

/// Cosine similarity. Zero vectors, mismatched lengths and non-finite results all give 0.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let sim = dot / (norm_a * norm_b);
    if sim.is_finite() {
        sim.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// JD-vs-resume match on a 0–100 scale.
pub fn match_score(weights: &TermWeights) -> f64 {
    if weights.is_empty() {
        return 0.0;
    }
    cosine_similarity(&weights.jd, &weights.resume) * 100.0
}

/// A term is present in the resume when its resume weight is nonzero.
pub fn is_present(resume_weight: f64) -> bool {
    resume_weight > 0.0
}
