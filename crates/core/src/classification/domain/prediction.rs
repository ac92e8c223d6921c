use crate::shared::constants::VIOLENCE_THRESHOLD;

/// Verdict derived from one classifier score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    score: f64,
}

impl Prediction {
    /// `score` is the probability of the violent class, in `[0, 1]`.
    pub fn from_score(score: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&score), "score must be a probability");
        Self { score }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn is_violent(&self) -> bool {
        self.score > VIOLENCE_THRESHOLD
    }

    /// Probability of the winning class; never below 0.5.
    pub fn confidence(&self) -> f64 {
        if self.is_violent() {
            self.score
        } else {
            1.0 - self.score
        }
    }

    /// [`confidence`](Self::confidence) rounded to 4 decimal places.
    pub fn rounded_confidence(&self) -> f64 {
        (self.confidence() * 10_000.0).round() / 10_000.0
    }

    pub fn message(&self) -> &'static str {
        if self.is_violent() {
            "Video contains violent content"
        } else {
            "Video appears to be non-violent"
        }
    }
}
