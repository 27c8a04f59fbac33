use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const DEFAULT_SEGMENT_SEED: u64 = 11;

const SHARE_NOISE: f64 = 0.03;
const SHARE_FLOOR: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceSegment {
    pub name: String,
    pub share: f64,
    pub focus: String,
}

impl AudienceSegment {
    /// Share as a whole percentage, the way segment tables display it.
    pub fn share_percent(&self) -> f64 {
        (self.share * 100.0).round()
    }
}

const SEGMENTS: [(&str, f64, &str); 4] = [
    ("S2 Practical learners", 0.34, "how-to, micro-lessons, checklists"),
    ("S1 Tech-aware", 0.28, "AI, security, analytics"),
    ("S3 Visual-first", 0.21, "design, templates, UI tips"),
    ("S4 Mixed casual", 0.17, "light reviews, topic mix"),
];

/// Perturbs the base shares, floors them at 0.05, renormalizes to 1.0 and
/// returns segments sorted by share, largest first.
pub fn generate_segments(seed: u64) -> Vec<AudienceSegment> {
    let mut rng = StdRng::seed_from_u64(seed);

    let perturbed: Vec<f64> = SEGMENTS
        .iter()
        .map(|(_, share, _)| (share + rng.gen_range(-SHARE_NOISE..=SHARE_NOISE)).max(SHARE_FLOOR))
        .collect();
    let total: f64 = perturbed.iter().sum();

    let mut segments: Vec<AudienceSegment> = SEGMENTS
        .iter()
        .zip(perturbed)
        .map(|((name, _, focus), share)| AudienceSegment {
            name: name.to_string(),
            share: share / total,
            focus: focus.to_string(),
        })
        .collect();

    segments.sort_by(|a, b| b.share.partial_cmp(&a.share).unwrap_or(Ordering::Equal));
    segments
}
