use serde::{Deserialize, Serialize};

pub const RISING_THRESHOLD: f64 = 0.03;
pub const FALLING_THRESHOLD: f64 = -0.03;
pub const CANDIDATE_THRESHOLD: f64 = 0.70;
pub const RESERVE_THRESHOLD: f64 = 0.55;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Stable,
    Falling,
}

impl Trend {
    pub fn label(self) -> &'static str {
        match self {
            Trend::Rising => "rising",
            Trend::Stable => "stable",
            Trend::Falling => "falling",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Candidate,
    Reserve,
    Review,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Candidate => "candidate",
            Status::Reserve => "reserve",
            Status::Review => "review",
        }
    }
}

/// Both trend bounds are strict: a delta of exactly ±0.03 is stable.
pub fn classify_trend(delta: f64) -> Trend {
    if delta > RISING_THRESHOLD {
        Trend::Rising
    } else if delta < FALLING_THRESHOLD {
        Trend::Falling
    } else {
        Trend::Stable
    }
}

/// Status bounds are inclusive.
pub fn classify_status(score: f64) -> Status {
    if score >= CANDIDATE_THRESHOLD {
        Status::Candidate
    } else if score >= RESERVE_THRESHOLD {
        Status::Reserve
    } else {
        Status::Review
    }
}
