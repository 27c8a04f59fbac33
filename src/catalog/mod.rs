//! Static topic and audience-segment catalogs with seeded perturbation.

pub mod segments;
pub mod topics;

pub use segments::{generate_segments, AudienceSegment, DEFAULT_SEGMENT_SEED};
pub use topics::{generate_topics, TopicItem, DEFAULT_CATALOG_SEED};
