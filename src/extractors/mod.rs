// src/extractors/mod.rs
pub mod address;
pub mod patterns;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use address::{
    extract_address_from_booktitle,
    ExtractedAddress,
    MatchPath,
    SegmentClassifier,
    SegmentRole,
};
