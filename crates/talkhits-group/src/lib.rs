#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! talkhits-group
//!
//! Turns a flat page of segment hits into display items, merging the
//! segments of one talk into a single item with a map of its matching
//! transcript entries.

pub mod relevance;
pub mod transform;

pub use relevance::transcript_if_relevant;
pub use transform::{group_page, transform_to_transcripts, transform_with, GroupingOptions};
