//! # Naming Conventions
//!
//! Pure folder- and file-name tests: embedded identifier markers, the sidecar
//! metadata vocabulary, and TV season/episode naming.

pub mod marker;
pub mod sidecar;
pub mod tv;

pub use marker::{attribute_value, contains_tag, extract_tag, has_metadata_file, strip_tags};
pub use sidecar::{is_metadata_file, metadata_file_for};
pub use tv::{EpisodeNumber, SeriesLayout, TvNaming};
