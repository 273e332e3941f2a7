//! # Shiori
//!
//! Typed media library resolution from unstructured directory trees.
//! See [`shiori_core`] for the resolver chain and naming conventions.

pub use shiori_core::*;
