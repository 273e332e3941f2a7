use thiserror::Error;

use crate::types::ItemType;

/// Errors that can occur while building resolvers or loading configuration.
///
/// Classification itself never fails: a folder that matches nothing is
/// reported as `None`, not as an error.
#[derive(Debug, Error)]
pub enum ShioriError {
    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// Two resolvers were registered for the same item type.
    #[error("more than one resolver registered for item type {0}")]
    DuplicateItemType(ItemType),

    /// The resolver configuration is unusable.
    #[error("invalid resolver configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for Shiori operations.
pub type Result<T> = std::result::Result<T, ShioriError>;
