//! # Folder Resolvers
//!
//! Each resolver decides whether a directory is an instance of one library
//! item type. Resolvers are collected into a [`ResolutionChain`], evaluated in
//! ascending [`ResolverPriority`], and the first acceptance wins.

pub mod chain;
pub mod init;
pub mod movie;
pub mod season;
pub mod series;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{ItemType, ResolveContext};

pub use chain::{ResolutionChain, ResolutionChainBuilder, ResolverDescriptor};
pub use init::ItemInitializer;
pub use movie::MovieResolver;
pub use season::SeasonResolver;
pub use series::SeriesResolver;

/// Evaluation rank of a resolver. Lower ranks run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResolverPriority(pub i32);

impl ResolverPriority {
    pub const FIRST: Self = Self(1);
    pub const SECOND: Self = Self(2);
    pub const THIRD: Self = Self(3);
    pub const LAST: Self = Self(i32::MAX);
}

impl fmt::Display for ResolverPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::FIRST => f.write_str("First"),
            Self::SECOND => f.write_str("Second"),
            Self::THIRD => f.write_str("Third"),
            Self::LAST => f.write_str("Last"),
            Self(n) => write!(f, "{n}"),
        }
    }
}

/// A classifier for one library item type.
pub trait FolderResolver: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// The only item type this resolver ever produces.
    fn item_type(&self) -> ItemType;

    /// Default evaluation rank.
    fn priority(&self) -> ResolverPriority;

    /// Returns the resolver's item type if `context` is an instance of it.
    ///
    /// Must not perform I/O: everything needed is already in the context.
    fn try_classify(&self, context: &ResolveContext) -> Option<ItemType>;
}

/// Shared gate for folder resolvers: the candidate must be a directory with a
/// parent that is neither absent nor the library root, and whose parent item
/// type is not one of `excluded`.
pub(crate) fn accepts_parent(context: &ResolveContext, excluded: &[ItemType]) -> bool {
    if !context.is_dir() {
        return false;
    }

    match context.parent() {
        None => false,
        Some(parent) if parent.is_root() => false,
        Some(parent) => parent
            .item_type()
            .is_none_or(|t| !excluded.contains(&t)),
    }
}
