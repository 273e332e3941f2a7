//! # Shiori Core
//!
//! Turns directories found while scanning a media library into typed library
//! items. Each item type has a folder resolver; a [`ResolutionChain`] runs
//! them in priority order and the first one that accepts a folder decides its
//! type, after which the [`ItemInitializer`] fills in path, name, sidecar
//! metadata files and provider identifiers.
//!
//! ## Quick Start
//!
//! ```rust
//! use shiori_core::{ItemId, ParentRef, ResolutionChain, ResolveContext, ResolverConfig};
//!
//! let chain = ResolutionChain::with_defaults(&ResolverConfig::default()).unwrap();
//! let context = ResolveContext::directory("/tv/Show Name [tvdbid=12345]")
//!     .with_parent(ParentRef::Folder(ItemId(1)));
//!
//! let item = chain.resolve(&context).unwrap();
//! assert_eq!(item.name, "Show Name");
//! assert_eq!(item.provider_ids.get("Tvdb").map(String::as_str), Some("12345"));
//! ```
pub mod config;
pub mod error;
pub mod naming;
pub mod resolver;
pub mod types;

// Re-export primary API
pub use config::ResolverConfig;
pub use error::{Result, ShioriError};
pub use naming::{SeriesLayout, TvNaming};
pub use resolver::{
    FolderResolver, ItemInitializer, MovieResolver, ResolutionChain, ResolutionChainBuilder,
    ResolverDescriptor, ResolverPriority, SeasonResolver, SeriesResolver,
};
pub use types::{FileEntry, Item, ItemId, ItemType, MetadataProvider, ParentRef, ResolveContext};
