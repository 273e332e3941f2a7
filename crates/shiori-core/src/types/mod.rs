pub mod context;
pub mod item;

pub use context::{FileEntry, ParentRef, ResolveContext};
pub use item::{Item, ItemId, ItemType, MetadataProvider};
