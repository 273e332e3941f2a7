use std::sync::Arc;

use tracing::trace;

use crate::naming::marker::{contains_tag, has_metadata_file, tag_prefix};
use crate::naming::sidecar::SERIES_METADATA_FILE;
use crate::naming::SeriesLayout;
use crate::types::{ItemType, MetadataProvider, ResolveContext};

use super::{accepts_parent, FolderResolver, ResolverPriority};

/// Resolves TV series folders.
///
/// A directory is a series if any of these hold:
/// 1. a `series.xml` sidecar exists
/// 2. the folder name contains a `[tvdbid=` marker
/// 3. the [`SeriesLayout`] test accepts its name and children
///
/// Top-level folders (no parent, or the library root) and folders whose
/// parent is already a series are never considered.
pub struct SeriesResolver {
    layout: Arc<dyn SeriesLayout>,
    naming_heuristic: bool,
    tvdb_marker: String,
}

impl SeriesResolver {
    pub fn new(layout: Arc<dyn SeriesLayout>) -> Self {
        Self {
            layout,
            naming_heuristic: true,
            tvdb_marker: tag_prefix(MetadataProvider::Tvdb.attribute()),
        }
    }

    /// Enable or disable the layout test (signal 3).
    pub fn with_naming_heuristic(mut self, enabled: bool) -> Self {
        self.naming_heuristic = enabled;
        self
    }
}

impl FolderResolver for SeriesResolver {
    fn name(&self) -> &'static str {
        "series"
    }

    fn item_type(&self) -> ItemType {
        ItemType::Series
    }

    fn priority(&self) -> ResolverPriority {
        ResolverPriority::SECOND
    }

    fn try_classify(&self, context: &ResolveContext) -> Option<ItemType> {
        if !accepts_parent(context, &[ItemType::Series]) {
            return None;
        }

        let name = context.file_name()?;

        // Cheapest signals first; the layout test walks every child.
        let accepted = has_metadata_file(context, SERIES_METADATA_FILE)
            || contains_tag(name, &self.tvdb_marker)
            || (self.naming_heuristic
                && self.layout.is_series_folder(context.path(), context.children()));

        if accepted {
            Some(ItemType::Series)
        } else {
            trace!(path = %context.path().display(), "not a series folder");
            None
        }
    }
}
