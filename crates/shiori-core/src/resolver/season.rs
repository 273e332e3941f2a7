use std::sync::Arc;

use crate::naming::marker::has_metadata_file;
use crate::naming::sidecar::SEASON_METADATA_FILE;
use crate::naming::TvNaming;
use crate::types::{ItemType, ResolveContext};

use super::{FolderResolver, ResolverPriority};

/// Resolves season folders directly inside a series.
///
/// Runs before the series resolver so a season folder is never mistaken for
/// a nested series.
pub struct SeasonResolver {
    naming: Arc<TvNaming>,
}

impl SeasonResolver {
    pub fn new(naming: Arc<TvNaming>) -> Self {
        Self { naming }
    }
}

impl FolderResolver for SeasonResolver {
    fn name(&self) -> &'static str {
        "season"
    }

    fn item_type(&self) -> ItemType {
        ItemType::Season
    }

    fn priority(&self) -> ResolverPriority {
        ResolverPriority::FIRST
    }

    fn try_classify(&self, context: &ResolveContext) -> Option<ItemType> {
        if !context.is_dir() {
            return None;
        }
        if context.parent()?.item_type() != Some(ItemType::Series) {
            return None;
        }

        let name = context.file_name()?;

        (has_metadata_file(context, SEASON_METADATA_FILE) || self.naming.is_season_folder(name))
            .then_some(ItemType::Season)
    }
}
