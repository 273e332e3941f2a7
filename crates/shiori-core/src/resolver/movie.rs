use std::sync::Arc;

use crate::naming::marker::{contains_tag, has_metadata_file, tag_prefix};
use crate::naming::sidecar::MOVIE_METADATA_FILE;
use crate::naming::TvNaming;
use crate::types::{ItemType, MetadataProvider, ResolveContext};

use super::{accepts_parent, FolderResolver, ResolverPriority};

/// Resolves single-movie folders.
///
/// Ranked after the series resolver: a folder with both video files and
/// episode numbering is claimed as a series before this runs.
pub struct MovieResolver {
    naming: Arc<TvNaming>,
    markers: Vec<String>,
}

impl MovieResolver {
    pub fn new(naming: Arc<TvNaming>) -> Self {
        let markers = MetadataProvider::for_item_type(ItemType::Movie)
            .iter()
            .map(|p| tag_prefix(p.attribute()))
            .collect();
        Self { naming, markers }
    }

    fn has_movie_layout(&self, context: &ResolveContext) -> bool {
        let children = context.children();
        let has_video = children
            .iter()
            .any(|c| !c.is_dir && self.naming.is_video_file(&c.name));
        let has_seasons = children
            .iter()
            .any(|c| c.is_dir && self.naming.is_season_folder(&c.name));
        has_video && !has_seasons
    }
}

impl FolderResolver for MovieResolver {
    fn name(&self) -> &'static str {
        "movie"
    }

    fn item_type(&self) -> ItemType {
        ItemType::Movie
    }

    fn priority(&self) -> ResolverPriority {
        ResolverPriority::THIRD
    }

    fn try_classify(&self, context: &ResolveContext) -> Option<ItemType> {
        if !accepts_parent(
            context,
            &[ItemType::Series, ItemType::Season, ItemType::Movie],
        ) {
            return None;
        }

        let name = context.file_name()?;

        let accepted = has_metadata_file(context, MOVIE_METADATA_FILE)
            || self.markers.iter().any(|m| contains_tag(name, m))
            || self.has_movie_layout(context);

        accepted.then_some(ItemType::Movie)
    }
}
