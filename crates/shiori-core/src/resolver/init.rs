use std::sync::Arc;

use tracing::trace;

use crate::naming::marker::{attribute_value, strip_tags, strip_trailing_year, trailing_year};
use crate::naming::sidecar::{is_folder_image, is_season_image, metadata_file_for};
use crate::naming::TvNaming;
use crate::types::{Item, ItemType, MetadataProvider, ResolveContext};

/// Fills in a freshly classified item before it leaves the resolver chain.
///
/// Steps run in order: base values (path, display name), sidecar metadata
/// files, provider identifiers from the folder name, then type-specific
/// values (season number, production year). Running it again on its own
/// output changes nothing.
pub struct ItemInitializer {
    naming: Arc<TvNaming>,
}

impl ItemInitializer {
    pub fn new(naming: Arc<TvNaming>) -> Self {
        Self { naming }
    }

    #[must_use]
    pub fn initialize(&self, mut item: Item, context: &ResolveContext) -> Item {
        self.set_base_values(&mut item, context);
        self.attach_metadata_files(&mut item, context);
        self.set_provider_ids_from_path(&mut item);
        self.set_type_values(&mut item, context);
        item
    }

    fn set_base_values(&self, item: &mut Item, context: &ResolveContext) {
        item.path = context.path().to_path_buf();

        let raw = context.file_name().unwrap_or_default();
        let stripped = strip_tags(raw);
        item.name = if stripped.is_empty() {
            raw.trim().to_string()
        } else {
            stripped
        };
    }

    fn attach_metadata_files(&self, item: &mut Item, context: &ResolveContext) {
        let own = metadata_file_for(item.item_type);

        for file in context.metadata_files() {
            let wanted = file.eq_ignore_ascii_case(own)
                || is_folder_image(file)
                // Season images live next to series.xml, not in the season folders.
                || (item.item_type == ItemType::Series && is_season_image(file));

            if wanted {
                item.attach_metadata_file(context.path().join(file));
            }
        }
    }

    fn set_provider_ids_from_path(&self, item: &mut Item) {
        let Some(name) = item.path.file_name().and_then(|n| n.to_str()) else {
            return;
        };
        let name = name.to_string();

        for &provider in MetadataProvider::for_item_type(item.item_type) {
            match attribute_value(&name, provider.attribute()) {
                Some(id) => item.set_provider_id(provider, id),
                None => trace!(%provider, folder = %name, "no provider id in folder name"),
            }
        }
    }

    fn set_type_values(&self, item: &mut Item, context: &ResolveContext) {
        match item.item_type {
            ItemType::Season => {
                item.index_number = context
                    .file_name()
                    .and_then(|n| self.naming.season_number(n));
            }
            ItemType::Series | ItemType::Movie => {
                if let Some(year) = trailing_year(&item.name) {
                    item.production_year = Some(year);
                    item.name = strip_trailing_year(&item.name).to_string();
                }
            }
        }
    }
}
