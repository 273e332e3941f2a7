use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Library entity types a folder can be resolved into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemType {
    /// A TV show: the folder holding its seasons or episodes.
    Series,
    /// One season of a series.
    Season,
    /// A single feature film in its own folder.
    Movie,
}

impl ItemType {
    /// Returns the type name as used in logs and serialized output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Series => "Series",
            Self::Season => "Season",
            Self::Movie => "Movie",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External metadata services whose identifiers can be embedded in folder names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetadataProvider {
    /// TheTVDB — `[tvdbid=...]`
    Tvdb,
    /// TheMovieDB — `[tmdbid=...]`
    Tmdb,
    /// IMDb — `[imdbid=...]`
    Imdb,
}

impl MetadataProvider {
    /// Key under which the identifier is stored in [`Item::provider_ids`].
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Tvdb => "Tvdb",
            Self::Tmdb => "Tmdb",
            Self::Imdb => "Imdb",
        }
    }

    /// Attribute name used by the embedded-identifier marker, e.g. `tvdbid`.
    #[must_use]
    pub fn attribute(self) -> &'static str {
        match self {
            Self::Tvdb => "tvdbid",
            Self::Tmdb => "tmdbid",
            Self::Imdb => "imdbid",
        }
    }

    /// Providers whose identifiers are read from folder names of the given type.
    #[must_use]
    pub fn for_item_type(item_type: ItemType) -> &'static [MetadataProvider] {
        match item_type {
            ItemType::Series => &[Self::Tvdb],
            ItemType::Movie => &[Self::Tmdb, Self::Imdb],
            ItemType::Season => &[],
        }
    }
}

impl fmt::Display for MetadataProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Opaque lookup key for an item already handed to the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved library item.
///
/// Created empty by a successful classification, then filled in exactly once
/// by the [`ItemInitializer`](crate::resolver::ItemInitializer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Which entity type the folder was classified as.
    pub item_type: ItemType,

    /// Filesystem path of the folder.
    pub path: PathBuf,

    /// Display name derived from the folder name.
    pub name: String,

    /// Provider key (e.g. `"Tvdb"`) to external identifier.
    pub provider_ids: BTreeMap<String, String>,

    /// Sidecar metadata files attached to this item.
    pub metadata_files: Vec<PathBuf>,

    /// Season number for seasons (`0` for specials).
    pub index_number: Option<u32>,

    /// Year taken from a trailing `(YYYY)` in the folder name.
    pub production_year: Option<u16>,
}

impl Item {
    /// Creates a new empty item of the given type.
    #[must_use]
    pub fn new(item_type: ItemType) -> Self {
        Self {
            item_type,
            path: PathBuf::new(),
            name: String::new(),
            provider_ids: BTreeMap::new(),
            metadata_files: Vec::new(),
            index_number: None,
            production_year: None,
        }
    }

    /// Records an external identifier, replacing any previous value.
    pub fn set_provider_id(&mut self, provider: MetadataProvider, id: impl Into<String>) {
        self.provider_ids.insert(provider.key().to_string(), id.into());
    }

    /// Returns the identifier recorded for `provider`, if any.
    #[must_use]
    pub fn provider_id(&self, provider: MetadataProvider) -> Option<&str> {
        self.provider_ids.get(provider.key()).map(String::as_str)
    }

    /// Attaches a metadata file unless it is already attached.
    pub fn attach_metadata_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if !self.metadata_files.iter().any(|p| p == path) {
            self.metadata_files.push(path.to_path_buf());
        }
    }
}
