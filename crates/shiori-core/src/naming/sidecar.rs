//! Sidecar metadata file vocabulary.
//!
//! Known names:
//! - series.xml, season.xml, movie.xml
//! - folder, poster, cover, fanart, backdrop, banner, logo, clearart, thumb,
//!   landscape, disc images
//! - season-level images: season01-poster.jpg, season-all-banner.png,
//!   season-specials-fanart.jpg, season02.jpg

use std::path::Path;

use crate::types::ItemType;

/// Sidecar that marks a series folder.
pub const SERIES_METADATA_FILE: &str = "series.xml";

/// Sidecar that marks a season folder.
pub const SEASON_METADATA_FILE: &str = "season.xml";

/// Sidecar that marks a movie folder.
pub const MOVIE_METADATA_FILE: &str = "movie.xml";

/// Folder-level image stems (lowercase for matching)
const FOLDER_IMAGE_STEMS: &[&str] = &[
    "folder",
    "poster",
    "cover",
    "fanart",
    "backdrop",
    "banner",
    "logo",
    "clearart",
    "thumb",
    "landscape",
    "disc",
];

/// Image kinds allowed after a season prefix, e.g. `season01-poster`
const SEASON_IMAGE_KINDS: &[&str] = &["poster", "banner", "fanart", "landscape", "thumb"];

/// Supported image extensions
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "tbn"];

/// The sidecar filename that identifies folders of `item_type`.
#[must_use]
pub fn metadata_file_for(item_type: ItemType) -> &'static str {
    match item_type {
        ItemType::Series => SERIES_METADATA_FILE,
        ItemType::Season => SEASON_METADATA_FILE,
        ItemType::Movie => MOVIE_METADATA_FILE,
    }
}

/// Returns `true` for any filename in the sidecar vocabulary.
#[must_use]
pub fn is_metadata_file(name: &str) -> bool {
    [SERIES_METADATA_FILE, SEASON_METADATA_FILE, MOVIE_METADATA_FILE]
        .iter()
        .any(|known| name.eq_ignore_ascii_case(known))
        || is_folder_image(name)
        || is_season_image(name)
}

/// `folder.jpg`, `poster.png`, `fanart.webp`, ...
#[must_use]
pub fn is_folder_image(name: &str) -> bool {
    image_stem(name).is_some_and(|stem| FOLDER_IMAGE_STEMS.contains(&stem.as_str()))
}

/// Season-level images kept in the series folder: `season01-poster.jpg`,
/// `season-all-banner.png`, `season-specials-fanart.jpg`, `season2.jpg`.
#[must_use]
pub fn is_season_image(name: &str) -> bool {
    let Some(stem) = image_stem(name) else {
        return false;
    };
    let Some(rest) = stem.strip_prefix("season") else {
        return false;
    };

    let kind = if let Some(r) = rest.strip_prefix("-all") {
        r
    } else if let Some(r) = rest.strip_prefix("-specials") {
        r
    } else {
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return false;
        }
        &rest[digits..]
    };

    match kind.strip_prefix('-') {
        Some(kind) => SEASON_IMAGE_KINDS.contains(&kind),
        None => kind.is_empty(),
    }
}

/// Lowercased stem if `name` has an image extension.
fn image_stem(name: &str) -> Option<String> {
    let path = Path::new(name);
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
}
