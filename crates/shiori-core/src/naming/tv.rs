use std::path::Path;

use regex::Regex;

use crate::config::ResolverConfig;
use crate::error::Result;
use crate::types::FileEntry;

/// Decides whether a folder is laid out like a TV series.
///
/// The series resolver treats this as an opaque signal so the naming rules can
/// be swapped without touching classification.
pub trait SeriesLayout: Send + Sync {
    /// `path` is the candidate folder, `children` its enumerated entries.
    fn is_series_folder(&self, path: &Path, children: &[FileEntry]) -> bool;
}

/// Season and episode numbers found in a video filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeNumber {
    /// Season number, when the name carries one (`S02E05`, `2x05`).
    pub season: Option<u32>,
    /// Episode number within the season (or absolute, for `Show - 24`).
    pub episode: u32,
}

/// Regex-based TV naming conventions.
///
/// Recognizes season folders (`Season 1`, `S01`, `Saison 2`, `Staffel 3`,
/// `Temporada 4`, `Specials`) and episode-numbered files (`S01E02`, `1x02`,
/// `Episode 12`, `Show - 24 (1080p)`).
pub struct TvNaming {
    re_season_folder: Regex,
    re_season_short: Regex,
    re_specials: Regex,
    re_episode_sxe: Regex,
    re_episode_x: Regex,
    re_episode_word: Regex,
    re_episode_dash: Regex,
    video_extensions: Vec<String>,
}

impl TvNaming {
    /// Constructs the naming rules with pre-compiled regex patterns.
    ///
    /// # Errors
    ///
    /// Returns `ShioriError::RegexError` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        Ok(Self {
            re_season_folder: Regex::new(
                r"(?i)^(?:season|saison|staffel|temporada|stagione|seizoen|sæson)[\s._-]*(\d{1,4})(?:[\s._\-(\[].*)?$",
            )?,
            re_season_short: Regex::new(r"(?i)^s(\d{1,4})$")?,
            re_specials: Regex::new(r"(?i)^specials?$")?,
            re_episode_sxe: Regex::new(r"(?i)(?:^|[^a-z0-9])s(\d{1,4})[\s._-]*e(\d{1,4})")?,
            re_episode_x: Regex::new(r"(?i)(?:^|[^a-z0-9])(\d{1,2})x(\d{1,3})(?:[^0-9]|$)")?,
            re_episode_word: Regex::new(
                r"(?i)(?:^|[^a-z0-9])(?:episode|ep)[\s._-]*(\d{1,4})(?:[^0-9]|$)",
            )?,
            re_episode_dash: Regex::new(r"(?:^|\s)-\s+(\d{1,3})(?:v\d)?(?:[\s\[(.]|$)")?,
            video_extensions: config.video_extensions.clone(),
        })
    }

    /// Season number for a season folder name; `Specials` is season `0`.
    #[must_use]
    pub fn season_number(&self, folder_name: &str) -> Option<u32> {
        let name = folder_name.trim();
        if self.re_specials.is_match(name) {
            return Some(0);
        }

        self.re_season_folder
            .captures(name)
            .or_else(|| self.re_season_short.captures(name))
            .and_then(|c| c[1].parse().ok())
    }

    /// Returns `true` if `folder_name` names a season folder.
    #[must_use]
    pub fn is_season_folder(&self, folder_name: &str) -> bool {
        self.season_number(folder_name).is_some()
    }

    /// Returns `true` if the extension of `file_name` is a configured video extension.
    #[must_use]
    pub fn is_video_file(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.video_extensions
                    .iter()
                    .any(|v| v.eq_ignore_ascii_case(ext))
            })
    }

    /// Extracts season/episode numbering from a filename (extension ignored).
    #[must_use]
    pub fn episode_number(&self, file_name: &str) -> Option<EpisodeNumber> {
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);

        if let Some(c) = self.re_episode_sxe.captures(stem) {
            return Some(EpisodeNumber {
                season: c[1].parse().ok(),
                episode: c[2].parse().ok()?,
            });
        }

        if let Some(c) = self.re_episode_x.captures(stem) {
            return Some(EpisodeNumber {
                season: c[1].parse().ok(),
                episode: c[2].parse().ok()?,
            });
        }

        self.re_episode_word
            .captures(stem)
            .or_else(|| self.re_episode_dash.captures(stem))
            .and_then(|c| c[1].parse().ok())
            .map(|episode| EpisodeNumber {
                season: None,
                episode,
            })
    }
}

impl SeriesLayout for TvNaming {
    /// A folder is series-shaped when it holds a season folder or an
    /// episode-numbered video file. A folder that is itself named like a
    /// season never is.
    fn is_series_folder(&self, path: &Path, children: &[FileEntry]) -> bool {
        let own_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if self.is_season_folder(own_name) {
            return false;
        }

        children.iter().any(|child| {
            if child.is_dir {
                self.is_season_folder(&child.name)
            } else {
                self.is_video_file(&child.name) && self.episode_number(&child.name).is_some()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naming() -> TvNaming {
        TvNaming::new(&ResolverConfig::default()).unwrap()
    }

    #[test]
    fn season_folder_names() {
        let n = naming();

        for (name, expected) in [
            ("Season 1", 1),
            ("season01", 1),
            ("Season.02", 2),
            ("Season 3 (2012)", 3),
            ("S04", 4),
            ("Saison 5", 5),
            ("Staffel 6", 6),
            ("Temporada 7", 7),
            ("Specials", 0),
            ("special", 0),
        ] {
            assert_eq!(n.season_number(name), Some(expected), "failed for: {name}");
        }
    }

    #[test]
    fn non_season_folder_names() {
        let n = naming();

        for name in ["Seasons Greetings", "Extras", "Show Name", "S01E01", "Season"] {
            assert_eq!(n.season_number(name), None, "unexpected season for: {name}");
        }
    }

    #[test]
    fn episode_numbers() {
        let n = naming();

        assert_eq!(
            n.episode_number("Show.Name.S01E02.720p.mkv"),
            Some(EpisodeNumber {
                season: Some(1),
                episode: 2
            })
        );
        assert_eq!(
            n.episode_number("Show Name - 3x14 - Title.avi"),
            Some(EpisodeNumber {
                season: Some(3),
                episode: 14
            })
        );
        assert_eq!(
            n.episode_number("Show Name Episode 12.mp4"),
            Some(EpisodeNumber {
                season: None,
                episode: 12
            })
        );
        assert_eq!(
            n.episode_number("[SubsPlease] Jujutsu Kaisen - 24 (1080p) [A1B2C3D4].mkv"),
            Some(EpisodeNumber {
                season: None,
                episode: 24
            })
        );
    }

    #[test]
    fn movie_files_have_no_episode_number() {
        let n = naming();

        for name in [
            "The Matrix (1999).mkv",
            "Blade Runner 2049 1920x1080.mkv",
            "Heat.1995.1080p.BluRay.x264.mkv",
        ] {
            assert_eq!(n.episode_number(name), None, "unexpected episode for: {name}");
        }
    }

    #[test]
    fn video_extensions() {
        let n = naming();
        assert!(n.is_video_file("pilot.MKV"));
        assert!(n.is_video_file("pilot.mp4"));
        assert!(!n.is_video_file("series.xml"));
        assert!(!n.is_video_file("README"));
    }

    #[test]
    fn series_layout_from_children() {
        let n = naming();

        let with_seasons = [FileEntry::dir("Season 1"), FileEntry::file("folder.jpg")];
        assert!(n.is_series_folder(Path::new("/tv/Show"), &with_seasons));

        let with_episodes = [FileEntry::file("Show.S01E01.mkv")];
        assert!(n.is_series_folder(Path::new("/tv/Show"), &with_episodes));

        let episode_named_non_video = [FileEntry::file("Show.S01E01.srt")];
        assert!(!n.is_series_folder(Path::new("/tv/Show"), &episode_named_non_video));

        let movie = [FileEntry::file("The Matrix (1999).mkv")];
        assert!(!n.is_series_folder(Path::new("/movies/The Matrix (1999)"), &movie));
    }

    #[test]
    fn season_folder_is_never_series_shaped() {
        let n = naming();
        let episodes = [FileEntry::file("Show.S01E01.mkv")];
        assert!(!n.is_series_folder(Path::new("/tv/Show/Season 1"), &episodes));
    }
}
