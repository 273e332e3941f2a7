//! Resolver configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShioriError};

/// Video file extensions recognized by default (lowercase, no dot).
pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "m4v", "avi", "wmv", "mov", "ts", "m2ts", "webm", "mpg", "mpeg", "iso", "flv",
    "3gp", "ogv",
];

/// Configuration for the default resolver chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Whether the series-layout naming test may be used as a classification signal.
    pub naming_heuristic: bool,
    /// Whether movie folders are resolved at all.
    pub movies: bool,
    /// Extensions that count as video files.
    pub video_extensions: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            naming_heuristic: true,
            movies: true,
            video_extensions: DEFAULT_VIDEO_EXTENSIONS
                .iter()
                .map(|e| (*e).to_string())
                .collect(),
        }
    }
}

impl ResolverConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the series-layout naming test.
    pub fn with_naming_heuristic(mut self, enabled: bool) -> Self {
        self.naming_heuristic = enabled;
        self
    }

    /// Enable or disable movie resolution.
    pub fn with_movies(mut self, enabled: bool) -> Self {
        self.movies = enabled;
        self
    }

    /// Replace the recognized video extensions. Leading dots and case are normalized.
    pub fn with_video_extensions<S: AsRef<str>>(
        mut self,
        extensions: impl IntoIterator<Item = S>,
    ) -> Self {
        self.video_extensions = extensions
            .into_iter()
            .map(|e| normalize_extension(e.as_ref()))
            .collect();
        self
    }

    /// Parses a JSON configuration; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ShioriError::InvalidConfig` if the JSON is malformed or fails
    /// [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self =
            serde_json::from_str(json).map_err(|e| ShioriError::InvalidConfig(e.to_string()))?;
        config.video_extensions = config
            .video_extensions
            .iter()
            .map(|e| normalize_extension(e))
            .collect();
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can drive a resolver chain.
    ///
    /// # Errors
    ///
    /// Returns `ShioriError::InvalidConfig` when no video extensions are set
    /// or one of them is empty.
    pub fn validate(&self) -> Result<()> {
        if self.video_extensions.is_empty() {
            return Err(ShioriError::InvalidConfig(
                "at least one video extension is required".into(),
            ));
        }
        if self.video_extensions.iter().any(|e| e.is_empty()) {
            return Err(ShioriError::InvalidConfig(
                "video extensions must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}
