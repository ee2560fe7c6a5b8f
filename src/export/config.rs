//! Conversion configuration

use crate::error::ConfigError;

/// Path separator convention of the machine that will play the playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    /// Backslash separators (e.g. `U:\Shared\Music`)
    Windows,

    /// Forward slash separators (e.g. `/home/me/Music`)
    Unix,
}

impl PathStyle {
    /// Guess the style from a base path: backslashes or a drive letter mean Windows
    pub fn detect(base_path: &str) -> Self {
        let bytes = base_path.as_bytes();
        let has_drive = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';

        if has_drive || base_path.contains('\\') {
            PathStyle::Windows
        } else {
            PathStyle::Unix
        }
    }

    pub fn separator(&self) -> char {
        match self {
            PathStyle::Windows => '\\',
            PathStyle::Unix => '/',
        }
    }

    /// Join a directory and a file name with this style's separator
    pub fn join(&self, dir: &str, file_name: &str) -> String {
        format!("{}{}{}", dir, self.separator(), file_name)
    }

    /// Rewrite every separator in `path` to this style's separator
    pub fn normalize(&self, path: &str) -> String {
        match self {
            PathStyle::Windows => path.replace('/', "\\"),
            PathStyle::Unix => path.replace('\\', "/"),
        }
    }
}

/// Destination settings for location rewriting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Folder holding the music files on the destination machine
    base_path: String,

    style: PathStyle,
}

impl ConvertConfig {
    /// Create a configuration, detecting the path style from `base_path`
    ///
    /// Fails if the base path is empty or ends with a separator.
    pub fn new(base_path: impl Into<String>) -> Result<Self, ConfigError> {
        let base_path = base_path.into();

        if base_path.is_empty() {
            return Err(ConfigError::EmptyBasePath);
        }
        if base_path.ends_with('/') || base_path.ends_with('\\') {
            return Err(ConfigError::TrailingSeparator(base_path));
        }

        let style = PathStyle::detect(&base_path);
        Ok(Self { base_path, style })
    }

    /// Override the detected path style
    pub fn with_style(mut self, style: PathStyle) -> Self {
        self.style = style;
        self
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn style(&self) -> PathStyle {
        self.style
    }

    /// Full destination path for a bare file name
    pub fn location_for(&self, file_name: &str) -> String {
        self.style
            .normalize(&self.style.join(&self.base_path, file_name))
    }
}
