use std::path::Path;

use crate::error::Error;

/// Name of the optional per-tree config file.
const CONFIG_FILE: &str = ".postref.toml";

/// Scan configuration loaded from `.postref.toml`.
/// Include/exclude patterns are path prefixes applied to the files the
/// directory scanner considers, relative to the scan root.
pub struct Config {
    include: Vec<String>,
    exclude: Vec<String>,
}

/// Raw TOML structure for `.postref.toml`.
#[derive(serde::Deserialize)]
struct PostrefTomlConfig {
    #[serde(default)]
    include: Vec<String>,
    #[serde(default)]
    exclude: Vec<String>,
}

impl Config {
    /// Load config from `.postref.toml` in the given root directory.
    /// Returns a default that scans everything if the file doesn't exist.
    /// Returns an error if the file exists but is malformed — never
    /// silently falls back to defaults when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::scan_everything_by_default());
            },
            Err(e) => return Err(Error::Io(e)),
        };

        let raw: PostrefTomlConfig = toml::from_str(&content)?;
        Ok(Self {
            include: raw.include,
            exclude: raw.exclude,
        })
    }

    /// Default config that includes everything and excludes nothing.
    fn scan_everything_by_default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }

    /// Check whether a file path should be scanned for references.
    ///
    /// A path is included if no include patterns are set (scan everything),
    /// or if the path starts with at least one include pattern.
    /// An included path is then excluded if it starts with any exclude
    /// pattern.
    pub fn should_scan(&self, relative_path: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        !self.exclude.iter().any(|p| relative_path.starts_with(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(include: &[&str], exclude: &[&str]) -> Config {
        Config {
            include: include.iter().map(|p| p.to_string()).collect(),
            exclude: exclude.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn empty_config_scans_everything() {
        let c = Config::scan_everything_by_default();
        assert!(c.should_scan("notes.md"));
        assert!(c.should_scan("deep/nested/post.txt"));
    }

    #[test]
    fn include_is_a_prefix_filter() {
        let c = config(&["posts/"], &[]);
        assert!(c.should_scan("posts/2026/hello.md"));
        assert!(!c.should_scan("drafts/hello.md"));
    }

    #[test]
    fn exclude_beats_include() {
        let c = config(&["posts/"], &["posts/archive/"]);
        assert!(c.should_scan("posts/hello.md"));
        assert!(!c.should_scan("posts/archive/old.md"));
    }
}
