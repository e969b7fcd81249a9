//! Tool settings: where the transform INI and the profiles live.
//!
//! Stored as TOML in the platform config directory. Unlike the transform
//! INI, this file is never hot-reloaded.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::source::INI_FILE_NAME;

/// Header comment prepended to saved settings files.
const SETTINGS_HEADER: &str =
    "# sdvxrgb settings (changes made outside the tool may be overwritten)\n\n";

const PROFILES_DIR_NAME: &str = "profiles";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Transform INI the hook reads. Empty = `sdvxrgb.ini` in the config directory.
    #[serde(default)]
    pub ini_path: String,

    /// Directory of saved profiles. Empty = `profiles/` next to the INI.
    #[serde(default)]
    pub profiles_dir: String,
}

impl Settings {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sdvxrgb"))
    }

    /// Full path to the settings file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        let (settings, warnings) = Self::load_from(&path);
        for w in &warnings {
            log::warn!("{w}");
        }
        settings
    }

    /// Load settings from an arbitrary path, returning any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(settings) => (settings, vec![]),
                Err(e) => {
                    let warning = format!(
                        "settings parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Save settings atomically (write to temp file, then rename).
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{SETTINGS_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct write + cleanup
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }

    /// Save settings to the default platform path.
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = Self::path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config directory",
            ));
        };
        self.save_to(&path)
    }

    /// Effective INI and profiles locations.
    ///
    /// `ini_override` (the `--ini` flag) beats `ini_path`, which beats
    /// `sdvxrgb.ini` inside `base`. An empty `profiles_dir` means
    /// `profiles/` next to the INI, so profiles follow an overridden INI.
    pub fn resolve(&self, base: &Path, ini_override: Option<PathBuf>) -> ResolvedPaths {
        let ini = ini_override
            .unwrap_or_else(|| resolve_or(&self.ini_path, || base.join(INI_FILE_NAME)));
        let ini_dir = ini.parent().map(Path::to_path_buf).unwrap_or_default();
        let profiles = resolve_or(&self.profiles_dir, || ini_dir.join(PROFILES_DIR_NAME));
        ResolvedPaths { ini, profiles }
    }
}

/// Paths after applying settings, defaults and command-line overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPaths {
    pub ini: PathBuf,
    pub profiles: PathBuf,
}

fn resolve_or(value: &str, default: impl FnOnce() -> PathBuf) -> PathBuf {
    let value = value.trim();
    if value.is_empty() {
        default()
    } else {
        PathBuf::from(value)
    }
}
