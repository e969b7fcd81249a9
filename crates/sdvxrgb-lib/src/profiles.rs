//! Named INI snapshots.
//!
//! A profile is a byte-for-byte copy of the transform INI kept as
//! `<dir>/<name>.ini`. Loading one copies it over the live INI; a running
//! hook picks the change up through hot reload.

use std::path::{Path, PathBuf};

use crate::error::{Result, SdvxRgbError};
use crate::ini::write_atomic;

const PROFILE_EXT: &str = "ini";

/// Directory of saved profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStore {
    dir: PathBuf,
}

/// Whether `name` is usable as a profile (and file) name.
///
/// Non-empty, ASCII letters, digits, space, `_` and `-` only.
pub fn is_valid_profile_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-'))
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ProfileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for `name`, after validating it.
    pub fn path(&self, name: &str) -> Result<PathBuf> {
        if !is_valid_profile_name(name) {
            return Err(SdvxRgbError::Profile(format!(
                "invalid profile name \"{name}\" (use letters, digits, spaces, '-' and '_')"
            )));
        }
        Ok(self.dir.join(format!("{name}.{PROFILE_EXT}")))
    }

    /// Saved profile names, sorted case-insensitively. A missing directory
    /// has no profiles.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_ini = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(PROFILE_EXT));
            if !is_ini || !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort_by_key(|n| n.to_lowercase());
        Ok(names)
    }

    /// Copy the current INI into the store as `name`, overwriting any
    /// existing profile of that name.
    pub fn save(&self, name: &str, ini: &Path) -> Result<PathBuf> {
        let dest = self.path(name)?;
        if !ini.is_file() {
            return Err(SdvxRgbError::Profile(format!(
                "nothing to save, {} does not exist",
                ini.display()
            )));
        }
        std::fs::create_dir_all(&self.dir)?;
        std::fs::copy(ini, &dest)?;
        log::info!("saved profile \"{name}\" to {}", dest.display());
        Ok(dest)
    }

    /// Copy profile `name` over the current INI.
    ///
    /// The INI is replaced in one rename, so a hook reloading at the same
    /// moment sees either the old file or the profile, never a mix.
    pub fn load(&self, name: &str, ini: &Path) -> Result<()> {
        let src = self.existing(name)?;
        let bytes = std::fs::read(&src)?;
        write_atomic(ini, &bytes)?;
        log::info!("loaded profile \"{name}\" into {}", ini.display());
        Ok(())
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.existing(name)?;
        std::fs::remove_file(&path)?;
        log::info!("deleted profile \"{name}\"");
        Ok(())
    }

    /// The first profile (in list order) whose bytes equal the current INI.
    pub fn detect_current(&self, ini: &Path) -> Result<Option<String>> {
        let Ok(current) = std::fs::read(ini) else {
            return Ok(None);
        };
        for name in self.list()? {
            let path = self.dir.join(format!("{name}.{PROFILE_EXT}"));
            let Ok(bytes) = std::fs::read(&path) else {
                continue;
            };
            if bytes == current {
                return Ok(Some(name));
            }
        }
        Ok(None)
    }

    fn existing(&self, name: &str) -> Result<PathBuf> {
        let path = self.path(name)?;
        if !path.is_file() {
            return Err(SdvxRgbError::Profile(format!(
                "profile \"{name}\" not found"
            )));
        }
        Ok(path)
    }
}
