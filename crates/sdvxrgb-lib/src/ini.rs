//! Minimal INI document: read with Windows private-profile semantics, edit,
//! and write back.
//!
//! Reading rules:
//! - section and key names compare case-insensitively
//! - values are trimmed, and one pair of surrounding `"` is stripped
//! - lines starting with `;` or `#` are comments
//! - the first occurrence of a key in a section wins
//! - repeated `[section]` headers merge into the first one
//! - lines before any header, and lines without `=`, are ignored
//!
//! Comments are not preserved when a document is written back.

use std::fmt;
use std::path::Path;

use crate::error::Result;
use crate::layout::Strip;

/// One `[section]` with its `key=value` entries in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniSection {
    name: String,
    entries: Vec<(String, String)>,
}

impl IniSection {
    fn new(name: &str) -> Self {
        IniSection {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the first `key` entry.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// All entries in file order (duplicates included).
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A parsed INI document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: Vec<IniSection>,
}

impl IniDocument {
    /// Parse INI text. Never fails; malformed lines are skipped.
    pub fn parse(text: &str) -> Self {
        let mut doc = IniDocument::default();
        let mut current: Option<usize> = None;

        for (lineno, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let Some(name) = rest.strip_suffix(']') else {
                    log::debug!("ini line {}: unterminated section header ignored", lineno + 1);
                    current = None;
                    continue;
                };
                current = Some(doc.section_index_or_insert(name.trim()));
                continue;
            }

            let Some(idx) = current else {
                log::debug!("ini line {}: entry outside any section ignored", lineno + 1);
                continue;
            };
            let Some((key, value)) = line.split_once('=') else {
                log::debug!("ini line {}: no '=' in \"{line}\", ignored", lineno + 1);
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            doc.sections[idx]
                .entries
                .push((key.to_string(), unquote(value.trim()).to_string()));
        }
        doc
    }

    /// Empty sections for every strip, the starting point for a new file.
    pub fn template() -> Self {
        IniDocument {
            sections: Strip::ALL
                .iter()
                .map(|s| IniSection::new(s.section_name()))
                .collect(),
        }
    }

    /// Section by name (case-insensitive).
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn sections(&self) -> impl Iterator<Item = &IniSection> {
        self.sections.iter()
    }

    /// Value of `key` in `section`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// Set `key` in `section`, replacing the first occurrence in place or
    /// appending. The section is created if missing.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        let idx = self.section_index_or_insert(section);
        let entries = &mut self.sections[idx].entries;
        match entries.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
            Some((_, v)) => *v = value.to_string(),
            None => entries.push((key.to_string(), value.to_string())),
        }
    }

    /// Remove every occurrence of `key` in `section`. Returns whether
    /// anything was removed.
    pub fn remove(&mut self, section: &str, key: &str) -> bool {
        let Some(sec) = self
            .sections
            .iter_mut()
            .find(|s| s.name.eq_ignore_ascii_case(section))
        else {
            return false;
        };
        let before = sec.entries.len();
        sec.entries.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
        sec.entries.len() != before
    }

    /// Read and parse a file. `Ok(None)` if it does not exist.
    pub fn read_from(path: &Path) -> Result<Option<Self>> {
        match std::fs::read(path) {
            Ok(bytes) => Ok(Some(Self::parse(&String::from_utf8_lossy(&bytes)))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write atomically (temp file, then rename) so a reader never sees a
    /// half-written file.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        write_atomic(path, self.to_string().as_bytes())
    }

    fn section_index_or_insert(&mut self, name: &str) -> usize {
        if let Some(idx) = self
            .sections
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
        {
            return idx;
        }
        self.sections.push(IniSection::new(name));
        self.sections.len() - 1
    }
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "[{}]", section.name)?;
            for (k, v) in &section.entries {
                writeln!(f, "{k}={v}")?;
            }
        }
        Ok(())
    }
}

/// Replace `path` with `contents` through a sibling temp file and a rename,
/// creating parent directories as needed.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let tmp = path.with_extension("ini.tmp");
    std::fs::write(&tmp, contents)?;
    match std::fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(_) => {
            // Rename can fail across filesystems; fall back to direct write + cleanup
            let result = std::fs::write(path, contents);
            let _ = std::fs::remove_file(&tmp);
            result
        }
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
