//! Configuration sources: where the transform INI text comes from.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Default INI file name.
pub const INI_FILE_NAME: &str = "sdvxrgb.ini";

/// A readable, timestamped configuration source.
///
/// `modified` is the cheap check done on every reload interval; `read` is
/// only called when a full parse is needed.
pub trait ConfigSource {
    /// Last modification time, or `None` if the source does not exist.
    fn modified(&self) -> Option<SystemTime>;

    /// Full text, or `None` if the source does not exist or cannot be read.
    fn read(&self) -> Option<String>;

    /// Human-readable location for log messages.
    fn describe(&self) -> String;
}

/// INI file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniFile {
    path: PathBuf,
}

impl IniFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        IniFile { path: path.into() }
    }

    /// `sdvxrgb.ini` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(INI_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for IniFile {
    fn modified(&self) -> Option<SystemTime> {
        std::fs::metadata(&self.path).and_then(|m| m.modified()).ok()
    }

    fn read(&self) -> Option<String> {
        match std::fs::read(&self.path) {
            // Hand-edited files on Windows are often not UTF-8
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("cannot read {}: {e}", self.path.display());
                }
                None
            }
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for &T {
    fn modified(&self) -> Option<SystemTime> {
        (**self).modified()
    }

    fn read(&self) -> Option<String> {
        (**self).read()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// In-memory source for tests, counting how often it is stat'ed and read.
pub mod mock {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::time::Duration;

    /// Text plus a fake modification time. `None` text means "missing".
    #[derive(Debug, Default)]
    pub struct MemorySource {
        text: RefCell<Option<String>>,
        modified: Cell<Option<SystemTime>>,
        /// Number of `modified` calls.
        pub stats: Cell<usize>,
        /// Number of `read` calls (i.e. full parses).
        pub reads: Cell<usize>,
    }

    impl MemorySource {
        /// A missing source.
        pub fn missing() -> Self {
            Self::default()
        }

        /// A present source with a fixed timestamp.
        pub fn with_text(text: &str) -> Self {
            let src = Self::default();
            src.write(text);
            src
        }

        /// Replace the text and advance the timestamp by one second.
        pub fn write(&self, text: &str) {
            *self.text.borrow_mut() = Some(text.to_string());
            let next = match self.modified.get() {
                Some(t) => t + Duration::from_secs(1),
                None => SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000),
            };
            self.modified.set(Some(next));
        }

        /// Replace the text without touching the timestamp.
        pub fn write_keep_time(&self, text: &str) {
            *self.text.borrow_mut() = Some(text.to_string());
        }

        /// Keep the timestamp but fail every read, like a file locked by
        /// another process.
        pub fn make_unreadable(&self) {
            *self.text.borrow_mut() = None;
        }

        /// Make the source disappear.
        pub fn delete(&self) {
            *self.text.borrow_mut() = None;
            self.modified.set(None);
        }
    }

    impl ConfigSource for MemorySource {
        fn modified(&self) -> Option<SystemTime> {
            self.stats.set(self.stats.get() + 1);
            self.modified.get()
        }

        fn read(&self) -> Option<String> {
            self.reads.set(self.reads.get() + 1);
            self.text.borrow().clone()
        }

        fn describe(&self) -> String {
            "memory".into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MemorySource;
    use super::*;

    #[test]
    fn missing_file_has_no_time_or_text() {
        let dir = tempfile::tempdir().unwrap();
        let src = IniFile::in_dir(dir.path());
        assert_eq!(src.modified(), None);
        assert_eq!(src.read(), None);
        assert!(src.describe().ends_with(INI_FILE_NAME));
    }

    #[test]
    fn existing_file_reads() {
        let dir = tempfile::tempdir().unwrap();
        let src = IniFile::in_dir(dir.path());
        std::fs::write(src.path(), "[title]\nbrightness=50\n").unwrap();
        assert!(src.modified().is_some());
        assert_eq!(src.read().unwrap(), "[title]\nbrightness=50\n");
    }

    #[test]
    fn non_utf8_is_read_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let src = IniFile::in_dir(dir.path());
        std::fs::write(src.path(), b"[title]\n; caf\xe9\nbrightness=50\n").unwrap();
        assert!(src.read().unwrap().contains("brightness=50"));
    }

    #[test]
    fn memory_source_counts_calls() {
        let src = MemorySource::with_text("[global]\n");
        src.modified();
        src.modified();
        src.read();
        assert_eq!(src.stats.get(), 2);
        assert_eq!(src.reads.get(), 1);
    }

    #[test]
    fn memory_source_write_advances_time() {
        let src = MemorySource::with_text("a");
        let t1 = src.modified().unwrap();
        src.write("b");
        let t2 = src.modified().unwrap();
        assert!(t2 > t1);
        src.write_keep_time("c");
        assert_eq!(src.modified().unwrap(), t2);
    }

    #[test]
    fn memory_source_unreadable_keeps_time() {
        let src = MemorySource::with_text("a");
        let t = src.modified();
        src.make_unreadable();
        assert_eq!(src.modified(), t);
        assert_eq!(src.read(), None);
    }

    #[test]
    fn memory_source_delete() {
        let src = MemorySource::with_text("a");
        src.delete();
        assert_eq!(src.modified(), None);
        assert_eq!(src.read(), None);
    }

    #[test]
    fn reference_is_a_source() {
        let src = MemorySource::with_text("x");
        let r = &src;
        assert_eq!(ConfigSource::read(&r).as_deref(), Some("x"));
    }
}
