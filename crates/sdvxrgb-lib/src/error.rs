//! Unified error type for the sdvxrgb-lib crate.
//!
//! The transform core never fails: malformed configuration degrades to
//! inherited or identity values. [`SdvxRgbError`] covers the surfaces around
//! it (file I/O, strip lookup, capture files, profiles, INI editing).

use std::fmt;

/// Unified error type for sdvxrgb-lib operations.
#[derive(Debug)]
pub enum SdvxRgbError {
    /// Standard I/O error (INI, capture, profile and settings files).
    Io(std::io::Error),
    /// INI editing rejected a section, key or value.
    Config(String),
    /// Color parsing error.
    Color(String),
    /// Unknown strip, or a buffer that does not fit the strip layout.
    Strip(String),
    /// Malformed capture file.
    Capture(String),
    /// Invalid or missing profile.
    Profile(String),
}

impl fmt::Display for SdvxRgbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdvxRgbError::Io(e) => write!(f, "I/O error: {e}"),
            SdvxRgbError::Config(e) => write!(f, "Config error: {e}"),
            SdvxRgbError::Color(e) => write!(f, "Color error: {e}"),
            SdvxRgbError::Strip(e) => write!(f, "Strip error: {e}"),
            SdvxRgbError::Capture(e) => write!(f, "Capture error: {e}"),
            SdvxRgbError::Profile(e) => write!(f, "Profile error: {e}"),
        }
    }
}

impl std::error::Error for SdvxRgbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SdvxRgbError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SdvxRgbError {
    fn from(e: std::io::Error) -> Self {
        SdvxRgbError::Io(e)
    }
}

/// Crate-level Result alias using [`SdvxRgbError`].
pub type Result<T> = std::result::Result<T, SdvxRgbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let e: SdvxRgbError = io_err.into();
        assert!(matches!(e, SdvxRgbError::Io(_)));
    }

    #[test]
    fn display_config_error() {
        let e = SdvxRgbError::Config("unknown key".into());
        assert_eq!(e.to_string(), "Config error: unknown key");
    }

    #[test]
    fn display_strip_error() {
        let e = SdvxRgbError::Strip("no such strip".into());
        assert_eq!(e.to_string(), "Strip error: no such strip");
    }

    #[test]
    fn display_capture_error() {
        let e = SdvxRgbError::Capture("truncated".into());
        assert_eq!(e.to_string(), "Capture error: truncated");
    }

    #[test]
    fn display_profile_error() {
        let e = SdvxRgbError::Profile("bad name".into());
        assert_eq!(e.to_string(), "Profile error: bad name");
    }

    #[test]
    fn source_chains_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e = SdvxRgbError::Io(io_err);
        let source = std::error::Error::source(&e).unwrap();
        assert!(source.to_string().contains("denied"));
    }

    #[test]
    fn source_none_for_string_variants() {
        let e = SdvxRgbError::Color("test".into());
        assert!(std::error::Error::source(&e).is_none());
    }

    #[test]
    fn question_mark_propagation_io() {
        fn inner() -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "nope"))
        }
        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }
        let err = outer().unwrap_err();
        assert!(matches!(err, SdvxRgbError::Io(_)));
    }
}
