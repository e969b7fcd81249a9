//! Rate-limited hot reload.
//!
//! [`ReloadWatcher::tick`] runs on every hook call. Most calls only bump a
//! counter; every `interval` calls the source's timestamp is checked, and a
//! full reparse only happens when that timestamp changed.

use crate::loader::LoadOutcome;
use crate::model::TransformConfig;
use crate::source::ConfigSource;

/// Hook calls between timestamp checks.
///
/// The game pushes every strip once per frame, so this is a check every few
/// seconds at most. A stat per call would be far too expensive.
pub const RELOAD_INTERVAL: u32 = 300;

/// What a [`ReloadWatcher::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadEvent {
    /// Counter below the interval; nothing checked.
    Skipped,
    /// Timestamp checked and unchanged.
    Unchanged,
    /// Timestamp changed; the source was reparsed.
    Reloaded(LoadOutcome),
    /// The source disappeared after a load; strips reset to identity.
    Reset,
    /// The source is missing and nothing was loaded before.
    StillMissing,
}

/// Two-tier change detector: cheap counter, occasional stat, rare reparse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadWatcher {
    interval: u32,
}

impl Default for ReloadWatcher {
    fn default() -> Self {
        Self::new(RELOAD_INTERVAL)
    }
}

impl ReloadWatcher {
    /// Watcher checking every `interval` calls (at least 1).
    pub fn new(interval: u32) -> Self {
        ReloadWatcher {
            interval: interval.max(1),
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Count one call and, when due, check the source for changes.
    pub fn tick<S: ConfigSource>(&self, config: &mut TransformConfig<S>) -> ReloadEvent {
        config.call_counter += 1;
        if config.call_counter < self.interval {
            return ReloadEvent::Skipped;
        }
        config.call_counter = 0;
        self.check(config)
    }

    /// Check the source now, ignoring the call counter.
    pub fn check<S: ConfigSource>(&self, config: &mut TransformConfig<S>) -> ReloadEvent {
        let Some(modified) = config.source.modified() else {
            if config.last_write.is_none() {
                return ReloadEvent::StillMissing;
            }
            log::info!(
                "{} was removed, all strips reset to identity",
                config.source.describe()
            );
            config.reset();
            return ReloadEvent::Reset;
        };

        if config.last_write == Some(modified) {
            return ReloadEvent::Unchanged;
        }
        log::debug!("{} changed, reloading", config.source.describe());
        ReloadEvent::Reloaded(config.load())
    }
}
