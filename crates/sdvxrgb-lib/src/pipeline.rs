//! Hook pipeline: what runs for every intercepted strip update.
//!
//! `reload check → copy → transform → publish → hand back`. The game's own
//! buffer is never modified; the transformed copy lives on the stack.

use std::ops::Deref;

use crate::error::{Result, SdvxRgbError};
use crate::layout::{FRAME_SIZE, MAX_STRIP_BYTES, Strip};
use crate::model::TransformConfig;
use crate::reload::{ReloadEvent, ReloadWatcher};
use crate::source::ConfigSource;

/// Receiver for transformed strip bytes (e.g. a shared frame region).
pub trait FrameSink {
    fn publish(&mut self, strip: Strip, data: &[u8]);
}

impl<T: FrameSink + ?Sized> FrameSink for &mut T {
    fn publish(&mut self, strip: Strip, data: &[u8]) {
        (**self).publish(strip, data);
    }
}

/// Full 1284-byte frame, each strip at its fixed offset.
#[derive(Clone, PartialEq, Eq)]
pub struct LedFrame {
    bytes: [u8; FRAME_SIZE],
}

impl Default for LedFrame {
    fn default() -> Self {
        LedFrame {
            bytes: [0; FRAME_SIZE],
        }
    }
}

impl std::fmt::Debug for LedFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedFrame").finish_non_exhaustive()
    }
}

impl LedFrame {
    /// Frame from exactly [`FRAME_SIZE`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; FRAME_SIZE] = bytes.try_into().map_err(|_| {
            SdvxRgbError::Strip(format!(
                "frame must be {FRAME_SIZE} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(LedFrame { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.bytes
    }

    pub fn strip(&self, strip: Strip) -> &[u8] {
        &self.bytes[strip.frame_range()]
    }

    pub fn strip_mut(&mut self, strip: Strip) -> &mut [u8] {
        &mut self.bytes[strip.frame_range()]
    }
}

impl FrameSink for LedFrame {
    fn publish(&mut self, strip: Strip, data: &[u8]) {
        let len = strip.byte_len().min(data.len());
        self.strip_mut(strip)[..len].copy_from_slice(&data[..len]);
    }
}

/// Stack copy of one strip's bytes.
#[derive(Clone, Copy)]
pub struct StripBuffer {
    bytes: [u8; MAX_STRIP_BYTES],
    len: usize,
}

impl StripBuffer {
    /// Copy `strip.byte_len()` bytes from `data`; extra bytes are ignored.
    pub fn copy_from(strip: Strip, data: &[u8]) -> Result<Self> {
        let len = strip.byte_len();
        let Some(src) = data.get(..len) else {
            return Err(SdvxRgbError::Strip(format!(
                "{strip} needs {len} bytes, got {}",
                data.len()
            )));
        };
        let mut bytes = [0u8; MAX_STRIP_BYTES];
        bytes[..len].copy_from_slice(src);
        Ok(StripBuffer { bytes, len })
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes[..self.len]
    }
}

impl Deref for StripBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl std::fmt::Debug for StripBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Owns the configuration and reload state for a single caller thread.
#[derive(Debug)]
pub struct StripPipeline<S, K = LedFrame> {
    config: TransformConfig<S>,
    watcher: ReloadWatcher,
    sink: Option<K>,
}

impl<S: ConfigSource> StripPipeline<S> {
    /// Pipeline without an output sink, after an initial load.
    pub fn new(source: S) -> Self {
        Self::with_sink(source, ReloadWatcher::default(), None)
    }
}

impl<S: ConfigSource, K: FrameSink> StripPipeline<S, K> {
    /// Pipeline publishing into `sink`, after an initial load.
    pub fn with_sink(source: S, watcher: ReloadWatcher, sink: Option<K>) -> Self {
        let mut config = TransformConfig::new(source);
        config.load();
        StripPipeline {
            config,
            watcher,
            sink,
        }
    }

    /// Run one hook call for `strip`.
    ///
    /// Returns the transformed copy; `data` itself is not modified. Fails
    /// only if `data` is shorter than the strip.
    pub fn process(&mut self, strip: Strip, data: &[u8]) -> Result<StripBuffer> {
        let event = self.watcher.tick(&mut self.config);
        if event != ReloadEvent::Skipped {
            log::debug!("reload check: {event:?}");
        }

        let mut buf = StripBuffer::copy_from(strip, data)?;
        self.config.strip(strip).apply(buf.as_mut_slice());

        if let Some(sink) = self.sink.as_mut() {
            sink.publish(strip, &buf);
        }
        Ok(buf)
    }

    /// Hook entry by raw index. `None` means "not a strip, pass through".
    pub fn process_index(&mut self, index: u32, data: &[u8]) -> Option<Result<StripBuffer>> {
        Strip::from_index(index).map(|strip| self.process(strip, data))
    }

    pub fn config(&self) -> &TransformConfig<S> {
        &self.config
    }

    pub fn sink(&self) -> Option<&K> {
        self.sink.as_ref()
    }

    /// Release the pipeline, handing back the sink.
    pub fn into_sink(self) -> Option<K> {
        self.sink
    }
}
