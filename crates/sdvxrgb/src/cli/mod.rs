//! CLI subcommands: layout info, config inspection and editing, previews,
//! hot-reload watching, capture analysis and profiles.

mod capture_cmd;
mod ini_cmd;
mod layout_cmd;
mod preview;
mod profile;
mod settings_cmd;
mod show;
mod watch;

use std::path::PathBuf;

use clap::Subcommand;
use serde::Serialize;

pub(super) use crate::RUNNING;
pub(super) use sdvxrgb_lib::capture;
pub(super) use sdvxrgb_lib::color::{self, Rgb};
pub(super) use sdvxrgb_lib::error::{Result, SdvxRgbError};
pub(super) use sdvxrgb_lib::ini::IniDocument;
pub(super) use sdvxrgb_lib::layout::{self, Strip};
pub(super) use sdvxrgb_lib::loader;
pub(super) use sdvxrgb_lib::model::{TransformConfig, TransformParams};
pub(super) use sdvxrgb_lib::profiles::ProfileStore;
pub(super) use sdvxrgb_lib::settings::{ResolvedPaths, Settings};
pub(super) use sdvxrgb_lib::source::IniFile;

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Print `value` as pretty JSON.
pub(super) fn print_json(value: &impl Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| SdvxRgbError::Config(format!("JSON encoding failed: {e}")))?;
    println!("{text}");
    Ok(())
}

// ── Resolved paths ──

/// Paths every subcommand works against.
pub struct Context {
    pub settings_file: Option<PathBuf>,
    pub settings: Settings,
    pub paths: ResolvedPaths,
}

impl Context {
    /// Load settings and apply the `--ini` override.
    pub fn resolve(ini_override: Option<PathBuf>) -> Self {
        let settings = Settings::load();
        let base = Settings::dir().unwrap_or_default();
        let paths = settings.resolve(&base, ini_override);
        log::debug!("ini: {}", paths.ini.display());
        Context {
            settings_file: Settings::path(),
            settings,
            paths,
        }
    }

    pub(super) fn ini_source(&self) -> IniFile {
        IniFile::new(&self.paths.ini)
    }

    pub(super) fn profiles(&self) -> ProfileStore {
        ProfileStore::new(&self.paths.profiles)
    }

    /// Current INI document, or an error naming the missing file.
    pub(super) fn read_ini(&self) -> Result<IniDocument> {
        IniDocument::read_from(&self.paths.ini)?.ok_or_else(|| {
            SdvxRgbError::Config(format!(
                "{} does not exist (run `init` first)",
                self.paths.ini.display()
            ))
        })
    }
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct StripLayoutJson {
    pub index: usize,
    pub name: &'static str,
    pub label: &'static str,
    pub leds: usize,
    pub bytes: usize,
    pub offset: usize,
}

#[derive(Serialize)]
pub(super) struct LayoutOutput {
    pub frame_size: usize,
    pub strips: Vec<StripLayoutJson>,
}

#[derive(Serialize)]
pub(super) struct StripParamsJson {
    pub name: &'static str,
    pub active: bool,
    pub params: TransformParams,
}

#[derive(Serialize)]
pub(super) struct ShowOutput {
    pub ini_file: String,
    pub ini_file_exists: bool,
    pub global: TransformParams,
    pub strips: Vec<StripParamsJson>,
}

#[derive(Serialize)]
pub(super) struct PreviewPixelJson {
    pub led: usize,
    pub input: Rgb,
    pub output: Rgb,
}

#[derive(Serialize)]
pub(super) struct PreviewOutput {
    pub strip: &'static str,
    pub active: bool,
    pub pixels: Vec<PreviewPixelJson>,
}

#[derive(Serialize)]
pub(super) struct ProfilesOutput {
    pub dir: String,
    pub current: Option<String>,
    pub profiles: Vec<String>,
}

#[derive(Serialize)]
pub(super) struct SettingsOutput {
    pub settings_file: Option<String>,
    pub settings_file_exists: bool,
    pub settings: Settings,
    pub ini_file: String,
    pub ini_file_exists: bool,
    pub profiles_dir: String,
}

#[derive(Serialize)]
pub(super) struct CaptureStatsOutput {
    pub file: String,
    pub frames: usize,
    pub duration_secs: f64,
    pub strips: Vec<capture::StripStats>,
}

#[derive(Serialize)]
pub(super) struct CaptureCompareOutput {
    pub old_frames: usize,
    pub new_frames: usize,
    pub deltas: Vec<capture::StripDelta>,
    pub suggestions: Vec<capture::Suggestion>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the tape LED strip layout (LED counts, byte offsets)
    Layout,

    /// Show the effective transform for every strip
    Show,

    /// Run pixels through a strip's transform
    Preview {
        /// Strip name (e.g. woofer) or index (0-9)
        #[arg(long)]
        strip: Strip,
        /// Pixels as R,G,B or hex (#RRGGBB); pixel N is LED N of the strip
        #[arg(required = true)]
        pixels: Vec<String>,
    },

    /// Create a transform INI with an empty section per strip
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Set a key in the transform INI (e.g. `set woofer brightness 80`)
    Set {
        /// `global` or a strip name
        section: String,
        key: String,
        value: String,
    },

    /// Remove a key from the transform INI
    Unset { section: String, key: String },

    /// Watch the transform INI and report hot reloads (Ctrl+C to stop)
    Watch {
        /// Milliseconds between timestamp checks
        #[arg(long, default_value_t = 500)]
        poll_ms: u64,
        /// Stop after this many checks
        #[arg(long)]
        max_polls: Option<u64>,
    },

    /// Analyse, compare and replay LED capture files
    Capture {
        #[command(subcommand)]
        action: CaptureAction,
    },

    /// Manage saved INI profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Show (or change) where the INI and profiles live
    Settings {
        /// Store this path as the default transform INI ("" resets)
        #[arg(long, value_name = "PATH")]
        set_ini: Option<String>,
        /// Store this directory as the profiles location ("" resets)
        #[arg(long, value_name = "DIR")]
        set_profiles_dir: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CaptureAction {
    /// Per-strip statistics for a capture file
    Stats { file: PathBuf },

    /// Compare two captures and suggest INI adjustments
    Compare {
        old: PathBuf,
        new: PathBuf,
        /// Write the suggested values into the transform INI
        #[arg(long)]
        apply: bool,
    },

    /// Apply the current transform INI to every frame of a capture
    Replay { input: PathBuf, output: PathBuf },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// List saved profiles (the one matching the INI is marked)
    List,
    /// Save the current INI as a profile
    Save { name: String },
    /// Replace the current INI with a profile
    Load { name: String },
    /// Delete a saved profile
    Delete { name: String },
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, json: bool, ctx: &Context) -> Result<()> {
    match cmd {
        Command::Layout => layout_cmd::cmd_layout(json),
        Command::Show => show::cmd_show(ctx, json),
        Command::Preview { strip, pixels } => preview::cmd_preview(ctx, strip, &pixels, json),
        Command::Init { force } => {
            if json {
                warn_json_unsupported("init");
            }
            ini_cmd::cmd_init(ctx, force)
        }
        Command::Set {
            section,
            key,
            value,
        } => {
            if json {
                warn_json_unsupported("set");
            }
            ini_cmd::cmd_set(ctx, &section, &key, &value)
        }
        Command::Unset { section, key } => {
            if json {
                warn_json_unsupported("unset");
            }
            ini_cmd::cmd_unset(ctx, &section, &key)
        }
        Command::Watch { poll_ms, max_polls } => {
            if json {
                warn_json_unsupported("watch");
            }
            watch::cmd_watch(ctx, poll_ms, max_polls)
        }
        Command::Capture { action } => match action {
            CaptureAction::Stats { file } => capture_cmd::cmd_stats(&file, json),
            CaptureAction::Compare { old, new, apply } => {
                capture_cmd::cmd_compare(ctx, &old, &new, apply, json)
            }
            CaptureAction::Replay { input, output } => {
                if json {
                    warn_json_unsupported("capture replay");
                }
                capture_cmd::cmd_replay(ctx, &input, &output)
            }
        },
        Command::Profile { action } => match action {
            ProfileAction::List => profile::cmd_list(ctx, json),
            other => {
                if json {
                    warn_json_unsupported("profile");
                }
                profile::cmd_modify(ctx, other)
            }
        },
        Command::Settings {
            set_ini,
            set_profiles_dir,
        } => settings_cmd::cmd_settings(ctx, set_ini, set_profiles_dir, json),
    }
}


#[cfg(test)]
mod json_struct_tests {
    use super::*;

    #[test]
    fn layout_output_fields() {
        let output = LayoutOutput {
            frame_size: layout::FRAME_SIZE,
            strips: vec![StripLayoutJson {
                index: 8,
                name: "woofer",
                label: "Woofer",
                leds: 14,
                bytes: 42,
                offset: 984,
            }],
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["frame_size"], 1284);
        let strip = json["strips"][0].as_object().unwrap();
        assert_eq!(strip.len(), 6);
        assert_eq!(strip["offset"], 984);
    }

    #[test]
    fn show_output_params_shape() {
        let output = ShowOutput {
            ini_file: "/tmp/sdvxrgb.ini".into(),
            ini_file_exists: false,
            global: TransformParams::IDENTITY,
            strips: vec![StripParamsJson {
                name: "title",
                active: false,
                params: TransformParams::IDENTITY,
            }],
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["ini_file_exists"], false);
        assert_eq!(json["global"]["brightness"], 100);
        assert_eq!(json["global"]["channel_order"], "RGB");
        assert!(json["strips"][0]["params"]["color_override"].is_null());
    }

    #[test]
    fn profiles_output_null_current() {
        let output = ProfilesOutput {
            dir: "/p".into(),
            current: None,
            profiles: vec!["a".into()],
        };
        let json = serde_json::to_value(&output).unwrap();
        assert!(json["current"].is_null());
        assert_eq!(json["profiles"][0], "a");
    }

    #[test]
    fn preview_pixel_json() {
        let px = PreviewPixelJson {
            led: 0,
            input: Rgb::new(200, 100, 50),
            output: Rgb::new(100, 50, 25),
        };
        let json = serde_json::to_value(&px).unwrap();
        assert_eq!(json["output"]["r"], 100);
        assert_eq!(json["input"]["b"], 50);
    }
}
