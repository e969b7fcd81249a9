//! Integration tests for the `sdvxrgb-cli` binary.
//!
//! Every test points `--ini` into a temp directory and isolates the settings
//! file through `XDG_CONFIG_HOME`, so nothing touches the real config.

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use sdvxrgb_lib::capture::{CaptureFrame, read_capture, write_capture};
use sdvxrgb_lib::color::Rgb;
use sdvxrgb_lib::layout::Strip;
use sdvxrgb_lib::pipeline::LedFrame;

struct Sandbox {
    dir: tempfile::TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Sandbox {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn ini(&self) -> PathBuf {
        self.dir.path().join("sdvxrgb.ini")
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn cli(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("sdvxrgb-cli");
        cmd.env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env_remove("RUST_LOG")
            .arg("--ini")
            .arg(self.ini());
        cmd
    }

    fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .cli()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&output).expect("--json should produce valid JSON")
    }
}

fn solid_capture(path: &Path, strip: Strip, c: Rgb, frames: usize) {
    let frames: Vec<CaptureFrame> = (0..frames)
        .map(|i| {
            let mut frame = LedFrame::default();
            for px in frame.strip_mut(strip).chunks_exact_mut(3) {
                c.write_to(px);
            }
            CaptureFrame {
                timestamp: i as f64 * 0.5,
                frame,
            }
        })
        .collect();
    write_capture(path, &frames).unwrap();
}

#[test]
fn cli_help_succeeds() {
    cargo_bin_cmd!("sdvxrgb-cli")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sdvxrgb-cli"));
}

#[test]
fn cli_version_prints_version() {
    cargo_bin_cmd!("sdvxrgb-cli")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ── --verbose flag ──

#[test]
fn cli_verbose_flag_accepted() {
    let sb = Sandbox::new();
    sb.cli().args(["-v", "layout"]).assert().success();
    sb.cli().args(["--verbose", "show"]).assert().success();
}

// ── layout ──

#[test]
fn cli_layout_json_lists_ten_strips() {
    let sb = Sandbox::new();
    let json = sb.json(&["layout"]);
    assert_eq!(json["frame_size"], 1284);
    let strips = json["strips"].as_array().unwrap();
    assert_eq!(strips.len(), 10);
    assert_eq!(strips[9]["name"], "v_unit");
    assert_eq!(strips[9]["offset"], 1026);
}

#[test]
fn cli_layout_table() {
    let sb = Sandbox::new();
    sb.cli()
        .arg("layout")
        .assert()
        .success()
        .stdout(predicate::str::contains("ctrl_panel"))
        .stdout(predicate::str::contains("1284"));
}

// ── init / set / unset / show ──

#[test]
fn cli_show_without_ini_passes_through() {
    let sb = Sandbox::new();
    let json = sb.json(&["show"]);
    assert_eq!(json["ini_file_exists"], false);
    assert_eq!(json["global"]["brightness"], 100);
    assert!(
        json["strips"]
            .as_array()
            .unwrap()
            .iter()
            .all(|s| s["active"] == false)
    );
}

#[test]
fn cli_init_set_show() {
    let sb = Sandbox::new();
    sb.cli()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));
    assert!(sb.ini().exists());

    sb.cli()
        .args(["set", "global", "brightness", "80"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[global] brightness=80"));
    sb.cli()
        .args(["set", "Woofer", "Static_Color", "#FF0000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[woofer] static_color=#FF0000"));

    let json = sb.json(&["show"]);
    assert_eq!(json["ini_file_exists"], true);
    assert_eq!(json["global"]["brightness"], 80);
    let woofer = &json["strips"][8];
    assert_eq!(woofer["name"], "woofer");
    assert_eq!(woofer["active"], true);
    // Inherited from [global]
    assert_eq!(woofer["params"]["brightness"], 80);
    assert_eq!(woofer["params"]["color_override"]["mode"], "static");
}

#[test]
fn cli_init_refuses_overwrite_without_force() {
    let sb = Sandbox::new();
    sb.cli().arg("init").assert().success();
    sb.cli()
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    sb.cli().args(["init", "--force"]).assert().success();
}

#[test]
fn cli_set_rejects_bad_entries() {
    let sb = Sandbox::new();
    sb.cli()
        .args(["set", "tweeter", "brightness", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("unknown section"));
    sb.cli()
        .args(["set", "woofer", "sparkle", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown key"));
    sb.cli()
        .args(["set", "woofer", "gamma_r", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
    assert!(!sb.ini().exists());
}

#[test]
fn cli_unset_removes_key() {
    let sb = Sandbox::new();
    sb.cli()
        .args(["unset", "woofer", "brightness"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("run `init` first"));

    sb.cli()
        .args(["set", "woofer", "brightness", "50"])
        .assert()
        .success();
    sb.cli()
        .args(["unset", "woofer", "brightness"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed"));
    sb.cli()
        .args(["unset", "woofer", "brightness"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is not set"));

    let json = sb.json(&["show"]);
    assert_eq!(json["strips"][8]["active"], false);
}

// ── preview ──

#[test]
fn cli_preview_applies_brightness() {
    let sb = Sandbox::new();
    sb.cli()
        .args(["set", "woofer", "brightness", "50"])
        .assert()
        .success();

    let json = sb.json(&["preview", "--strip", "woofer", "200,100,50", "#000000"]);
    assert_eq!(json["strip"], "woofer");
    assert_eq!(json["active"], true);
    let out = &json["pixels"][0]["output"];
    assert_eq!(out["r"], 100);
    assert_eq!(out["g"], 50);
    assert_eq!(out["b"], 25);
    assert_eq!(json["pixels"][1]["output"]["r"], 0);
}

#[test]
fn cli_preview_untouched_strip_passes_through() {
    let sb = Sandbox::new();
    sb.cli()
        .args(["preview", "--strip", "8", "#102030"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pass-through"))
        .stdout(predicate::str::contains("-> #102030"));
}

#[test]
fn cli_preview_rejects_too_many_pixels() {
    let sb = Sandbox::new();
    let pixels: Vec<String> = (0..13).map(|_| "1,2,3".to_string()).collect();
    sb.cli()
        .args(["preview", "--strip", "upper_left_speaker"])
        .args(&pixels)
        .assert()
        .failure()
        .stderr(predicate::str::contains("12 LEDs"));
}

#[test]
fn cli_preview_rejects_unknown_strip() {
    let sb = Sandbox::new();
    sb.cli()
        .args(["preview", "--strip", "tweeter", "1,2,3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown strip"));
}

// ── watch ──

#[test]
fn cli_watch_stops_after_max_polls() {
    let sb = Sandbox::new();
    sb.cli()
        .args(["watch", "--poll-ms", "1", "--max-polls", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"))
        .stdout(predicate::str::contains("Stopped after 2 checks."));
}

#[test]
fn cli_watch_reports_active_strips() {
    let sb = Sandbox::new();
    sb.cli()
        .args(["set", "v_unit", "hue_shift", "90"])
        .assert()
        .success();
    sb.cli()
        .args(["watch", "--poll-ms", "1", "--max-polls", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("loaded: 1 strips active (v_unit)"));
}

// ── profiles ──

#[test]
fn cli_profile_round_trip() {
    let sb = Sandbox::new();
    let json = sb.json(&["profile", "list"]);
    assert_eq!(json["profiles"].as_array().unwrap().len(), 0);
    assert!(json["current"].is_null());

    sb.cli()
        .args(["set", "global", "brightness", "60"])
        .assert()
        .success();
    sb.cli()
        .args(["profile", "save", "dim"])
        .assert()
        .success();
    assert!(sb.path("profiles").join("dim.ini").exists());

    sb.cli()
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* dim"));

    sb.cli()
        .args(["set", "global", "brightness", "100"])
        .assert()
        .success();
    let json = sb.json(&["profile", "list"]);
    assert_eq!(json["profiles"][0], "dim");
    assert!(json["current"].is_null());

    sb.cli()
        .args(["profile", "load", "dim"])
        .assert()
        .success();
    assert_eq!(sb.json(&["show"])["global"]["brightness"], 60);

    sb.cli()
        .args(["profile", "delete", "dim"])
        .assert()
        .success();
    sb.cli()
        .args(["profile", "load", "dim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn cli_profile_rejects_bad_name() {
    let sb = Sandbox::new();
    sb.cli().arg("init").assert().success();
    sb.cli()
        .args(["profile", "save", "../escape"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid profile name"));
}

// ── settings ──

#[cfg(target_os = "linux")]
#[test]
fn cli_settings_json_reports_paths() {
    let sb = Sandbox::new();
    let json = sb.json(&["settings"]);
    assert_eq!(json["settings_file_exists"], false);
    assert_eq!(json["ini_file"], sb.ini().display().to_string());
    assert_eq!(json["ini_file_exists"], false);
    assert_eq!(
        json["profiles_dir"],
        sb.path("profiles").display().to_string()
    );
}

#[cfg(target_os = "linux")]
#[test]
fn cli_settings_set_profiles_dir_persists() {
    let sb = Sandbox::new();
    let custom = sb.path("elsewhere");
    sb.cli()
        .args(["settings", "--set-profiles-dir"])
        .arg(&custom)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved"));
    assert!(sb.path("config").join("sdvxrgb").join("settings.toml").exists());

    let json = sb.json(&["settings"]);
    assert_eq!(json["settings_file_exists"], true);
    assert_eq!(json["profiles_dir"], custom.display().to_string());
}

// ── capture ──

#[test]
fn cli_capture_stats_json() {
    let sb = Sandbox::new();
    let file = sb.path("red.bin");
    solid_capture(&file, Strip::Woofer, Rgb::new(255, 0, 0), 3);

    let json = sb.json(&["capture", "stats", file.to_str().unwrap()]);
    assert_eq!(json["frames"], 3);
    assert_eq!(json["duration_secs"], 1.0);
    let woofer = &json["strips"][8];
    assert_eq!(woofer["strip"], "woofer");
    assert_eq!(woofer["avg_r"], 255.0);
    assert_eq!(woofer["dominant_hue"], 0);
}

#[test]
fn cli_capture_stats_rejects_empty_file() {
    let sb = Sandbox::new();
    let file = sb.path("empty.bin");
    std::fs::write(&file, b"").unwrap();
    sb.cli()
        .args(["capture", "stats"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no frames"));
}

#[test]
fn cli_capture_compare_apply_writes_ini() {
    let sb = Sandbox::new();
    let old = sb.path("old.bin");
    let new = sb.path("new.bin");
    solid_capture(&old, Strip::Woofer, Rgb::new(100, 100, 100), 2);
    solid_capture(&new, Strip::Woofer, Rgb::new(50, 50, 50), 2);

    let json = sb.json(&["capture", "compare", old.to_str().unwrap(), new.to_str().unwrap()]);
    let suggestions = json["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0]["strip"], "woofer");
    assert_eq!(suggestions[0]["brightness"], 200);
    assert!(!sb.ini().exists());

    sb.cli()
        .args(["capture", "compare", "--apply"])
        .arg(&old)
        .arg(&new)
        .assert()
        .success()
        .stdout(predicate::str::contains("brightness=200"));
    assert_eq!(sb.json(&["show"])["strips"][8]["params"]["brightness"], 200);
}

#[test]
fn cli_capture_replay_applies_ini() {
    let sb = Sandbox::new();
    let input = sb.path("in.bin");
    let output = sb.path("out.bin");
    solid_capture(&input, Strip::Woofer, Rgb::new(200, 100, 50), 2);
    sb.cli()
        .args(["set", "woofer", "channel_order", "BGR"])
        .assert()
        .success();

    sb.cli()
        .args(["capture", "replay"])
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Replayed 2 frames"));

    let frames = read_capture(&output).unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[1].timestamp, 0.5);
    assert_eq!(&frames[0].frame.strip(Strip::Woofer)[..3], &[50, 100, 200]);
    assert!(frames[0].frame.strip(Strip::Title).iter().all(|&b| b == 0));
}
