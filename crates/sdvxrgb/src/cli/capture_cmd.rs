//! `capture` subcommands: statistics, comparison and replay of LED capture
//! files.

use std::path::Path;

use super::{
    CaptureCompareOutput, CaptureStatsOutput, Context, IniDocument, Result, TransformConfig,
    capture, print_json,
};

fn load(path: &Path) -> Result<Vec<capture::CaptureFrame>> {
    let frames = capture::read_capture(path)?;
    capture::require_frames(&frames, path)?;
    Ok(frames)
}

pub(super) fn cmd_stats(file: &Path, json: bool) -> Result<()> {
    let frames = load(file)?;
    let duration = capture::capture_duration(&frames);
    let stats = capture::compute_strip_stats(&frames);

    if json {
        return print_json(&CaptureStatsOutput {
            file: file.display().to_string(),
            frames: frames.len(),
            duration_secs: duration,
            strips: stats.to_vec(),
        });
    }

    println!("Capture: {}", file.display());
    println!("  Frames:   {}", frames.len());
    println!("  Duration: {duration:.1}s");
    println!();
    println!(
        "{:<24} {:>5} {:>6} {:>6} {:>6} {:>7} {:>5} {:>5}",
        "Strip", "LEDs", "Avg R", "Avg G", "Avg B", "Bright", "Sat", "Hue"
    );
    println!("{}", "-".repeat(80));
    for s in &stats {
        println!(
            "{:<24} {:>5} {:>6.1} {:>6.1} {:>6.1} {:>7.1} {:>5.2} {:>4}d",
            s.strip.section_name(),
            s.led_count,
            s.avg_r,
            s.avg_g,
            s.avg_b,
            s.avg_brightness,
            s.avg_saturation,
            s.dominant_hue
        );
    }
    Ok(())
}

pub(super) fn cmd_compare(
    ctx: &Context,
    old: &Path,
    new: &Path,
    apply: bool,
    json: bool,
) -> Result<()> {
    let old_frames = load(old)?;
    let new_frames = load(new)?;
    let old_stats = capture::compute_strip_stats(&old_frames);
    let new_stats = capture::compute_strip_stats(&new_frames);
    let deltas = capture::compare_stats(&old_stats, &new_stats);
    let suggestions = capture::suggest_adjustments(&old_stats, &new_stats);

    if apply && !suggestions.is_empty() {
        let mut doc = IniDocument::read_from(&ctx.paths.ini)?.unwrap_or_default();
        for s in &suggestions {
            s.apply_to(&mut doc);
        }
        doc.save_to(&ctx.paths.ini)?;
        log::info!("suggestions written to {}", ctx.paths.ini.display());
    }

    if json {
        return print_json(&CaptureCompareOutput {
            old_frames: old_frames.len(),
            new_frames: new_frames.len(),
            deltas,
            suggestions,
        });
    }

    println!("Old: {} ({} frames)", old.display(), old_frames.len());
    println!("New: {} ({} frames)", new.display(), new_frames.len());
    println!();
    println!(
        "{:<24} {:>6} {:>6} {:>6} {:>8} {:>6} {:>8} {:>8}",
        "Strip", "dR", "dG", "dB", "dBright", "dSat", "Old Hue", "New Hue"
    );
    println!("{}", "-".repeat(90));
    for d in &deltas {
        println!(
            "{:<24} {:>+6.1} {:>+6.1} {:>+6.1} {:>+8.1} {:>+6.2} {:>7}d {:>7}d",
            d.strip.section_name(),
            d.d_r,
            d.d_g,
            d.d_b,
            d.d_brightness,
            d.d_saturation,
            d.old_hue,
            d.new_hue
        );
    }
    println!();

    if suggestions.is_empty() {
        println!("No INI adjustments suggested.");
        return Ok(());
    }
    println!("Suggested INI adjustments:");
    println!("{}", "-".repeat(40));
    for s in &suggestions {
        if let Some(strip) = s.strip {
            println!("[{}]", strip.section_name());
        }
        for (key, value) in s.entries() {
            println!("  {key}={value}");
        }
        println!();
    }
    if apply {
        println!("Written to {}", ctx.paths.ini.display());
    }
    Ok(())
}

pub(super) fn cmd_replay(ctx: &Context, input: &Path, output: &Path) -> Result<()> {
    let frames = load(input)?;
    let mut config = TransformConfig::new(ctx.ini_source());
    config.load();
    let replayed = capture::replay(&config, &frames);
    capture::write_capture(output, &replayed)?;
    println!(
        "Replayed {} frames through {} ({} strips active) -> {}",
        replayed.len(),
        ctx.paths.ini.display(),
        config.active_count(),
        output.display()
    );
    Ok(())
}
