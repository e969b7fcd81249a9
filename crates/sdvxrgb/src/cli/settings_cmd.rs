//! `settings` subcommand: show (or change) where the INI and profiles live.

use super::{Context, Result, SdvxRgbError, SettingsOutput, kv, kv_indent, kv_width};

pub(super) fn cmd_settings(
    ctx: &Context,
    set_ini: Option<String>,
    set_profiles_dir: Option<String>,
    json: bool,
) -> Result<()> {
    if set_ini.is_some() || set_profiles_dir.is_some() {
        if json {
            log::warn!("--json is not supported when changing settings (ignored)");
        }
        return update(ctx, set_ini, set_profiles_dir);
    }

    let settings_exists = ctx.settings_file.as_ref().is_some_and(|p| p.exists());
    let ini_exists = ctx.paths.ini.exists();

    if json {
        return super::print_json(&SettingsOutput {
            settings_file: ctx.settings_file.as_ref().map(|p| p.display().to_string()),
            settings_file_exists: settings_exists,
            settings: ctx.settings.clone(),
            ini_file: ctx.paths.ini.display().to_string(),
            ini_file_exists: ini_exists,
            profiles_dir: ctx.paths.profiles.display().to_string(),
        });
    }

    let w = kv_width(
        &["Settings file:", "INI file:", "Profiles:"],
        &["ini_path:", "profiles_dir:"],
    );
    match &ctx.settings_file {
        Some(p) if settings_exists => {
            kv("Settings file:", format_args!("{} (loaded)", p.display()), w)
        }
        Some(p) => kv(
            "Settings file:",
            format_args!("{} (not found, using defaults)", p.display()),
            w,
        ),
        None => kv("Settings file:", "(no config directory)", w),
    }
    kv_indent("ini_path:", or_default(&ctx.settings.ini_path), w);
    kv_indent("profiles_dir:", or_default(&ctx.settings.profiles_dir), w);
    println!();

    let status = if ini_exists { "exists" } else { "not found" };
    kv(
        "INI file:",
        format_args!("{} ({status})", ctx.paths.ini.display()),
        w,
    );
    kv("Profiles:", ctx.paths.profiles.display(), w);
    Ok(())
}

fn or_default(value: &str) -> &str {
    if value.is_empty() { "(default)" } else { value }
}

fn update(ctx: &Context, set_ini: Option<String>, set_profiles_dir: Option<String>) -> Result<()> {
    let Some(path) = &ctx.settings_file else {
        return Err(SdvxRgbError::Config(
            "no config directory to store settings in".into(),
        ));
    };

    let mut settings = ctx.settings.clone();
    if let Some(value) = set_ini {
        settings.ini_path = absolute_or_empty(&value)?;
    }
    if let Some(value) = set_profiles_dir {
        settings.profiles_dir = absolute_or_empty(&value)?;
    }
    settings.save()?;

    println!("Saved {}", path.display());
    println!("  ini_path:     {}", or_default(&settings.ini_path));
    println!("  profiles_dir: {}", or_default(&settings.profiles_dir));
    Ok(())
}

/// Relative paths are stored relative to the current directory; empty resets.
fn absolute_or_empty(value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(String::new());
    }
    Ok(std::path::absolute(value)?.display().to_string())
}
