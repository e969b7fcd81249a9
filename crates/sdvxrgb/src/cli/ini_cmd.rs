//! `init`, `set` and `unset` subcommands: edit the transform INI.
//!
//! Every write is atomic, so a running hook reading the file mid-edit sees
//! either the old or the new version.

use super::{Context, IniDocument, Result, SdvxRgbError, loader};

pub(super) fn cmd_init(ctx: &Context, force: bool) -> Result<()> {
    let path = &ctx.paths.ini;
    if path.exists() && !force {
        return Err(SdvxRgbError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    IniDocument::template().save_to(path)?;
    println!("Created {}", path.display());
    Ok(())
}

pub(super) fn cmd_set(ctx: &Context, section: &str, key: &str, value: &str) -> Result<()> {
    loader::validate_entry(section, key, value)?;
    let section = section.to_ascii_lowercase();
    let key = key.to_ascii_lowercase();
    let value = value.trim();

    let mut doc = IniDocument::read_from(&ctx.paths.ini)?.unwrap_or_default();
    doc.set(&section, &key, value);
    doc.save_to(&ctx.paths.ini)?;
    println!("[{section}] {key}={value}");
    Ok(())
}

pub(super) fn cmd_unset(ctx: &Context, section: &str, key: &str) -> Result<()> {
    let mut doc = ctx.read_ini()?;
    if !doc.remove(section, key) {
        println!("[{section}] {key} is not set");
        return Ok(());
    }
    doc.save_to(&ctx.paths.ini)?;
    println!("[{section}] {key} removed");
    Ok(())
}
