//! `profile` subcommands: list, save, load and delete INI snapshots.

use super::{Context, ProfileAction, ProfilesOutput, Result, print_json};

pub(super) fn cmd_list(ctx: &Context, json: bool) -> Result<()> {
    let store = ctx.profiles();
    let profiles = store.list()?;
    let current = store.detect_current(&ctx.paths.ini)?;

    if json {
        return print_json(&ProfilesOutput {
            dir: store.dir().display().to_string(),
            current,
            profiles,
        });
    }

    println!("Profiles in {}", store.dir().display());
    if profiles.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for name in &profiles {
        let marker = if current.as_deref() == Some(name.as_str()) {
            '*'
        } else {
            ' '
        };
        println!("{marker} {name}");
    }
    Ok(())
}

pub(super) fn cmd_modify(ctx: &Context, action: ProfileAction) -> Result<()> {
    let store = ctx.profiles();
    let ini = &ctx.paths.ini;
    match action {
        ProfileAction::List => unreachable!("list is handled by cmd_list"),
        ProfileAction::Save { name } => {
            let path = store.save(&name, ini)?;
            println!("Saved \"{name}\" ({})", path.display());
        }
        ProfileAction::Load { name } => {
            store.load(&name, ini)?;
            println!("Loaded \"{name}\" into {}", ini.display());
        }
        ProfileAction::Delete { name } => {
            store.delete(&name)?;
            println!("Deleted \"{name}\"");
        }
    }
    Ok(())
}
