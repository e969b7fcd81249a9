//! `watch` subcommand: follow the transform INI the way the hook does and
//! report every reload.

use std::sync::atomic::Ordering;
use std::time::Duration;

use sdvxrgb_lib::loader::LoadOutcome;
use sdvxrgb_lib::reload::{ReloadEvent, ReloadWatcher};

use super::{Context, IniFile, RUNNING, Result, Strip, TransformConfig};

pub(super) fn cmd_watch(ctx: &Context, poll_ms: u64, max_polls: Option<u64>) -> Result<()> {
    let mut config = TransformConfig::new(ctx.ini_source());
    println!("Watching {} (Ctrl+C to stop)", ctx.paths.ini.display());
    let outcome = config.load();
    report_load(&outcome, &config);

    // Every check is due; the interval is the sleep below
    let watcher = ReloadWatcher::new(1);
    let interval = Duration::from_millis(poll_ms.max(1));
    let mut polls = 0u64;

    while RUNNING.load(Ordering::SeqCst) {
        if max_polls.is_some_and(|max| polls >= max) {
            break;
        }
        std::thread::sleep(interval);
        polls += 1;

        match watcher.tick(&mut config) {
            ReloadEvent::Reloaded(outcome) => report_load(&outcome, &config),
            ReloadEvent::Reset => println!("  removed: all strips pass through"),
            ReloadEvent::Skipped | ReloadEvent::Unchanged | ReloadEvent::StillMissing => {}
        }
    }

    println!("Stopped after {polls} checks.");
    Ok(())
}

fn report_load(outcome: &LoadOutcome, config: &TransformConfig<IniFile>) {
    match outcome {
        LoadOutcome::Missing => println!("  not found: all strips pass through"),
        LoadOutcome::Loaded { active } => {
            let names: Vec<&str> = Strip::ALL
                .iter()
                .filter(|&&s| config.strip(s).enabled())
                .map(|s| s.section_name())
                .collect();
            if names.is_empty() {
                println!("  loaded: {active} strips active");
            } else {
                println!("  loaded: {active} strips active ({})", names.join(", "));
            }
        }
    }
}
