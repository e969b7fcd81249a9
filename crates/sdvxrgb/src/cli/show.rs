//! `show` subcommand: the effective (inherited and clamped) transform of
//! every strip.

use super::{
    Context, IniDocument, Result, ShowOutput, Strip, StripParamsJson, TransformParams, color,
    kv, kv_width, loader, print_json,
};

pub(super) fn cmd_show(ctx: &Context, json: bool) -> Result<()> {
    let doc = IniDocument::read_from(&ctx.paths.ini)?;
    let exists = doc.is_some();
    let resolved = loader::resolve(&doc.unwrap_or_default());

    if json {
        return print_json(&ShowOutput {
            ini_file: ctx.paths.ini.display().to_string(),
            ini_file_exists: exists,
            global: resolved.global,
            strips: Strip::ALL
                .iter()
                .map(|&s| StripParamsJson {
                    name: s.section_name(),
                    active: resolved.strip(s).is_active(),
                    params: *resolved.strip(s),
                })
                .collect(),
        });
    }

    let w = kv_width(&["INI file:"], &[]);
    let status = if exists {
        "loaded"
    } else {
        "not found, all strips pass through"
    };
    kv(
        "INI file:",
        format_args!("{} ({status})", ctx.paths.ini.display()),
        w,
    );
    println!();

    println!(
        "  {:<20} {:<5} {:<16} {:>4} {:>4} {:>6}  Color",
        "Section", "Order", "Gamma R/G/B", "Hue", "Sat", "Bright"
    );
    println!("{}", "-".repeat(80));
    print_row("global", &resolved.global, false);
    for s in Strip::ALL {
        let p = resolved.strip(s);
        print_row(s.section_name(), p, p.is_active());
    }
    println!();
    println!("* = strip is transformed");
    Ok(())
}

fn print_row(name: &str, p: &TransformParams, active: bool) {
    let marker = if active { '*' } else { ' ' };
    let gamma = format!("{:.2}/{:.2}/{:.2}", p.gamma_r, p.gamma_g, p.gamma_b);
    println!(
        "{marker} {:<20} {:<5} {:<16} {:>4} {:>4} {:>6}  {}",
        name,
        p.channel_order.name(),
        gamma,
        p.hue_shift,
        p.saturation,
        p.brightness,
        describe_override(p)
    );
}

/// `-`, `#RRGGBB`, or `#RRGGBB..#RRGGBB` for a gradient.
fn describe_override(p: &TransformParams) -> String {
    match (p.static_color(), p.gradient_color()) {
        (Some(from), Some(to)) => format!(
            "{}..{}",
            color::format_hex_color(from),
            color::format_hex_color(to)
        ),
        (Some(c), None) => color::format_hex_color(c),
        _ => "-".into(),
    }
}
