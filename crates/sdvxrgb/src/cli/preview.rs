//! `preview` subcommand: run sample pixels through one strip's transform.

use super::{
    Context, PreviewOutput, PreviewPixelJson, Result, Rgb, SdvxRgbError, Strip, TransformConfig,
    color, print_json,
};

pub(super) fn cmd_preview(ctx: &Context, strip: Strip, pixels: &[String], json: bool) -> Result<()> {
    let inputs = pixels
        .iter()
        .map(|p| parse_pixel(p))
        .collect::<Result<Vec<Rgb>>>()?;
    if inputs.len() > strip.led_count() {
        return Err(SdvxRgbError::Strip(format!(
            "{strip} has {} LEDs, got {} pixels",
            strip.led_count(),
            inputs.len()
        )));
    }

    let mut config = TransformConfig::new(ctx.ini_source());
    config.load();
    let transform = config.strip(strip);

    // Full-length buffer so gradients are positioned as on the cabinet
    let mut data = vec![0u8; strip.byte_len()];
    for (px, c) in data.chunks_exact_mut(3).zip(&inputs) {
        c.write_to(px);
    }
    transform.apply(&mut data);

    let results: Vec<PreviewPixelJson> = inputs
        .iter()
        .zip(data.chunks_exact(3))
        .enumerate()
        .map(|(led, (&input, px))| PreviewPixelJson {
            led,
            input,
            output: Rgb::from_slice(px),
        })
        .collect();

    if json {
        return print_json(&PreviewOutput {
            strip: strip.section_name(),
            active: transform.enabled(),
            pixels: results,
        });
    }

    println!(
        "{} ({} LEDs){}",
        strip.label(),
        strip.led_count(),
        if transform.enabled() {
            ""
        } else {
            ", pass-through"
        }
    );
    for r in &results {
        println!(
            "  LED {:>3}  {} {:<16} -> {} {}",
            r.led,
            color::format_hex_color(r.input),
            r.input.to_string(),
            color::format_hex_color(r.output),
            r.output
        );
    }
    Ok(())
}

/// `R,G,B` (decimal) or a hex color.
fn parse_pixel(text: &str) -> Result<Rgb> {
    if text.contains(',') {
        let parts: Vec<&str> = text.split(',').map(str::trim).collect();
        if let [r, g, b] = parts[..]
            && let (Ok(r), Ok(g), Ok(b)) = (r.parse::<u8>(), g.parse::<u8>(), b.parse::<u8>())
        {
            return Ok(Rgb::new(r, g, b));
        }
        return Err(SdvxRgbError::Color(format!(
            "invalid pixel \"{text}\" (expected R,G,B with values 0-255)"
        )));
    }
    color::parse_hex_color(text).ok_or_else(|| {
        SdvxRgbError::Color(format!(
            "invalid pixel \"{text}\" (expected R,G,B or #RRGGBB)"
        ))
    })
}
