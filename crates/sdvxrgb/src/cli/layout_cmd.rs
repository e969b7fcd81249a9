//! `layout` subcommand: the fixed strip table.

use super::{LayoutOutput, Result, Strip, StripLayoutJson, layout, print_json};

pub(super) fn cmd_layout(json: bool) -> Result<()> {
    let strips: Vec<StripLayoutJson> = Strip::ALL
        .iter()
        .map(|&s| StripLayoutJson {
            index: s.index(),
            name: s.section_name(),
            label: s.label(),
            leds: s.led_count(),
            bytes: s.byte_len(),
            offset: s.byte_offset(),
        })
        .collect();

    if json {
        return print_json(&LayoutOutput {
            frame_size: layout::FRAME_SIZE,
            strips,
        });
    }

    println!(
        "{:>2}  {:<20} {:<16} {:>5} {:>6} {:>7}",
        "#", "Section", "Label", "LEDs", "Bytes", "Offset"
    );
    println!("{}", "-".repeat(61));
    for s in &strips {
        println!(
            "{:>2}  {:<20} {:<16} {:>5} {:>6} {:>7}",
            s.index, s.name, s.label, s.leds, s.bytes, s.offset
        );
    }
    println!();
    println!(
        "Frame: {} bytes, {} LEDs",
        layout::FRAME_SIZE,
        layout::FRAME_SIZE / 3
    );
    Ok(())
}
