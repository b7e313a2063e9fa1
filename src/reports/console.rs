use crate::Result;
use crate::encoding::EncodedEvent;
use crate::pipeline::{EventTable, Request};
use core::fmt::Write;
use owo_colors::OwoColorize;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn generate<W: Write>(table: &EventTable, request: &Request, use_colors: bool, writer: &mut W) -> Result<()> {
    let title = format!(
        "{} event(s) of magnitude {} or more in the past {}",
        table.len(),
        request.min_magnitude,
        request.window.label().to_lowercase()
    );

    if use_colors {
        writeln!(writer, "{}", title.bold())?;
    } else {
        writeln!(writer, "{title}")?;
    }

    writeln!(writer)?;
    writeln!(writer, "  {:<19}  {:>5}  {:>8}  Place", "Time (UTC)", "Mag", "Depth")?;

    for event in table.rows() {
        let mag = format!("{:>5}", format_mag(event));
        let mag = if use_colors {
            let color = event.color;
            mag.truecolor(color.r, color.g, color.b).to_string()
        } else {
            mag
        };
        let depth = format!("{:.1} km", event.record.depth_km);

        writeln!(
            writer,
            "  {}  {mag}  {depth:>8}  {}",
            event.record.time.format(TIME_FORMAT),
            event.record.place.as_deref().unwrap_or("-")
        )?;
    }

    Ok(())
}

fn format_mag(event: &EncodedEvent) -> String {
    event.record.mag.map_or_else(|| "?".to_string(), |mag| format!("{mag:.1}"))
}
