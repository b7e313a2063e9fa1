use crate::Result;
use crate::pipeline::{Column, EventTable, Request};
use core::fmt::Write;
use serde_json::{Map, Value, json};
use strum::IntoEnumIterator;

pub fn generate<W: Write>(table: &EventTable, request: &Request, writer: &mut W) -> Result<()> {
    let events: Vec<Value> = table
        .rows()
        .iter()
        .map(|event| {
            let obj: Map<String, Value> = Column::iter()
                .map(|column| (column.name().to_string(), event.cell(column).to_json()))
                .collect();
            Value::Object(obj)
        })
        .collect();

    let output = json!({
        "window": request.window.token(),
        "min_magnitude": request.min_magnitude.value(),
        "count": events.len(),
        "events": events,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
