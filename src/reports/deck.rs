//! deck.gl layer descriptor for drawing events on a world map.
//!
//! The descriptor is plain JSON that a deck.gl front end (for example `@deck.gl/json`'s
//! `JSONConverter`) can turn into a `Deck` with a single `ScatterplotLayer`. Accessors are
//! expressed as `@@=` expressions over the inline data rows, which carry the same column
//! names as the other reports.

use crate::Result;
use crate::pipeline::{Column, EventTable, Request};
use core::fmt::Write;
use serde_json::{Map, Value, json};
use strum::IntoEnumIterator;

const LAYER_ID: &str = "earthquakes";
const INITIAL_ZOOM: f64 = 1.7;
const RADIUS_MIN_PIXELS: u32 = 2;

const TOOLTIP_HTML: &str = "<b>M {mag}</b><br/>Depth: {depth_km} km<br/>{time}<br/>{place}";

pub fn generate<W: Write>(table: &EventTable, request: &Request, writer: &mut W) -> Result<()> {
    let data: Vec<Value> = table
        .rows()
        .iter()
        .map(|event| {
            let row: Map<String, Value> = Column::iter()
                .map(|column| (column.name().to_string(), event.cell(column).to_json()))
                .collect();
            Value::Object(row)
        })
        .collect();

    let descriptor = json!({
        "title": format!("Earthquakes in the past {}, magnitude {} or more", request.window.label().to_lowercase(), request.min_magnitude),
        "initialViewState": {
            "latitude": 0.0,
            "longitude": 0.0,
            "zoom": INITIAL_ZOOM,
        },
        "controller": true,
        "layers": [{
            "@@type": "ScatterplotLayer",
            "id": LAYER_ID,
            "data": data,
            "getPosition": "@@=[longitude, latitude]",
            "getRadius": "@@=radius",
            "getFillColor": "@@=[mag_r, mag_g, mag_b, mag_a]",
            "pickable": true,
            "radiusMinPixels": RADIUS_MIN_PIXELS,
        }],
        "tooltip": {
            "html": TOOLTIP_HTML,
        },
    });

    write!(writer, "{}", serde_json::to_string_pretty(&descriptor)?)?;
    Ok(())
}
