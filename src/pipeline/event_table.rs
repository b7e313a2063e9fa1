use crate::encoding::EncodedEvent;
use chrono::{DateTime, SecondsFormat, Utc};
use core::fmt::{Display, Formatter};
use serde_json::{Value, json};
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};

/// The named columns of an [`EventTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum Column {
    EventId,
    Time,
    Longitude,
    Latitude,
    DepthKm,
    Mag,
    Place,
    Url,
    MagR,
    MagG,
    MagB,
    MagA,
    Radius,
}

impl Column {
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// A single value of an [`EventTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Float(f64),
    Int(i64),
    Time(DateTime<Utc>),
    Missing,
}

impl Cell<'_> {
    /// Convert the cell to JSON; missing values become `null`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => json!(s),
            Self::Float(f) => json!(f),
            Self::Int(i) => json!(i),
            Self::Time(t) => json!(format_time(*t)),
            Self::Missing => Value::Null,
        }
    }
}

/// Cells render the way they appear in tabular reports; missing values render as empty text.
impl Display for Cell<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            // Keep the decimal point on whole numbers
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Time(t) => f.write_str(&format_time(*t)),
            Self::Missing => Ok(()),
        }
    }
}

fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl EncodedEvent {
    /// The value of one column for this event.
    #[must_use]
    pub fn cell(&self, column: Column) -> Cell<'_> {
        let record = &self.record;
        match column {
            Column::EventId => record.event_id.as_deref().map_or(Cell::Missing, Cell::Text),
            Column::Time => Cell::Time(record.time),
            Column::Longitude => Cell::Float(record.longitude),
            Column::Latitude => Cell::Float(record.latitude),
            Column::DepthKm => Cell::Float(record.depth_km),
            Column::Mag => record.mag.map_or(Cell::Missing, Cell::Float),
            Column::Place => record.place.as_deref().map_or(Cell::Missing, Cell::Text),
            Column::Url => record.url.as_deref().map_or(Cell::Missing, Cell::Text),
            Column::MagR => Cell::Int(self.color.r.into()),
            Column::MagG => Cell::Int(self.color.g.into()),
            Column::MagB => Cell::Int(self.color.b.into()),
            Column::MagA => Cell::Int(self.color.a.into()),
            Column::Radius => Cell::Int(self.radius),
        }
    }
}

/// Filtered, encoded events in display order, with column access by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventTable {
    rows: Vec<EncodedEvent>,
}

impl EventTable {
    #[must_use]
    pub const fn new(rows: Vec<EncodedEvent>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[EncodedEvent] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All values of one column, in row order.
    pub fn column(&self, column: Column) -> impl Iterator<Item = Cell<'_>> {
        self.rows.iter().map(move |row| row.cell(column))
    }

    /// All values of the column called `name`, or `None` for an unknown column name.
    #[must_use]
    pub fn column_by_name(&self, name: &str) -> Option<Vec<Cell<'_>>> {
        let column: Column = name.parse().ok()?;
        Some(self.column(column).collect())
    }
}
