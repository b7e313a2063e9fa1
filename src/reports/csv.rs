use crate::Result;
use crate::pipeline::{Column, EventTable};
use core::fmt::Write;
use ohno::IntoAppError;
use strum::IntoEnumIterator;

pub fn generate<W: Write>(table: &EventTable, writer: &mut W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(Vec::new());

    csv_writer
        .write_record(Column::iter().map(Column::name))
        .into_app_err("writing CSV header")?;

    for event in table.rows() {
        csv_writer
            .write_record(Column::iter().map(|column| event.cell(column).to_string()))
            .into_app_err("writing CSV row")?;
    }

    let bytes = csv_writer
        .into_inner()
        .map_err(csv::IntoInnerError::into_error)
        .into_app_err("flushing CSV output")?;
    write!(writer, "{}", String::from_utf8(bytes).into_app_err("CSV output is not valid UTF-8")?)?;
    Ok(())
}
