// src/export/csv.rs
//! CSV output with a UTF-8 byte-order mark

use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::consts::UTF8_BOM;
use crate::error::Result;
use crate::export::project::ExportTable;

/// Stream the table to `out`: BOM, header, rows. Cells are quoted only
/// when they hold a comma, a quote or a line break.
pub fn write_csv<W: Write>(table: &ExportTable, mut out: W) -> Result<()> {
    out.write_all(UTF8_BOM)?;

    let mut builder = WriterBuilder::new();
    builder
        .delimiter(b',')
        .quote(b'"')
        .double_quote(true)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'));
    let mut writer = builder.from_writer(out);

    for record in table.records() {
        if is_single_empty_field(record) {
            // the csv crate writes `""` here; a bare line break keeps the cell unquoted
            writer.flush()?;
            let mut inner = writer.into_inner().map_err(|e| e.into_error())?;
            inner.write_all(b"\n")?;
            writer = builder.from_writer(inner);
        } else {
            writer.write_record(record)?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn is_single_empty_field(record: &[String]) -> bool {
    matches!(record, [only] if only.is_empty())
}

pub fn to_csv_bytes(table: &ExportTable) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    Ok(buf)
}
