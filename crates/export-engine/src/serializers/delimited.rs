//! CSV and TSV tables.

use markex_common::error::{MarkexError, MarkexResult};

use crate::fields::{ExportField, TableRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    /// Quote cells only when they contain the delimiter, quotes or newlines.
    Necessary,
    /// Never quote. Callers must keep cells free of delimiters.
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedOptions {
    pub delimiter: u8,
    pub header: bool,
    pub quoting: Quoting,
}

impl DelimitedOptions {
    pub const CSV: DelimitedOptions = DelimitedOptions {
        delimiter: b',',
        header: true,
        quoting: Quoting::Necessary,
    };

    pub const TSV: DelimitedOptions = DelimitedOptions {
        delimiter: b'\t',
        header: true,
        quoting: Quoting::Necessary,
    };
}

/// Render rows as a delimited table. The header comes from the first row's
/// keys; an empty slice renders to an empty buffer.
pub fn delimited_table<F: ExportField>(
    rows: &[TableRow<F>],
    options: DelimitedOptions,
) -> MarkexResult<Vec<u8>> {
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(match options.quoting {
            Quoting::Necessary => csv::QuoteStyle::Necessary,
            Quoting::Never => csv::QuoteStyle::Never,
        })
        .from_writer(Vec::new());

    if options.header {
        writer
            .write_record(first.keys().map(|f| f.name()))
            .map_err(|e| MarkexError::encoding(format!("header: {e}")))?;
    }

    for (index, row) in rows.iter().enumerate() {
        writer
            .write_record(row.values())
            .map_err(|e| MarkexError::encoding(format!("row {index}: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| MarkexError::encoding(e.to_string()))
}
