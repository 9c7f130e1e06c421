//! Excel workbook manifests.

use std::path::Path;

use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook, Worksheet, XlsxError};

use markex_common::error::{MarkexError, MarkexResult};

use crate::fields::{ExportField, TableRow};
use crate::serializers::write_file;

const MIN_COLUMN_WIDTH: usize = 5;
const MAX_COLUMN_WIDTH: usize = 100;

/// Width of a column whose longest cell is `max_chars` characters.
pub fn column_width(max_chars: usize) -> usize {
    max_chars.clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
}

fn xlsx_error(e: XlsxError) -> MarkexError {
    MarkexError::encoding(format!("xlsx: {e}"))
}

/// A single-sheet workbook under construction.
///
/// The workbook is only assembled and saved by [`XlsxManifest::finish`], which
/// consumes the manifest, so it cannot be finalized twice.
pub struct XlsxManifest {
    worksheet: Worksheet,
    header_format: Format,
    widths: Vec<usize>,
    next_row: u32,
}

impl XlsxManifest {
    pub fn new(sheet_name: &str) -> MarkexResult<Self> {
        let mut worksheet = Worksheet::new();
        worksheet.set_name(sheet_name).map_err(xlsx_error)?;
        Ok(Self {
            worksheet,
            header_format: Format::new().set_bold(),
            widths: Vec::new(),
            next_row: 0,
        })
    }

    pub fn write_header<'a>(
        &mut self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> MarkexResult<()> {
        let format = self.header_format.clone();
        self.write_cells(names, Some(&format))
    }

    pub fn write_row<'a>(&mut self, cells: impl IntoIterator<Item = &'a str>) -> MarkexResult<()> {
        self.write_cells(cells, None)
    }

    fn write_cells<'a>(
        &mut self,
        cells: impl IntoIterator<Item = &'a str>,
        format: Option<&Format>,
    ) -> MarkexResult<()> {
        let row = self.next_row;
        for (index, cell) in cells.into_iter().enumerate() {
            let col = u16::try_from(index)
                .map_err(|_| MarkexError::encoding(format!("too many columns: {index}")))?;
            match format {
                Some(format) => self.worksheet.write_string_with_format(row, col, cell, format),
                None => self.worksheet.write_string(row, col, cell),
            }
            .map_err(xlsx_error)?;

            if self.widths.len() <= index {
                self.widths.resize(index + 1, 0);
            }
            self.widths[index] = self.widths[index].max(cell.chars().count());
        }
        self.next_row += 1;
        Ok(())
    }

    /// Number of rows written so far, header included.
    pub fn rows(&self) -> u32 {
        self.next_row
    }

    /// Size columns, assemble the workbook and write it to `path`.
    pub fn finish(mut self, path: &Path) -> MarkexResult<()> {
        for (index, max_chars) in self.widths.iter().enumerate() {
            let col = u16::try_from(index)
                .map_err(|_| MarkexError::encoding(format!("too many columns: {index}")))?;
            self.worksheet
                .set_column_width(col, column_width(*max_chars) as f64)
                .map_err(xlsx_error)?;
        }

        // Fixed creation date keeps identical input byte-identical.
        let created = ExcelDateTime::from_ymd(2000, 1, 1).map_err(xlsx_error)?;
        let properties = DocProperties::new().set_creation_datetime(&created);

        let mut workbook = Workbook::new();
        workbook.set_properties(&properties);
        workbook.push_worksheet(self.worksheet);
        let buffer = workbook.save_to_buffer().map_err(xlsx_error)?;

        write_file(path, &buffer)
    }
}

/// Header plus one row per entry, written as a workbook to `path`.
pub fn write_xlsx_manifest<F: ExportField>(
    rows: &[TableRow<F>],
    sheet_name: &str,
    path: &Path,
) -> MarkexResult<()> {
    let mut manifest = XlsxManifest::new(sheet_name)?;
    if let Some(first) = rows.first() {
        manifest.write_header(first.keys().map(|f| f.name()))?;
        for row in rows {
            manifest.write_row(row.values().map(String::as_str))?;
        }
    }
    tracing::debug!(rows = manifest.rows(), "Built workbook");
    manifest.finish(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_width_bounds() {
        assert_eq!(column_width(3), 5);
        assert_eq!(column_width(42), 42);
        assert_eq!(column_width(150), 100);
    }

    #[test]
    fn test_widths_track_longest_cell() {
        let mut manifest = XlsxManifest::new("Markers").unwrap();
        manifest.write_header(["Id", "Marker Name"]).unwrap();
        manifest.write_row(["Edit_01:00:00:00", "A"]).unwrap();
        assert_eq!(manifest.widths, vec![16, 11]);
        assert_eq!(manifest.rows(), 2);
    }

    #[test]
    fn test_finish_writes_zip_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Edit.xlsx");
        let mut manifest = XlsxManifest::new("Markers").unwrap();
        manifest.write_header(["Name"]).unwrap();
        manifest.finish(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    fn zip_entry(path: &Path, name: &str) -> String {
        use std::io::Read;

        let file = std::fs::File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut xml = String::new();
        entry.read_to_string(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_saved_workbook_has_bold_header_and_sized_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Edit.xlsx");
        let mut manifest = XlsxManifest::new("Markers").unwrap();
        manifest.write_header(["Id", "Marker Name"]).unwrap();
        manifest.write_row(["Edit_01:00:00:00", "A"]).unwrap();
        manifest.finish(&path).unwrap();

        let workbook = zip_entry(&path, "xl/workbook.xml");
        assert!(workbook.contains(r#"name="Markers""#));

        let sheet = zip_entry(&path, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains(r#"<c r="A1" s="1" t="s">"#));
        assert!(sheet.contains(r#"<c r="A2" t="s">"#));
        assert!(sheet.contains(r#"width="16.71"#));
        assert!(sheet.contains(r#"width="11.71"#));

        let styles = zip_entry(&path, "xl/styles.xml");
        assert!(styles.contains("<b/>"));

        let strings = zip_entry(&path, "xl/sharedStrings.xml");
        assert!(strings.contains("Marker Name"));
        assert!(strings.contains("Edit_01:00:00:00"));
    }

    proptest! {
        #[test]
        fn column_width_is_always_clamped(chars in 0usize..10_000) {
            let width = column_width(chars);
            prop_assert!((MIN_COLUMN_WIDTH..=MAX_COLUMN_WIDTH).contains(&width));
        }
    }
}
