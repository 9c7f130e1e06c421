//! Manifest serializers shared by the profiles.
//!
//! Serializers render into memory; [`write_file`] is the single place that
//! touches the destination, so encoding failures never leave a half-written
//! manifest behind.

pub mod delimited;
pub mod done_file;
pub mod json;
pub mod xlsx;

use std::path::Path;

use markex_common::error::{MarkexError, MarkexResult};

pub use delimited::{delimited_table, DelimitedOptions, Quoting};
pub use done_file::{done_file_path, write_done_file};
pub use json::json_manifest;
pub use xlsx::{column_width, write_xlsx_manifest, XlsxManifest};

/// Write a whole buffer to `path`.
pub fn write_file(path: &Path, bytes: &[u8]) -> MarkexResult<()> {
    std::fs::write(path, bytes).map_err(|e| MarkexError::file_write(path, e))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote manifest");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_into_missing_dir_is_file_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let err = write_file(&path, b"x").unwrap_err();
        assert!(matches!(err, MarkexError::FileWrite { .. }));
        assert!(err.is_write_failure());
    }
}
