//! Done-file: the export summary written beside the manifests.

use std::path::{Path, PathBuf};

use markex_common::error::{MarkexError, MarkexResult};

use crate::result::ExportResult;
use crate::serializers::write_file;

/// Where the done-file for `result` goes.
///
/// The name must be a plain file name and must not coincide with any
/// manifest the profile reports.
pub fn done_file_path(result: &ExportResult, file_name: &str) -> MarkexResult<PathBuf> {
    if file_name.is_empty() || Path::new(file_name).components().count() != 1 {
        return Err(MarkexError::invalid_input(format!(
            "done-file name must be a plain file name, got {file_name:?}"
        )));
    }

    let path = result.export_folder.join(file_name);
    if result.artifact_paths().contains(&path.as_path()) {
        return Err(MarkexError::invalid_input(format!(
            "done-file {} would overwrite a {} manifest",
            path.display(),
            result.profile
        )));
    }
    Ok(path)
}

/// Serialize `result` into `<export folder>/<file_name>`.
pub fn write_done_file(result: &ExportResult, file_name: &str) -> MarkexResult<PathBuf> {
    let path = done_file_path(result, file_name)?;
    let json = serde_json::to_vec_pretty(result).map_err(|e| MarkexError::encoding(e.to_string()))?;
    write_file(&path, &json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ExportProfileFormat;

    #[test]
    fn test_done_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut result = ExportResult::new(ExportProfileFormat::SubRip, dir.path());
        result.srt_manifest_path = Some(dir.path().join("Edit.srt"));

        let path = write_done_file(&result, "done.json").unwrap();
        let parsed: ExportResult =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_rejects_nested_names() {
        let dir = tempfile::tempdir().unwrap();
        let result = ExportResult::new(ExportProfileFormat::Midi, dir.path());
        assert!(write_done_file(&result, "../done.json").is_err());
        assert!(write_done_file(&result, "").is_err());
    }

    #[test]
    fn test_rejects_name_of_a_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let mut result = ExportResult::new(ExportProfileFormat::Airtable, dir.path());
        result.json_manifest_path = Some(dir.path().join("done.json"));

        let err = write_done_file(&result, "done.json").unwrap_err();
        assert!(matches!(err, MarkexError::InvalidInput { .. }));
        assert!(!dir.path().join("done.json").exists());
        assert!(done_file_path(&result, "summary.json").is_ok());
    }
}
