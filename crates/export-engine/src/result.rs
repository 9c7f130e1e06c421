//! Format-agnostic export summary.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::profile::ExportProfileFormat;

/// Semantic key of a produced artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultKey {
    CsvManifestPath,
    TsvManifestPath,
    JsonManifestPath,
    MdManifestPath,
    SrtManifestPath,
    TxtManifestPath,
    XlsxManifestPath,
    MidiFilePath,
}

/// Artifacts a profile reports, in the order it reports them.
pub type ResultDictionary = IndexMap<ResultKey, PathBuf>;

/// What an export produced. Paths a profile did not produce stay `None`
/// and are left out of the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub profile: ExportProfileFormat,
    pub export_folder: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv_manifest_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsv_manifest_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_manifest_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md_manifest_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srt_manifest_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txt_manifest_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xlsx_manifest_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub midi_file_path: Option<PathBuf>,
}

impl ExportResult {
    /// A result with no artifacts.
    pub fn new(profile: ExportProfileFormat, export_folder: impl Into<PathBuf>) -> Self {
        Self {
            profile,
            export_folder: export_folder.into(),
            csv_manifest_path: None,
            tsv_manifest_path: None,
            json_manifest_path: None,
            md_manifest_path: None,
            srt_manifest_path: None,
            txt_manifest_path: None,
            xlsx_manifest_path: None,
            midi_file_path: None,
        }
    }

    pub fn from_dictionary(
        profile: ExportProfileFormat,
        export_folder: &Path,
        dictionary: ResultDictionary,
    ) -> Self {
        let mut result = Self::new(profile, export_folder);
        for (key, path) in dictionary {
            *result.slot_mut(key) = Some(path);
        }
        result
    }

    fn slot_mut(&mut self, key: ResultKey) -> &mut Option<PathBuf> {
        match key {
            ResultKey::CsvManifestPath => &mut self.csv_manifest_path,
            ResultKey::TsvManifestPath => &mut self.tsv_manifest_path,
            ResultKey::JsonManifestPath => &mut self.json_manifest_path,
            ResultKey::MdManifestPath => &mut self.md_manifest_path,
            ResultKey::SrtManifestPath => &mut self.srt_manifest_path,
            ResultKey::TxtManifestPath => &mut self.txt_manifest_path,
            ResultKey::XlsxManifestPath => &mut self.xlsx_manifest_path,
            ResultKey::MidiFilePath => &mut self.midi_file_path,
        }
    }

    /// Every produced artifact path.
    pub fn artifact_paths(&self) -> Vec<&Path> {
        [
            &self.csv_manifest_path,
            &self.tsv_manifest_path,
            &self.json_manifest_path,
            &self.md_manifest_path,
            &self.srt_manifest_path,
            &self.txt_manifest_path,
            &self.xlsx_manifest_path,
            &self.midi_file_path,
        ]
        .into_iter()
        .flatten()
        .map(PathBuf::as_path)
        .collect()
    }
}
