//! The export profile contract and the closed set of profiles.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use markex_common::error::MarkexResult;
use markex_marker_model::{Marker, TimelineContext};

use crate::fields::{ExportField, ExportFieldValue, NestedRow, TableRow};
use crate::id::IdMode;
use crate::media::ExportMarkerMediaInfo;
use crate::result::ResultDictionary;
use crate::timing::TimeFormat;

/// One output format's complete export behaviour.
///
/// Only [`ExportProfile::write_manifests`] touches the filesystem; everything
/// else is a pure projection of its inputs.
pub trait ExportProfile {
    /// Manifest column catalog.
    type Field: ExportField;

    /// Flattened, ready-to-serialize marker.
    type Marker: fmt::Debug + Clone;

    /// Output paths for one invocation.
    type Payload: fmt::Debug + Clone;

    const FORMAT: ExportProfileFormat;

    /// Whether the profile ever references marker thumbnails.
    const MEDIA_CAPABLE: bool;

    /// Output paths derived from the timeline name under `output_dir`.
    fn payload(&self, context: &TimelineContext, output_dir: &Path) -> Self::Payload;

    /// Effective time format given what the caller asked for.
    fn time_format(&self, requested: Option<TimeFormat>) -> TimeFormat {
        requested.unwrap_or_default()
    }

    /// Project markers into this profile's prepared form. One output per
    /// input unless the profile documents otherwise.
    fn prepare_markers(
        &self,
        markers: &[Marker],
        context: &TimelineContext,
        id_mode: IdMode,
        time_format: TimeFormat,
        payload: &Self::Payload,
        media: Option<&ExportMarkerMediaInfo>,
    ) -> Vec<Self::Marker>;

    /// Serialize prepared markers to the payload's paths.
    fn write_manifests(
        &self,
        markers: &[Self::Marker],
        payload: &Self::Payload,
        no_media: bool,
    ) -> MarkexResult<()>;

    /// Artifacts written by a successful [`ExportProfile::write_manifests`].
    fn result_file_content(&self, payload: &Self::Payload) -> ResultDictionary;

    /// Flat row for tabular manifests. Key order is column order and is the
    /// same for every row of one invocation.
    fn table_manifest_fields(
        &self,
        marker: &Self::Marker,
        no_media: bool,
    ) -> TableRow<Self::Field>;

    /// Row for nested manifests. Defaults to the tabular row.
    fn nested_manifest_fields(
        &self,
        marker: &Self::Marker,
        no_media: bool,
    ) -> NestedRow<Self::Field> {
        self.table_manifest_fields(marker, no_media)
            .into_iter()
            .map(|(field, value)| (field, ExportFieldValue::String(value)))
            .collect::<IndexMap<_, _>>()
    }

    fn table_rows(&self, markers: &[Self::Marker], no_media: bool) -> Vec<TableRow<Self::Field>> {
        markers
            .iter()
            .map(|m| self.table_manifest_fields(m, no_media))
            .collect()
    }

    fn nested_rows(
        &self,
        markers: &[Self::Marker],
        no_media: bool,
    ) -> Vec<NestedRow<Self::Field>> {
        markers
            .iter()
            .map(|m| self.nested_manifest_fields(m, no_media))
            .collect()
    }
}

/// Every supported profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportProfileFormat {
    /// CSV + JSON for Notion database import.
    Notion,
    /// JSON for Airtable upload.
    Airtable,
    /// Excel workbook.
    Xlsx,
    /// Tab-separated values.
    Tsv,
    /// Markdown bullet list.
    Markdown,
    /// SubRip subtitles.
    #[serde(rename = "srt")]
    SubRip,
    /// Apple Compressor chapter list.
    Compressor,
    /// YouTube chapter list.
    #[serde(rename = "youtube")]
    YouTube,
    /// Standard MIDI file with marker events.
    Midi,
}

impl ExportProfileFormat {
    pub const ALL: [ExportProfileFormat; 9] = [
        ExportProfileFormat::Notion,
        ExportProfileFormat::Airtable,
        ExportProfileFormat::Xlsx,
        ExportProfileFormat::Tsv,
        ExportProfileFormat::Markdown,
        ExportProfileFormat::SubRip,
        ExportProfileFormat::Compressor,
        ExportProfileFormat::YouTube,
        ExportProfileFormat::Midi,
    ];

    /// Identifier used on the command line and in results.
    pub fn as_str(self) -> &'static str {
        match self {
            ExportProfileFormat::Notion => "notion",
            ExportProfileFormat::Airtable => "airtable",
            ExportProfileFormat::Xlsx => "xlsx",
            ExportProfileFormat::Tsv => "tsv",
            ExportProfileFormat::Markdown => "markdown",
            ExportProfileFormat::SubRip => "srt",
            ExportProfileFormat::Compressor => "compressor",
            ExportProfileFormat::YouTube => "youtube",
            ExportProfileFormat::Midi => "midi",
        }
    }

    /// Extensions of the files the profile writes.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ExportProfileFormat::Notion => &["csv", "json"],
            ExportProfileFormat::Airtable => &["json"],
            ExportProfileFormat::Xlsx => &["xlsx"],
            ExportProfileFormat::Tsv => &["tsv"],
            ExportProfileFormat::Markdown => &["md"],
            ExportProfileFormat::SubRip => &["srt"],
            ExportProfileFormat::Compressor | ExportProfileFormat::YouTube => &["txt"],
            ExportProfileFormat::Midi => &["mid"],
        }
    }
}

impl fmt::Display for ExportProfileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExportProfileFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ExportProfileFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> =
                    ExportProfileFormat::ALL.iter().map(|f| f.as_str()).collect();
                format!("Unknown profile: {s}. Use: {}", known.join(", "))
            })
    }
}

/// Caller-selected export settings shared by every profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub id_mode: IdMode,

    /// `None` lets each profile pick its natural format.
    pub time_format: Option<TimeFormat>,

    /// Suppress image-related columns.
    pub no_media: bool,

    /// Done-file name inside the export folder. `None` skips it.
    pub done_filename: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            id_mode: IdMode::default(),
            time_format: None,
            no_media: false,
            done_filename: Some("done.json".to_string()),
        }
    }
}

/// Everything the extraction and thumbnail steps hand over.
#[derive(Debug, Clone)]
pub struct ExportInput {
    pub context: TimelineContext,

    /// Markers in timeline order.
    pub markers: Vec<Marker>,

    /// `None` disables image file names entirely.
    pub media: Option<ExportMarkerMediaInfo>,
}
