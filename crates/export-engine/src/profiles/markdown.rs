//! Markdown bullet list.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use markex_common::error::MarkexResult;
use markex_marker_model::{Marker, MarkerKind, TimelineContext};

use crate::fields::{export_fields, TableRow};
use crate::id::IdMode;
use crate::media::ExportMarkerMediaInfo;
use crate::profile::{ExportProfile, ExportProfileFormat};
use crate::profiles::manifest_path;
use crate::result::{ResultDictionary, ResultKey};
use crate::serializers::write_file;
use crate::timing::{format_position, TimeFormat};

export_fields! {
    pub enum MarkdownField {
        Position = ("position", "Position"),
        Name = ("name", "Name"),
        Status = ("status", "Status"),
        Notes = ("notes", "Notes"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownMarker {
    pub position: String,
    pub name: String,
    /// `Done` / `Not Done` for to-dos, empty otherwise.
    pub status: String,
    pub notes: String,
}

/// Suffix shown after a marker's name. Chapters and captions get none.
fn status_suffix(kind: &MarkerKind) -> &'static str {
    match kind {
        MarkerKind::ToDo { completed: true } => "Done",
        MarkerKind::ToDo { completed: false } => "Not Done",
        MarkerKind::Standard | MarkerKind::Chapter | MarkerKind::Caption => "",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownPayload {
    pub title: String,
    pub md_path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownProfile;

impl MarkdownProfile {
    pub fn render(&self, markers: &[MarkdownMarker], title: &str) -> String {
        let mut out = format!("# {title}\n\n");
        for marker in markers {
            let _ = write!(out, "- {} {}", marker.position, marker.name);
            if !marker.status.is_empty() {
                let _ = write!(out, " ({})", marker.status);
            }
            if !marker.notes.is_empty() {
                let _ = write!(out, ": {}", marker.notes);
            }
            out.push('\n');
        }
        out
    }
}

impl ExportProfile for MarkdownProfile {
    type Field = MarkdownField;
    type Marker = MarkdownMarker;
    type Payload = MarkdownPayload;

    const FORMAT: ExportProfileFormat = ExportProfileFormat::Markdown;
    const MEDIA_CAPABLE: bool = false;

    fn payload(&self, context: &TimelineContext, output_dir: &Path) -> MarkdownPayload {
        MarkdownPayload {
            title: context.timeline_name.clone(),
            md_path: manifest_path(context, output_dir, "md"),
        }
    }

    fn prepare_markers(
        &self,
        markers: &[Marker],
        context: &TimelineContext,
        _id_mode: IdMode,
        time_format: TimeFormat,
        _payload: &MarkdownPayload,
        _media: Option<&ExportMarkerMediaInfo>,
    ) -> Vec<MarkdownMarker> {
        markers
            .iter()
            .map(|m| MarkdownMarker {
                position: format_position(&m.position, context, time_format, false),
                name: m.name.clone(),
                status: status_suffix(&m.kind).to_string(),
                notes: m.notes.clone(),
            })
            .collect()
    }

    fn write_manifests(
        &self,
        markers: &[MarkdownMarker],
        payload: &MarkdownPayload,
        _no_media: bool,
    ) -> MarkexResult<()> {
        write_file(&payload.md_path, self.render(markers, &payload.title).as_bytes())
    }

    fn result_file_content(&self, payload: &MarkdownPayload) -> ResultDictionary {
        ResultDictionary::from([(ResultKey::MdManifestPath, payload.md_path.clone())])
    }

    fn table_manifest_fields(
        &self,
        marker: &MarkdownMarker,
        _no_media: bool,
    ) -> TableRow<MarkdownField> {
        TableRow::from([
            (MarkdownField::Position, marker.position.clone()),
            (MarkdownField::Name, marker.name.clone()),
            (MarkdownField::Status, marker.status.clone()),
            (MarkdownField::Notes, marker.notes.clone()),
        ])
    }
}
