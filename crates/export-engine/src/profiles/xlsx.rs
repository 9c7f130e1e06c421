//! Excel workbook manifest.

use std::path::{Path, PathBuf};

use markex_common::error::MarkexResult;
use markex_marker_model::{Marker, TimelineContext};

use crate::fields::{export_fields, TableRow};
use crate::id::IdMode;
use crate::media::ExportMarkerMediaInfo;
use crate::profile::{ExportProfile, ExportProfileFormat};
use crate::profiles::manifest_path;
use crate::profiles::standard::{
    prepare_standard_markers, standard_table_row, StandardColumn, StandardExportMarker,
    StandardField,
};
use crate::result::{ResultDictionary, ResultKey};
use crate::serializers::write_xlsx_manifest;
use crate::timing::TimeFormat;

const SHEET_NAME: &str = "Markers";

export_fields! {
    pub enum XlsxField {
        Id = ("id", "Marker ID"),
        Name = ("name", "Marker Name"),
        Type = ("type", "Type"),
        Checked = ("checked", "Checked"),
        Status = ("status", "Status"),
        Notes = ("notes", "Notes"),
        Position = ("position", "Marker Position"),
        ClipType = ("clipType", "Clip Type"),
        ClipName = ("clipName", "Clip Name"),
        ClipDuration = ("clipDuration", "Clip Duration"),
        VideoRole = ("videoRole", "Video Role"),
        AudioRole = ("audioRole", "Audio Role"),
        CaptionRole = ("captionRole", "Caption Role"),
        Reel = ("reel", "Reel"),
        Scene = ("scene", "Scene"),
        Take = ("take", "Take"),
        EventName = ("eventName", "Event Name"),
        ProjectName = ("projectName", "Project Name"),
        LibraryName = ("libraryName", "Library Name"),
        ImageTimecode = ("imageTimecode", "Image Timecode", media),
        ImageFileName = ("imageFileName", "Image Filename", media),
    }
}

impl StandardField for XlsxField {
    fn column(&self) -> StandardColumn {
        match self {
            XlsxField::Id => StandardColumn::Id,
            XlsxField::Name => StandardColumn::Name,
            XlsxField::Type => StandardColumn::Type,
            XlsxField::Checked => StandardColumn::Checked,
            XlsxField::Status => StandardColumn::Status,
            XlsxField::Notes => StandardColumn::Notes,
            XlsxField::Position => StandardColumn::Position,
            XlsxField::ClipType => StandardColumn::ClipType,
            XlsxField::ClipName => StandardColumn::ClipName,
            XlsxField::ClipDuration => StandardColumn::ClipDuration,
            XlsxField::VideoRole => StandardColumn::VideoRole,
            XlsxField::AudioRole => StandardColumn::AudioRole,
            XlsxField::CaptionRole => StandardColumn::CaptionRole,
            XlsxField::Reel => StandardColumn::Reel,
            XlsxField::Scene => StandardColumn::Scene,
            XlsxField::Take => StandardColumn::Take,
            XlsxField::EventName => StandardColumn::EventName,
            XlsxField::ProjectName => StandardColumn::ProjectName,
            XlsxField::LibraryName => StandardColumn::LibraryName,
            XlsxField::ImageTimecode => StandardColumn::ImageTimecode,
            XlsxField::ImageFileName => StandardColumn::ImageFileName,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XlsxPayload {
    pub xlsx_path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxProfile;

impl ExportProfile for XlsxProfile {
    type Field = XlsxField;
    type Marker = StandardExportMarker;
    type Payload = XlsxPayload;

    const FORMAT: ExportProfileFormat = ExportProfileFormat::Xlsx;
    const MEDIA_CAPABLE: bool = true;

    fn payload(&self, context: &TimelineContext, output_dir: &Path) -> XlsxPayload {
        XlsxPayload {
            xlsx_path: manifest_path(context, output_dir, "xlsx"),
        }
    }

    fn prepare_markers(
        &self,
        markers: &[Marker],
        context: &TimelineContext,
        id_mode: IdMode,
        time_format: TimeFormat,
        _payload: &XlsxPayload,
        media: Option<&ExportMarkerMediaInfo>,
    ) -> Vec<StandardExportMarker> {
        prepare_standard_markers(markers, context, id_mode, time_format, media)
    }

    fn write_manifests(
        &self,
        markers: &[StandardExportMarker],
        payload: &XlsxPayload,
        no_media: bool,
    ) -> MarkexResult<()> {
        write_xlsx_manifest(&self.table_rows(markers, no_media), SHEET_NAME, &payload.xlsx_path)
    }

    fn result_file_content(&self, payload: &XlsxPayload) -> ResultDictionary {
        ResultDictionary::from([(ResultKey::XlsxManifestPath, payload.xlsx_path.clone())])
    }

    fn table_manifest_fields(
        &self,
        marker: &StandardExportMarker,
        no_media: bool,
    ) -> TableRow<XlsxField> {
        standard_table_row(marker, no_media)
    }
}
