//! Notion database import: CSV plus a JSON twin with role arrays.

use std::path::{Path, PathBuf};

use markex_common::error::MarkexResult;
use markex_marker_model::{Marker, TimelineContext};

use crate::fields::{export_fields, NestedRow, TableRow};
use crate::id::IdMode;
use crate::media::ExportMarkerMediaInfo;
use crate::profile::{ExportProfile, ExportProfileFormat};
use crate::profiles::manifest_path;
use crate::profiles::standard::{
    prepare_standard_markers, standard_nested_row, standard_table_row, StandardColumn,
    StandardExportMarker, StandardField,
};
use crate::result::{ResultDictionary, ResultKey};
use crate::serializers::{delimited_table, json_manifest, write_file, DelimitedOptions};
use crate::timing::TimeFormat;

export_fields! {
    pub enum NotionField {
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
        EventName = ("eventName", "Event Name"),
        ProjectName = ("projectName", "Project Name"),
        LibraryName = ("libraryName", "Library Name"),
        IconImage = ("iconImage", "Icon Image", media),
        ImageTimecode = ("imageTimecode", "Image Timecode", media),
        ImageFileName = ("imageFileName", "Image Filename", media),
    }
}

impl StandardField for NotionField {
    fn column(&self) -> StandardColumn {
        match self {
            NotionField::Id => StandardColumn::Id,
            NotionField::Name => StandardColumn::Name,
            NotionField::Type => StandardColumn::Type,
            NotionField::Checked => StandardColumn::Checked,
            NotionField::Status => StandardColumn::Status,
            NotionField::Notes => StandardColumn::Notes,
            NotionField::Position => StandardColumn::Position,
            NotionField::ClipType => StandardColumn::ClipType,
            NotionField::ClipName => StandardColumn::ClipName,
            NotionField::ClipDuration => StandardColumn::ClipDuration,
            NotionField::VideoRole => StandardColumn::VideoRole,
            NotionField::AudioRole => StandardColumn::AudioRole,
            NotionField::CaptionRole => StandardColumn::CaptionRole,
            NotionField::EventName => StandardColumn::EventName,
            NotionField::ProjectName => StandardColumn::ProjectName,
            NotionField::LibraryName => StandardColumn::LibraryName,
            NotionField::IconImage => StandardColumn::IconImage,
            NotionField::ImageTimecode => StandardColumn::ImageTimecode,
            NotionField::ImageFileName => StandardColumn::ImageFileName,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotionPayload {
    pub csv_path: PathBuf,
    pub json_path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NotionProfile;

impl ExportProfile for NotionProfile {
    type Field = NotionField;
    type Marker = StandardExportMarker;
    type Payload = NotionPayload;

    const FORMAT: ExportProfileFormat = ExportProfileFormat::Notion;
    const MEDIA_CAPABLE: bool = true;

    fn payload(&self, context: &TimelineContext, output_dir: &Path) -> NotionPayload {
        NotionPayload {
            csv_path: manifest_path(context, output_dir, "csv"),
            json_path: manifest_path(context, output_dir, "json"),
        }
    }

    fn prepare_markers(
        &self,
        markers: &[Marker],
        context: &TimelineContext,
        id_mode: IdMode,
        time_format: TimeFormat,
        _payload: &NotionPayload,
        media: Option<&ExportMarkerMediaInfo>,
    ) -> Vec<StandardExportMarker> {
        prepare_standard_markers(markers, context, id_mode, time_format, media)
    }

    fn write_manifests(
        &self,
        markers: &[StandardExportMarker],
        payload: &NotionPayload,
        no_media: bool,
    ) -> MarkexResult<()> {
        let csv = delimited_table(&self.table_rows(markers, no_media), DelimitedOptions::CSV)?;
        let json = json_manifest(&self.nested_rows(markers, no_media))?;
        write_file(&payload.csv_path, &csv)?;
        write_file(&payload.json_path, &json)
    }

    fn result_file_content(&self, payload: &NotionPayload) -> ResultDictionary {
        ResultDictionary::from([
            (ResultKey::CsvManifestPath, payload.csv_path.clone()),
            (ResultKey::JsonManifestPath, payload.json_path.clone()),
        ])
    }

    fn table_manifest_fields(
        &self,
        marker: &StandardExportMarker,
        no_media: bool,
    ) -> TableRow<NotionField> {
        standard_table_row(marker, no_media)
    }

    fn nested_manifest_fields(
        &self,
        marker: &StandardExportMarker,
        no_media: bool,
    ) -> NestedRow<NotionField> {
        standard_nested_row(marker, no_media)
    }
}
