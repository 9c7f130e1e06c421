//! Airtable upload: a nested JSON manifest.

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
use crate::serializers::{json_manifest, write_file};
use crate::timing::TimeFormat;

export_fields! {
    pub enum AirtableField {
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

impl StandardField for AirtableField {
    fn column(&self) -> StandardColumn {
        match self {
            AirtableField::Id => StandardColumn::Id,
            AirtableField::Name => StandardColumn::Name,
            AirtableField::Type => StandardColumn::Type,
            AirtableField::Checked => StandardColumn::Checked,
            AirtableField::Status => StandardColumn::Status,
            AirtableField::Notes => StandardColumn::Notes,
            AirtableField::Position => StandardColumn::Position,
            AirtableField::ClipType => StandardColumn::ClipType,
            AirtableField::ClipName => StandardColumn::ClipName,
            AirtableField::ClipDuration => StandardColumn::ClipDuration,
            AirtableField::VideoRole => StandardColumn::VideoRole,
            AirtableField::AudioRole => StandardColumn::AudioRole,
            AirtableField::CaptionRole => StandardColumn::CaptionRole,
            AirtableField::Reel => StandardColumn::Reel,
            AirtableField::Scene => StandardColumn::Scene,
            AirtableField::Take => StandardColumn::Take,
            AirtableField::EventName => StandardColumn::EventName,
            AirtableField::ProjectName => StandardColumn::ProjectName,
            AirtableField::LibraryName => StandardColumn::LibraryName,
            AirtableField::ImageTimecode => StandardColumn::ImageTimecode,
            AirtableField::ImageFileName => StandardColumn::ImageFileName,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirtablePayload {
    pub json_path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AirtableProfile;

impl ExportProfile for AirtableProfile {
    type Field = AirtableField;
    type Marker = StandardExportMarker;
    type Payload = AirtablePayload;

    const FORMAT: ExportProfileFormat = ExportProfileFormat::Airtable;
    const MEDIA_CAPABLE: bool = true;

    fn payload(&self, context: &TimelineContext, output_dir: &Path) -> AirtablePayload {
        AirtablePayload {
            json_path: manifest_path(context, output_dir, "json"),
        }
    }

    fn prepare_markers(
        &self,
        markers: &[Marker],
        context: &TimelineContext,
        id_mode: IdMode,
        time_format: TimeFormat,
        _payload: &AirtablePayload,
        media: Option<&ExportMarkerMediaInfo>,
    ) -> Vec<StandardExportMarker> {
        prepare_standard_markers(markers, context, id_mode, time_format, media)
    }

    fn write_manifests(
        &self,
        markers: &[StandardExportMarker],
        payload: &AirtablePayload,
        no_media: bool,
    ) -> MarkexResult<()> {
        let json = json_manifest(&self.nested_rows(markers, no_media))?;
        write_file(&payload.json_path, &json)
    }

    fn result_file_content(&self, payload: &AirtablePayload) -> ResultDictionary {
        ResultDictionary::from([(ResultKey::JsonManifestPath, payload.json_path.clone())])
    }

    fn table_manifest_fields(
        &self,
        marker: &StandardExportMarker,
        no_media: bool,
    ) -> TableRow<AirtableField> {
        standard_table_row(marker, no_media)
    }

    fn nested_manifest_fields(
        &self,
        marker: &StandardExportMarker,
        no_media: bool,
    ) -> NestedRow<AirtableField> {
        standard_nested_row(marker, no_media)
    }
}
