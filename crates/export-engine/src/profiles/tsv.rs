//! Tab-separated values with a header row.

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
use crate::serializers::{delimited_table, write_file, DelimitedOptions};
use crate::timing::TimeFormat;

export_fields! {
    pub enum TsvField {
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

impl StandardField for TsvField {
    fn column(&self) -> StandardColumn {
        match self {
            TsvField::Id => StandardColumn::Id,
            TsvField::Name => StandardColumn::Name,
            TsvField::Type => StandardColumn::Type,
            TsvField::Checked => StandardColumn::Checked,
            TsvField::Status => StandardColumn::Status,
            TsvField::Notes => StandardColumn::Notes,
            TsvField::Position => StandardColumn::Position,
            TsvField::ClipType => StandardColumn::ClipType,
            TsvField::ClipName => StandardColumn::ClipName,
            TsvField::ClipDuration => StandardColumn::ClipDuration,
            TsvField::VideoRole => StandardColumn::VideoRole,
            TsvField::AudioRole => StandardColumn::AudioRole,
            TsvField::CaptionRole => StandardColumn::CaptionRole,
            TsvField::Reel => StandardColumn::Reel,
            TsvField::Scene => StandardColumn::Scene,
            TsvField::Take => StandardColumn::Take,
            TsvField::EventName => StandardColumn::EventName,
            TsvField::ProjectName => StandardColumn::ProjectName,
            TsvField::LibraryName => StandardColumn::LibraryName,
            TsvField::ImageTimecode => StandardColumn::ImageTimecode,
            TsvField::ImageFileName => StandardColumn::ImageFileName,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsvPayload {
    pub tsv_path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TsvProfile;

impl ExportProfile for TsvProfile {
    type Field = TsvField;
    type Marker = StandardExportMarker;
    type Payload = TsvPayload;

    const FORMAT: ExportProfileFormat = ExportProfileFormat::Tsv;
    const MEDIA_CAPABLE: bool = true;

    fn payload(&self, context: &TimelineContext, output_dir: &Path) -> TsvPayload {
        TsvPayload {
            tsv_path: manifest_path(context, output_dir, "tsv"),
        }
    }

    fn prepare_markers(
        &self,
        markers: &[Marker],
        context: &TimelineContext,
        id_mode: IdMode,
        time_format: TimeFormat,
        _payload: &TsvPayload,
        media: Option<&ExportMarkerMediaInfo>,
    ) -> Vec<StandardExportMarker> {
        prepare_standard_markers(markers, context, id_mode, time_format, media)
    }

    fn write_manifests(
        &self,
        markers: &[StandardExportMarker],
        payload: &TsvPayload,
        no_media: bool,
    ) -> MarkexResult<()> {
        let tsv = delimited_table(&self.table_rows(markers, no_media), DelimitedOptions::TSV)?;
        write_file(&payload.tsv_path, &tsv)
    }

    fn result_file_content(&self, payload: &TsvPayload) -> ResultDictionary {
        ResultDictionary::from([(ResultKey::TsvManifestPath, payload.tsv_path.clone())])
    }

    fn table_manifest_fields(
        &self,
        marker: &StandardExportMarker,
        no_media: bool,
    ) -> TableRow<TsvField> {
        standard_table_row(marker, no_media)
    }
}
