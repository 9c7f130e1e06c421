//! Apple Compressor chapter list: `<timecode>\t<name>` lines.

use std::path::{Path, PathBuf};

use markex_common::error::MarkexResult;
use markex_marker_model::{Marker, TimelineContext};

use crate::fields::{export_fields, TableRow};
use crate::id::IdMode;
use crate::media::ExportMarkerMediaInfo;
use crate::profile::{ExportProfile, ExportProfileFormat};
use crate::profiles::manifest_path;
use crate::result::{ResultDictionary, ResultKey};
use crate::serializers::{delimited_table, write_file, DelimitedOptions, Quoting};
use crate::timing::{format_position, TimeFormat};

const COMPRESSOR_OPTIONS: DelimitedOptions = DelimitedOptions {
    delimiter: b'\t',
    header: false,
    quoting: Quoting::Never,
};

export_fields! {
    pub enum CompressorField {
        Position = ("position", "Position"),
        Name = ("name", "Name"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressorMarker {
    pub position: String,
    pub name: String,
}

/// Unquoted cells cannot carry the delimiter or line breaks.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c })
        .collect()
}

/// Compressor drops the last line unless it is newline-terminated.
pub fn with_single_trailing_newline(mut bytes: Vec<u8>) -> Vec<u8> {
    while bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    bytes.push(b'\n');
    bytes
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressorPayload {
    pub txt_path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CompressorProfile;

impl ExportProfile for CompressorProfile {
    type Field = CompressorField;
    type Marker = CompressorMarker;
    type Payload = CompressorPayload;

    const FORMAT: ExportProfileFormat = ExportProfileFormat::Compressor;
    const MEDIA_CAPABLE: bool = false;

    fn payload(&self, context: &TimelineContext, output_dir: &Path) -> CompressorPayload {
        CompressorPayload {
            txt_path: manifest_path(context, output_dir, "txt"),
        }
    }

    fn prepare_markers(
        &self,
        markers: &[Marker],
        context: &TimelineContext,
        _id_mode: IdMode,
        time_format: TimeFormat,
        _payload: &CompressorPayload,
        _media: Option<&ExportMarkerMediaInfo>,
    ) -> Vec<CompressorMarker> {
        markers
            .iter()
            .map(|m| CompressorMarker {
                position: format_position(&m.position, context, time_format, true),
                name: sanitize(&m.name),
            })
            .collect()
    }

    fn write_manifests(
        &self,
        markers: &[CompressorMarker],
        payload: &CompressorPayload,
        no_media: bool,
    ) -> MarkexResult<()> {
        let table = delimited_table(&self.table_rows(markers, no_media), COMPRESSOR_OPTIONS)?;
        write_file(&payload.txt_path, &with_single_trailing_newline(table))
    }

    fn result_file_content(&self, payload: &CompressorPayload) -> ResultDictionary {
        ResultDictionary::from([(ResultKey::TxtManifestPath, payload.txt_path.clone())])
    }

    fn table_manifest_fields(
        &self,
        marker: &CompressorMarker,
        _no_media: bool,
    ) -> TableRow<CompressorField> {
        TableRow::from([
            (CompressorField::Position, marker.position.clone()),
            (CompressorField::Name, marker.name.clone()),
        ])
    }
}
