//! YouTube chapter list for video descriptions.
//!
//! YouTube only recognises chapters when the first one starts at `00:00:00`,
//! so a chapter is synthesized there when the timeline does not provide one.

use std::path::{Path, PathBuf};

use markex_common::error::MarkexResult;
use markex_marker_model::{Marker, MarkerKind, TimelineContext};

use crate::fields::{export_fields, TableRow};
use crate::id::IdMode;
use crate::media::ExportMarkerMediaInfo;
use crate::profile::{ExportProfile, ExportProfileFormat};
use crate::profiles::manifest_path;
use crate::result::{ResultDictionary, ResultKey};
use crate::serializers::{delimited_table, write_file, DelimitedOptions, Quoting};
use crate::timing::{format_position, TimeFormat};

pub const INTRODUCTION_NAME: &str = "Introduction";
const ZERO: &str = "00:00:00";

const YOUTUBE_OPTIONS: DelimitedOptions = DelimitedOptions {
    delimiter: b' ',
    header: false,
    quoting: Quoting::Never,
};

export_fields! {
    pub enum YouTubeField {
        Position = ("position", "Timestamp"),
        Name = ("name", "Title"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YouTubeMarker {
    pub position: String,
    pub name: String,
}

/// Chapter at the timeline start, carrying `first`'s clip context.
fn introduction(first: &Marker, context: &TimelineContext) -> Marker {
    Marker {
        kind: MarkerKind::Chapter,
        name: INTRODUCTION_NAME.to_string(),
        notes: String::new(),
        roles: Vec::new(),
        position: context.start,
        ..first.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YouTubePayload {
    pub txt_path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YouTubeProfile;

impl ExportProfile for YouTubeProfile {
    type Field = YouTubeField;
    type Marker = YouTubeMarker;
    type Payload = YouTubePayload;

    const FORMAT: ExportProfileFormat = ExportProfileFormat::YouTube;
    const MEDIA_CAPABLE: bool = false;

    fn payload(&self, context: &TimelineContext, output_dir: &Path) -> YouTubePayload {
        YouTubePayload {
            txt_path: manifest_path(context, output_dir, "txt"),
        }
    }

    fn time_format(&self, _requested: Option<TimeFormat>) -> TimeFormat {
        TimeFormat::RealTime
    }

    fn prepare_markers(
        &self,
        markers: &[Marker],
        context: &TimelineContext,
        _id_mode: IdMode,
        time_format: TimeFormat,
        _payload: &YouTubePayload,
        _media: Option<&ExportMarkerMediaInfo>,
    ) -> Vec<YouTubeMarker> {
        let project = |m: &Marker| YouTubeMarker {
            position: format_position(&m.position, context, time_format, true),
            name: m.name.replace(['\n', '\r'], " "),
        };

        let mut prepared: Vec<YouTubeMarker> = markers.iter().map(project).collect();

        if let (Some(first), Some(head)) = (markers.first(), prepared.first()) {
            if head.position != ZERO {
                tracing::info!(
                    first_position = %head.position,
                    "First chapter is not at 00:00:00, adding an Introduction chapter"
                );
                let intro = project(&introduction(first, context));
                prepared.insert(0, intro);
            }
        }
        prepared
    }

    fn write_manifests(
        &self,
        markers: &[YouTubeMarker],
        payload: &YouTubePayload,
        no_media: bool,
    ) -> MarkexResult<()> {
        let text = delimited_table(&self.table_rows(markers, no_media), YOUTUBE_OPTIONS)?;
        write_file(&payload.txt_path, &text)
    }

    fn result_file_content(&self, payload: &YouTubePayload) -> ResultDictionary {
        ResultDictionary::from([(ResultKey::TxtManifestPath, payload.txt_path.clone())])
    }

    fn table_manifest_fields(
        &self,
        marker: &YouTubeMarker,
        _no_media: bool,
    ) -> TableRow<YouTubeField> {
        TableRow::from([
            (YouTubeField::Position, marker.position.clone()),
            (YouTubeField::Name, marker.name.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markex_marker_model::{FrameRate, ParentInfo, Timecode};

    fn prepare(markers: &[Marker], context: &TimelineContext) -> Vec<YouTubeMarker> {
        let profile = YouTubeProfile;
        let payload = profile.payload(context, Path::new("/out"));
        profile.prepare_markers(
            markers,
            context,
            IdMode::default(),
            profile.time_format(None),
            &payload,
            None,
        )
    }

    #[test]
    fn test_introduction_is_synthesized() {
        let rate = FrameRate::Fps25;
        let at = |s| Timecode::parse(s, rate).unwrap();
        let context = TimelineContext::new("Edit", at("01:00:00:00"));
        let markers = vec![
            Marker::new(MarkerKind::Chapter, "Setup", at("01:00:12:00")),
            Marker::new(MarkerKind::Chapter, "Build", at("01:02:00:10")),
        ];

        let prepared = prepare(&markers, &context);
        assert_eq!(prepared.len(), 3);
        assert_eq!(
            prepared[0],
            YouTubeMarker {
                position: "00:00:00".into(),
                name: "Introduction".into(),
            }
        );
        assert_eq!(prepared[1].position, "00:00:12");
        assert_eq!(prepared[2].position, "00:02:00");
    }

    #[test]
    fn test_no_introduction_when_first_is_at_zero() {
        let rate = FrameRate::Fps30;
        let context = TimelineContext::new("Edit", Timecode::zero(rate));
        // Sub-second offsets still format as 00:00:00.
        let markers = vec![
            Marker::new(MarkerKind::Chapter, "Cold open", Timecode::from_frames(12, rate)),
            Marker::new(MarkerKind::Chapter, "Main", Timecode::from_frames(900, rate)),
        ];
        let prepared = prepare(&markers, &context);
        assert_eq!(prepared.len(), 2);
        assert_eq!(prepared[0].name, "Cold open");
    }

    #[test]
    fn test_introduction_inherits_clip_context() {
        let rate = FrameRate::Fps25;
        let context = TimelineContext::new("Edit", Timecode::zero(rate));
        let first = Marker::new(MarkerKind::Standard, "Hook", Timecode::from_frames(250, rate))
            .with_notes("n")
            .with_parent(ParentInfo {
                clip_name: Some("A001".into()),
                ..Default::default()
            });

        let intro = introduction(&first, &context);
        assert_eq!(intro.parent.clip_name.as_deref(), Some("A001"));
        assert!(intro.notes.is_empty());
        assert!(intro.roles.is_empty());
        assert!(intro.position.is_zero());
    }

    #[test]
    fn test_empty_list_stays_empty() {
        let context = TimelineContext::new("Edit", Timecode::zero(FrameRate::Fps25));
        assert!(prepare(&[], &context).is_empty());
    }
}
