//! SubRip subtitles, one cue per marker.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use markex_common::error::{MarkexError, MarkexResult};
use markex_marker_model::{Marker, TimelineContext};

use crate::fields::{export_fields, TableRow};
use crate::id::IdMode;
use crate::media::ExportMarkerMediaInfo;
use crate::profile::{ExportProfile, ExportProfileFormat};
use crate::profiles::manifest_path;
use crate::result::{ResultDictionary, ResultKey};
use crate::serializers::write_file;
use crate::timing::{srt_timestamp, timeline_offset, TimeFormat};

/// Reading-time estimate per character of cue text.
const SECONDS_PER_CHAR: f64 = 0.03;
const MIN_CUE_SECS: f64 = 1.0;
const MAX_CUE_SECS: f64 = 5.0;

export_fields! {
    pub enum SubRipField {
        In = ("in", "In"),
        Out = ("out", "Out"),
        Text = ("text", "Text"),
    }
}

/// How long a cue showing `text` stays on screen.
pub fn cue_duration(text: &str) -> f64 {
    (text.trim().chars().count() as f64 * SECONDS_PER_CHAR).clamp(MIN_CUE_SECS, MAX_CUE_SECS)
}

fn timing_line_pattern() -> MarkexResult<&'static Regex> {
    static PATTERN: OnceLock<Result<Regex, String>> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"^\d{2}:\d{2}:\d{2},\d{3} --> \d{2}:\d{2}:\d{2},\d{3}$")
            .map_err(|e| e.to_string())
    });
    pattern
        .as_ref()
        .map_err(|e| MarkexError::content_validation(format!("Regex error: {e}")))
}

/// Check every timing line of a rendered document.
pub fn validate_srt(document: &str) -> MarkexResult<()> {
    let pattern = timing_line_pattern()?;
    for (line_no, line) in document.lines().enumerate() {
        if line.contains("-->") && !pattern.is_match(line) {
            return Err(MarkexError::content_validation(format!(
                "malformed SRT timing on line {}: {line:?}",
                line_no + 1
            )));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubRipMarker {
    pub in_secs: f64,
    pub out_secs: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubRipPayload {
    pub srt_path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SubRipProfile;

impl SubRipProfile {
    pub fn render(&self, markers: &[SubRipMarker]) -> String {
        let mut out = String::new();
        for (index, marker) in markers.iter().enumerate() {
            let _ = write!(
                out,
                "{}\n{} --> {}\n{}\n\n",
                index + 1,
                srt_timestamp(marker.in_secs),
                srt_timestamp(marker.out_secs),
                marker.text
            );
        }
        out
    }
}

impl ExportProfile for SubRipProfile {
    type Field = SubRipField;
    type Marker = SubRipMarker;
    type Payload = SubRipPayload;

    const FORMAT: ExportProfileFormat = ExportProfileFormat::SubRip;
    const MEDIA_CAPABLE: bool = false;

    fn payload(&self, context: &TimelineContext, output_dir: &Path) -> SubRipPayload {
        SubRipPayload {
            srt_path: manifest_path(context, output_dir, "srt"),
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
        _time_format: TimeFormat,
        _payload: &SubRipPayload,
        _media: Option<&ExportMarkerMediaInfo>,
    ) -> Vec<SubRipMarker> {
        markers
            .iter()
            .map(|m| {
                let in_secs = timeline_offset(&m.position, context).seconds();
                SubRipMarker {
                    in_secs,
                    out_secs: in_secs + cue_duration(&m.name),
                    text: m.name.clone(),
                }
            })
            .collect()
    }

    fn write_manifests(
        &self,
        markers: &[SubRipMarker],
        payload: &SubRipPayload,
        _no_media: bool,
    ) -> MarkexResult<()> {
        let document = self.render(markers);
        validate_srt(&document)?;
        write_file(&payload.srt_path, document.as_bytes())
    }

    fn result_file_content(&self, payload: &SubRipPayload) -> ResultDictionary {
        ResultDictionary::from([(ResultKey::SrtManifestPath, payload.srt_path.clone())])
    }

    fn table_manifest_fields(
        &self,
        marker: &SubRipMarker,
        _no_media: bool,
    ) -> TableRow<SubRipField> {
        TableRow::from([
            (SubRipField::In, srt_timestamp(marker.in_secs)),
            (SubRipField::Out, srt_timestamp(marker.out_secs)),
            (SubRipField::Text, marker.text.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_duration_heuristic() {
        assert_eq!(cue_duration("Hi"), 1.0);
        assert_eq!(cue_duration(&"x".repeat(200)), 5.0);
        assert!((cue_duration(&"x".repeat(100)) - 3.0).abs() < 1e-9);
        assert_eq!(cue_duration("   "), 1.0);
    }

    #[test]
    fn test_render_blocks() {
        let markers = vec![
            SubRipMarker {
                in_secs: 0.0,
                out_secs: 1.0,
                text: "Hi".into(),
            },
            SubRipMarker {
                in_secs: 61.5,
                out_secs: 62.5,
                text: "There".into(),
            },
        ];
        let out = SubRipProfile.render(&markers);
        assert_eq!(
            out,
            "1\n00:00:00,000 --> 00:00:01,000\nHi\n\n2\n00:01:01,500 --> 00:01:02,500\nThere\n\n"
        );
        assert!(validate_srt(&out).is_ok());
    }

    #[test]
    fn test_malformed_timing_is_rejected() {
        let err = validate_srt("1\n0:00:00,000 --> 00:00:01,000\nHi\n").unwrap_err();
        assert!(matches!(err, MarkexError::ContentValidation { .. }));
    }

    #[test]
    fn test_name_containing_arrow_fails_validation_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let payload = SubRipPayload {
            srt_path: dir.path().join("Edit.srt"),
        };
        let markers = vec![SubRipMarker {
            in_secs: 0.0,
            out_secs: 1.0,
            text: "A --> B".into(),
        }];

        assert!(SubRipProfile.write_manifests(&markers, &payload, true).is_err());
        assert!(!payload.srt_path.exists());
    }

    proptest! {
        #[test]
        fn cue_duration_stays_in_bounds(text in ".{0,400}") {
            let secs = cue_duration(&text);
            prop_assert!((MIN_CUE_SECS..=MAX_CUE_SECS).contains(&secs));
        }
    }
}
