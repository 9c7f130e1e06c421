//! Timeline context and the marker document exchanged with the extractor.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::marker::Marker;
use crate::roles::SubTimeline;
use crate::timecode::{FrameRate, Timecode};

/// Names and timing of the timeline the markers were extracted from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineContext {
    pub timeline_name: String,

    #[serde(default)]
    pub project_name: Option<String>,

    #[serde(default)]
    pub event_name: Option<String>,

    #[serde(default)]
    pub library_name: Option<String>,

    /// Timecode of the first frame of the timeline.
    pub start: Timecode,
}

impl TimelineContext {
    pub fn new(timeline_name: impl Into<String>, start: Timecode) -> Self {
        Self {
            timeline_name: timeline_name.into(),
            project_name: None,
            event_name: None,
            library_name: None,
            start,
        }
    }

    pub fn frame_rate(&self) -> FrameRate {
        self.start.rate()
    }
}

/// The complete hand-off from the extraction step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerDocument {
    pub timeline: TimelineContext,

    /// Markers in extraction order.
    pub markers: Vec<Marker>,

    /// Sub-timelines used for role extraction. Optional.
    #[serde(default)]
    pub sub_timelines: Vec<SubTimeline>,
}

impl MarkerDocument {
    /// Parse a document from a JSON file. Call [`MarkerDocument::validate`]
    /// before exporting it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DocumentError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| DocumentError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Every marker position must use the timeline's frame rate.
    pub fn validate(&self) -> Result<(), DocumentError> {
        let rate = self.timeline.frame_rate();
        for (index, marker) in self.markers.iter().enumerate() {
            if marker.position.rate() != rate {
                return Err(DocumentError::ValidationError {
                    message: format!(
                        "marker {index} ({:?}) is at {} fps but the timeline runs at {rate} fps",
                        marker.name,
                        marker.position.rate()
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Errors that can occur when loading a marker document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid marker document: {message}")]
    ValidationError { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::MarkerKind;

    #[test]
    fn test_validate_rejects_mismatched_rate() {
        let document = MarkerDocument {
            timeline: TimelineContext::new("Edit", Timecode::zero(FrameRate::Fps25)),
            markers: vec![Marker::new(
                MarkerKind::Standard,
                "wrong",
                Timecode::from_frames(10, FrameRate::Fps24),
            )],
            sub_timelines: vec![],
        };
        let err = document.validate().unwrap_err();
        assert!(err.to_string().contains("timeline runs at 25"));
    }

    #[test]
    fn test_load_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("markers.json");
        std::fs::write(
            &path,
            r#"{
                "timeline": {
                    "timelineName": "Main Edit",
                    "projectName": "Documentary",
                    "start": {"timecode": "01:00:00:00", "rate": "25"}
                },
                "markers": [
                    {"type": "chapter", "name": "Opening",
                     "position": {"timecode": "01:00:00:00", "rate": "25"}}
                ]
            }"#,
        )
        .unwrap();

        let document = MarkerDocument::load(&path).unwrap();
        assert_eq!(document.timeline.timeline_name, "Main Edit");
        assert_eq!(document.timeline.frame_rate(), FrameRate::Fps25);
        assert_eq!(document.markers.len(), 1);
        assert!(document.sub_timelines.is_empty());
    }

    #[test]
    fn test_load_keeps_inconsistent_documents_for_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("markers.json");
        std::fs::write(
            &path,
            r#"{
                "timeline": {
                    "timelineName": "Main Edit",
                    "start": {"timecode": "00:00:00:00", "rate": "25"}
                },
                "markers": [
                    {"type": "standard", "name": "off-rate",
                     "position": {"frames": 48, "rate": "24"}}
                ]
            }"#,
        )
        .unwrap();

        let document = MarkerDocument::load(&path).unwrap();
        assert!(matches!(
            document.validate(),
            Err(DocumentError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_load_reports_bad_timecodes_as_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("markers.json");
        std::fs::write(
            &path,
            r#"{
                "timeline": {
                    "timelineName": "Main Edit",
                    "start": {"timecode": "00:00:00:éé", "rate": "25"}
                },
                "markers": []
            }"#,
        )
        .unwrap();

        let err = MarkerDocument::load(&path).unwrap_err();
        assert!(matches!(err, DocumentError::ParseError { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = MarkerDocument::load("/nonexistent/markers.json").unwrap_err();
        assert!(matches!(err, DocumentError::IoError { .. }));
    }
}
