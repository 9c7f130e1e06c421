//! Marker records as handed over by the timeline extraction step.
//!
//! Markers are immutable once extracted: every export stage takes them by
//! shared reference and derives its own projection.

use serde::{Deserialize, Serialize};

use crate::timecode::Timecode;

/// What kind of annotation a marker is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MarkerKind {
    Standard,
    Chapter,
    /// A to-do item, optionally checked off.
    ToDo {
        #[serde(default)]
        completed: bool,
    },
    Caption,
}

impl MarkerKind {
    /// Human-readable kind label used in manifests.
    pub fn display_name(&self) -> &'static str {
        match self {
            MarkerKind::Standard => "Standard",
            MarkerKind::Chapter => "Chapter",
            MarkerKind::ToDo { .. } => "To Do",
            MarkerKind::Caption => "Caption",
        }
    }

    /// Completion state; `None` for kinds that cannot be checked off.
    pub fn completed(&self) -> Option<bool> {
        match self {
            MarkerKind::ToDo { completed } => Some(*completed),
            _ => None,
        }
    }
}

/// A role assigned to the clip a marker sits on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Role {
    Video(String),
    Audio(String),
    Caption(String),
}

impl Role {
    pub fn name(&self) -> &str {
        match self {
            Role::Video(name) | Role::Audio(name) | Role::Caption(name) => name,
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, Role::Video(_))
    }

    pub fn is_audio(&self) -> bool {
        matches!(self, Role::Audio(_))
    }

    pub fn is_caption(&self) -> bool {
        matches!(self, Role::Caption(_))
    }
}

/// Free-text clip metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerMetadata {
    pub reel: String,
    pub scene: String,
    pub take: String,
}

/// Cached context of the clip (and containers) a marker belongs to.
/// Any of it may be missing depending on where the marker was found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParentInfo {
    pub clip_name: Option<String>,
    pub clip_type: Option<String>,
    pub clip_in: Option<Timecode>,
    pub clip_out: Option<Timecode>,
    pub clip_duration: Option<Timecode>,
    pub event_name: Option<String>,
    pub project_name: Option<String>,
    pub library_name: Option<String>,
}

/// One timeline marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    /// Marker kind, flattened into the record as `"type"`.
    #[serde(flatten)]
    pub kind: MarkerKind,

    pub name: String,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub roles: Vec<Role>,

    /// Absolute position in the owning timeline's frame rate.
    pub position: Timecode,

    #[serde(default)]
    pub metadata: MarkerMetadata,

    #[serde(default)]
    pub parent: ParentInfo,

    /// Opaque provenance string from the source document.
    #[serde(default)]
    pub xml_path: String,
}

impl Marker {
    pub fn new(kind: MarkerKind, name: impl Into<String>, position: Timecode) -> Self {
        Self {
            kind,
            name: name.into(),
            notes: String::new(),
            roles: Vec::new(),
            position,
            metadata: MarkerMetadata::default(),
            parent: ParentInfo::default(),
            xml_path: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = roles;
        self
    }

    pub fn with_parent(mut self, parent: ParentInfo) -> Self {
        self.parent = parent;
        self
    }

    pub fn with_metadata(mut self, metadata: MarkerMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn video_roles(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().filter(|r| r.is_video()).map(Role::name)
    }

    pub fn audio_roles(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().filter(|r| r.is_audio()).map(Role::name)
    }

    pub fn caption_roles(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().filter(|r| r.is_caption()).map(Role::name)
    }
}

/// Stable sort by position; markers at the same position keep their
/// extraction order.
pub fn sort_markers(markers: &mut [Marker]) {
    markers.sort_by(|a, b| a.position.cmp_position(&b.position));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timecode::FrameRate;

    fn at(frames: u64, name: &str) -> Marker {
        Marker::new(
            MarkerKind::Standard,
            name,
            Timecode::from_frames(frames, FrameRate::Fps25),
        )
    }

    #[test]
    fn test_sort_is_stable_for_equal_positions() {
        let mut markers = vec![at(50, "c"), at(10, "a"), at(50, "d"), at(10, "b")];
        sort_markers(&mut markers);
        let names: Vec<&str> = markers.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_role_accessors() {
        let marker = at(0, "m").with_roles(vec![
            Role::Video("Video".into()),
            Role::Audio("Dialogue".into()),
            Role::Audio("Music".into()),
            Role::Caption("SRT".into()),
        ]);
        assert_eq!(marker.video_roles().collect::<Vec<_>>(), vec!["Video"]);
        assert_eq!(
            marker.audio_roles().collect::<Vec<_>>(),
            vec!["Dialogue", "Music"]
        );
        assert_eq!(marker.caption_roles().collect::<Vec<_>>(), vec!["SRT"]);
    }

    #[test]
    fn test_marker_json_shape() {
        let json = r#"{
            "type": "to-do",
            "completed": true,
            "name": "Fix color",
            "position": {"timecode": "00:00:01:00", "rate": "25"},
            "roles": [{"kind": "video", "name": "Video"}]
        }"#;
        let marker: Marker = serde_json::from_str(json).unwrap();
        assert_eq!(marker.kind, MarkerKind::ToDo { completed: true });
        assert_eq!(marker.kind.display_name(), "To Do");
        assert_eq!(marker.notes, "");
        assert_eq!(marker.position.frames(), 25);
        assert_eq!(marker.roles, vec![Role::Video("Video".into())]);
        assert!(marker.parent.clip_name.is_none());
    }

    #[test]
    fn test_completed_only_for_todo() {
        assert_eq!(MarkerKind::Chapter.completed(), None);
        assert_eq!(
            MarkerKind::ToDo { completed: false }.completed(),
            Some(false)
        );
    }
}
