//! The marker projection shared by the tabular hand-off profiles
//! (Notion, Airtable, Xlsx, Tsv).

use markex_marker_model::{Marker, MarkerKind, TimelineContext};

use crate::fields::{ExportField, ExportFieldValue, NestedRow, TableRow};
use crate::id::{marker_id, path_safe, IdMode};
use crate::media::ExportMarkerMediaInfo;
use crate::timing::{format_position, format_timecode, TimeFormat};

/// Progress of a marker as shown in hand-off tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStatus {
    NotStarted,
    InProgress,
    Done,
}

impl MarkerStatus {
    pub fn of(kind: &MarkerKind) -> Self {
        match kind.completed() {
            Some(true) => MarkerStatus::Done,
            Some(false) => MarkerStatus::InProgress,
            None => MarkerStatus::NotStarted,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MarkerStatus::NotStarted => "Not Started",
            MarkerStatus::InProgress => "In Progress",
            MarkerStatus::Done => "Done",
        }
    }
}

/// File name of the icon shipped for each marker kind.
pub fn icon_image(kind: &MarkerKind) -> &'static str {
    match kind {
        MarkerKind::Standard => "marker-standard.png",
        MarkerKind::Chapter => "marker-chapter.png",
        MarkerKind::ToDo { completed: false } => "marker-todo-incomplete.png",
        MarkerKind::ToDo { completed: true } => "marker-todo-complete.png",
        MarkerKind::Caption => "marker-caption.png",
    }
}

/// A marker flattened to strings for tabular hand-off manifests.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardExportMarker {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub checked: String,
    pub status: String,
    pub notes: String,
    pub position: String,
    pub clip_type: String,
    pub clip_name: String,
    pub clip_duration: String,
    pub video_roles: Vec<String>,
    pub audio_roles: Vec<String>,
    pub caption_roles: Vec<String>,
    pub reel: String,
    pub scene: String,
    pub take: String,
    pub event_name: String,
    pub project_name: String,
    pub library_name: String,
    pub icon_image: String,
    /// `None` when thumbnails are disabled.
    pub image_file_name: Option<String>,
    pub image_timecode: Option<String>,
}

impl StandardExportMarker {
    pub fn new(
        marker: &Marker,
        context: &TimelineContext,
        id_mode: IdMode,
        time_format: TimeFormat,
        media: Option<&ExportMarkerMediaInfo>,
    ) -> Self {
        let id = marker_id(marker, context, id_mode, time_format.subframes());
        let parent = &marker.parent;
        let inherited = |own: &Option<String>, timeline: &Option<String>| {
            own.clone().or_else(|| timeline.clone()).unwrap_or_default()
        };

        Self {
            image_file_name: media.map(|m| m.image_file_name(&path_safe(&id))),
            image_timecode: media
                .map(|m| format_timecode(&m.image_timecode(marker, context), time_format)),
            id,
            name: marker.name.clone(),
            kind: marker.kind.display_name().to_string(),
            checked: (marker.kind.completed() == Some(true)).to_string(),
            status: MarkerStatus::of(&marker.kind).label().to_string(),
            notes: marker.notes.clone(),
            position: format_position(&marker.position, context, time_format, false),
            clip_type: parent.clip_type.clone().unwrap_or_default(),
            clip_name: parent.clip_name.clone().unwrap_or_default(),
            clip_duration: parent
                .clip_duration
                .map(|d| format_timecode(&d, time_format))
                .unwrap_or_default(),
            video_roles: marker.video_roles().map(str::to_string).collect(),
            audio_roles: marker.audio_roles().map(str::to_string).collect(),
            caption_roles: marker.caption_roles().map(str::to_string).collect(),
            reel: marker.metadata.reel.clone(),
            scene: marker.metadata.scene.clone(),
            take: marker.metadata.take.clone(),
            event_name: inherited(&parent.event_name, &context.event_name),
            project_name: inherited(&parent.project_name, &context.project_name),
            library_name: inherited(&parent.library_name, &context.library_name),
            icon_image: icon_image(&marker.kind).to_string(),
        }
    }

    pub fn value(&self, column: StandardColumn) -> ExportFieldValue {
        let text = |s: &String| ExportFieldValue::String(s.clone());
        match column {
            StandardColumn::Id => text(&self.id),
            StandardColumn::Name => text(&self.name),
            StandardColumn::Type => text(&self.kind),
            StandardColumn::Checked => text(&self.checked),
            StandardColumn::Status => text(&self.status),
            StandardColumn::Notes => text(&self.notes),
            StandardColumn::Position => text(&self.position),
            StandardColumn::ClipType => text(&self.clip_type),
            StandardColumn::ClipName => text(&self.clip_name),
            StandardColumn::ClipDuration => text(&self.clip_duration),
            StandardColumn::VideoRole => ExportFieldValue::Array(self.video_roles.clone()),
            StandardColumn::AudioRole => ExportFieldValue::Array(self.audio_roles.clone()),
            StandardColumn::CaptionRole => ExportFieldValue::Array(self.caption_roles.clone()),
            StandardColumn::Reel => text(&self.reel),
            StandardColumn::Scene => text(&self.scene),
            StandardColumn::Take => text(&self.take),
            StandardColumn::EventName => text(&self.event_name),
            StandardColumn::ProjectName => text(&self.project_name),
            StandardColumn::LibraryName => text(&self.library_name),
            StandardColumn::IconImage => text(&self.icon_image),
            StandardColumn::ImageTimecode => {
                ExportFieldValue::String(self.image_timecode.clone().unwrap_or_default())
            }
            StandardColumn::ImageFileName => {
                ExportFieldValue::String(self.image_file_name.clone().unwrap_or_default())
            }
        }
    }
}

/// Every value a [`StandardExportMarker`] can supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardColumn {
    Id,
    Name,
    Type,
    Checked,
    Status,
    Notes,
    Position,
    ClipType,
    ClipName,
    ClipDuration,
    VideoRole,
    AudioRole,
    CaptionRole,
    Reel,
    Scene,
    Take,
    EventName,
    ProjectName,
    LibraryName,
    IconImage,
    ImageTimecode,
    ImageFileName,
}

/// A profile field backed by a [`StandardColumn`].
pub trait StandardField: ExportField {
    fn column(&self) -> StandardColumn;
}

pub fn prepare_standard_markers(
    markers: &[Marker],
    context: &TimelineContext,
    id_mode: IdMode,
    time_format: TimeFormat,
    media: Option<&ExportMarkerMediaInfo>,
) -> Vec<StandardExportMarker> {
    markers
        .iter()
        .map(|m| StandardExportMarker::new(m, context, id_mode, time_format, media))
        .collect()
}

pub fn standard_table_row<F: StandardField>(
    marker: &StandardExportMarker,
    no_media: bool,
) -> TableRow<F> {
    F::columns(no_media)
        .into_iter()
        .map(|field| (field, marker.value(field.column()).to_table_string()))
        .collect()
}

pub fn standard_nested_row<F: StandardField>(
    marker: &StandardExportMarker,
    no_media: bool,
) -> NestedRow<F> {
    F::columns(no_media)
        .into_iter()
        .map(|field| (field, marker.value(field.column())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use markex_marker_model::{FrameRate, ParentInfo, Role, Timecode};

    use crate::media::ImageFormat;

    fn context() -> TimelineContext {
        let mut context = TimelineContext::new(
            "Edit",
            Timecode::parse("01:00:00:00", FrameRate::Fps25).unwrap(),
        );
        context.project_name = Some("Promo".into());
        context
    }

    fn todo_marker(completed: bool) -> Marker {
        Marker::new(
            MarkerKind::ToDo { completed },
            "Fix colour",
            Timecode::parse("01:00:10:05", FrameRate::Fps25).unwrap(),
        )
        .with_notes("shot 12")
        .with_roles(vec![
            Role::Video("Video".into()),
            Role::Audio("Dialogue".into()),
            Role::Audio("Music".into()),
        ])
        .with_parent(ParentInfo {
            clip_name: Some("A001_C003".into()),
            clip_duration: Some(Timecode::from_frames(250, FrameRate::Fps25)),
            ..Default::default()
        })
    }

    #[test]
    fn test_status_and_checked() {
        let ctx = context();
        let open = StandardExportMarker::new(
            &todo_marker(false),
            &ctx,
            IdMode::default(),
            TimeFormat::default(),
            None,
        );
        assert_eq!(open.status, "In Progress");
        assert_eq!(open.checked, "false");
        assert_eq!(open.icon_image, "marker-todo-incomplete.png");

        let done = StandardExportMarker::new(
            &todo_marker(true),
            &ctx,
            IdMode::default(),
            TimeFormat::default(),
            None,
        );
        assert_eq!(done.status, "Done");
        assert_eq!(done.checked, "true");
        assert_eq!(done.kind, "To Do");
    }

    #[test]
    fn test_projection() {
        let ctx = context();
        let media = ExportMarkerMediaInfo::new(ImageFormat::Png);
        let m = StandardExportMarker::new(
            &todo_marker(false),
            &ctx,
            IdMode::TimelineNameAndTimecode,
            TimeFormat::default(),
            Some(&media),
        );

        assert_eq!(m.id, "Edit_01:00:10:05");
        assert_eq!(m.position, "01:00:10:05");
        assert_eq!(m.clip_duration, "00:00:10:00");
        assert_eq!(m.audio_roles, vec!["Dialogue", "Music"]);
        assert_eq!(m.project_name, "Promo");
        assert_eq!(m.image_file_name.as_deref(), Some("Edit_01_00_10_05.png"));
        assert_eq!(m.image_timecode.as_deref(), Some("01:00:10:05"));
        assert_eq!(
            m.value(StandardColumn::AudioRole).to_table_string(),
            "Dialogue, Music"
        );
    }

    #[test]
    fn test_without_media_has_no_image() {
        let m = StandardExportMarker::new(
            &todo_marker(false),
            &context(),
            IdMode::Name,
            TimeFormat::default(),
            None,
        );
        assert_eq!(m.id, "Fix colour");
        assert!(m.image_file_name.is_none());
        assert!(m.image_timecode.is_none());
    }

    #[test]
    fn test_single_frame_image_timecode_is_timeline_start() {
        let media = ExportMarkerMediaInfo {
            image_format: ImageFormat::Jpg,
            is_single_frame: true,
        };
        let m = StandardExportMarker::new(
            &todo_marker(false),
            &context(),
            IdMode::default(),
            TimeFormat::RealTime,
            Some(&media),
        );
        assert_eq!(m.image_timecode.as_deref(), Some("01:00:00"));
        assert_eq!(
            m.value(StandardColumn::ImageTimecode).to_table_string(),
            "01:00:00"
        );
    }
}
