//! Marker identifiers.

use serde::{Deserialize, Serialize};

use markex_marker_model::{Marker, TimelineContext};

/// How a marker's identifier is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdMode {
    /// `<timeline name>_<position timecode>`.
    #[default]
    TimelineNameAndTimecode,
    /// The marker name, verbatim.
    Name,
    /// The marker notes, verbatim.
    Notes,
}

impl std::str::FromStr for IdMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "timeline-name-and-timecode" | "timelineNameAndTimecode" => {
                Ok(IdMode::TimelineNameAndTimecode)
            }
            "name" => Ok(IdMode::Name),
            "notes" => Ok(IdMode::Notes),
            other => Err(format!(
                "unknown ID mode: {other}. Use: timeline-name-and-timecode, name, notes"
            )),
        }
    }
}

/// Identifier of `marker`. `Name` and `Notes` may yield empty or duplicate
/// identifiers; that is not an error.
pub fn marker_id(
    marker: &Marker,
    context: &TimelineContext,
    mode: IdMode,
    subframes: bool,
) -> String {
    match mode {
        IdMode::TimelineNameAndTimecode => format!(
            "{}_{}",
            context.timeline_name,
            marker.position.format(subframes)
        ),
        IdMode::Name => marker.name.clone(),
        IdMode::Notes => marker.notes.clone(),
    }
}

/// Filesystem-safe form of an identifier. Timecode separators (`:` and the
/// drop-frame `;`) and path separators become `_`.
pub fn path_safe(id: &str) -> String {
    id.chars()
        .map(|c| match c {
            ':' | ';' | '/' | '\\' => '_',
            c => c,
        })
        .collect()
}
