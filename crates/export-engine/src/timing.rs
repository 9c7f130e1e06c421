//! Position formatting.

use serde::{Deserialize, Serialize};

use markex_marker_model::{Timecode, TimelineContext};

/// How positions are rendered in a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TimeFormat {
    /// Frame-rate aware timecode string.
    Timecode { subframes: bool },
    /// Wall-clock `HH:MM:SS`, truncated to whole seconds.
    RealTime,
}

impl Default for TimeFormat {
    fn default() -> Self {
        TimeFormat::Timecode { subframes: false }
    }
}

impl TimeFormat {
    pub fn subframes(&self) -> bool {
        matches!(self, TimeFormat::Timecode { subframes: true })
    }
}

/// Position of a marker relative to the timeline's first frame.
pub fn timeline_offset(position: &Timecode, context: &TimelineContext) -> Timecode {
    position.saturating_sub(&context.start)
}

/// Render `position`, optionally relative to the timeline start.
pub fn format_position(
    position: &Timecode,
    context: &TimelineContext,
    format: TimeFormat,
    offset_to_timeline_start: bool,
) -> String {
    let position = if offset_to_timeline_start {
        timeline_offset(position, context)
    } else {
        *position
    };
    format_timecode(&position, format)
}

/// Render a timecode value (position or duration) without any offset.
pub fn format_timecode(timecode: &Timecode, format: TimeFormat) -> String {
    match format {
        TimeFormat::Timecode { subframes } => timecode.format(subframes),
        TimeFormat::RealTime => real_time_string(timecode.seconds()),
    }
}

/// `HH:MM:SS`, truncated. Hours are not wrapped at 24.
pub fn real_time_string(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// SubRip timestamp: `HH:MM:SS,mmm`.
pub fn srt_timestamp(secs: f64) -> String {
    let total_ms = (secs.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02},{millis:03}")
}
