//! Standard MIDI file carrying one marker meta event per marker, for DAWs.

use std::path::{Path, PathBuf};

use midly::{
    Format, Fps, Header, MetaMessage, Smf, SmpteTime, Timing, Track, TrackEvent, TrackEventKind,
};

use markex_common::error::{MarkexError, MarkexResult};
use markex_marker_model::{FrameRate, Marker, Timecode, TimelineContext};

use crate::fields::{export_fields, TableRow};
use crate::id::IdMode;
use crate::media::ExportMarkerMediaInfo;
use crate::profile::{ExportProfile, ExportProfileFormat};
use crate::profiles::manifest_path;
use crate::result::{ResultDictionary, ResultKey};
use crate::serializers::write_file;
use crate::timing::{format_position, timeline_offset, TimeFormat};

pub const TICKS_PER_QUARTER: u16 = 480;
pub const TEMPO_BPM: f64 = 120.0;
const MICROS_PER_QUARTER: u32 = 500_000;
/// Largest value a variable-length MIDI quantity can hold.
const MAX_TICK: u64 = (1 << 28) - 1;

export_fields! {
    pub enum MidiField {
        Tick = ("tick", "Tick"),
        Position = ("position", "Position"),
        Name = ("name", "Name"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiMarker {
    /// Absolute tick from the start of the track.
    pub tick: u64,
    pub position: String,
    pub name: String,
}

/// Ticks from the track start at [`TEMPO_BPM`].
pub fn seconds_to_ticks(secs: f64) -> u64 {
    (secs.max(0.0) * TEMPO_BPM / 60.0 * f64::from(TICKS_PER_QUARTER)).round() as u64
}

fn smpte_fps(rate: FrameRate) -> Option<Fps> {
    match rate {
        FrameRate::Fps23_976 | FrameRate::Fps24 => Some(Fps::Fps24),
        FrameRate::Fps25 => Some(Fps::Fps25),
        FrameRate::Fps29_97Drop => Some(Fps::Fps29),
        FrameRate::Fps29_97 | FrameRate::Fps30 => Some(Fps::Fps30),
        _ => None,
    }
}

/// SMPTE offset for a timeline starting at `start`, if MIDI can express it.
pub fn smpte_offset(start: &Timecode) -> Option<SmpteTime> {
    let Some(fps) = smpte_fps(start.rate()) else {
        tracing::info!(rate = %start.rate(), "Frame rate has no SMPTE equivalent, omitting offset");
        return None;
    };

    let c = start.components();
    if c.hours >= 24 {
        tracing::info!(start = %start, "Start past 24 hours, omitting SMPTE offset");
        return None;
    }

    let offset = SmpteTime::new(
        c.hours as u8,
        c.minutes as u8,
        c.seconds as u8,
        c.frames as u8,
        0,
        fps,
    );
    if offset.is_none() {
        tracing::info!(start = %start, "Start is not a valid SMPTE time, omitting offset");
    }
    offset
}

fn meta(delta: u32, message: MetaMessage<'_>) -> TrackEvent<'_> {
    TrackEvent {
        delta: delta.into(),
        kind: TrackEventKind::Meta(message),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiPayload {
    pub midi_path: PathBuf,
    pub track_name: String,
    pub start: Timecode,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MidiProfile;

impl MidiProfile {
    /// Serialize a single-track file.
    pub fn build(&self, markers: &[MidiMarker], payload: &MidiPayload) -> MarkexResult<Vec<u8>> {
        let mut track: Track<'_> = vec![
            meta(0, MetaMessage::TrackName(payload.track_name.as_bytes())),
            meta(0, MetaMessage::Tempo(MICROS_PER_QUARTER.into())),
        ];
        if let Some(offset) = smpte_offset(&payload.start) {
            track.push(meta(0, MetaMessage::SmpteOffset(offset)));
        }

        let mut previous = 0u64;
        for marker in markers {
            if marker.tick > MAX_TICK {
                return Err(MarkexError::conversion(format!(
                    "marker {:?} at {} is beyond the last representable MIDI tick",
                    marker.name, marker.position
                )));
            }
            let delta = marker.tick.saturating_sub(previous);
            if marker.tick < previous {
                tracing::debug!(
                    name = %marker.name,
                    "Marker out of order, placed at previous tick"
                );
            }
            previous = previous.max(marker.tick);
            track.push(meta(delta as u32, MetaMessage::Marker(marker.name.as_bytes())));
        }
        track.push(meta(0, MetaMessage::EndOfTrack));

        let smf = Smf {
            header: Header {
                format: Format::SingleTrack,
                timing: Timing::Metrical(TICKS_PER_QUARTER.into()),
            },
            tracks: vec![track],
        };

        let mut out = Vec::new();
        smf.write(&mut out)
            .map_err(|e| MarkexError::conversion(format!("Failed to write MIDI: {e}")))?;
        Ok(out)
    }
}

impl ExportProfile for MidiProfile {
    type Field = MidiField;
    type Marker = MidiMarker;
    type Payload = MidiPayload;

    const FORMAT: ExportProfileFormat = ExportProfileFormat::Midi;
    const MEDIA_CAPABLE: bool = false;

    fn payload(&self, context: &TimelineContext, output_dir: &Path) -> MidiPayload {
        MidiPayload {
            midi_path: manifest_path(context, output_dir, "mid"),
            track_name: context.timeline_name.clone(),
            start: context.start,
        }
    }

    fn prepare_markers(
        &self,
        markers: &[Marker],
        context: &TimelineContext,
        _id_mode: IdMode,
        time_format: TimeFormat,
        _payload: &MidiPayload,
        _media: Option<&ExportMarkerMediaInfo>,
    ) -> Vec<MidiMarker> {
        markers
            .iter()
            .map(|m| MidiMarker {
                tick: seconds_to_ticks(timeline_offset(&m.position, context).seconds()),
                position: format_position(&m.position, context, time_format, true),
                name: m.name.clone(),
            })
            .collect()
    }

    fn write_manifests(
        &self,
        markers: &[MidiMarker],
        payload: &MidiPayload,
        _no_media: bool,
    ) -> MarkexResult<()> {
        let bytes = self.build(markers, payload)?;
        write_file(&payload.midi_path, &bytes)
    }

    fn result_file_content(&self, payload: &MidiPayload) -> ResultDictionary {
        ResultDictionary::from([(ResultKey::MidiFilePath, payload.midi_path.clone())])
    }

    fn table_manifest_fields(&self, marker: &MidiMarker, _no_media: bool) -> TableRow<MidiField> {
        TableRow::from([
            (MidiField::Tick, marker.tick.to_string()),
            (MidiField::Position, marker.position.clone()),
            (MidiField::Name, marker.name.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(start: Timecode) -> MidiPayload {
        MidiPayload {
            midi_path: PathBuf::from("/out/Edit.mid"),
            track_name: "Edit".into(),
            start,
        }
    }

    fn marker(tick: u64, name: &str) -> MidiMarker {
        MidiMarker {
            tick,
            position: String::new(),
            name: name.into(),
        }
    }

    #[test]
    fn test_seconds_to_ticks() {
        assert_eq!(seconds_to_ticks(0.0), 0);
        assert_eq!(seconds_to_ticks(1.0), 960);
        assert_eq!(seconds_to_ticks(0.5), 480);
    }

    #[test]
    fn test_file_parses_back_with_markers_in_order() {
        let start = Timecode::parse("01:00:00:00", FrameRate::Fps25).unwrap();
        let bytes = MidiProfile
            .build(&[marker(0, "A"), marker(960, "B"), marker(2400, "C")], &payload(start))
            .unwrap();

        let smf = Smf::parse(&bytes).unwrap();
        assert_eq!(
            smf.header.timing,
            Timing::Metrical(midly::num::u15::new(TICKS_PER_QUARTER))
        );
        assert_eq!(smf.tracks.len(), 1);

        let mut tick = 0u32;
        let mut found = Vec::new();
        let mut saw_offset = false;
        for event in &smf.tracks[0] {
            tick += event.delta.as_int();
            match event.kind {
                TrackEventKind::Meta(MetaMessage::Marker(name)) => {
                    found.push((tick, name.to_vec()))
                }
                TrackEventKind::Meta(MetaMessage::SmpteOffset(offset)) => {
                    saw_offset = true;
                    assert_eq!(offset.hour(), 1);
                    assert_eq!(offset.fps(), Fps::Fps25);
                }
                _ => {}
            }
        }
        assert!(saw_offset);
        assert_eq!(
            found,
            vec![(0, b"A".to_vec()), (960, b"B".to_vec()), (2400, b"C".to_vec())]
        );
    }

    #[test]
    fn test_unsupported_rate_omits_offset() {
        let start = Timecode::parse("01:00:00:00", FrameRate::Fps60).unwrap();
        assert!(smpte_offset(&start).is_none());
        assert!(MidiProfile.build(&[marker(0, "A")], &payload(start)).is_ok());
    }

    #[test]
    fn test_tick_overflow_is_conversion_error() {
        let start = Timecode::zero(FrameRate::Fps24);
        let err = MidiProfile
            .build(&[marker(MAX_TICK + 1, "late")], &payload(start))
            .unwrap_err();
        assert!(matches!(err, MarkexError::Conversion { .. }));
    }
}
