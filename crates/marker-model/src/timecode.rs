//! Frame-rate aware timecodes.
//!
//! A [`Timecode`] is a count of whole frames since `00:00:00:00` plus a
//! subframe remainder, tied to a [`FrameRate`]. Drop-frame rates only change
//! how the count is *labelled* (frame numbers 0 and 1, or 0-3 at 59.94, are
//! skipped at the start of every minute not divisible by ten); the count
//! itself is always contiguous.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default number of subframes per frame (Final Cut Pro convention).
pub const DEFAULT_SUBFRAME_BASE: u32 = 80;

/// Supported timeline frame rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameRate {
    #[serde(rename = "23.976")]
    Fps23_976,
    #[serde(rename = "24")]
    Fps24,
    #[serde(rename = "25")]
    Fps25,
    #[serde(rename = "29.97")]
    Fps29_97,
    #[serde(rename = "29.97d")]
    Fps29_97Drop,
    #[serde(rename = "30")]
    Fps30,
    #[serde(rename = "48")]
    Fps48,
    #[serde(rename = "50")]
    Fps50,
    #[serde(rename = "59.94")]
    Fps59_94,
    #[serde(rename = "59.94d")]
    Fps59_94Drop,
    #[serde(rename = "60")]
    Fps60,
}

impl FrameRate {
    pub const ALL: [FrameRate; 11] = [
        FrameRate::Fps23_976,
        FrameRate::Fps24,
        FrameRate::Fps25,
        FrameRate::Fps29_97,
        FrameRate::Fps29_97Drop,
        FrameRate::Fps30,
        FrameRate::Fps48,
        FrameRate::Fps50,
        FrameRate::Fps59_94,
        FrameRate::Fps59_94Drop,
        FrameRate::Fps60,
    ];

    /// Exact rate as `(numerator, denominator)` frames per second.
    pub fn rational(self) -> (u64, u64) {
        match self {
            FrameRate::Fps23_976 => (24_000, 1001),
            FrameRate::Fps24 => (24, 1),
            FrameRate::Fps25 => (25, 1),
            FrameRate::Fps29_97 | FrameRate::Fps29_97Drop => (30_000, 1001),
            FrameRate::Fps30 => (30, 1),
            FrameRate::Fps48 => (48, 1),
            FrameRate::Fps50 => (50, 1),
            FrameRate::Fps59_94 | FrameRate::Fps59_94Drop => (60_000, 1001),
            FrameRate::Fps60 => (60, 1),
        }
    }

    /// Nominal integer frames per second used for timecode labels.
    pub fn timebase(self) -> u64 {
        match self {
            FrameRate::Fps23_976 | FrameRate::Fps24 => 24,
            FrameRate::Fps25 => 25,
            FrameRate::Fps29_97 | FrameRate::Fps29_97Drop | FrameRate::Fps30 => 30,
            FrameRate::Fps48 => 48,
            FrameRate::Fps50 => 50,
            FrameRate::Fps59_94 | FrameRate::Fps59_94Drop | FrameRate::Fps60 => 60,
        }
    }

    pub fn is_drop(self) -> bool {
        matches!(self, FrameRate::Fps29_97Drop | FrameRate::Fps59_94Drop)
    }

    /// Frame numbers skipped per minute in drop-frame counting.
    fn dropped_per_minute(self) -> u64 {
        match self {
            FrameRate::Fps29_97Drop => 2,
            FrameRate::Fps59_94Drop => 4,
            _ => 0,
        }
    }

    /// Frames per second as a float.
    pub fn fps(self) -> f64 {
        let (num, den) = self.rational();
        num as f64 / den as f64
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FrameRate::Fps23_976 => "23.976",
            FrameRate::Fps24 => "24",
            FrameRate::Fps25 => "25",
            FrameRate::Fps29_97 => "29.97",
            FrameRate::Fps29_97Drop => "29.97d",
            FrameRate::Fps30 => "30",
            FrameRate::Fps48 => "48",
            FrameRate::Fps50 => "50",
            FrameRate::Fps59_94 => "59.94",
            FrameRate::Fps59_94Drop => "59.94d",
            FrameRate::Fps60 => "60",
        }
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameRate {
    type Err = TimecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FrameRate::ALL
            .into_iter()
            .find(|rate| rate.as_str() == s.trim())
            .ok_or_else(|| TimecodeError::UnknownFrameRate(s.to_string()))
    }
}

/// Errors produced while building or parsing timecodes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimecodeError {
    #[error("unknown frame rate: {0}")]
    UnknownFrameRate(String),

    #[error("malformed timecode string: {0}")]
    Malformed(String),

    #[error("timecode component out of range: {0}")]
    OutOfRange(String),

    #[error("timecode must give either `timecode` or `frames`")]
    MissingValue,
}

/// Labelled hours/minutes/seconds/frames of a timecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimecodeComponents {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub frames: u64,
}

/// A position on a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimecodeRepr", into = "TimecodeRepr")]
pub struct Timecode {
    frames: u64,
    subframes: u32,
    rate: FrameRate,
    subframe_base: u32,
}

impl Timecode {
    /// Timecode `00:00:00:00` at the given rate.
    pub fn zero(rate: FrameRate) -> Self {
        Self::from_frames(0, rate)
    }

    pub fn from_frames(frames: u64, rate: FrameRate) -> Self {
        Self {
            frames,
            subframes: 0,
            rate,
            subframe_base: DEFAULT_SUBFRAME_BASE,
        }
    }

    /// Build from labelled components, validating ranges and drop-frame gaps.
    pub fn from_components(
        components: TimecodeComponents,
        rate: FrameRate,
    ) -> Result<Self, TimecodeError> {
        let TimecodeComponents {
            hours,
            minutes,
            seconds,
            frames,
        } = components;
        let timebase = rate.timebase();

        if minutes >= 60 || seconds >= 60 || frames >= timebase {
            return Err(TimecodeError::OutOfRange(format!(
                "{hours:02}:{minutes:02}:{seconds:02}:{frames:02} @ {rate}"
            )));
        }

        let drop = rate.dropped_per_minute();
        if drop > 0 && seconds == 0 && minutes % 10 != 0 && frames < drop {
            return Err(TimecodeError::OutOfRange(format!(
                "frame {frames} does not exist at minute {minutes} in drop-frame counting"
            )));
        }

        let too_long = || {
            TimecodeError::OutOfRange(format!("{hours} hours does not fit a frame count"))
        };
        let total_minutes = hours
            .checked_mul(60)
            .and_then(|m| m.checked_add(minutes))
            .ok_or_else(too_long)?;
        let nominal = total_minutes
            .checked_mul(60)
            .and_then(|s| s.checked_add(seconds))
            .and_then(|s| s.checked_mul(timebase))
            .and_then(|f| f.checked_add(frames))
            .ok_or_else(too_long)?;
        let dropped = drop * (total_minutes - total_minutes / 10);

        Ok(Self::from_frames(nominal - dropped, rate))
    }

    /// Nearest whole frame to a real-time offset in seconds. Negative input
    /// clamps to zero.
    pub fn from_seconds(secs: f64, rate: FrameRate) -> Self {
        let (num, den) = rate.rational();
        let frames = (secs.max(0.0) * num as f64 / den as f64).round() as u64;
        Self::from_frames(frames, rate)
    }

    /// Parse `HH:MM:SS:FF`, `HH:MM:SS;FF` or either with a `.SS` subframe
    /// suffix. Only the last separator may be `;`.
    pub fn parse(s: &str, rate: FrameRate) -> Result<Self, TimecodeError> {
        let malformed = || TimecodeError::Malformed(s.to_string());

        let (main, subframes) = match s.trim().split_once('.') {
            Some((main, sub)) => (main, Some(sub.parse::<u32>().map_err(|_| malformed())?)),
            None => (s.trim(), None),
        };

        let parts: Vec<&str> = main.split([':', ';']).collect();
        let last_separator = main.rfind([':', ';']);
        if parts.len() != 4 || main.match_indices(';').any(|(i, _)| Some(i) != last_separator) {
            return Err(malformed());
        }

        let mut values = [0u64; 4];
        for (value, part) in values.iter_mut().zip(&parts) {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(malformed());
            }
            *value = part.parse().map_err(|_| malformed())?;
        }

        let mut timecode = Self::from_components(
            TimecodeComponents {
                hours: values[0],
                minutes: values[1],
                seconds: values[2],
                frames: values[3],
            },
            rate,
        )?;

        if let Some(subframes) = subframes {
            if subframes >= DEFAULT_SUBFRAME_BASE {
                return Err(TimecodeError::OutOfRange(format!("subframe {subframes}")));
            }
            timecode.subframes = subframes;
        }
        Ok(timecode)
    }

    /// Replace the subframe remainder.
    pub fn with_subframes(mut self, subframes: u32, subframe_base: u32) -> Self {
        let base = subframe_base.max(1);
        self.frames = self.frames.saturating_add(u64::from(subframes / base));
        self.subframes = subframes % base;
        self.subframe_base = base;
        self
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn subframes(&self) -> u32 {
        self.subframes
    }

    pub fn subframe_base(&self) -> u32 {
        self.subframe_base
    }

    pub fn rate(&self) -> FrameRate {
        self.rate
    }

    /// Whole frames plus the fractional subframe part.
    fn frames_f64(&self) -> f64 {
        self.frames as f64 + f64::from(self.subframes) / f64::from(self.subframe_base)
    }

    /// Real-time offset from `00:00:00:00` in seconds.
    pub fn seconds(&self) -> f64 {
        let (num, den) = self.rate.rational();
        self.frames_f64() * den as f64 / num as f64
    }

    pub fn is_zero(&self) -> bool {
        self.frames == 0 && self.subframes == 0
    }

    /// Labelled components, applying drop-frame numbering where needed.
    pub fn components(&self) -> TimecodeComponents {
        let timebase = self.rate.timebase();
        let drop = self.rate.dropped_per_minute();

        let mut frames = self.frames;
        if drop > 0 {
            let per_minute = timebase * 60 - drop;
            let per_ten_minutes = timebase * 600 - drop * 9;
            let tens = frames / per_ten_minutes;
            let remainder = frames % per_ten_minutes;
            frames = frames.saturating_add(drop * 9 * tens);
            if remainder > drop {
                frames = frames.saturating_add(drop * ((remainder - drop) / per_minute));
            }
        }

        TimecodeComponents {
            hours: frames / (timebase * 3600),
            minutes: (frames / (timebase * 60)) % 60,
            seconds: (frames / timebase) % 60,
            frames: frames % timebase,
        }
    }

    /// Format as `HH:MM:SS:FF` (`;` before frames for drop-frame rates),
    /// optionally followed by `.SS` subframes.
    pub fn format(&self, subframes: bool) -> String {
        let c = self.components();
        let separator = if self.rate.is_drop() { ';' } else { ':' };
        let mut out = format!(
            "{:02}:{:02}:{:02}{separator}{:02}",
            c.hours, c.minutes, c.seconds, c.frames
        );
        if subframes {
            out.push_str(&format!(".{:02}", self.subframes));
        }
        out
    }

    /// `self - origin`, clamped at zero. An origin at a different rate is
    /// converted through real time first.
    pub fn saturating_sub(&self, origin: &Timecode) -> Timecode {
        let origin_frames = if origin.rate == self.rate {
            origin.frames_f64()
        } else {
            origin.seconds() * self.rate.fps()
        };

        let base = f64::from(self.subframe_base);
        let total = ((self.frames_f64() - origin_frames).max(0.0) * base).round() as u64;
        Timecode {
            frames: total / u64::from(self.subframe_base),
            subframes: (total % u64::from(self.subframe_base)) as u32,
            rate: self.rate,
            subframe_base: self.subframe_base,
        }
    }

    /// Ordering by position on the timeline.
    pub fn cmp_position(&self, other: &Timecode) -> std::cmp::Ordering {
        self.seconds().total_cmp(&other.seconds())
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Serialized form. Input may give either a `timecode` string or a raw
/// `frames` count; output always carries the string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimecodeRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timecode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    frames: Option<u64>,
    rate: FrameRate,
    #[serde(default)]
    subframes: u32,
    #[serde(default = "default_subframe_base")]
    subframe_base: u32,
}

fn default_subframe_base() -> u32 {
    DEFAULT_SUBFRAME_BASE
}

impl TryFrom<TimecodeRepr> for Timecode {
    type Error = TimecodeError;

    fn try_from(repr: TimecodeRepr) -> Result<Self, Self::Error> {
        let base = match repr.frames {
            Some(frames) => Timecode::from_frames(frames, repr.rate),
            None => {
                let text = repr.timecode.ok_or(TimecodeError::MissingValue)?;
                Timecode::parse(&text, repr.rate)?
            }
        };
        let subframes = if repr.subframes > 0 {
            repr.subframes
        } else {
            base.subframes
        };
        Ok(base.with_subframes(subframes, repr.subframe_base))
    }
}

impl From<Timecode> for TimecodeRepr {
    fn from(tc: Timecode) -> Self {
        TimecodeRepr {
            timecode: Some(tc.format(false)),
            frames: None,
            rate: tc.rate,
            subframes: tc.subframes,
            subframe_base: tc.subframe_base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tc(s: &str, rate: FrameRate) -> Timecode {
        Timecode::parse(s, rate).unwrap()
    }

    #[test]
    fn test_parse_and_format_non_drop() {
        let t = tc("01:00:05:12", FrameRate::Fps25);
        assert_eq!(t.frames(), (3600 + 5) * 25 + 12);
        assert_eq!(t.format(false), "01:00:05:12");
        assert_eq!(t.to_string(), "01:00:05:12");
    }

    #[test]
    fn test_drop_frame_labels_skip_first_frames_of_minute() {
        // Frame 1800 opens minute one at 29.97 DF and is labelled ;02.
        let t = Timecode::from_frames(1800, FrameRate::Fps29_97Drop);
        assert_eq!(t.format(false), "00:01:00;02");

        let back = tc("00:01:00;02", FrameRate::Fps29_97Drop);
        assert_eq!(back.frames(), 1800);
    }

    #[test]
    fn test_drop_frame_tenth_minute_keeps_all_frames() {
        let t = tc("00:10:00;00", FrameRate::Fps29_97Drop);
        assert_eq!(t.frames(), 17982);
        assert_eq!(t.format(false), "00:10:00;00");
    }

    #[test]
    fn test_drop_frame_rejects_skipped_labels() {
        let err = Timecode::parse("00:01:00;00", FrameRate::Fps29_97Drop).unwrap_err();
        assert!(matches!(err, TimecodeError::OutOfRange(_)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Timecode::parse("1:2:3", FrameRate::Fps25).is_err());
        assert!(Timecode::parse("00;00:00:00", FrameRate::Fps25).is_err());
        assert!(Timecode::parse("00:00:00:30", FrameRate::Fps25).is_err());
        assert!(Timecode::parse("aa:00:00:00", FrameRate::Fps25).is_err());
    }

    #[test]
    fn test_parse_rejects_non_ascii_without_panicking() {
        for input in ["00:00:00:\u{1F600}", "00:00:00:éé", "é0:00:00;00", "00:00;é:00"] {
            let err = Timecode::parse(input, FrameRate::Fps25).unwrap_err();
            assert!(matches!(err, TimecodeError::Malformed(_)), "{input}: {err:?}");
        }

        let doc = serde_json::from_str::<Timecode>(r#"{"timecode":"00:00:00:éé","rate":"25"}"#);
        assert!(doc.is_err());
    }

    #[test]
    fn test_huge_hours_are_out_of_range() {
        let err = Timecode::parse("9999999999999999:00:00:00", FrameRate::Fps25).unwrap_err();
        assert!(matches!(err, TimecodeError::OutOfRange(_)));

        let err = Timecode::parse("18446744073709551615:00:00;02", FrameRate::Fps29_97Drop)
            .unwrap_err();
        assert!(matches!(err, TimecodeError::OutOfRange(_)));

        let max: Timecode =
            serde_json::from_str(r#"{"frames":18446744073709551615,"rate":"29.97d"}"#).unwrap();
        assert!(max.format(false).len() > 11);
    }

    #[test]
    fn test_subframes_format() {
        let t = tc("00:00:01:00.40", FrameRate::Fps24);
        assert_eq!(t.subframes(), 40);
        assert_eq!(t.format(true), "00:00:01:00.40");
        assert!((t.seconds() - (24.5 / 24.0)).abs() < 1e-9);
    }

    #[test]
    fn test_seconds_for_fractional_rate() {
        let t = Timecode::from_frames(30_000, FrameRate::Fps29_97);
        assert!((t.seconds() - 1001.0).abs() < 1e-9);
    }

    #[test]
    fn test_saturating_sub() {
        let start = tc("01:00:00:00", FrameRate::Fps25);
        let pos = tc("01:00:10:05", FrameRate::Fps25);
        assert_eq!(pos.saturating_sub(&start).format(false), "00:00:10:05");
        assert!(start.saturating_sub(&pos).is_zero());
    }

    #[test]
    fn test_from_seconds_rounds_to_nearest_frame() {
        let t = Timecode::from_seconds(1.03, FrameRate::Fps25);
        assert_eq!(t.frames(), 26);
        assert_eq!(Timecode::from_seconds(-3.0, FrameRate::Fps25).frames(), 0);
    }

    #[test]
    fn test_serde_accepts_string_or_frames() {
        let a: Timecode =
            serde_json::from_str(r#"{"timecode": "00:00:02:00", "rate": "25"}"#).unwrap();
        let b: Timecode = serde_json::from_str(r#"{"frames": 50, "rate": "25"}"#).unwrap();
        assert_eq!(a, b);

        let json = serde_json::to_value(a).unwrap();
        assert_eq!(json["timecode"], "00:00:02:00");
        assert_eq!(json["rate"], "25");

        assert!(serde_json::from_str::<Timecode>(r#"{"rate": "25"}"#).is_err());
    }

    #[test]
    fn test_frame_rate_from_str() {
        assert_eq!("29.97d".parse::<FrameRate>().unwrap(), FrameRate::Fps29_97Drop);
        assert!("31".parse::<FrameRate>().is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn drop_frame_labels_map_back_to_the_same_frame(frames in 0u64..2_600_000) {
                for rate in [FrameRate::Fps29_97Drop, FrameRate::Fps59_94Drop] {
                    let t = Timecode::from_frames(frames, rate);
                    let parsed = Timecode::parse(&t.format(false), rate).unwrap();
                    prop_assert_eq!(parsed.frames(), frames);
                }
            }

            #[test]
            fn offsets_never_go_negative(a in 0u64..1_000_000, b in 0u64..1_000_000) {
                let x = Timecode::from_frames(a, FrameRate::Fps25);
                let y = Timecode::from_frames(b, FrameRate::Fps25);
                prop_assert_eq!(x.saturating_sub(&y).frames(), a.saturating_sub(b));
            }
        }
    }
}
