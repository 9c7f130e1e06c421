//! The nine export profiles.

pub mod airtable;
pub mod compressor;
pub mod markdown;
pub mod midi;
pub mod notion;
pub mod srt;
pub mod standard;
pub mod tsv;
pub mod xlsx;
pub mod youtube;

use std::path::{Path, PathBuf};

use markex_marker_model::TimelineContext;

use crate::id::path_safe;

pub use airtable::AirtableProfile;
pub use compressor::CompressorProfile;
pub use markdown::MarkdownProfile;
pub use midi::MidiProfile;
pub use notion::NotionProfile;
pub use srt::SubRipProfile;
pub use tsv::TsvProfile;
pub use xlsx::XlsxProfile;
pub use youtube::YouTubeProfile;

/// `<output_dir>/<timeline name>.<extension>`.
pub fn manifest_path(context: &TimelineContext, output_dir: &Path, extension: &str) -> PathBuf {
    output_dir.join(format!("{}.{extension}", path_safe(&context.timeline_name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use markex_marker_model::{FrameRate, Timecode};

    #[test]
    fn test_manifest_path_is_path_safe() {
        let context = TimelineContext::new("Cut 3/final", Timecode::zero(FrameRate::Fps24));
        assert_eq!(
            manifest_path(&context, Path::new("/out"), "csv"),
            PathBuf::from("/out/Cut 3_final.csv")
        );
    }
}
