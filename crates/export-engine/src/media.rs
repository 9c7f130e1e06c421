//! Thumbnail references for media-capable profiles.
//!
//! Thumbnails themselves are rendered elsewhere; exports only carry the file
//! name each marker's image will have and the timecode it is taken from.

use serde::{Deserialize, Serialize};

use markex_marker_model::{Marker, Timecode, TimelineContext};

/// Thumbnail image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpg,
    /// Animated thumbnail.
    Gif,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Gif => "gif",
        }
    }
}

impl std::str::FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpg),
            "gif" => Ok(ImageFormat::Gif),
            other => Err(format!("unknown image format: {other}. Use: png, jpg, gif")),
        }
    }
}

/// What the thumbnail step will produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMarkerMediaInfo {
    pub image_format: ImageFormat,
    /// The timeline is a single still frame; every thumbnail comes from it.
    #[serde(default)]
    pub is_single_frame: bool,
}

impl ExportMarkerMediaInfo {
    pub fn new(image_format: ImageFormat) -> Self {
        Self {
            image_format,
            is_single_frame: false,
        }
    }

    /// `<path-safe id>.<ext>`.
    pub fn image_file_name(&self, path_safe_id: &str) -> String {
        format!("{path_safe_id}.{}", self.image_format.extension())
    }

    /// Timecode the thumbnail for `marker` is grabbed at.
    pub fn image_timecode(&self, marker: &Marker, context: &TimelineContext) -> Timecode {
        if self.is_single_frame {
            context.start
        } else {
            marker.position
        }
    }
}
