//! Markex Export Engine
//!
//! Turns an ordered marker list into the manifests each downstream tool
//! expects.
//!
//! # Pipeline Architecture
//!
//! ```text
//! markers + timeline context ──┐
//!                              ├── prepare_markers  (pure, per profile)
//! id mode / time format ───────┘         │
//!                                        ├── write_manifests  (csv, json, xlsx, md, srt, txt, mid)
//! media info (optional) ─────────────────┘         │
//!                                                  ├── result_file_content
//!                                                  ▼
//!                                        ExportResult + done-file
//! ```
//!
//! Each output format is an [`ExportProfile`]; [`ExportProfileFormat`] is the
//! closed set of them and dispatches statically.

pub mod fields;
pub mod id;
pub mod media;
pub mod pipeline;
pub mod profile;
pub mod profiles;
pub mod result;
pub mod serializers;
pub mod timing;

pub use fields::{ExportField, ExportFieldValue, NestedRow, TableRow};
pub use id::{marker_id, path_safe, IdMode};
pub use media::{ExportMarkerMediaInfo, ImageFormat};
pub use pipeline::{export_many, run_export, FolderFormat, ProfileOutcome};
pub use profile::{ExportInput, ExportOptions, ExportProfile, ExportProfileFormat};
pub use result::{ExportResult, ResultDictionary, ResultKey};
pub use timing::TimeFormat;
