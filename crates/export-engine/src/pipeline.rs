//! Running profiles end to end.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use markex_common::error::{MarkexError, MarkexResult};
use markex_common::progress::ProgressCounter;
use markex_marker_model::TimelineContext;

use crate::id::path_safe;
use crate::profile::{ExportInput, ExportOptions, ExportProfile, ExportProfileFormat};
use crate::profiles::{
    AirtableProfile, CompressorProfile, MarkdownProfile, MidiProfile, NotionProfile, SubRipProfile,
    TsvProfile, XlsxProfile, YouTubeProfile,
};
use crate::result::ExportResult;
use crate::serializers::{done_file_path, write_done_file};

/// Naming of the per-profile export folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderFormat {
    /// `<timeline>`
    Short,
    /// `<timeline> [<profile>]`
    #[default]
    Medium,
    /// `<project> <timeline> [<profile>]`
    Long,
}

impl FolderFormat {
    pub fn folder_name(self, context: &TimelineContext, format: ExportProfileFormat) -> String {
        let timeline = &context.timeline_name;
        let name = match self {
            FolderFormat::Short => timeline.clone(),
            FolderFormat::Medium => format!("{timeline} [{format}]"),
            FolderFormat::Long => match &context.project_name {
                Some(project) => format!("{project} {timeline} [{format}]"),
                None => format!("{timeline} [{format}]"),
            },
        };
        path_safe(&name)
    }
}

impl std::str::FromStr for FolderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "short" => Ok(FolderFormat::Short),
            "medium" => Ok(FolderFormat::Medium),
            "long" => Ok(FolderFormat::Long),
            other => Err(format!("unknown folder format: {other}. Use: short, medium, long")),
        }
    }
}

/// Export `input` with `profile` into `export_folder`.
///
/// The folder is created if needed. Image columns are dropped when the caller
/// asks, when no media info was supplied, or when the profile never uses it.
pub fn run_export<P: ExportProfile>(
    profile: &P,
    input: &ExportInput,
    options: &ExportOptions,
    export_folder: &Path,
) -> MarkexResult<ExportResult> {
    let span = tracing::info_span!("export", profile = %P::FORMAT);
    let _guard = span.enter();

    tracing::info!(
        folder = %export_folder.display(),
        markers = input.markers.len(),
        "Starting export"
    );

    std::fs::create_dir_all(export_folder)
        .map_err(|e| MarkexError::file_write(export_folder, e))?;

    let no_media = options.no_media || input.media.is_none() || !P::MEDIA_CAPABLE;
    let media = if no_media { None } else { input.media.as_ref() };
    let time_format = profile.time_format(options.time_format);

    let payload = profile.payload(&input.context, export_folder);
    let prepared = profile.prepare_markers(
        &input.markers,
        &input.context,
        options.id_mode,
        time_format,
        &payload,
        media,
    );
    tracing::debug!(prepared = prepared.len(), no_media, "Prepared markers");

    let result = ExportResult::from_dictionary(
        P::FORMAT,
        export_folder,
        profile.result_file_content(&payload),
    );
    // Checked up front so a clash fails before any manifest is written.
    if let Some(done_filename) = &options.done_filename {
        done_file_path(&result, done_filename)?;
    }

    profile.write_manifests(&prepared, &payload, no_media)?;

    if let Some(done_filename) = &options.done_filename {
        write_done_file(&result, done_filename)?;
    }

    tracing::info!(artifacts = result.artifact_paths().len(), "Export complete");
    Ok(result)
}

impl ExportProfileFormat {
    /// Run this profile. See [`run_export`].
    pub fn export(
        self,
        input: &ExportInput,
        options: &ExportOptions,
        export_folder: &Path,
    ) -> MarkexResult<ExportResult> {
        match self {
            ExportProfileFormat::Notion => {
                run_export(&NotionProfile, input, options, export_folder)
            }
            ExportProfileFormat::Airtable => {
                run_export(&AirtableProfile, input, options, export_folder)
            }
            ExportProfileFormat::Xlsx => run_export(&XlsxProfile, input, options, export_folder),
            ExportProfileFormat::Tsv => run_export(&TsvProfile, input, options, export_folder),
            ExportProfileFormat::Markdown => {
                run_export(&MarkdownProfile, input, options, export_folder)
            }
            ExportProfileFormat::SubRip => {
                run_export(&SubRipProfile, input, options, export_folder)
            }
            ExportProfileFormat::Compressor => {
                run_export(&CompressorProfile, input, options, export_folder)
            }
            ExportProfileFormat::YouTube => {
                run_export(&YouTubeProfile, input, options, export_folder)
            }
            ExportProfileFormat::Midi => run_export(&MidiProfile, input, options, export_folder),
        }
    }

    pub fn is_media_capable(self) -> bool {
        match self {
            ExportProfileFormat::Notion => NotionProfile::MEDIA_CAPABLE,
            ExportProfileFormat::Airtable => AirtableProfile::MEDIA_CAPABLE,
            ExportProfileFormat::Xlsx => XlsxProfile::MEDIA_CAPABLE,
            ExportProfileFormat::Tsv => TsvProfile::MEDIA_CAPABLE,
            ExportProfileFormat::Markdown => MarkdownProfile::MEDIA_CAPABLE,
            ExportProfileFormat::SubRip => SubRipProfile::MEDIA_CAPABLE,
            ExportProfileFormat::Compressor => CompressorProfile::MEDIA_CAPABLE,
            ExportProfileFormat::YouTube => YouTubeProfile::MEDIA_CAPABLE,
            ExportProfileFormat::Midi => MidiProfile::MEDIA_CAPABLE,
        }
    }
}

/// How one profile of a multi-profile run went.
#[derive(Debug)]
pub struct ProfileOutcome {
    pub format: ExportProfileFormat,
    pub export_folder: PathBuf,
    pub result: MarkexResult<ExportResult>,
}

/// Run several profiles, each into its own folder under `output_root`.
///
/// A failing profile does not stop the others. When two profiles would share
/// a folder (short naming), the later one falls back to medium naming.
pub fn export_many(
    formats: &[ExportProfileFormat],
    input: &ExportInput,
    options: &ExportOptions,
    output_root: &Path,
    folder_format: FolderFormat,
    progress: Option<&ProgressCounter>,
) -> Vec<ProfileOutcome> {
    let mut used = HashSet::new();
    let mut outcomes = Vec::with_capacity(formats.len());

    for &format in formats {
        let mut folder = folder_format.folder_name(&input.context, format);
        if !used.insert(folder.clone()) {
            let fallback = FolderFormat::Medium.folder_name(&input.context, format);
            tracing::warn!(
                profile = %format,
                folder = %folder,
                fallback = %fallback,
                "Export folder already used in this run"
            );
            used.insert(fallback.clone());
            folder = fallback;
        }

        let export_folder = output_root.join(folder);
        let result = format.export(input, options, &export_folder);
        if let Err(e) = &result {
            tracing::error!(profile = %format, error = %e, "Export failed");
        }

        if let Some(progress) = progress {
            progress.increment();
        }
        outcomes.push(ProfileOutcome {
            format,
            export_folder,
            result,
        });
    }

    outcomes
}
