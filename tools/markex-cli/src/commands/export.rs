//! Export a marker document with one or more profiles.

use std::path::PathBuf;

use markex_common::config::AppConfig;
use markex_common::progress::ProgressCounter;
use markex_export_engine::{
    export_many, ExportInput, ExportMarkerMediaInfo, ExportOptions, ExportProfileFormat,
    FolderFormat, IdMode, ImageFormat, TimeFormat,
};
use markex_marker_model::{sort_markers, MarkerDocument, MarkerFilter, MarkerKindFilter};

/// Flags of `markex export`.
pub struct ExportArgs {
    pub document: PathBuf,
    pub output: Option<PathBuf>,
    pub profiles: Vec<String>,
    pub id_mode: Option<String>,
    pub time_format: Option<String>,
    pub subframes: bool,
    pub media: bool,
    pub image_format: Option<String>,
    pub single_frame: bool,
    pub no_media: bool,
    pub folder_format: Option<String>,
    pub no_done_file: bool,
    pub kinds: Vec<String>,
    pub exclude_roles: Vec<String>,
    pub exclude_unnamed: bool,
}

fn parse<T: std::str::FromStr<Err = String>>(value: &str) -> anyhow::Result<T> {
    value.parse().map_err(|e: String| anyhow::anyhow!(e))
}

pub fn run(config: &AppConfig, args: ExportArgs) -> anyhow::Result<()> {
    println!("Exporting markers from: {}", args.document.display());

    let document = MarkerDocument::load(&args.document)
        .map_err(|e| anyhow::anyhow!("Failed to load marker document: {e}"))?;
    document
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid marker document: {e}"))?;

    let formats = args
        .profiles
        .iter()
        .map(|p| parse::<ExportProfileFormat>(p))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let defaults = &config.export;
    let id_mode: IdMode =
        parse(args.id_mode.as_deref().unwrap_or(defaults.id_naming_mode.as_str()))?;
    let folder_format: FolderFormat =
        parse(args.folder_format.as_deref().unwrap_or(defaults.folder_format.as_str()))?;
    let subframes = args.subframes || defaults.enable_subframes;

    let time_format = match args.time_format.as_deref() {
        None if subframes => Some(TimeFormat::Timecode { subframes }),
        None => None,
        Some("timecode") => Some(TimeFormat::Timecode { subframes }),
        Some("real-time") | Some("realtime") => Some(TimeFormat::RealTime),
        Some(other) => {
            return Err(anyhow::anyhow!(
                "Unknown time format: {other}. Use: timecode, real-time"
            ));
        }
    };

    let media = if args.media {
        let format = args.image_format.as_deref().unwrap_or(defaults.image_format.as_str());
        Some(ExportMarkerMediaInfo {
            image_format: parse::<ImageFormat>(format)?,
            is_single_frame: args.single_frame,
        })
    } else {
        None
    };

    let filter = MarkerFilter {
        kinds: args
            .kinds
            .iter()
            .map(|k| parse::<MarkerKindFilter>(k))
            .collect::<anyhow::Result<Vec<_>>>()?,
        exclude_roles: args.exclude_roles,
        exclude_unnamed: args.exclude_unnamed,
    };

    let mut markers = filter.apply(&document.markers);
    sort_markers(&mut markers);

    let output_root = args.output.unwrap_or_else(|| config.output_dir.clone());
    let options = ExportOptions {
        id_mode,
        time_format,
        no_media: args.no_media,
        done_filename: if args.no_done_file {
            None
        } else {
            defaults.done_filename.clone()
        },
    };

    println!("  Timeline: {}", document.timeline.timeline_name);
    println!("  Markers: {} of {}", markers.len(), document.markers.len());
    println!("  Output: {}", output_root.display());
    println!();

    let input = ExportInput {
        context: document.timeline,
        markers,
        media,
    };

    let progress = ProgressCounter::new(formats.len());
    let outcomes = export_many(
        &formats,
        &input,
        &options,
        &output_root,
        folder_format,
        Some(&progress),
    );

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(result) => {
                println!("  [ok]   {}: {}", outcome.format, outcome.export_folder.display());
                for path in result.artifact_paths() {
                    println!("           {}", path.display());
                }
            }
            Err(e) => {
                failed += 1;
                println!("  [fail] {}: {e}", outcome.format);
            }
        }
    }

    println!();
    println!(
        "Export complete: {}/{} profiles succeeded",
        progress.completed() - failed,
        progress.total()
    );

    if failed > 0 {
        return Err(anyhow::anyhow!("{failed} profile(s) failed"));
    }
    Ok(())
}
