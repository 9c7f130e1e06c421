//! Markex CLI: export timeline markers to hand-off manifests.
//!
//! Usage:
//!   markex export <DOCUMENT> -p <PROFILE>...   Export markers with one or more profiles
//!   markex profiles                            List available profiles
//!   markex inspect <DOCUMENT>                  Summarise a marker document

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use markex_common::config::{AppConfig, LoggingConfig};

mod commands;

#[derive(Parser)]
#[command(
    name = "markex",
    about = "Export timeline markers to spreadsheets, subtitles, chapters and MIDI",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a marker document
    Export {
        /// Path to the marker document (JSON)
        document: PathBuf,

        /// Output root directory [default: from config]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Profiles to run (notion, airtable, xlsx, tsv, markdown, srt, compressor, youtube, midi)
        #[arg(short, long = "profile", required = true, num_args = 1..)]
        profiles: Vec<String>,

        /// Marker ID mode: timeline-name-and-timecode|name|notes [default: from config]
        #[arg(long)]
        id_mode: Option<String>,

        /// Position format: timecode|real-time [default: per profile]
        #[arg(long)]
        time_format: Option<String>,

        /// Include subframes in timecodes
        #[arg(long)]
        subframes: bool,

        /// Reference marker thumbnails produced by the media step.
        /// Without it, no image columns are written.
        #[arg(long)]
        media: bool,

        /// Thumbnail format: png|jpg|gif [default: from config]
        #[arg(long)]
        image_format: Option<String>,

        /// Every thumbnail comes from the timeline's first frame
        #[arg(long)]
        single_frame: bool,

        /// Omit image columns even when thumbnails are produced
        #[arg(long)]
        no_media: bool,

        /// Export folder naming: short|medium|long [default: from config]
        #[arg(long)]
        folder_format: Option<String>,

        /// Do not write the done-file
        #[arg(long)]
        no_done_file: bool,

        /// Only export these marker kinds: standard|chapter|todo|caption
        #[arg(long = "kind")]
        kinds: Vec<String>,

        /// Drop markers carrying this role
        #[arg(long = "exclude-role")]
        exclude_roles: Vec<String>,

        /// Drop markers with an empty name
        #[arg(long)]
        exclude_unnamed: bool,
    },

    /// List available export profiles
    Profiles,

    /// Show marker document information
    Inspect {
        /// Path to the marker document (JSON)
        document: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, config_error) = AppConfig::load();

    // Initialize logging
    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    markex_common::logging::init_logging(&LoggingConfig {
        level,
        ..config.logging.clone()
    });
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
    }

    match cli.command {
        Commands::Export {
            document,
            output,
            profiles,
            id_mode,
            time_format,
            subframes,
            media,
            image_format,
            single_frame,
            no_media,
            folder_format,
            no_done_file,
            kinds,
            exclude_roles,
            exclude_unnamed,
        } => commands::export::run(
            &config,
            commands::export::ExportArgs {
                document,
                output,
                profiles,
                id_mode,
                time_format,
                subframes,
                media,
                image_format,
                single_frame,
                no_media,
                folder_format,
                no_done_file,
                kinds,
                exclude_roles,
                exclude_unnamed,
            },
        ),
        Commands::Profiles => commands::profiles::run(),
        Commands::Inspect { document } => commands::inspect::run(document),
    }
}
