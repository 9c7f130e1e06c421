//! Show marker document information.

use std::path::PathBuf;

use indexmap::IndexMap;

use markex_common::progress::ProgressCounter;
use markex_marker_model::{extract_roles, MarkerDocument};

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let document = MarkerDocument::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load marker document: {e}"))?;

    let timeline = &document.timeline;
    println!("Timeline: {}", timeline.timeline_name);
    if let Some(project) = &timeline.project_name {
        println!("  Project: {project}");
    }
    if let Some(event) = &timeline.event_name {
        println!("  Event: {event}");
    }
    if let Some(library) = &timeline.library_name {
        println!("  Library: {library}");
    }
    println!("  Start: {} @ {} fps", timeline.start, timeline.frame_rate());
    println!();

    let mut by_kind: IndexMap<&str, usize> = IndexMap::new();
    for marker in &document.markers {
        *by_kind.entry(marker.kind.display_name()).or_default() += 1;
    }
    println!("Markers: {}", document.markers.len());
    for (kind, count) in &by_kind {
        println!("  {kind}: {count}");
    }
    if let Err(e) = document.validate() {
        println!("  Warning: {e}");
    }
    println!();

    let progress = ProgressCounter::new(document.sub_timelines.len());
    let roles = extract_roles(&document.sub_timelines, Some(&progress));
    println!(
        "Roles ({} sub-timelines scanned):",
        progress.completed()
    );
    for role in &roles {
        let kind = if role.is_video() {
            "video"
        } else if role.is_audio() {
            "audio"
        } else {
            "caption"
        };
        println!("  {kind}: {}", role.name());
    }

    Ok(())
}
