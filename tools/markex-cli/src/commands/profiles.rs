//! List available export profiles.

use markex_export_engine::ExportProfileFormat;

pub fn run() -> anyhow::Result<()> {
    println!("{:<12} {:<10} Media", "Profile", "Files");
    for format in ExportProfileFormat::ALL {
        println!(
            "{:<12} {:<10} {}",
            format.as_str(),
            format.extensions().join(", "),
            if format.is_media_capable() { "yes" } else { "no" }
        );
    }
    Ok(())
}
