mod bootstrap;

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use missions_core::error::MissionsError;
use missions_core::settings::{SectionChoice, Settings};
use missions_data::analysis::load_dataset;
use missions_data::sections::{build_all_reports, build_report};
use missions_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();
    settings.validate()?;

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, &bootstrap::log_target(&settings))?;

    tracing::info!("Space Missions v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data: {}, Section: {}, Theme: {}, Reference year: {}",
        settings.data_file.display(),
        settings.section,
        settings.theme,
        settings.reference_year
    );

    let dataset = load_dataset(&settings.data_file)
        .with_context(|| format!("failed to load {}", settings.data_file.display()))?;

    if settings.export {
        let json = match settings.section_choice()? {
            SectionChoice::One(section) => serde_json::to_string_pretty(&build_report(
                &dataset.table,
                section,
                settings.reference_year,
            ))?,
            SectionChoice::All => serde_json::to_string_pretty(&build_all_reports(
                &dataset.table,
                settings.reference_year,
            ))?,
        };
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}")?;
        return Ok(());
    }

    let app = App::new(
        Arc::clone(&dataset.table),
        &settings.theme,
        settings.initial_section()?,
        settings.reference_year,
    );
    app.run()
        .map_err(|e| MissionsError::Terminal(e.to_string()))?;

    tracing::info!("Space Missions exiting");
    Ok(())
}
