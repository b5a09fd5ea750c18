//! Load pipeline for Space Missions.
//!
//! Wraps [`load_launch_table`] with timing and summary metadata so the
//! binary can log what was loaded and hand the table to the UI or export.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use missions_core::error::Result;
use missions_core::models::LaunchTable;
use tracing::info;

use crate::reader::load_launch_table;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the loaded table.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoadMetadata {
    /// ISO-8601 timestamp when the table was loaded.
    pub loaded_at: String,
    /// Path the table was read from.
    pub source: String,
    /// Number of launch records in the table.
    pub records: usize,
    /// Earliest launch year, if any.
    pub first_year: Option<i32>,
    /// Latest launch year, if any.
    pub last_year: Option<i32>,
    /// Records whose country has no ISO code.
    pub unmapped_countries: usize,
    /// Wall-clock seconds spent reading and normalizing the CSV.
    pub load_time_seconds: f64,
}

/// The canonical table and its load metadata.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub table: Arc<LaunchTable>,
    pub metadata: LoadMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Load the dataset at `path` into a shared, read-only table.
pub fn load_dataset(path: &Path) -> Result<LoadedDataset> {
    let started = std::time::Instant::now();
    let table = load_launch_table(path)?;
    let load_time_seconds = started.elapsed().as_secs_f64();

    let span = table.year_span();
    let metadata = LoadMetadata {
        loaded_at: Utc::now().to_rfc3339(),
        source: path.display().to_string(),
        records: table.len(),
        first_year: span.map(|(first, _)| first),
        last_year: span.map(|(_, last)| last),
        unmapped_countries: table.iter().filter(|r| r.country_code.is_none()).count(),
        load_time_seconds,
    };

    info!(
        records = metadata.records,
        unmapped = metadata.unmapped_countries,
        seconds = format!("{:.3}", load_time_seconds),
        "dataset ready"
    );

    Ok(LoadedDataset {
        table: Arc::new(table),
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_dataset_metadata() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "Unnamed: 0,Unnamed: 0.1,Company Name,Location,Datum,Detail,Status Rocket, Rocket,Status Mission"
        )
        .unwrap();
        writeln!(file, "0,0,SpaceX,\"LC-39A, Florida, USA\",2020-08-07,Falcon 9,StatusActive,50.0,Success").unwrap();
        writeln!(file, "1,1,IRGC,\"Launch Plateform, Shahrud Missile Test Site\",1990-01-01,Qased,StatusActive,,Failure").unwrap();
        writeln!(file, "2,2,Lonely,\"Pad, Atlantis\",1965-01-01,Myth,StatusRetired,,Failure").unwrap();
        file.flush().unwrap();

        let loaded = load_dataset(file.path()).unwrap();
        assert_eq!(loaded.metadata.records, 3);
        assert_eq!(loaded.metadata.first_year, Some(1965));
        assert_eq!(loaded.metadata.last_year, Some(2020));
        assert_eq!(loaded.metadata.unmapped_countries, 2);
        assert!(loaded.metadata.load_time_seconds >= 0.0);
        assert_eq!(loaded.table.len(), 3);
    }

    #[test]
    fn test_load_dataset_missing_file() {
        assert!(load_dataset(Path::new("/no/such/file.csv")).is_err());
    }
}
