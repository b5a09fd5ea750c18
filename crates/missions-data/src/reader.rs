//! CSV loading and normalization for the launch dataset.
//!
//! The input has nine positional columns:
//!
//! | # | Column          | Used as                         |
//! |---|-----------------|---------------------------------|
//! | 0 | `Unnamed: 0`    | dropped                         |
//! | 1 | `Unnamed: 0.1`  | dropped                         |
//! | 2 | `Company Name`  | [`LaunchRecord::company`]       |
//! | 3 | `Location`      | location, country, country code |
//! | 4 | `Datum`         | launch date, year/month/weekday |
//! | 5 | `Detail`        | [`LaunchRecord::detail`]        |
//! | 6 | `Status Rocket` | [`RocketStatus`]                |
//! | 7 | ` Rocket`       | cost (fractional millions)      |
//! | 8 | `Status Mission`| [`MissionStatus`]               |

use std::io::Read;
use std::path::Path;

use missions_core::error::{MissionsError, Result};
use missions_core::geography::{country_code, country_from_location};
use missions_core::models::{LaunchRecord, LaunchTable, MissionStatus, RocketStatus};
use missions_core::normalize::{normalize_cost, parse_launch_date, CalendarParts};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Number of columns in the source file, including the two index columns.
pub const EXPECTED_COLUMNS: usize = 9;

/// One source row, deserialized by position.
#[derive(Debug, Deserialize)]
struct RawLaunchRow {
    _index: String,
    _index_copy: String,
    company: String,
    location: String,
    datum: String,
    detail: String,
    rocket_status: String,
    cost: String,
    mission_status: String,
}

/// Load and normalize the dataset at `path`.
///
/// Fails on a missing file, a header or row with a column count other than
/// [`EXPECTED_COLUMNS`], or an unparsable launch date. There is no partial
/// load.
pub fn load_launch_table(path: &Path) -> Result<LaunchTable> {
    let file = std::fs::File::open(path).map_err(|source| MissionsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_launch_table(file)?;
    info!(
        "Loaded {} launch records from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Normalize CSV content from any reader. Line numbers in errors are 1-based
/// and count the header as line 1.
pub fn read_launch_table<R: Read>(input: R) -> Result<LaunchTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let header_len = reader.headers()?.len();
    if header_len != EXPECTED_COLUMNS {
        return Err(MissionsError::SchemaMismatch {
            line: 1,
            expected: EXPECTED_COLUMNS,
            found: header_len,
        });
    }

    let mut records = Vec::new();
    let mut unknown_status = 0usize;

    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(idx as u64 + 2);
        let record = normalize_row(&row, line)?;
        if matches!(record.mission_status, MissionStatus::Other(_))
            || matches!(record.rocket_status, RocketStatus::Other(_))
        {
            unknown_status += 1;
        }
        records.push(record);
    }

    if unknown_status > 0 {
        warn!("{} rows carry an unrecognised status label", unknown_status);
    }

    Ok(LaunchTable::new(records))
}

/// Turn one raw CSV row into a canonical record.
fn normalize_row(row: &csv::StringRecord, line: u64) -> Result<LaunchRecord> {
    if row.len() != EXPECTED_COLUMNS {
        return Err(MissionsError::SchemaMismatch {
            line,
            expected: EXPECTED_COLUMNS,
            found: row.len(),
        });
    }
    let raw: RawLaunchRow = row.deserialize(None)?;

    let launched_at = parse_launch_date(&raw.datum).ok_or_else(|| MissionsError::DateParse {
        line,
        value: raw.datum.clone(),
    })?;
    let calendar = CalendarParts::of(&launched_at);

    let location = raw.location.trim().to_string();
    let country = country_from_location(&location);
    let code = country_code(&country).map(str::to_string);
    if code.is_none() {
        debug!(line, country = %country, "country has no ISO code");
    }

    Ok(LaunchRecord {
        company: raw.company.trim().to_string(),
        location,
        launched_at,
        detail: raw.detail.trim().to_string(),
        rocket_status: RocketStatus::from_label(&raw.rocket_status),
        cost: normalize_cost(&raw.cost),
        mission_status: MissionStatus::from_label(&raw.mission_status),
        year: calendar.year,
        month: calendar.month,
        weekday: calendar.weekday,
        country,
        country_code: code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{average_per_event, count_by, GroupCount};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "Unnamed: 0,Unnamed: 0.1,Company Name,Location,Datum,Detail,Status Rocket, Rocket,Status Mission\n";

    fn fixture() -> String {
        let mut s = String::from(HEADER);
        s.push_str("0,0,CompanyA,\"Site, Russia\",2001-05-01,Rocket A | Sat 1,StatusActive,1.5,Success\n");
        s.push_str("1,1,CompanyA,\"Site, USA\",2001-06-01,Rocket A | Sat 2,StatusActive,,Failure\n");
        s.push_str("2,2,CompanyB,\"Site, USA\",2002-01-01,Rocket B | Sat 3,StatusRetired,2,Success\n");
        s
    }

    #[test]
    fn test_reads_three_row_fixture() {
        let table = read_launch_table(fixture().as_bytes()).unwrap();
        assert_eq!(table.len(), 3);

        let countries: Vec<&str> = table.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, vec!["Russian Federation", "USA", "USA"]);

        let costs: Vec<f64> = table.iter().map(|r| r.cost).collect();
        assert_eq!(costs, vec![1_500_000.0, 0.0, 2_000_000.0]);

        let codes: Vec<Option<&str>> = table.iter().map(|r| r.country_code.as_deref()).collect();
        assert_eq!(codes, vec![Some("RUS"), Some("USA"), Some("USA")]);
    }

    #[test]
    fn test_derived_calendar_fields() {
        let table = read_launch_table(fixture().as_bytes()).unwrap();
        let first = &table.records()[0];
        assert_eq!((first.year, first.month, first.weekday), (2001, 5, 1));
        assert_eq!(first.mission_status, MissionStatus::Success);
        assert_eq!(first.rocket_status, RocketStatus::Active);
        assert_eq!(first.detail, "Rocket A | Sat 1");
    }

    #[test]
    fn test_dataset_date_and_cost_format() {
        let mut csv = String::from(HEADER);
        csv.push_str(
            "4323,4323,RVSN USSR,\"Site 1/5, Baikonur Cosmodrome, Kazakhstan\",\"Fri Oct 04, 1957 19:28 UTC\",Sputnik 8K71PS | Sputnik-1,StatusRetired,,Success\n",
        );
        csv.push_str(
            "1,1,NASA,\"LC-39A, Kennedy Space Center, Florida, USA\",\"Sat Apr 12, 1981 12:00 UTC\",Space Shuttle Columbia | STS-1,StatusRetired,\"450.0\",Success\n",
        );
        let table = read_launch_table(csv.as_bytes()).unwrap();
        let sputnik = &table.records()[0];
        assert_eq!((sputnik.year, sputnik.month, sputnik.weekday), (1957, 10, 4));
        assert_eq!(sputnik.country, "Kazakhstan");
        assert_eq!(sputnik.country_code.as_deref(), Some("KAZ"));
        assert_eq!(sputnik.cost, 0.0);

        // The row says "Sat" but 12 April 1981 was a Sunday.
        let shuttle = &table.records()[1];
        assert_eq!((shuttle.year, shuttle.month, shuttle.weekday), (1981, 4, 6));
        assert_eq!(shuttle.cost, 450_000_000.0);
    }

    #[test]
    fn test_three_row_fixture_through_views() {
        let table = read_launch_table(fixture().as_bytes()).unwrap();

        let counts = count_by(&table, |r| r.company.clone());
        assert_eq!(
            counts,
            vec![
                GroupCount { key: "CompanyA".to_string(), count: 2 },
                GroupCount { key: "CompanyB".to_string(), count: 1 },
            ]
        );

        let averages = average_per_event(&table, |r| r.company.clone());
        let pairs: Vec<(&str, f64)> = averages
            .iter()
            .map(|a| (a.key.as_str(), a.average))
            .collect();
        assert_eq!(pairs, vec![("CompanyA", 750_000.0), ("CompanyB", 2_000_000.0)]);
    }

    #[test]
    fn test_header_column_count_mismatch() {
        let csv = "Company Name,Location,Datum,Detail,Status Rocket, Rocket,Status Mission\n";
        let err = read_launch_table(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            MissionsError::SchemaMismatch {
                line: 1,
                expected: 9,
                found: 7
            }
        ));
    }

    #[test]
    fn test_row_column_count_mismatch() {
        let mut csv = String::from(HEADER);
        csv.push_str("0,0,CompanyA,Site,2001-05-01\n");
        let err = read_launch_table(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            MissionsError::SchemaMismatch { line: 2, found: 5, .. }
        ));
    }

    #[test]
    fn test_bad_date_is_fatal() {
        let mut csv = String::from(HEADER);
        csv.push_str("0,0,CompanyA,\"Site, USA\",someday,R,StatusActive,,Success\n");
        let err = read_launch_table(csv.as_bytes()).unwrap_err();
        match err {
            MissionsError::DateParse { line, value } => {
                assert_eq!(line, 2);
                assert_eq!(value, "someday");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_status_is_kept() {
        let mut csv = String::from(HEADER);
        csv.push_str("0,0,CompanyA,\"Site, USA\",2001-05-01,R,StatusPlanned,,Scrubbed\n");
        let table = read_launch_table(csv.as_bytes()).unwrap();
        let r = &table.records()[0];
        assert_eq!(r.mission_status, MissionStatus::Other("Scrubbed".to_string()));
        assert_eq!(r.rocket_status, RocketStatus::Other("StatusPlanned".to_string()));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(fixture().as_bytes()).unwrap();
        let table = load_launch_table(file.path()).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_missing_file_is_file_read_error() {
        let err = load_launch_table(Path::new("/nonexistent/launches.csv")).unwrap_err();
        assert!(matches!(err, MissionsError::FileRead { .. }));
    }

    #[test]
    fn test_empty_body_yields_empty_table() {
        let table = read_launch_table(HEADER.as_bytes()).unwrap();
        assert!(table.is_empty());
    }
}
