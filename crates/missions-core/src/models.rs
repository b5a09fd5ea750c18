use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MissionsError;

/// Outcome of a launch as recorded in the `Status Mission` column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum MissionStatus {
    Success,
    Failure,
    PartialFailure,
    PrelaunchFailure,
    /// Any label not recognised above, kept verbatim.
    Other(String),
}

impl MissionStatus {
    /// Map a raw column label onto a status. Never fails.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Success" => Self::Success,
            "Failure" => Self::Failure,
            "Partial Failure" => Self::PartialFailure,
            "Prelaunch Failure" => Self::PrelaunchFailure,
            other => Self::Other(other.to_string()),
        }
    }

    /// The label as it appears in the dataset.
    pub fn label(&self) -> &str {
        match self {
            Self::Success => "Success",
            Self::Failure => "Failure",
            Self::PartialFailure => "Partial Failure",
            Self::PrelaunchFailure => "Prelaunch Failure",
            Self::Other(s) => s,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<MissionStatus> for String {
    fn from(s: MissionStatus) -> Self {
        s.label().to_string()
    }
}

impl From<String> for MissionStatus {
    fn from(s: String) -> Self {
        Self::from_label(&s)
    }
}

/// Operational status of the rocket type (`Status Rocket` column).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum RocketStatus {
    Active,
    Retired,
    Other(String),
}

impl RocketStatus {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "StatusActive" => Self::Active,
            "StatusRetired" => Self::Retired,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Active => "StatusActive",
            Self::Retired => "StatusRetired",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for RocketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<RocketStatus> for String {
    fn from(s: RocketStatus) -> Self {
        s.label().to_string()
    }
}

impl From<String> for RocketStatus {
    fn from(s: String) -> Self {
        Self::from_label(&s)
    }
}

/// One cleaned row of the canonical table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    /// Launch provider, e.g. `"SpaceX"`.
    pub company: String,
    /// Free-text launch site, e.g. `"LC-39A, Kennedy Space Center, Florida, USA"`.
    pub location: String,
    /// Launch date and time (UTC; midnight when the source omits the time).
    pub launched_at: NaiveDateTime,
    /// Rocket and payload description, e.g. `"Falcon 9 Block 5 | Starlink V1 L9"`.
    pub detail: String,
    pub rocket_status: RocketStatus,
    /// Rocket cost in absolute currency units; always finite and `>= 0`.
    pub cost: f64,
    pub mission_status: MissionStatus,
    /// Calendar year of the launch.
    pub year: i32,
    /// Calendar month, 1–12.
    pub month: u32,
    /// Day of week, Monday = 0.
    pub weekday: u32,
    /// Normalized country name.
    pub country: String,
    /// ISO 3166-1 alpha-3 code, `None` when the country has no code.
    pub country_code: Option<String>,
}

/// The canonical table: every launch record, loaded once and read-only
/// afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
}

impl LaunchTable {
    pub fn new(records: Vec<LaunchRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LaunchRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(earliest, latest)` launch year, or `None` for an empty table.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }
}

impl<'a> IntoIterator for &'a LaunchTable {
    type Item = &'a LaunchRecord;
    type IntoIter = std::slice::Iter<'a, LaunchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// The nine navigation sections of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Home,
    AboutData,
    DatasetOverview,
    InterestingFactors,
    ColdWar,
    BestEveryYear,
    GeoAnalysis,
    IndiasPlace,
    Reference,
}

impl Section {
    /// Sidebar order.
    pub const ALL: [Section; 9] = [
        Section::Home,
        Section::AboutData,
        Section::DatasetOverview,
        Section::InterestingFactors,
        Section::ColdWar,
        Section::BestEveryYear,
        Section::GeoAnalysis,
        Section::IndiasPlace,
        Section::Reference,
    ];

    /// Title shown in the sidebar and section header.
    pub fn title(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::AboutData => "About Data",
            Section::DatasetOverview => "Dataset Overview",
            Section::InterestingFactors => "Interesting Factors",
            Section::ColdWar => "The Cold War",
            Section::BestEveryYear => "Best Every Year",
            Section::GeoAnalysis => "Geo Analysis",
            Section::IndiasPlace => "India's Place",
            Section::Reference => "Reference",
        }
    }

    /// Command-line spelling, e.g. `"cold-war"`.
    pub fn slug(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::AboutData => "about-data",
            Section::DatasetOverview => "dataset-overview",
            Section::InterestingFactors => "interesting-factors",
            Section::ColdWar => "cold-war",
            Section::BestEveryYear => "best-every-year",
            Section::GeoAnalysis => "geo-analysis",
            Section::IndiasPlace => "indias-place",
            Section::Reference => "reference",
        }
    }

    /// Resolve a slug or a title (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self, MissionsError> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.slug() == wanted || s.title().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MissionsError::UnknownSection(name.to_string()))
    }

    /// Position in [`Section::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Next section in sidebar order, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous section in sidebar order, wrapping around.
    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(year: i32) -> LaunchRecord {
        LaunchRecord {
            company: "RVSN USSR".to_string(),
            location: "Site 1/5, Baikonur Cosmodrome, Kazakhstan".to_string(),
            launched_at: NaiveDate::from_ymd_opt(year, 10, 4)
                .unwrap()
                .and_hms_opt(19, 28, 0)
                .unwrap(),
            detail: "Sputnik 8K71PS | Sputnik-1".to_string(),
            rocket_status: RocketStatus::Retired,
            cost: 0.0,
            mission_status: MissionStatus::Success,
            year,
            month: 10,
            weekday: 4,
            country: "Kazakhstan".to_string(),
            country_code: Some("KAZ".to_string()),
        }
    }

    #[test]
    fn test_mission_status_labels() {
        assert_eq!(MissionStatus::from_label("Success"), MissionStatus::Success);
        assert_eq!(
            MissionStatus::from_label(" Partial Failure "),
            MissionStatus::PartialFailure
        );
        assert_eq!(
            MissionStatus::from_label("Prelaunch Failure").label(),
            "Prelaunch Failure"
        );
        assert_eq!(
            MissionStatus::from_label("Scrubbed"),
            MissionStatus::Other("Scrubbed".to_string())
        );
    }

    #[test]
    fn test_mission_status_is_success() {
        assert!(MissionStatus::Success.is_success());
        assert!(!MissionStatus::PartialFailure.is_success());
    }

    #[test]
    fn test_rocket_status_labels() {
        assert_eq!(RocketStatus::from_label("StatusActive"), RocketStatus::Active);
        assert_eq!(RocketStatus::Retired.to_string(), "StatusRetired");
    }

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_string(&MissionStatus::PartialFailure).unwrap();
        assert_eq!(json, "\"Partial Failure\"");
        let back: MissionStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MissionStatus::PartialFailure);
    }

    #[test]
    fn test_table_year_span() {
        let table = LaunchTable::new(vec![record(1957), record(1991), record(1961)]);
        assert_eq!(table.year_span(), Some((1957, 1991)));
        assert_eq!(table.len(), 3);
        assert!(LaunchTable::default().year_span().is_none());
    }

    #[test]
    fn test_section_from_name_accepts_slug_and_title() {
        assert_eq!(Section::from_name("cold-war").unwrap(), Section::ColdWar);
        assert_eq!(Section::from_name("india's place").unwrap(), Section::IndiasPlace);
        assert!(matches!(
            Section::from_name("moon"),
            Err(MissionsError::UnknownSection(_))
        ));
    }

    #[test]
    fn test_section_navigation_wraps() {
        assert_eq!(Section::Home.prev(), Section::Reference);
        assert_eq!(Section::Reference.next(), Section::Home);
        assert_eq!(Section::ColdWar.next(), Section::BestEveryYear);
    }

    #[test]
    fn test_section_all_has_nine_unique_slugs() {
        let mut slugs: Vec<&str> = Section::ALL.iter().map(|s| s.slug()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), 9);
    }
}
