use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::error::{MissionsError, Result};
use crate::models::Section;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "dataset/Space_Corrected.csv";

/// Last year covered by the dataset; anchor for "years since" views.
pub const DEFAULT_REFERENCE_YEAR: i32 = 2020;

/// Accepted `--reference-year` values, from the first orbital launch on.
pub const REFERENCE_YEARS: RangeInclusive<i32> = 1957..=2100;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive analysis of historical space launches
#[derive(Parser, Debug, Clone)]
#[command(
    name = "space-missions",
    about = "Interactive analysis of historical space launches",
    version
)]
pub struct Settings {
    /// Path to the launch CSV
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Section to open (or export); "all" exports every section
    #[arg(long, default_value = "home")]
    pub section: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Year used for "years since last launch" and "launches this year"
    #[arg(long, default_value_t = DEFAULT_REFERENCE_YEAR, value_parser = clap::value_parser!(i32).range(i64::from(*REFERENCE_YEARS.start())..=i64::from(*REFERENCE_YEARS.end())))]
    pub reference_year: i32,

    /// Print the section report as JSON instead of starting the dashboard
    #[arg(long)]
    pub export: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

/// What `--section` asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionChoice {
    One(Section),
    All,
}

impl Settings {
    /// Resolve `--section` into a [`SectionChoice`].
    pub fn section_choice(&self) -> Result<SectionChoice> {
        if self.section.eq_ignore_ascii_case("all") {
            return Ok(SectionChoice::All);
        }
        Section::from_name(&self.section).map(SectionChoice::One)
    }

    /// The section the dashboard opens on; `"all"` opens on Home.
    pub fn initial_section(&self) -> Result<Section> {
        Ok(match self.section_choice()? {
            SectionChoice::One(s) => s,
            SectionChoice::All => Section::Home,
        })
    }

    /// Reject combinations clap cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.section_choice()? == SectionChoice::All && !self.export {
            return Err(MissionsError::Config(
                "--section all is only valid together with --export".to_string(),
            ));
        }
        if !REFERENCE_YEARS.contains(&self.reference_year) {
            return Err(MissionsError::Config(format!(
                "reference year {} out of range {}-{}",
                self.reference_year,
                REFERENCE_YEARS.start(),
                REFERENCE_YEARS.end()
            )));
        }
        Ok(())
    }
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.space-missions/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_year: Option<i32>,
}

impl LastUsedParams {
    /// `~/.space-missions/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".space-missions").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> std::result::Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> std::result::Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation; accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!("could not clear {}: {}", config_path.display(), e);
            }
            return Self::apply_debug(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins. Export runs never pick up or persist the section.
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "section") && !settings.export {
            if let Some(v) = last.section {
                settings.section = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "data_file") {
            if let Some(v) = last.data_file {
                settings.data_file = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "reference_year") {
            if let Some(v) = last.reference_year {
                settings.reference_year = v;
            }
        }

        settings = Self::apply_debug(settings);

        if !settings.export {
            let params = LastUsedParams::from(&settings);
            if let Err(e) = params.save_to(config_path) {
                tracing::warn!("could not save {}: {}", config_path.display(), e);
            }
        }

        settings
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            section: Some(s.section.clone()),
            data_file: Some(s.data_file.clone()),
            reference_year: Some(s.reference_year),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line.
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["space-missions"]);
        assert_eq!(settings.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(settings.section, "home");
        assert_eq!(settings.theme, "auto");
        assert_eq!(settings.reference_year, 2020);
        assert_eq!(settings.log_level, "INFO");
        assert!(!settings.export);
        assert!(!settings.debug);
        assert!(!settings.clear);
    }

    #[test]
    fn test_last_used_params_save_load() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());
        let params = LastUsedParams {
            theme: Some("dark".to_string()),
            section: Some("cold-war".to_string()),
            data_file: Some(PathBuf::from("/data/launches.csv")),
            reference_year: Some(2019),
        };
        params.save_to(&path).expect("save");

        let loaded = LastUsedParams::load_from(&path);
        assert_eq!(loaded.theme.as_deref(), Some("dark"));
        assert_eq!(loaded.section.as_deref(), Some("cold-war"));
        assert_eq!(loaded.data_file, Some(PathBuf::from("/data/launches.csv")));
        assert_eq!(loaded.reference_year, Some(2019));
    }

    #[test]
    fn test_last_used_params_default_when_missing() {
        let tmp = TempDir::new().expect("tempdir");
        let loaded = LastUsedParams::load_from(&LastUsedParams::config_path_in(tmp.path()));
        assert!(loaded.theme.is_none());
        assert!(loaded.section.is_none());
        assert!(loaded.data_file.is_none());
    }

    #[test]
    fn test_last_used_params_clear() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());
        LastUsedParams::default().save_to(&path).expect("save");
        assert!(path.exists());
        LastUsedParams::clear_at(&path).expect("clear");
        assert!(!path.exists());
    }

    #[test]
    fn test_last_used_fills_unset_args() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());
        LastUsedParams {
            theme: Some("light".to_string()),
            section: Some("geo-analysis".to_string()),
            ..Default::default()
        }
        .save_to(&path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(args(&["space-missions"]), &path);
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.section, "geo-analysis");
    }

    #[test]
    fn test_cli_wins_over_last_used() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());
        LastUsedParams {
            theme: Some("light".to_string()),
            ..Default::default()
        }
        .save_to(&path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(
            args(&["space-missions", "--theme", "classic"]),
            &path,
        );
        assert_eq!(settings.theme, "classic");
        assert_eq!(
            LastUsedParams::load_from(&path).theme.as_deref(),
            Some("classic")
        );
    }

    #[test]
    fn test_export_does_not_persist() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());
        let _ = Settings::load_with_last_used_impl(
            args(&["space-missions", "--export", "--section", "all"]),
            &path,
        );
        assert!(!path.exists());
    }

    #[test]
    fn test_debug_flag_forces_debug_level() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());
        let settings =
            Settings::load_with_last_used_impl(args(&["space-missions", "--debug"]), &path);
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_section_choice() {
        let s = Settings::parse_from(["space-missions", "--section", "best-every-year"]);
        assert_eq!(
            s.section_choice().unwrap(),
            SectionChoice::One(Section::BestEveryYear)
        );
        let s = Settings::parse_from(["space-missions", "--section", "ALL", "--export"]);
        assert_eq!(s.section_choice().unwrap(), SectionChoice::All);
        assert_eq!(s.initial_section().unwrap(), Section::Home);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_all_without_export() {
        let s = Settings::parse_from(["space-missions", "--section", "all"]);
        assert!(matches!(s.validate(), Err(MissionsError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_reference_year_out_of_range() {
        let mut s = Settings::parse_from(["space-missions", "--reference-year", "1990"]);
        assert!(s.validate().is_ok());

        // A saved last-used value bypasses the clap parser.
        s.reference_year = 1920;
        assert!(matches!(s.validate(), Err(MissionsError::Config(_))));
    }

    #[test]
    fn test_cli_rejects_reference_year_out_of_range() {
        assert!(Settings::try_parse_from(["space-missions", "--reference-year", "20"]).is_err());
        assert!(Settings::try_parse_from(["space-missions", "--reference-year", "1957"]).is_ok());
    }

    #[test]
    fn test_last_used_reference_year_is_validated() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());
        LastUsedParams {
            reference_year: Some(1920),
            ..Default::default()
        }
        .save_to(&path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(args(&["space-missions"]), &path);
        assert_eq!(settings.reference_year, 1920);
        assert!(matches!(settings.validate(), Err(MissionsError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_section() {
        let s = Settings::parse_from(["space-missions", "--section", "mars"]);
        assert!(matches!(s.validate(), Err(MissionsError::UnknownSection(_))));
    }
}
