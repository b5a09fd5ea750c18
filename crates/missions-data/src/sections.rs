//! Per-section report assembly.
//!
//! A [`SectionReport`] is the presentation-neutral output of one dashboard
//! section: an ordered list of [`Chart`]s, each carrying a title, a caption
//! and a [`ChartData`] payload. The terminal UI renders these and the JSON
//! export serializes them unchanged.

use std::collections::BTreeSet;

use missions_core::formatting::{format_money, format_money_compact, month_name, percentage, weekday_name};
use missions_core::models::{LaunchRecord, LaunchTable, MissionStatus, Section};
use serde::Serialize;
use tracing::debug;

use crate::views::{
    activity_span_by, average_per_event, count_by, distinct_count_by, leaders_per_period,
    mean_by, mean_success_rate, per_year_counts, restrict_to, sum_by, tally, top_k, GroupCount,
    PeriodLeader, RecordFilter,
};

/// Last year of the Cold War window.
pub const COLD_WAR_END: i32 = 1991;
/// First year of the India/USA comparison window.
pub const INDIA_COMPARISON_START: i32 = 1979;
/// Number of companies broken down year by year.
pub const TOP_COMPANIES: usize = 5;

// ── Report payloads ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Pre-formatted value for labels, e.g. `"$1.50M"`.
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub label: String,
    pub count: u64,
    pub percent: f64,
}

/// One named line of a [`ChartData::Series`] chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub name: String,
    /// `(x, y)` points, x ascending.
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyRow {
    /// Outermost level first, e.g. `[country, company, outcome]`.
    pub path: Vec<String>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeoRow {
    pub country: String,
    /// `None` when the country cannot be placed on a map.
    pub code: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// Chart payload, one variant per renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    Bars { bars: Vec<Bar> },
    Shares { shares: Vec<Share> },
    Series {
        x_label: String,
        y_label: String,
        lines: Vec<Line>,
    },
    Hierarchy {
        levels: Vec<String>,
        rows: Vec<HierarchyRow>,
    },
    Geo { rows: Vec<GeoRow> },
    Text {
        paragraphs: Vec<String>,
        links: Vec<Link>,
    },
    Records { rows: Vec<LaunchRecord> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub caption: String,
    pub data: ChartData,
}

impl Chart {
    fn new(title: impl Into<String>, caption: impl Into<String>, data: ChartData) -> Self {
        Self {
            title: title.into(),
            caption: caption.into(),
            data,
        }
    }

    /// Number of data points, used for empty-state rendering.
    pub fn len(&self) -> usize {
        match &self.data {
            ChartData::Bars { bars } => bars.len(),
            ChartData::Shares { shares } => shares.len(),
            ChartData::Series { lines, .. } => lines.iter().map(|l| l.points.len()).sum(),
            ChartData::Hierarchy { rows, .. } => rows.len(),
            ChartData::Geo { rows } => rows.len(),
            ChartData::Text { paragraphs, links } => paragraphs.len() + links.len(),
            ChartData::Records { rows } => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionReport {
    pub section: Section,
    pub title: String,
    pub charts: Vec<Chart>,
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Compute every view of `section` from the canonical table.
pub fn build_report(table: &LaunchTable, section: Section, reference_year: i32) -> SectionReport {
    let started = std::time::Instant::now();
    let charts = match section {
        Section::Home => home(table),
        Section::AboutData => about_data(table),
        Section::DatasetOverview => dataset_overview(table),
        Section::InterestingFactors => interesting_factors(table, reference_year),
        Section::ColdWar => cold_war(table),
        Section::BestEveryYear => best_every_year(table),
        Section::GeoAnalysis => geo_analysis(table),
        Section::IndiasPlace => indias_place(table),
        Section::Reference => reference(),
    };
    debug!(
        section = section.slug(),
        charts = charts.len(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "built section report"
    );
    SectionReport {
        section,
        title: section.title().to_string(),
        charts,
    }
}

/// Reports for all nine sections, in sidebar order.
pub fn build_all_reports(table: &LaunchTable, reference_year: i32) -> Vec<SectionReport> {
    Section::ALL
        .into_iter()
        .map(|s| build_report(table, s, reference_year))
        .collect()
}

/// Country label with Kazakhstan and the Russian Federation merged into USSR.
pub fn cold_war_bloc(r: &LaunchRecord) -> String {
    match r.country.as_str() {
        "Kazakhstan" | "Russian Federation" => "USSR".to_string(),
        other => other.to_string(),
    }
}

// ── Payload helpers ───────────────────────────────────────────────────────────

fn count_bars<K: ToString>(counts: &[GroupCount<K>]) -> ChartData {
    ChartData::Bars {
        bars: counts
            .iter()
            .map(|c| Bar {
                label: c.key.to_string(),
                value: c.count as f64,
                display: c.count.to_string(),
            })
            .collect(),
    }
}

fn shares<K: ToString>(counts: &[GroupCount<K>]) -> ChartData {
    let whole: u64 = counts.iter().map(|c| c.count).sum();
    ChartData::Shares {
        shares: counts
            .iter()
            .map(|c| Share {
                label: c.key.to_string(),
                count: c.count,
                percent: percentage(c.count as f64, whole as f64, 1),
            })
            .collect(),
    }
}

/// One line per key from `(year, key, value)` rows.
fn lines_by_key(rows: impl IntoIterator<Item = (i32, String, f64)>) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();
    for (year, key, value) in rows {
        match lines.iter().position(|l| l.name == key) {
            Some(i) => lines[i].points.push((year as f64, value)),
            None => lines.push(Line {
                name: key,
                points: vec![(year as f64, value)],
            }),
        }
    }
    for line in &mut lines {
        line.points.sort_by(|a, b| a.0.total_cmp(&b.0));
    }
    lines.sort_by(|a, b| a.name.cmp(&b.name));
    lines
}

fn per_year_series<'a, I, F>(records: I, key: F, y_label: &str) -> ChartData
where
    I: IntoIterator<Item = &'a LaunchRecord>,
    F: Fn(&LaunchRecord) -> String,
{
    ChartData::Series {
        x_label: "Year".to_string(),
        y_label: y_label.to_string(),
        lines: lines_by_key(
            per_year_counts(records, key)
                .into_iter()
                .map(|(y, k, n)| (y, k, n as f64)),
        ),
    }
}

fn leader_bars(leaders: &[PeriodLeader<String>]) -> ChartData {
    ChartData::Bars {
        bars: leaders
            .iter()
            .map(|l| Bar {
                label: format!("{} {}", l.year, l.key),
                value: l.count as f64,
                display: l.count.to_string(),
            })
            .collect(),
    }
}

fn text(paragraphs: &[&str]) -> ChartData {
    ChartData::Text {
        paragraphs: paragraphs.iter().map(|p| p.to_string()).collect(),
        links: Vec::new(),
    }
}

// ── Sections ──────────────────────────────────────────────────────────────────

fn home(table: &LaunchTable) -> Vec<Chart> {
    let companies: BTreeSet<&str> = table.iter().map(|r| r.company.as_str()).collect();
    let countries: BTreeSet<&str> = table.iter().map(|r| r.country.as_str()).collect();
    let span = match table.year_span() {
        Some((first, last)) => format!("from {first} to {last}"),
        None => "with no launch dates".to_string(),
    };
    let successes = table.iter().filter(|r| r.mission_status.is_success()).count();

    vec![Chart::new(
        "Space Missions Analysis",
        "Data analytics and visualization of every orbital launch attempt since Sputnik.",
        ChartData::Text {
            paragraphs: vec![
                format!("{} launch records {}.", table.len(), span),
                format!(
                    "{} companies launching from {} countries.",
                    companies.len(),
                    countries.len()
                ),
                format!(
                    "{} successful missions ({:.1}% of all launches).",
                    successes,
                    percentage(successes as f64, table.len() as f64, 1)
                ),
                "Pick a section from the sidebar to explore the data.".to_string(),
            ],
            links: Vec::new(),
        },
    )]
}

fn about_data(table: &LaunchTable) -> Vec<Chart> {
    vec![
        Chart::new(
            "About the Dataset",
            "",
            text(&[
                "The dataset records space missions launched around the world from 1957 onwards: \
                 launch date, operating company, launch site, rocket and payload, rocket status, \
                 rocket cost and mission outcome.",
                "It shows how participation in spaceflight has shifted between countries, how \
                 success rates evolved and how rocket technology and cost changed over time.",
            ]),
        ),
        Chart::new(
            "Data Frame",
            "Every cleaned launch record with its derived columns.",
            ChartData::Records {
                rows: table.records().to_vec(),
            },
        ),
        Chart::new(
            "Data Wrangling",
            "",
            text(&[
                "The two positional index columns are dropped; the remaining seven columns are \
                 mapped by position.",
                "Launch dates are parsed and split into year, month and weekday for grouping \
                 by period.",
                "The country is the last comma-separated part of the launch site, corrected by \
                 a small override table, and mapped to its ISO alpha-3 code where one exists.",
                "Rocket costs are stored in millions; missing values become zero and every \
                 value is multiplied by 1,000,000.",
            ]),
        ),
    ]
}

fn dataset_overview(table: &LaunchTable) -> Vec<Chart> {
    vec![
        Chart::new(
            "Number of Launches by Every Company",
            "Historical rivalry, commercial rocket programs and military payloads explain the \
             leaders.",
            count_bars(&count_by(table, |r| r.company.clone())),
        ),
        Chart::new(
            "Rocket Status",
            "Most rockets are retired: historically they were expendable, single-use vehicles.",
            shares(&count_by(table, |r| r.rocket_status.label().to_string())),
        ),
        Chart::new(
            "Mission Status Distribution",
            "The large majority of missions succeed.",
            count_bars(&count_by(table, |r| r.mission_status.label().to_string())),
        ),
    ]
}

fn interesting_factors(table: &LaunchTable, reference_year: i32) -> Vec<Chart> {
    let mut money: Vec<Bar> = sum_by(table, |r| r.company.clone(), |r| r.cost)
        .into_iter()
        .filter(|g| g.value > 0.0)
        .map(|g| Bar {
            display: format_money_compact(g.value),
            label: g.key,
            value: g.value,
        })
        .collect();
    money.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.label.cmp(&b.label)));

    let mut average: Vec<Bar> = average_per_event(table, |r| r.company.clone())
        .into_iter()
        .map(|a| Bar {
            display: format_money(a.average),
            label: a.key,
            value: a.average,
        })
        .collect();
    average.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.label.cmp(&b.label)));

    let by_year = ChartData::Series {
        x_label: "Year".to_string(),
        y_label: "Launches".to_string(),
        lines: vec![Line {
            name: "All launches".to_string(),
            points: tally(table, |r| r.year)
                .into_iter()
                .map(|(y, n)| (y as f64, n as f64))
                .collect(),
        }],
    };

    let calendar_bars = |counts: std::collections::BTreeMap<u32, u64>, name: fn(u32) -> &'static str| {
        ChartData::Bars {
            bars: counts
                .into_iter()
                .map(|(k, n)| Bar {
                    label: name(k).to_string(),
                    value: n as f64,
                    display: n.to_string(),
                })
                .collect(),
        }
    };

    let mut spans = activity_span_by(table, |r| r.company.clone());
    spans.sort_by(|a, b| a.last_year.cmp(&b.last_year).then_with(|| a.key.cmp(&b.key)));
    let since_last = ChartData::Bars {
        bars: spans
            .iter()
            .map(|s| {
                let years = s.years_since_last(reference_year);
                Bar {
                    label: format!("{} ({})", s.key, s.last_year),
                    value: years as f64,
                    display: years.to_string(),
                }
            })
            .collect(),
    };

    let priced: Vec<&LaunchRecord> = table.iter().filter(|r| r.cost > 0.0).collect();
    let money_by_year = ChartData::Series {
        x_label: "Year".to_string(),
        y_label: "Average cost ($)".to_string(),
        lines: vec![Line {
            name: "Average cost".to_string(),
            points: mean_by(priced.iter().copied(), |r| r.year, |r| r.cost)
                .into_iter()
                .map(|g| (g.key as f64, g.value))
                .collect(),
        }],
    };

    let experience = distinct_count_by(table, |r| r.company.clone(), |r| r.year);

    let top: Vec<String> = top_k(&count_by(table, |r| r.company.clone()), TOP_COMPANIES)
        .into_iter()
        .map(|c| c.key)
        .collect();
    let top_population = restrict_to(table, &top, |r| r.company.clone());
    let top_per_year = per_year_series(top_population.iter().copied(), |r| r.company.clone(), "Launches");

    let this_year = RecordFilter::new()
        .from_year(reference_year)
        .until_year(reference_year)
        .apply(table);
    let starts = count_by(this_year.iter().copied(), |r| r.company.clone());

    vec![
        Chart::new(
            "Total Money Spent by Company",
            "Only companies with a published rocket cost are shown.",
            ChartData::Bars { bars: money },
        ),
        Chart::new(
            "Average Money Spent per Launch",
            "Total cost divided by the number of launches.",
            ChartData::Bars { bars: average },
        ),
        Chart::new(
            "Missions Number by Year",
            "Launch activity peaked during the space race and climbed again with commercial \
             providers.",
            by_year,
        ),
        Chart::new(
            "Missions Number by Month",
            "There is no strong seasonal pattern.",
            calendar_bars(tally(table, |r| r.month), month_name),
        ),
        Chart::new(
            "Missions Number by Weekday",
            "Launch schedules are spread fairly evenly across the week.",
            calendar_bars(tally(table, |r| r.weekday), weekday_name),
        ),
        Chart::new(
            format!("Years Since Last Launch (as of {reference_year})"),
            "Older operators such as the US Navy have not launched in decades.",
            since_last,
        ),
        Chart::new(
            "Average Money Spent by Year",
            "Computed over launches with a published cost.",
            money_by_year,
        ),
        Chart::new(
            "Most Experienced Companies",
            "Number of distinct years with at least one launch.",
            count_bars(&experience),
        ),
        Chart::new(
            format!("Top {TOP_COMPANIES} Companies: Launches per Year"),
            "The companies with the most launches overall, year by year.",
            top_per_year,
        ),
        Chart::new(
            format!("Number of Starts for {reference_year}"),
            "Launches per company in the reference year.",
            count_bars(&starts),
        ),
    ]
}

fn cold_war(table: &LaunchTable) -> Vec<Chart> {
    let filter = RecordFilter::new()
        .until_year(COLD_WAR_END)
        .in_countries(["USSR", "USA"])
        .relabel_countries(cold_war_bloc);
    let cold = filter.apply(table);
    let failures: Vec<&LaunchRecord> = cold
        .iter()
        .copied()
        .filter(|r| r.mission_status == MissionStatus::Failure)
        .collect();

    let companies = ChartData::Series {
        x_label: "Year".to_string(),
        y_label: "Companies".to_string(),
        lines: lines_by_key(
            distinct_count_by(
                cold.iter().copied(),
                |r| (r.year, cold_war_bloc(r)),
                |r| r.company.clone(),
            )
            .into_iter()
            .map(|c| (c.key.0, c.key.1, c.count as f64)),
        ),
    };

    vec![
        Chart::new(
            "Number of Launches by Country",
            "Launches up to 1991, with Kazakhstan and the Russian Federation counted as USSR.",
            shares(&count_by(cold.iter().copied(), cold_war_bloc)),
        ),
        Chart::new(
            "USA vs USSR: Launches Year by Year",
            "The space race drove launch counts on both sides.",
            per_year_series(cold.iter().copied(), cold_war_bloc, "Launches"),
        ),
        Chart::new(
            "USA vs USSR: Number of Companies Year by Year",
            "Soviet spaceflight was concentrated in a few state operators.",
            companies,
        ),
        Chart::new(
            "USA vs USSR: Failures Year by Year",
            "Early American rockets failed more often while catching up.",
            per_year_series(failures.iter().copied(), cold_war_bloc, "Failures"),
        ),
    ]
}

fn best_every_year(table: &LaunchTable) -> Vec<Chart> {
    let successes = RecordFilter::new()
        .with_status(MissionStatus::Success)
        .apply(table);

    vec![
        Chart::new(
            "Leading Countries by Number of Launches",
            "Country with the most launches each year.",
            leader_bars(&leaders_per_period(table, |r| r.country.clone())),
        ),
        Chart::new(
            "Leading Countries by Successful Launches",
            "Country with the most successful launches each year.",
            leader_bars(&leaders_per_period(successes.iter().copied(), |r| r.country.clone())),
        ),
        Chart::new(
            "Leading Companies by Number of Launches",
            "Company with the most launches each year.",
            leader_bars(&leaders_per_period(table, |r| r.company.clone())),
        ),
        Chart::new(
            "Leading Companies by Successful Launches",
            "Company with the most successful launches each year.",
            leader_bars(&leaders_per_period(successes.iter().copied(), |r| r.company.clone())),
        ),
    ]
}

fn geo_rows<'a>(records: impl IntoIterator<Item = &'a LaunchRecord>) -> ChartData {
    let mut rows: Vec<GeoRow> = tally(records, |r| (r.country.clone(), r.country_code.clone()))
        .into_iter()
        .map(|((country, code), count)| GeoRow { country, code, count })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    ChartData::Geo { rows }
}

fn geo_analysis(table: &LaunchTable) -> Vec<Chart> {
    let hierarchy = tally(table, |r| {
        (
            r.country.clone(),
            r.company.clone(),
            r.mission_status.label().to_string(),
        )
    });
    let failures = RecordFilter::new()
        .with_status(MissionStatus::Failure)
        .apply(table);

    vec![
        Chart::new(
            "Country, Company and Mission Status",
            "Launches grouped by country, then company, then outcome.",
            ChartData::Hierarchy {
                levels: vec![
                    "Country".to_string(),
                    "Company".to_string(),
                    "Mission Status".to_string(),
                ],
                rows: hierarchy
                    .into_iter()
                    .map(|((country, company, status), count)| HierarchyRow {
                        path: vec![country, company, status],
                        count,
                    })
                    .collect(),
            },
        ),
        Chart::new(
            "Number of Launches",
            "Launches per country. Rows without a code cannot be mapped.",
            geo_rows(table),
        ),
        Chart::new(
            "Number of Failures",
            "Failed launches per country.",
            geo_rows(failures.iter().copied()),
        ),
    ]
}

fn indias_place(table: &LaunchTable) -> Vec<Chart> {
    let compare = RecordFilter::new()
        .from_year(INDIA_COMPARISON_START)
        .in_countries(["India", "USA"])
        .apply(table);

    let rates = mean_success_rate(compare.iter().copied(), |r| r.country.clone());
    let mean_bars = ChartData::Bars {
        bars: rates
            .iter()
            .map(|s| Bar {
                label: s.group.clone(),
                value: s.mean_percent,
                display: format!("{:.1}%", s.mean_percent),
            })
            .collect(),
    };
    let yearly = ChartData::Series {
        x_label: "Year".to_string(),
        y_label: "Success %".to_string(),
        lines: rates
            .iter()
            .map(|s| Line {
                name: s.group.clone(),
                points: s
                    .periods
                    .iter()
                    .map(|p| (p.year as f64, p.percent))
                    .collect(),
            })
            .collect(),
    };

    vec![
        Chart::new(
            "Number of Launches",
            "India and USA from 1979, the year of India's first orbital launch attempt.",
            shares(&count_by(compare.iter().copied(), |r| r.country.clone())),
        ),
        Chart::new(
            "USA vs India: Launches Year by Year",
            "The US has far more launch sites and a head start of two decades.",
            per_year_series(compare.iter().copied(), |r| r.country.clone(), "Launches"),
        ),
        Chart::new(
            "USA vs India: Success Percentage Year by Year",
            "Share of successful launches in each year.",
            yearly,
        ),
        Chart::new(
            "Mean Success Percentage",
            "Average of the yearly success percentages.",
            mean_bars,
        ),
    ]
}

fn reference() -> Vec<Chart> {
    let links = [
        (
            "Arianespace successful launch",
            "https://www.arianespace.com/press-release/ariane-5-successful-launch-webb-space-telescope/",
        ),
        ("China space launch", "https://chinapower.csis.org/china-space-launch/"),
        (
            "Soviet Union lost the space race",
            "https://escholarship.org/content/qt0kj1q52j/qt0kj1q52j_noSplash_c9b2ab6f54dac13b34007979f3a8dd95.pdf?t=prfwji",
        ),
        (
            "The post Cold War issues",
            "https://www.forbes.com/sites/startswithabang/2019/07/11/this-is-why-the-soviet-union-lost-the-space-race-to-the-usa/?sh=61cad0141925",
        ),
        ("NASA website", "https://www.nasa.gov/sites/default/files/files/SEINSI.pdf"),
    ];
    vec![Chart::new(
        "Reference",
        "",
        ChartData::Text {
            paragraphs: Vec::new(),
            links: links
                .iter()
                .map(|(label, url)| Link {
                    label: label.to_string(),
                    url: url.to_string(),
                })
                .collect(),
        },
    )]
}
