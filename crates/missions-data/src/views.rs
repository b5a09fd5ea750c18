//! Generic aggregation views over the canonical table.
//!
//! Every function here borrows records, never mutates them, and returns a
//! small owned result. Keys are produced by caller-supplied closures so the
//! same view works for company, country, status, year or tuple keys.

use std::collections::{BTreeMap, BTreeSet};

use missions_core::models::{LaunchRecord, LaunchTable, MissionStatus};
use serde::Serialize;

// ── Result rows ───────────────────────────────────────────────────────────────

/// Number of records sharing a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount<K> {
    pub key: K,
    pub count: u64,
}

/// A floating-point metric per key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupValue<K> {
    pub key: K,
    pub value: f64,
}

/// Earliest and latest launch year of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivitySpan<K> {
    pub key: K,
    pub first_year: i32,
    pub last_year: i32,
    pub launches: u64,
}

impl<K> ActivitySpan<K> {
    /// Years between the group's latest launch and `reference_year`.
    pub fn years_since_last(&self, reference_year: i32) -> i32 {
        reference_year - self.last_year
    }
}

/// The single highest-count key for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodLeader<K> {
    pub year: i32,
    pub key: K,
    pub count: u64,
}

/// Total cost, launch count and their ratio for one key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageCost<K> {
    pub key: K,
    pub total: f64,
    pub launches: u64,
    pub average: f64,
}

/// Success percentage of one group in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodRate {
    pub year: i32,
    pub total: u64,
    pub successes: u64,
    pub percent: f64,
}

/// Per-year success percentages of one group and their mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessRate {
    pub group: String,
    pub periods: Vec<PeriodRate>,
    pub mean_percent: f64,
}

// ── RecordFilter ──────────────────────────────────────────────────────────────

/// Country label used by a filter, after any relabelling.
pub type CountryLabeler = fn(&LaunchRecord) -> String;

fn plain_country(r: &LaunchRecord) -> String {
    r.country.clone()
}

/// Optional restrictions applied before a view runs.
#[derive(Debug, Clone)]
pub struct RecordFilter {
    /// Inclusive lower year bound.
    pub min_year: Option<i32>,
    /// Inclusive upper year bound.
    pub max_year: Option<i32>,
    pub mission_status: Option<MissionStatus>,
    /// Allowed country labels, compared against `country_label(record)`.
    pub countries: Option<BTreeSet<String>>,
    pub country_label: CountryLabeler,
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self {
            min_year: None,
            max_year: None,
            mission_status: None,
            countries: None,
            country_label: plain_country,
        }
    }
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_year(mut self, year: i32) -> Self {
        self.min_year = Some(year);
        self
    }

    pub fn until_year(mut self, year: i32) -> Self {
        self.max_year = Some(year);
        self
    }

    pub fn with_status(mut self, status: MissionStatus) -> Self {
        self.mission_status = Some(status);
        self
    }

    pub fn in_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = Some(countries.into_iter().map(Into::into).collect());
        self
    }

    pub fn relabel_countries(mut self, labeler: CountryLabeler) -> Self {
        self.country_label = labeler;
        self
    }

    pub fn matches(&self, r: &LaunchRecord) -> bool {
        if self.min_year.is_some_and(|y| r.year < y) {
            return false;
        }
        if self.max_year.is_some_and(|y| r.year > y) {
            return false;
        }
        if let Some(status) = &self.mission_status {
            if &r.mission_status != status {
                return false;
            }
        }
        if let Some(allowed) = &self.countries {
            if !allowed.contains(&(self.country_label)(r)) {
                return false;
            }
        }
        true
    }

    /// Borrow the matching records of `table`, in table order.
    pub fn apply<'a>(&self, table: &'a LaunchTable) -> Vec<&'a LaunchRecord> {
        table.iter().filter(|r| self.matches(r)).collect()
    }
}

// ── Counting ──────────────────────────────────────────────────────────────────

/// Count records per key, in key order.
pub fn tally<'a, I, K, F>(records: I, key: F) -> BTreeMap<K, u64>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
    K: Ord,
    F: Fn(&LaunchRecord) -> K,
{
    let mut map = BTreeMap::new();
    for r in records {
        *map.entry(key(r)).or_insert(0) += 1;
    }
    map
}

/// Count records per key, most frequent first; ties ascending by key.
pub fn count_by<'a, I, K, F>(records: I, key: F) -> Vec<GroupCount<K>>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
    K: Ord,
    F: Fn(&LaunchRecord) -> K,
{
    sort_desc(
        tally(records, key)
            .into_iter()
            .map(|(key, count)| GroupCount { key, count })
            .collect(),
    )
}

/// Number of distinct `value`s per key, most first; ties ascending by key.
pub fn distinct_count_by<'a, I, K, V, F, G>(records: I, key: F, value: G) -> Vec<GroupCount<K>>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
    K: Ord,
    V: Ord,
    F: Fn(&LaunchRecord) -> K,
    G: Fn(&LaunchRecord) -> V,
{
    let mut sets: BTreeMap<K, BTreeSet<V>> = BTreeMap::new();
    for r in records {
        sets.entry(key(r)).or_default().insert(value(r));
    }
    sort_desc(
        sets.into_iter()
            .map(|(key, set)| GroupCount {
                key,
                count: set.len() as u64,
            })
            .collect(),
    )
}

/// Stable sort by count descending. Input in key order keeps ties by key.
fn sort_desc<K>(mut rows: Vec<GroupCount<K>>) -> Vec<GroupCount<K>> {
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

// ── Top-K ─────────────────────────────────────────────────────────────────────

/// The `k` highest-count groups; ties broken ascending by key.
pub fn top_k<K: Ord + Clone>(counts: &[GroupCount<K>], k: usize) -> Vec<GroupCount<K>> {
    let mut rows = counts.to_vec();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    rows.truncate(k);
    rows
}

/// Keep only the records whose key is one of `keys`.
pub fn restrict_to<'a, I, K, F>(records: I, keys: &[K], key: F) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
    K: PartialEq,
    F: Fn(&LaunchRecord) -> K,
{
    records
        .into_iter()
        .filter(|r| keys.contains(&key(r)))
        .collect()
}

// ── Sums and means ────────────────────────────────────────────────────────────

/// Sum of `value` per key, in key order.
pub fn sum_by<'a, I, K, F, G>(records: I, key: F, value: G) -> Vec<GroupValue<K>>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
    K: Ord,
    F: Fn(&LaunchRecord) -> K,
    G: Fn(&LaunchRecord) -> f64,
{
    let mut map: BTreeMap<K, f64> = BTreeMap::new();
    for r in records {
        *map.entry(key(r)).or_insert(0.0) += value(r);
    }
    map.into_iter()
        .map(|(key, value)| GroupValue { key, value })
        .collect()
}

/// Mean of `value` per key, in key order.
pub fn mean_by<'a, I, K, F, G>(records: I, key: F, value: G) -> Vec<GroupValue<K>>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
    K: Ord,
    F: Fn(&LaunchRecord) -> K,
    G: Fn(&LaunchRecord) -> f64,
{
    let mut map: BTreeMap<K, (f64, u64)> = BTreeMap::new();
    for r in records {
        let slot = map.entry(key(r)).or_insert((0.0, 0));
        slot.0 += value(r);
        slot.1 += 1;
    }
    map.into_iter()
        .map(|(key, (sum, n))| GroupValue {
            key,
            value: if n == 0 { 0.0 } else { sum / n as f64 },
        })
        .collect()
}

/// Join per-key total cost with per-key launch count and divide.
/// Groups whose average is not positive are dropped. Key order.
pub fn average_per_event<'a, I, K, F>(records: I, key: F) -> Vec<AverageCost<K>>
where
    I: IntoIterator<Item = &'a LaunchRecord> + Clone,
    K: Ord + Clone,
    F: Fn(&LaunchRecord) -> K,
{
    let totals = sum_by(records.clone(), &key, |r| r.cost);
    let counts = tally(records, &key);

    totals
        .into_iter()
        .filter_map(|GroupValue { key, value: total }| {
            let launches = counts.get(&key).copied().unwrap_or(0);
            if launches == 0 {
                return None;
            }
            let average = total / launches as f64;
            (average > 0.0).then_some(AverageCost {
                key,
                total,
                launches,
                average,
            })
        })
        .collect()
}

// ── Occurrence spans ──────────────────────────────────────────────────────────

/// First and last launch year per key, in key order.
pub fn activity_span_by<'a, I, K, F>(records: I, key: F) -> Vec<ActivitySpan<K>>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
    K: Ord,
    F: Fn(&LaunchRecord) -> K,
{
    let mut map: BTreeMap<K, (i32, i32, u64)> = BTreeMap::new();
    for r in records {
        let slot = map.entry(key(r)).or_insert((r.year, r.year, 0));
        slot.0 = slot.0.min(r.year);
        slot.1 = slot.1.max(r.year);
        slot.2 += 1;
    }
    map.into_iter()
        .map(|(key, (first_year, last_year, launches))| ActivitySpan {
            key,
            first_year,
            last_year,
            launches,
        })
        .collect()
}

// ── Per-period breakdowns ─────────────────────────────────────────────────────

/// Count per `(year, key)`, year ascending then key ascending.
pub fn per_year_counts<'a, I, K, F>(records: I, key: F) -> Vec<(i32, K, u64)>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
    K: Ord,
    F: Fn(&LaunchRecord) -> K,
{
    tally(records, |r| (r.year, key(r)))
        .into_iter()
        .map(|((year, k), n)| (year, k, n))
        .collect()
}

/// For each year, the key with the most records. Ties go to the
/// lexicographically smallest key.
pub fn leaders_per_period<'a, I, K, F>(records: I, key: F) -> Vec<PeriodLeader<K>>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
    K: Ord,
    F: Fn(&LaunchRecord) -> K,
{
    let mut leaders: BTreeMap<i32, PeriodLeader<K>> = BTreeMap::new();
    // Iteration is in (year, key) order, so a strictly-greater test keeps the
    // smallest key among equals.
    for ((year, k), count) in tally(records, |r| (r.year, key(r))) {
        let replace = leaders.get(&year).map_or(true, |current| count > current.count);
        if replace {
            leaders.insert(year, PeriodLeader { year, key: k, count });
        }
    }
    leaders.into_values().collect()
}

/// Per-group mean of yearly success percentages.
///
/// Yearly totals and yearly successes are grouped independently and
/// outer-joined on `(year, group)`; a missing success count is zero.
/// Groups are returned in key order.
pub fn mean_success_rate<'a, I, F>(records: I, group: F) -> Vec<SuccessRate>
where
    I: IntoIterator<Item = &'a LaunchRecord> + Clone,
    F: Fn(&LaunchRecord) -> String,
{
    let totals = tally(records.clone(), |r| (r.year, group(r)));
    let successes = tally(
        records.into_iter().filter(|r| r.mission_status.is_success()),
        |r| (r.year, group(r)),
    );

    let keys: BTreeSet<&(i32, String)> = totals.keys().chain(successes.keys()).collect();

    let mut by_group: BTreeMap<String, Vec<PeriodRate>> = BTreeMap::new();
    for key in keys {
        let total = totals.get(key).copied().unwrap_or(0);
        let ok = successes.get(key).copied().unwrap_or(0);
        let percent = if total == 0 {
            0.0
        } else {
            ok as f64 / total as f64 * 100.0
        };
        by_group.entry(key.1.clone()).or_default().push(PeriodRate {
            year: key.0,
            total,
            successes: ok,
            percent,
        });
    }

    by_group
        .into_iter()
        .map(|(group, periods)| {
            let mean_percent = if periods.is_empty() {
                0.0
            } else {
                periods.iter().map(|p| p.percent).sum::<f64>() / periods.len() as f64
            };
            SuccessRate {
                group,
                periods,
                mean_percent,
            }
        })
        .collect()
}
