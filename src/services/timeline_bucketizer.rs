use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::stage::Stage;
use crate::services::timeline_types::StageTimelineEntry;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Week,
    Month,
    Quarter,
    Stage,
}

impl Granularity {
    /// Cursor step used to walk a stage's span; `None` for stage buckets.
    fn step(self) -> Option<Duration> {
        match self {
            Granularity::Week => Some(Duration::days(7)),
            Granularity::Month => Some(Duration::days(30)),
            Granularity::Quarter => Some(Duration::days(90)),
            Granularity::Stage => None,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Stage => "stage",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum BucketKey {
    Week(NaiveDate),
    Month { year: i32, month: u32 },
    Quarter { year: i32, quarter: u32 },
    Stage { stage: Stage, service_line: String },
}

impl BucketKey {
    fn for_date(granularity: Granularity, date: NaiveDate) -> Option<BucketKey> {
        match granularity {
            Granularity::Week => Some(BucketKey::Week(date)),
            Granularity::Month => Some(BucketKey::Month {
                year: date.year(),
                month: date.month(),
            }),
            Granularity::Quarter => Some(BucketKey::Quarter {
                year: date.year(),
                quarter: date.month0() / 3 + 1,
            }),
            Granularity::Stage => None,
        }
    }

    /// Sortable, machine-friendly period identifier.
    pub fn period(&self) -> String {
        match self {
            BucketKey::Week(date) => date.format("%Y-%m-%d").to_string(),
            BucketKey::Month { year, month } => format!("{year:04}-{month:02}"),
            BucketKey::Quarter { year, quarter } => format!("{year:04}-Q{quarter}"),
            BucketKey::Stage {
                stage,
                service_line,
            } => format!("{stage}/{service_line}"),
        }
    }

    pub fn label(&self) -> String {
        match self {
            BucketKey::Week(date) => format!("Week of {}", date.format("%d %b %Y")),
            BucketKey::Month { year, month } => {
                let name = MONTH_NAMES
                    .get(month.saturating_sub(1) as usize)
                    .copied()
                    .unwrap_or("???");
                format!("{name} {year}")
            }
            BucketKey::Quarter { year, quarter } => format!("Q{quarter} {year}"),
            BucketKey::Stage { stage, .. } => stage.name(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TimelineBucket {
    pub period: String,
    pub label: String,
    /// FTE per service line; every service line of the series is present.
    pub values: BTreeMap<String, f64>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BucketSeries {
    pub granularity: Granularity,
    pub service_lines: Vec<String>,
    pub buckets: Vec<TimelineBucket>,
}

/// Re-partitions stage entries into buckets of the requested granularity.
///
/// A stage spans `[stage_start_date, stage_end_date)`: its end date never
/// counts toward a bucket.
///
/// Time buckets carry concurrent FTE load: an entry adds its full
/// `fte_required` to every bucket its span touches, once per bucket. Bucket
/// values are therefore peaks of concurrent staffing and do not sum to
/// `total_effort_weeks`.
///
/// Stage buckets hold one bucket per (stage, service line) pair. Every
/// bucket in the result carries a value for every service line that occurs
/// in `entries`, zero where the line contributes nothing.
pub fn bucketize(entries: &[StageTimelineEntry], granularity: Granularity) -> BucketSeries {
    let service_lines = service_lines_in_order(entries);
    let mut accumulated: BTreeMap<BucketKey, ServiceLineValues> = BTreeMap::new();

    match granularity.step() {
        Some(step) => {
            for entry in entries {
                for key in touched_keys(entry, granularity, step) {
                    add_to_bucket(&mut accumulated, key, &entry.service_line, entry.fte_required);
                }
            }
        }
        None => {
            for entry in entries {
                let key = BucketKey::Stage {
                    stage: entry.stage,
                    service_line: entry.service_line.clone(),
                };
                add_to_bucket(&mut accumulated, key, &entry.service_line, entry.fte_required);
            }
        }
    }

    let buckets = accumulated
        .into_iter()
        .map(|(key, mut values)| {
            for service_line in &service_lines {
                values.entry(service_line.clone()).or_insert(0.0);
            }
            TimelineBucket {
                period: key.period(),
                label: key.label(),
                values,
            }
        })
        .collect();

    BucketSeries {
        granularity,
        service_lines,
        buckets,
    }
}

type ServiceLineValues = BTreeMap<String, f64>;

fn add_to_bucket(
    accumulated: &mut BTreeMap<BucketKey, ServiceLineValues>,
    key: BucketKey,
    service_line: &str,
    fte: f64,
) {
    *accumulated
        .entry(key)
        .or_default()
        .entry(service_line.to_string())
        .or_insert(0.0) += fte;
}

/// Keys visited by stepping a cursor over `[start, end)`.
fn touched_keys(
    entry: &StageTimelineEntry,
    granularity: Granularity,
    step: Duration,
) -> BTreeSet<BucketKey> {
    let mut keys = BTreeSet::new();
    let mut cursor = entry.stage_start_date;
    while cursor < entry.stage_end_date {
        if let Some(key) = BucketKey::for_date(granularity, cursor) {
            keys.insert(key);
        }
        cursor += step;
    }
    keys
}

fn service_lines_in_order(entries: &[StageTimelineEntry]) -> Vec<String> {
    let mut service_lines: Vec<String> = Vec::new();
    for entry in entries {
        if !service_lines.contains(&entry.service_line) {
            service_lines.push(entry.service_line.clone());
        }
    }
    service_lines
}
