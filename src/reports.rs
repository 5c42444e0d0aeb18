//! Grouping of the derived record set for the reporting and mapping
//! surfaces. All grouping keys are the *cleaned* fields; raw text never
//! reaches an aggregation.

use crate::types::{
    AgencyCountRow, AgencyPerformanceRow, BoardCard, CategoryCountRow, Complaint,
    DistrictCountRow, Status, SummaryStats, Tier, TrendRow,
};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Label of the synthetic bucket that absorbs everything past `top_n`.
pub const OTHER_LABEL: &str = "Lainnya";

fn counts_desc<'a, I>(keys: I) -> Vec<(String, usize)>
where
    I: Iterator<Item = &'a str>,
{
    let mut map: HashMap<&str, usize> = HashMap::new();
    for k in keys {
        *map.entry(k).or_insert(0) += 1;
    }
    let mut pairs: Vec<(String, usize)> = map
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    // Count descending, name ascending for a stable, reproducible order.
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    pairs
}

/// Fold everything past `top_n` into one exact-sum "Lainnya" row. The
/// bucket only appears when there is a remainder, so the output has
/// `min(distinct, top_n + 1)` rows.
fn fold_top_n(mut pairs: Vec<(String, usize)>, top_n: usize) -> Vec<(String, usize)> {
    if pairs.len() <= top_n {
        return pairs;
    }
    let rest: usize = pairs[top_n..].iter().map(|(_, c)| c).sum();
    pairs.truncate(top_n);
    pairs.push((OTHER_LABEL.to_string(), rest));
    pairs
}

/// Complaint count per district, count descending. Every record counts:
/// unmatched districts carry the "Unknown" sentinel, so the column sum
/// equals the record count.
pub fn by_district(records: &[Complaint]) -> Vec<DistrictCountRow> {
    counts_desc(records.iter().map(|r| r.district_clean.as_str()))
        .into_iter()
        .map(|(district, count)| DistrictCountRow { district, count })
        .collect()
}

/// Top `top_n` categories plus the "Lainnya" remainder bucket.
pub fn by_category(records: &[Complaint], top_n: usize) -> Vec<CategoryCountRow> {
    fold_top_n(
        counts_desc(records.iter().map(|r| r.category_clean.as_str())),
        top_n,
    )
    .into_iter()
    .map(|(category, count)| CategoryCountRow { category, count })
    .collect()
}

/// Top `top_n` destination agencies plus the "Lainnya" remainder bucket.
pub fn by_agency(records: &[Complaint], top_n: usize) -> Vec<AgencyCountRow> {
    fold_top_n(
        counts_desc(records.iter().map(|r| r.agency_clean.as_str())),
        top_n,
    )
    .into_iter()
    .map(|(agency, count)| AgencyCountRow { agency, count })
    .collect()
}

/// Monthly intake trend over "YYYY-MM" buckets, ascending. Records without
/// a parseable submission date are excluded here (and only here).
pub fn trend_by_month(records: &[Complaint]) -> Vec<TrendRow> {
    let mut map: BTreeMap<&str, usize> = BTreeMap::new();
    for r in records {
        if let Some(month) = r.month_bucket.as_deref() {
            *map.entry(month).or_insert(0) += 1;
        }
    }
    map.into_iter()
        .map(|(month, count)| TrendRow {
            month: month.to_string(),
            count,
        })
        .collect()
}

/// Per-agency workload: total complaints, resolved count and resolution
/// rate, busiest agency first.
pub fn agency_performance(records: &[Complaint]) -> Vec<AgencyPerformanceRow> {
    #[derive(Default)]
    struct Acc {
        total: usize,
        resolved: usize,
    }
    let mut map: HashMap<&str, Acc> = HashMap::new();
    for r in records {
        let e = map.entry(r.agency_clean.as_str()).or_default();
        e.total += 1;
        if r.status == Status::Resolved {
            e.resolved += 1;
        }
    }
    let mut rows: Vec<AgencyPerformanceRow> = map
        .into_iter()
        .map(|(agency, acc)| {
            let rate = if acc.total == 0 {
                0.0
            } else {
                acc.resolved as f64 / acc.total as f64 * 100.0
            };
            AgencyPerformanceRow {
                agency: agency.to_string(),
                total: acc.total,
                resolved: acc.resolved,
                rate: format!("{:.1}%", rate),
            }
        })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.agency.cmp(&b.agency)));
    rows
}

/// One column of the priority board: unresolved complaints of one tier,
/// highest score first, truncated to `limit` cards.
pub fn board_column(records: &[Complaint], tier: Tier, limit: usize) -> Vec<BoardCard> {
    let mut open: Vec<&Complaint> = records
        .iter()
        .filter(|r| r.status != Status::Resolved && r.tier == tier)
        .collect();
    open.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    open.into_iter()
        .take(limit)
        .map(|r| BoardCard {
            id: r.id.clone(),
            district: r.district_clean.clone(),
            score: r.score.round() as u32,
            time_status: r.time_status.to_string(),
            snippet: snippet(&r.body_text, 70),
        })
        .collect()
}

fn snippet(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

/// Headline numbers for the JSON summary artifact.
pub fn summary(records: &[Complaint]) -> SummaryStats {
    let total = records.len();
    let resolved = records.iter().filter(|r| r.status == Status::Resolved).count();
    let districts: HashSet<&str> = records.iter().map(|r| r.district_clean.as_str()).collect();
    let critical_open = records
        .iter()
        .filter(|r| r.status != Status::Resolved && r.tier == Tier::Critical)
        .count();
    let rate = if total == 0 {
        0.0
    } else {
        resolved as f64 / total as f64 * 100.0
    };
    SummaryStats {
        total_complaints: total,
        resolved,
        resolution_rate_pct: (rate * 10.0).round() / 10.0,
        distinct_districts: districts.len(),
        critical_open,
    }
}
