//! Keyword-heuristic priority scoring and SLA time status.
//!
//! The scorer is a pure function of (text, submission time, status, now):
//! the batch snapshot `now` is injected by the caller and taken once per
//! load, so a whole batch is internally consistent and reproducible.

use crate::types::{Status, Tier, TimeStatus};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All tunables of the priority scorer in one place. Earlier dashboard
/// variants drifted between 40/15 and 50/20 tier cutpoints and 0.05 vs 0.1
/// elapsed rates; this configuration fixes one canonical set (50/20, 0.1)
/// and everything else reads from here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScorerConfig {
    /// Incident terms: a single occurrence anywhere in the text adds the
    /// full weight once.
    pub critical_keywords: BTreeMap<String, u32>,
    /// Quality-of-service complaint terms, lower weights.
    pub complaint_keywords: BTreeMap<String, u32>,
    /// Score at or above which a complaint is CRITICAL.
    pub tier_critical: f64,
    /// Score at or above which a complaint is WARNING.
    pub tier_warning: f64,
    /// Days allowed to resolve a complaint before it counts as overdue.
    pub sla_days: i64,
    /// Score added per elapsed day while unresolved.
    pub elapsed_rate: f64,
    /// Flat score added once the SLA window is blown.
    pub overdue_bonus: f64,
    /// `days_remaining` at or below which an open complaint is NearDue.
    pub near_due_days: i64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        let critical = [
            ("banjir", 30),
            ("kebakaran", 40),
            ("longsor", 40),
            ("kecelakaan", 35),
            ("meninggal", 50),
            ("korban", 40),
            ("darurat", 30),
            ("tewas", 50),
        ];
        let complaint = [
            ("parah", 10),
            ("kecewa", 10),
            ("lambat", 5),
            ("rusak", 10),
            ("bau", 10),
            ("macet", 10),
            ("sampah", 10),
            ("pungli", 20),
        ];
        ScorerConfig {
            critical_keywords: critical
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            complaint_keywords: complaint
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            tier_critical: 50.0,
            tier_warning: 20.0,
            sla_days: 5,
            elapsed_rate: 0.1,
            overdue_bonus: 50.0,
            near_due_days: 2,
        }
    }
}

impl ScorerConfig {
    pub fn tier_for(&self, score: f64) -> Tier {
        if score >= self.tier_critical {
            Tier::Critical
        } else if score >= self.tier_warning {
            Tier::Warning
        } else {
            Tier::Normal
        }
    }
}

/// What the scorer derives for one complaint.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub score: f64,
    pub tier: Tier,
    pub time_status: TimeStatus,
    pub days_remaining: Option<i64>,
}

/// Score one complaint against the keyword tables and the SLA clock.
///
/// Contributions are additive: keyword weights (each keyword at most once,
/// no stemming), plus `elapsed_days * elapsed_rate` while unresolved, plus
/// the flat overdue bonus once past the SLA window. The total is clamped to
/// [0, 100]. Records without a parseable submission time contribute no time
/// component and get `TimeStatus::Unknown` unless already resolved.
pub fn score_complaint(
    body_text: &str,
    submitted_at: Option<NaiveDateTime>,
    status: Status,
    now: NaiveDateTime,
    cfg: &ScorerConfig,
) -> Assessment {
    let text = body_text.to_lowercase();
    let mut score = 0.0;
    for (word, weight) in &cfg.critical_keywords {
        if text.contains(word.as_str()) {
            score += f64::from(*weight);
        }
    }
    for (word, weight) in &cfg.complaint_keywords {
        if text.contains(word.as_str()) {
            score += f64::from(*weight);
        }
    }

    let elapsed_days = submitted_at.map(|t| (now - t).num_days());
    let resolved = status == Status::Resolved;
    if !resolved {
        if let Some(days) = elapsed_days {
            score += days.max(0) as f64 * cfg.elapsed_rate;
            if days > cfg.sla_days {
                score += cfg.overdue_bonus;
            }
        }
    }

    let score = score.clamp(0.0, 100.0);
    let days_remaining = elapsed_days.map(|d| cfg.sla_days - d);
    let time_status = if resolved {
        TimeStatus::Done
    } else {
        match days_remaining {
            None => TimeStatus::Unknown,
            Some(d) if d < 0 => TimeStatus::Overdue,
            Some(d) if d <= cfg.near_due_days => TimeStatus::NearDue,
            Some(_) => TimeStatus::OnTrack,
        }
    };

    Assessment {
        score,
        tier: cfg.tier_for(score),
        time_status,
        days_remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn days_ago(n: i64) -> Option<NaiveDateTime> {
        Some(now() - Duration::days(n))
    }

    #[test]
    fn overdue_incident_clamps_to_hundred() {
        let cfg = ScorerConfig::default();
        let a = score_complaint(
            "Terjadi kebakaran, ada korban",
            days_ago(10),
            Status::InProgress,
            now(),
            &cfg,
        );
        // kebakaran 40 + korban 40 + overdue 50 + elapsed 1.0 clamps.
        assert_eq!(a.score, 100.0);
        assert_eq!(a.tier, Tier::Critical);
        assert_eq!(a.time_status, TimeStatus::Overdue);
        assert_eq!(a.days_remaining, Some(-5));
    }

    #[test]
    fn resolved_report_skips_time_contributions() {
        let cfg = ScorerConfig::default();
        let a = score_complaint(
            "Jalan sedikit rusak",
            days_ago(0),
            Status::Resolved,
            now(),
            &cfg,
        );
        assert_eq!(a.score, 10.0);
        assert_eq!(a.tier, Tier::Normal);
        assert_eq!(a.time_status, TimeStatus::Done);
        assert_eq!(a.days_remaining, Some(5));
    }

    #[test]
    fn keyword_counted_once_regardless_of_repeats() {
        let cfg = ScorerConfig::default();
        let a = score_complaint(
            "banjir dimana-mana, banjir lagi, banjir terus",
            days_ago(0),
            Status::Resolved,
            now(),
            &cfg,
        );
        assert_eq!(a.score, 30.0);
    }

    #[test]
    fn missing_submission_time_means_unknown_and_no_time_score() {
        let cfg = ScorerConfig::default();
        let a = score_complaint("lampu jalan mati", None, Status::InProgress, now(), &cfg);
        assert_eq!(a.score, 0.0);
        assert_eq!(a.days_remaining, None);
        assert_eq!(a.time_status, TimeStatus::Unknown);
        // Resolved still reports Done even without a date.
        let b = score_complaint("lampu jalan mati", None, Status::Resolved, now(), &cfg);
        assert_eq!(b.time_status, TimeStatus::Done);
    }

    #[test]
    fn near_due_and_on_track_boundaries() {
        let cfg = ScorerConfig::default();
        let near = score_complaint("", days_ago(3), Status::InProgress, now(), &cfg);
        assert_eq!(near.days_remaining, Some(2));
        assert_eq!(near.time_status, TimeStatus::NearDue);

        let ok = score_complaint("", days_ago(1), Status::InProgress, now(), &cfg);
        assert_eq!(ok.days_remaining, Some(4));
        assert_eq!(ok.time_status, TimeStatus::OnTrack);

        // Exactly at the SLA boundary: not yet overdue, no bonus.
        let edge = score_complaint("", days_ago(5), Status::InProgress, now(), &cfg);
        assert_eq!(edge.days_remaining, Some(0));
        assert_eq!(edge.time_status, TimeStatus::NearDue);
        assert!(edge.score < cfg.overdue_bonus);
    }

    #[test]
    fn score_always_bounded_and_tier_consistent() {
        let cfg = ScorerConfig::default();
        let texts = [
            "",
            "banjir kebakaran longsor kecelakaan meninggal korban darurat tewas",
            "parah kecewa lambat rusak bau macet sampah pungli",
            "BANJIR besar, korban berjatuhan, jalan RUSAK parah dan macet total",
        ];
        for text in texts {
            for days in [0, 1, 5, 6, 30, 365] {
                for status in [Status::Resolved, Status::InProgress] {
                    let a = score_complaint(text, days_ago(days), status, now(), &cfg);
                    assert!((0.0..=100.0).contains(&a.score), "score {}", a.score);
                    assert_eq!(a.tier, cfg.tier_for(a.score));
                }
            }
        }
    }

    #[test]
    fn scoring_is_case_insensitive() {
        let cfg = ScorerConfig::default();
        let a = score_complaint("KEBAKARAN hebat", days_ago(0), Status::Resolved, now(), &cfg);
        assert_eq!(a.score, 40.0);
    }
}
