use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use tabled::Tabled;

/// Lifecycle status, normalized to a closed vocabulary. Anything the raw
/// export does not clearly mark as finished counts as still in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Resolved,
    InProgress,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Resolved => write!(f, "Selesai"),
            Status::InProgress => write!(f, "Diproses"),
        }
    }
}

/// Discrete urgency classification derived from the priority score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Critical,
    Warning,
    Normal,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Critical, Tier::Warning, Tier::Normal];

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Critical => "CRITICAL",
            Tier::Warning => "WARNING",
            Tier::Normal => "NORMAL",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Position of a complaint relative to its SLA window.
///
/// `Unknown` covers unresolved records whose submission date could not be
/// parsed; they carry no elapsed-time information so no deadline exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStatus {
    Done,
    Overdue,
    NearDue,
    OnTrack,
    Unknown,
}

impl fmt::Display for TimeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeStatus::Done => "Done",
            TimeStatus::Overdue => "Overdue",
            TimeStatus::NearDue => "NearDue",
            TimeStatus::OnTrack => "OnTrack",
            TimeStatus::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// One raw CSV row after schema resolution, before any derivation.
///
/// Every field is optional: missing columns and empty cells both surface as
/// `None` and are replaced by sentinels downstream.
#[derive(Debug, Default, Clone)]
pub struct RawComplaint {
    pub id: Option<String>,
    pub submitted_at: Option<String>,
    pub category: Option<String>,
    pub agency: Option<String>,
    pub district: Option<String>,
    pub status: Option<String>,
    pub body: Option<String>,
    pub regency: Option<String>,
}

/// A fully derived complaint record. Built once per load; never mutated in
/// memory (the "mark resolved" action rewrites the backing file and the next
/// load re-derives everything).
#[derive(Debug, Clone, PartialEq)]
pub struct Complaint {
    pub id: String,
    pub submitted_at: Option<NaiveDateTime>,
    pub raw_category: String,
    pub raw_agency: String,
    pub raw_district: String,
    pub raw_regency: String,
    pub raw_status: String,
    pub body_text: String,
    pub status: Status,
    pub category_clean: String,
    pub agency_clean: String,
    pub district_clean: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub score: f64,
    pub tier: Tier,
    pub sla_due_at: Option<NaiveDateTime>,
    pub days_remaining: Option<i64>,
    pub time_status: TimeStatus,
    /// "YYYY-MM" bucket for the monthly trend; `None` when the submission
    /// date is unparseable.
    pub month_bucket: Option<String>,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DistrictCountRow {
    #[serde(rename = "Kecamatan")]
    #[tabled(rename = "Kecamatan")]
    pub district: String,
    #[serde(rename = "Jumlah")]
    #[tabled(rename = "Jumlah")]
    pub count: usize,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CategoryCountRow {
    #[serde(rename = "Kategori")]
    #[tabled(rename = "Kategori")]
    pub category: String,
    #[serde(rename = "Jumlah")]
    #[tabled(rename = "Jumlah")]
    pub count: usize,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct AgencyCountRow {
    #[serde(rename = "Instansi")]
    #[tabled(rename = "Instansi")]
    pub agency: String,
    #[serde(rename = "Jumlah")]
    #[tabled(rename = "Jumlah")]
    pub count: usize,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct TrendRow {
    #[serde(rename = "Bulan")]
    #[tabled(rename = "Bulan")]
    pub month: String,
    #[serde(rename = "Jumlah")]
    #[tabled(rename = "Jumlah")]
    pub count: usize,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct AgencyPerformanceRow {
    #[serde(rename = "Instansi")]
    #[tabled(rename = "Instansi")]
    pub agency: String,
    #[serde(rename = "TotalAduan")]
    #[tabled(rename = "TotalAduan")]
    pub total: usize,
    #[serde(rename = "AduanSelesai")]
    #[tabled(rename = "AduanSelesai")]
    pub resolved: usize,
    #[serde(rename = "Rate")]
    #[tabled(rename = "Rate")]
    pub rate: String,
}

/// One card on the priority board preview.
#[derive(Debug, Tabled, Clone)]
pub struct BoardCard {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Kecamatan")]
    pub district: String,
    #[tabled(rename = "Skor")]
    pub score: u32,
    #[tabled(rename = "StatusWaktu")]
    pub time_status: String,
    #[tabled(rename = "Cuplikan")]
    pub snippet: String,
}

/// The persisted geo-aggregate artifact. Column names are a compatibility
/// contract with the map view; do not rename.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct GeoAggRow {
    #[serde(rename = "kecamatan")]
    #[tabled(rename = "kecamatan")]
    pub district: String,
    #[serde(rename = "count")]
    #[tabled(rename = "count")]
    pub count: usize,
    #[serde(rename = "kecamatan_norm")]
    #[tabled(rename = "kecamatan_norm")]
    pub district_norm: String,
    #[serde(rename = "lat")]
    #[tabled(rename = "lat", display_with = "display_opt")]
    pub lat: Option<f64>,
    #[serde(rename = "lon")]
    #[tabled(rename = "lon", display_with = "display_opt")]
    pub lon: Option<f64>,
}

pub fn display_opt(v: &Option<f64>) -> String {
    match v {
        Some(x) => x.to_string(),
        None => String::new(),
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub total_complaints: usize,
    pub resolved: usize,
    pub resolution_rate_pct: f64,
    pub distinct_districts: usize,
    pub critical_open: usize,
}
