use crate::error::TriageError;
use crate::geocode;
use crate::normalize;
use crate::schema::ColumnMap;
use crate::scoring::{score_complaint, ScorerConfig};
use crate::types::Complaint;
use crate::util::{clean_cell, parse_datetime_safe};
use chrono::{Duration, NaiveDateTime};
use csv::ReaderBuilder;
use std::path::Path;

/// Diagnostics from one load. All of these are recovered conditions; the
/// only fatal failure is a missing input file.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub total_rows: usize,
    pub kept_rows: usize,
    pub unparseable_dates: usize,
    pub unmatched_districts: usize,
    /// Canonical names of declared-schema fields absent from the header row;
    /// their values came from sentinels.
    pub missing_columns: Vec<String>,
}

/// Load the complaint CSV and derive the full record set.
///
/// `now` is the single batch snapshot used for every elapsed-time and SLA
/// computation; pass the same value to reproduce a load exactly. No record
/// is ever dropped for bad data: unparseable dates null the time-derived
/// fields, unmatched districts null the coordinates, and both are counted.
pub fn load_and_clean(
    path: &str,
    cfg: &ScorerConfig,
    now: NaiveDateTime,
) -> Result<(Vec<Complaint>, LoadReport), TriageError> {
    if !Path::new(path).exists() {
        return Err(TriageError::InputNotFound(path.to_string()));
    }
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let columns = ColumnMap::resolve(rdr.headers()?);

    let mut report = LoadReport {
        missing_columns: columns.missing.iter().map(|f| f.name().to_string()).collect(),
        ..LoadReport::default()
    };
    let mut records: Vec<Complaint> = Vec::new();

    for (row_idx, result) in rdr.records().enumerate() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            // Structurally broken row: nothing to recover per-field.
            Err(_) => continue,
        };
        let raw = columns.extract(&row);

        let id = clean_cell(raw.id.as_deref()).unwrap_or_else(|| format!("ROW-{}", row_idx + 1));
        let raw_category = clean_cell(raw.category.as_deref()).unwrap_or_default();
        let raw_agency = clean_cell(raw.agency.as_deref()).unwrap_or_default();
        let raw_district = clean_cell(raw.district.as_deref()).unwrap_or_default();
        let raw_regency = clean_cell(raw.regency.as_deref()).unwrap_or_default();
        let body_text = clean_cell(raw.body.as_deref()).unwrap_or_default();
        let status_raw = clean_cell(raw.status.as_deref()).unwrap_or_default();

        let submitted_at = parse_datetime_safe(raw.submitted_at.as_deref());
        if submitted_at.is_none() {
            report.unparseable_dates += 1;
        }

        let category_clean = normalize::normalize_category(&raw_category);
        let agency_clean = normalize::normalize_agency(&raw_agency);
        let district_clean = normalize::normalize_district(&raw_district);
        let status = normalize::normalize_status(&status_raw);

        let coords = geocode::geocode(&district_clean);
        if coords.is_none() {
            report.unmatched_districts += 1;
        }

        let assessment = score_complaint(&body_text, submitted_at, status, now, cfg);
        let sla_due_at = submitted_at.map(|t| t + Duration::days(cfg.sla_days));
        let month_bucket = submitted_at.map(|t| t.format("%Y-%m").to_string());

        records.push(Complaint {
            id,
            submitted_at,
            raw_category,
            raw_agency,
            raw_district,
            raw_regency,
            raw_status: status_raw,
            body_text,
            status,
            category_clean,
            agency_clean,
            district_clean,
            lat: coords.map(|(lat, _)| lat),
            lon: coords.map(|(_, lon)| lon),
            score: assessment.score,
            tier: assessment.tier,
            sla_due_at,
            days_remaining: assessment.days_remaining,
            time_status: assessment.time_status,
            month_bucket,
        });
    }

    report.kept_rows = records.len();
    Ok((records, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Status, TimeStatus, Tier};
    use chrono::NaiveDate;
    use std::fs;
    use std::path::PathBuf;

    fn batch_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 20)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn write_fixture(name: &str, content: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("lapor_triage_loader_{}_{}.csv", name, std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    const FIXTURE: &str = "\
tracking_id,tanggal_masuk,kategori,dinas_tujuan,isi_laporan_awal,status_final,kecamatan_final,kota_kabupaten
T-001,2024-03-10 08:00:00,Pengaduan Terkait Banjir,Dinas PUPR,Banjir parah di perumahan,Proses,Kec. Baleendah,Kabupaten Bandung
T-002,2024-03-19,Sampah,DLH,Sampah menumpuk dan bau,Selesai,Majalaya,Kabupaten Bandung
T-003,bukan tanggal,Jalan,Dinas PUPR,Jalan rusak,Proses,Lembang,Kabupaten Bandung Barat
,2024-03-18,-,-,-,-,-,-
";

    #[test]
    fn missing_file_is_fatal() {
        let cfg = ScorerConfig::default();
        let err = load_and_clean("/no/such/file.csv", &cfg, batch_now()).unwrap_err();
        assert!(matches!(err, TriageError::InputNotFound(_)));
    }

    #[test]
    fn derives_records_without_dropping_any() {
        let cfg = ScorerConfig::default();
        let path = write_fixture("derive", FIXTURE);
        let (records, report) = load_and_clean(path.to_str().unwrap(), &cfg, batch_now()).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(report.total_rows, 4);
        assert_eq!(report.kept_rows, 4);
        assert_eq!(report.unparseable_dates, 1);
        assert!(report.missing_columns.is_empty());

        let first = &records[0];
        assert_eq!(first.id, "T-001");
        assert_eq!(first.category_clean, "Banjir");
        assert_eq!(first.district_clean, "Kec. Baleendah");
        assert!(first.lat.is_some());
        // 10 days old, unresolved, SLA 5: banjir 30 + parah 10 + overdue 50
        // + elapsed 1.0 = 91.0 (submitted 08:00 vs now 09:00 is still 10
        // whole days).
        assert_eq!(first.score, 91.0);
        assert_eq!(first.tier, Tier::Critical);
        assert_eq!(first.time_status, TimeStatus::Overdue);
        assert_eq!(first.days_remaining, Some(-5));

        let second = &records[1];
        assert_eq!(second.status, Status::Resolved);
        assert_eq!(second.time_status, TimeStatus::Done);
        assert_eq!(second.month_bucket.as_deref(), Some("2024-03"));

        let third = &records[2];
        assert!(third.submitted_at.is_none());
        assert_eq!(third.time_status, TimeStatus::Unknown);
        assert!(third.lat.is_none() && third.lon.is_none());
        assert!(third.month_bucket.is_none());

        let fourth = &records[3];
        assert_eq!(fourth.id, "ROW-4");
        assert_eq!(fourth.category_clean, "Unknown");
        assert_eq!(fourth.agency_clean, "General");
        assert_eq!(fourth.district_clean, "Unknown");
    }

    #[test]
    fn missing_columns_fill_with_sentinels() {
        let cfg = ScorerConfig::default();
        let path = write_fixture(
            "missing_cols",
            "tracking_id,isi_laporan_awal\nT-9,ada kebakaran\n",
        );
        let (records, report) = load_and_clean(path.to_str().unwrap(), &cfg, batch_now()).unwrap();
        fs::remove_file(&path).ok();

        assert!(report.missing_columns.contains(&"status".to_string()));
        assert!(report.missing_columns.contains(&"district".to_string()));
        let r = &records[0];
        assert_eq!(r.district_clean, "Unknown");
        assert_eq!(r.agency_clean, "General");
        assert_eq!(r.status, Status::InProgress);
        assert_eq!(r.score, 40.0);
    }

    #[test]
    fn reload_with_same_now_is_identical() {
        let cfg = ScorerConfig::default();
        let path = write_fixture("idempotent", FIXTURE);
        let (a, _) = load_and_clean(path.to_str().unwrap(), &cfg, batch_now()).unwrap();
        let (b, _) = load_and_clean(path.to_str().unwrap(), &cfg, batch_now()).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(a, b);
    }
}
