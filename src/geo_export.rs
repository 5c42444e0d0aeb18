//! Geo-aggregate batch job: district -> count -> coordinate table consumed
//! by the dashboard's map view. Runs independently of the dashboard; the
//! dashboard degrades gracefully when the output file is absent.

use crate::error::TriageError;
use crate::geocode::{gazetteer_key, geocode};
use crate::output;
use crate::reports::by_district;
use crate::types::{Complaint, GeoAggRow};

pub const DEFAULT_TOP_N: usize = 40;

/// Build the district aggregate table.
///
/// When `regency_filter` is given, input is restricted to records whose raw
/// regency field contains the filter (case-insensitive), but only if that
/// leaves at least one record; a filter that matches nothing is ignored.
/// Districts without a gazetteer match keep their row with empty
/// coordinates.
pub fn build_geo_aggregate(
    records: &[Complaint],
    regency_filter: Option<&str>,
    top_n: usize,
) -> Vec<GeoAggRow> {
    let filtered: Vec<&Complaint> = match regency_filter {
        Some(needle) => {
            let needle = needle.to_lowercase();
            let hits: Vec<&Complaint> = records
                .iter()
                .filter(|r| r.raw_regency.to_lowercase().contains(&needle))
                .collect();
            if hits.is_empty() {
                records.iter().collect()
            } else {
                hits
            }
        }
        None => records.iter().collect(),
    };
    let owned: Vec<Complaint> = filtered.into_iter().cloned().collect();

    by_district(&owned)
        .into_iter()
        .take(top_n)
        .map(|row| {
            let coords = geocode(&row.district);
            GeoAggRow {
                district_norm: gazetteer_key(&row.district),
                lat: coords.map(|(lat, _)| lat),
                lon: coords.map(|(_, lon)| lon),
                district: row.district,
                count: row.count,
            }
        })
        .collect()
}

/// Build and persist the aggregate as the flat CSV artifact
/// (`kecamatan,count,kecamatan_norm,lat,lon`).
pub fn export(
    records: &[Complaint],
    regency_filter: Option<&str>,
    top_n: usize,
    out_path: &str,
) -> Result<Vec<GeoAggRow>, TriageError> {
    let rows = build_geo_aggregate(records, regency_filter, top_n);
    output::write_csv(out_path, &rows)?;
    Ok(rows)
}
