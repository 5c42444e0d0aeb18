//! Declared input schema: canonical field -> accepted header aliases.
//!
//! The mapping is resolved once against the header row; a field whose
//! aliases all miss is reported by name and filled with its sentinel
//! downstream instead of silently grabbing a lookalike column.

use csv::StringRecord;
use crate::types::RawComplaint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    SubmittedAt,
    Category,
    Agency,
    District,
    Status,
    Body,
    Regency,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Id,
        Field::SubmittedAt,
        Field::Category,
        Field::Agency,
        Field::District,
        Field::Status,
        Field::Body,
        Field::Regency,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::SubmittedAt => "submitted_at",
            Field::Category => "category",
            Field::Agency => "agency",
            Field::District => "district",
            Field::Status => "status",
            Field::Body => "body",
            Field::Regency => "regency",
        }
    }

    /// Accepted raw header names, most specific first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::Id => &["tracking_id", "id"],
            Field::SubmittedAt => &["tanggal_masuk", "tanggal"],
            Field::Category => &["kategori"],
            Field::Agency => &["dinas_tujuan", "instansi"],
            Field::District => &["kecamatan_final", "kecamatan", "lokasi"],
            Field::Status => &["status_final", "status"],
            Field::Body => &["isi_laporan_awal", "isi_laporan"],
            Field::Regency => &["kota_kabupaten"],
        }
    }

    fn index(&self) -> usize {
        Field::ALL.iter().position(|f| f == self).unwrap_or(0)
    }
}

/// Result of resolving the declared schema against one header row.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    indices: [Option<usize>; 8],
    pub missing: Vec<Field>,
}

impl ColumnMap {
    /// Match each field's aliases against the headers, first alias wins.
    /// Header comparison is trimmed and case-insensitive.
    pub fn resolve(headers: &StringRecord) -> ColumnMap {
        let lowered: Vec<String> = headers
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        let mut indices = [None; 8];
        let mut missing = Vec::new();
        for field in Field::ALL {
            let found = field
                .aliases()
                .iter()
                .find_map(|alias| lowered.iter().position(|h| h == alias));
            indices[field.index()] = found;
            if found.is_none() {
                missing.push(field);
            }
        }
        ColumnMap { indices, missing }
    }

    pub fn column_of(&self, field: Field) -> Option<usize> {
        self.indices[field.index()]
    }

    fn get<'a>(&self, field: Field, record: &'a StringRecord) -> Option<&'a str> {
        self.column_of(field).and_then(|i| record.get(i))
    }

    /// Pull one data row into the raw view. Missing columns and cells both
    /// come out as `None`.
    pub fn extract(&self, record: &StringRecord) -> RawComplaint {
        let own = |f: Field| self.get(f, record).map(str::to_string);
        RawComplaint {
            id: own(Field::Id),
            submitted_at: own(Field::SubmittedAt),
            category: own(Field::Category),
            agency: own(Field::Agency),
            district: own(Field::District),
            status: own(Field::Status),
            body: own(Field::Body),
            regency: own(Field::Regency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cols: &[&str]) -> StringRecord {
        StringRecord::from(cols.to_vec())
    }

    #[test]
    fn resolves_primary_aliases() {
        let map = ColumnMap::resolve(&headers(&[
            "tracking_id",
            "tanggal_masuk",
            "kategori",
            "dinas_tujuan",
            "isi_laporan_awal",
            "status_final",
            "kecamatan_final",
            "kota_kabupaten",
        ]));
        assert!(map.missing.is_empty());
        assert_eq!(map.column_of(Field::Id), Some(0));
        assert_eq!(map.column_of(Field::Status), Some(5));
        assert_eq!(map.column_of(Field::District), Some(6));
    }

    #[test]
    fn falls_back_to_secondary_aliases_case_insensitively() {
        let map = ColumnMap::resolve(&headers(&["ID", "Tanggal", "Lokasi", "Status"]));
        assert_eq!(map.column_of(Field::Id), Some(0));
        assert_eq!(map.column_of(Field::SubmittedAt), Some(1));
        assert_eq!(map.column_of(Field::District), Some(2));
        assert_eq!(map.column_of(Field::Status), Some(3));
    }

    #[test]
    fn missing_fields_are_reported_not_fatal() {
        let map = ColumnMap::resolve(&headers(&["tracking_id", "isi_laporan_awal"]));
        assert!(map.missing.contains(&Field::Category));
        assert!(map.missing.contains(&Field::Status));
        let raw = map.extract(&StringRecord::from(vec!["T-1", "banjir"]));
        assert_eq!(raw.id.as_deref(), Some("T-1"));
        assert_eq!(raw.body.as_deref(), Some("banjir"));
        assert_eq!(raw.category, None);
    }

    #[test]
    fn first_alias_wins_when_both_present() {
        let map = ColumnMap::resolve(&headers(&["status", "status_final"]));
        assert_eq!(map.column_of(Field::Status), Some(1));
    }
}
