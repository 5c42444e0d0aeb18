//! Canonicalization of the free-text fields of a complaint.
//!
//! All functions here are total: any input, including placeholders and
//! garbage, degrades to a sentinel label rather than an error.

use crate::types::Status;
use crate::util::{is_placeholder, title_case};

pub const UNKNOWN: &str = "Unknown";
pub const GENERAL_AGENCY: &str = "General";

/// Leading boilerplate the reporting portal prepends to category labels,
/// longest and most specific first. The remainder keeps its original casing.
const CATEGORY_PREFIXES: [&str; 6] = [
    "Topik Khusus Pengaduan ",
    "Topik Khusus ",
    "Pengaduan Terkait ",
    "Pengaduan ",
    "Laporan Mengenai ",
    "Laporan ",
];

/// Ordered agency routing rules: the first rule with any trigger contained
/// in the lower-cased raw text wins. Order resolves overlapping triggers
/// deterministically.
const AGENCY_RULES: [(&[&str], &str); 9] = [
    (&["pupr", "bina marga", "pekerjaan umum"], "Dinas PUPR"),
    (&["perhubungan", "dishub"], "Dinas Perhubungan"),
    (&["lingkungan hidup", "dlh", "kebersihan"], "Dinas Lingkungan Hidup"),
    (&["pendidikan", "disdik"], "Dinas Pendidikan"),
    (&["kesehatan", "dinkes", "puskesmas"], "Dinas Kesehatan"),
    (&["sosial", "dinsos"], "Dinas Sosial"),
    (&["kependudukan", "dukcapil"], "Disdukcapil"),
    (&["kominfo", "komunikasi dan informatika"], "Diskominfo"),
    (&["satpol", "pamong praja"], "Satpol PP"),
];

/// Canonical category label: trim, drop portal boilerplate prefixes.
/// Display casing of the remainder is preserved.
pub fn normalize_category(raw: &str) -> String {
    if is_placeholder(raw) {
        return UNKNOWN.to_string();
    }
    let trimmed = raw.trim();
    for prefix in CATEGORY_PREFIXES {
        if let Some(head) = trimmed.get(..prefix.len()) {
            if head.eq_ignore_ascii_case(prefix) {
                let rest = trimmed[prefix.len()..].trim();
                if !rest.is_empty() {
                    return rest.to_string();
                }
            }
        }
    }
    trimmed.to_string()
}

/// Canonical agency name via the routing rule table; unmatched agencies are
/// passed through title-cased so the grouping keys stay stable.
pub fn normalize_agency(raw: &str) -> String {
    if is_placeholder(raw) {
        return GENERAL_AGENCY.to_string();
    }
    let lower = raw.trim().to_lowercase();
    for (triggers, canonical) in AGENCY_RULES {
        if triggers.iter().any(|t| lower.contains(t)) {
            return (*canonical).to_string();
        }
    }
    title_case(raw.trim())
}

/// District label for display and grouping. Semantic cleanup ("kecamatan"
/// prefixes, punctuation) is the geocoder's concern, kept as a separate key.
pub fn normalize_district(raw: &str) -> String {
    if is_placeholder(raw) {
        return UNKNOWN.to_string();
    }
    title_case(raw.trim())
}

/// Collapse the free-text lifecycle status onto the closed vocabulary. The
/// portal marks finished cases with "Selesai" or "Tutup" somewhere in the
/// status text; everything else is treated as in progress.
pub fn normalize_status(raw: &str) -> Status {
    let lower = raw.trim().to_lowercase();
    if lower.contains("selesai") || lower.contains("tutup") {
        Status::Resolved
    } else {
        Status::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_sentinel_for_missing() {
        assert_eq!(normalize_category("-"), UNKNOWN);
        assert_eq!(normalize_category(""), UNKNOWN);
        assert_eq!(normalize_category("nan"), UNKNOWN);
    }

    #[test]
    fn category_strips_boilerplate_prefix() {
        assert_eq!(
            normalize_category("Pengaduan Terkait Infrastruktur Jalan"),
            "Infrastruktur Jalan"
        );
        assert_eq!(
            normalize_category("Topik Khusus Pengaduan Banjir"),
            "Banjir"
        );
        // Casing of the remainder is untouched.
        assert_eq!(normalize_category("Laporan PJU mati"), "PJU mati");
    }

    #[test]
    fn category_without_prefix_is_kept() {
        assert_eq!(normalize_category("  Sampah Liar "), "Sampah Liar");
    }

    #[test]
    fn agency_rules_first_match_wins() {
        assert_eq!(normalize_agency("Dinas Pekerjaan Umum dan Tata Ruang"), "Dinas PUPR");
        assert_eq!(normalize_agency("DISHUB Kab. Bandung"), "Dinas Perhubungan");
        assert_eq!(normalize_agency("dinas lingkungan hidup"), "Dinas Lingkungan Hidup");
    }

    #[test]
    fn agency_fallbacks() {
        assert_eq!(normalize_agency("-"), GENERAL_AGENCY);
        assert_eq!(normalize_agency("badan penanggulangan bencana"), "Badan Penanggulangan Bencana");
    }

    #[test]
    fn district_title_cased_with_sentinel() {
        assert_eq!(normalize_district("kec. baleendah"), "Kec. Baleendah");
        assert_eq!(normalize_district("-"), UNKNOWN);
    }

    #[test]
    fn status_closed_vocabulary() {
        assert_eq!(normalize_status("Selesai"), Status::Resolved);
        assert_eq!(normalize_status("sudah DITUTUP"), Status::Resolved);
        assert_eq!(normalize_status("Proses Verifikasi"), Status::InProgress);
        assert_eq!(normalize_status(""), Status::InProgress);
    }
}
