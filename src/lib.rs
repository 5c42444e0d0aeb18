//! Triage engine for SP4N-LAPOR citizen complaint exports.
//!
//! The pipeline turns one raw CSV export into a fully derived record set:
//! free-text categories, agencies and districts are canonicalized
//! ([`normalize`]), district names are geocoded against a curated gazetteer
//! ([`geocode`]), each complaint gets a bounded urgency score, priority tier
//! and SLA time status ([`scoring`]), and the derived set feeds the
//! district/category/trend aggregations ([`reports`]) and the persisted
//! geo-aggregate table ([`geo_export`]). Loads are batch-oriented and pure
//! given an injected clock; the only mutation is the status write-back
//! ([`writeback`]), which rewrites the backing file atomically.

pub mod config;
pub mod error;
pub mod geo_export;
pub mod geocode;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod reports;
pub mod schema;
pub mod scoring;
pub mod types;
pub mod util;
pub mod writeback;
