// Batch geo-aggregate job: pre-aggregates district complaint counts with
// gazetteer coordinates into a flat CSV consumed by the dashboard's map
// view. Independent of the interactive dashboard; safe to run on a
// schedule.
use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use lapor_triage::config::{AppConfig, DEFAULT_CONFIG_PATH};
use lapor_triage::geo_export::{self, DEFAULT_TOP_N};
use lapor_triage::loader;
use lapor_triage::output;
use lapor_triage::util::format_int;

#[derive(Parser, Debug)]
#[command(
    name = "geo-export",
    about = "Aggregate complaint counts per kecamatan with gazetteer coordinates"
)]
struct Args {
    /// Complaint CSV export to read. Falls back to the `input` entry of
    /// triage.toml when omitted.
    #[arg(short, long)]
    input: Option<String>,

    /// Output CSV path (columns: kecamatan,count,kecamatan_norm,lat,lon).
    #[arg(short, long, default_value = "data_gis_kecamatan.csv")]
    output: String,

    /// Keep only the N busiest districts.
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,

    /// Restrict to records whose kota_kabupaten contains this text
    /// (case-insensitive). Ignored when nothing matches.
    #[arg(long, default_value = "bandung")]
    regency: String,

    /// Disable the regency filter entirely.
    #[arg(long)]
    no_regency_filter: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let cfg = AppConfig::load_or_default(DEFAULT_CONFIG_PATH)?;
    let input = args
        .input
        .or(cfg.input.clone())
        .unwrap_or_else(|| "sp4n-lapor_2021-2024.csv".to_string());

    let now = Local::now().naive_local();
    let (records, report) = loader::load_and_clean(&input, &cfg.scorer, now)
        .with_context(|| format!("loading {}", input))?;
    println!(
        "Read {} ({} rows, {} records derived)",
        input,
        format_int(report.total_rows as i64),
        format_int(report.kept_rows as i64)
    );

    let filter = if args.no_regency_filter {
        None
    } else {
        Some(args.regency.as_str())
    };
    let rows = geo_export::export(&records, filter, args.top_n, &args.output)
        .with_context(|| format!("writing {}", args.output))?;

    let with_coords = rows.iter().filter(|r| r.lat.is_some()).count();
    println!(
        "Aggregated CSV saved to: {} ({} districts, {} with coordinates)",
        args.output,
        format_int(rows.len() as i64),
        format_int(with_coords as i64)
    );
    output::preview_table_rows(&rows, 10);
    Ok(())
}
