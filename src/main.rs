// Entry point and high-level console flow.
//
// - Option [1] loads the complaint CSV, derives the full record set and
//   prints load diagnostics.
// - Option [2] generates the aggregation reports as CSV files plus a JSON
//   summary, with markdown previews on the console.
// - Option [3] renders the priority board (one column per tier).
// - Option [4] marks a complaint resolved in the backing file.
use anyhow::Result;
use chrono::Local;
use lapor_triage::config::{AppConfig, DEFAULT_CONFIG_PATH};
use lapor_triage::loader::{self, LoadReport};
use lapor_triage::output;
use lapor_triage::reports;
use lapor_triage::types::{Complaint, Tier};
use lapor_triage::util::format_int;
use lapor_triage::writeback::{self, Session};
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;

const DEFAULT_INPUT: &str = "sp4n-lapor_2021-2024.csv";
const TOP_CATEGORIES: usize = 7;
const BOARD_LIMIT: usize = 5;

// In-memory app state: the derived record set is cached per (path, mtime)
// so repeated menu actions reuse one load; the write-back invalidates it.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| {
    Mutex::new(AppState {
        data: None,
        cached_mtime: None,
    })
});

struct AppState {
    data: Option<Vec<Complaint>>,
    cached_mtime: Option<SystemTime>,
}

fn file_mtime(path: &str) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Read a single line of input after printing a prompt.
fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn print_load_report(report: &LoadReport) {
    println!(
        "Processing export... ({} rows read, {} records derived)",
        format_int(report.total_rows as i64),
        format_int(report.kept_rows as i64)
    );
    if report.unparseable_dates > 0 {
        println!(
            "Note: {} records have no parseable submission date (kept, excluded from time logic).",
            format_int(report.unparseable_dates as i64)
        );
    }
    if report.unmatched_districts > 0 {
        println!(
            "Note: {} records have no gazetteer match (kept, no coordinates).",
            format_int(report.unmatched_districts as i64)
        );
    }
    if !report.missing_columns.is_empty() {
        println!(
            "Warning: columns missing from the export, filled with sentinels: {}",
            report.missing_columns.join(", ")
        );
    }
    println!();
}

/// Handle option [1]: load the CSV and derive the record set, reusing the
/// cache when the file has not changed since the last load.
fn handle_load(cfg: &AppConfig, input: &str) {
    let mtime = file_mtime(input);
    {
        let state = APP_STATE.lock().unwrap();
        if state.data.is_some() && mtime.is_some() && state.cached_mtime == mtime {
            println!("Using cached record set (file unchanged).\n");
            return;
        }
    }
    // One batch snapshot: every record in this load sees the same clock.
    let now = Local::now().naive_local();
    match loader::load_and_clean(input, &cfg.scorer, now) {
        Ok((data, report)) => {
            print_load_report(&report);
            let mut state = APP_STATE.lock().unwrap();
            state.data = Some(data);
            state.cached_mtime = mtime;
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

fn cached_data() -> Option<Vec<Complaint>> {
    APP_STATE.lock().unwrap().data.clone()
}

/// Handle option [2]: generate the aggregation reports and the JSON summary.
fn handle_generate_reports() {
    let Some(data) = cached_data() else {
        println!("Error: No data loaded. Please load the export first (option 1).\n");
        return;
    };

    println!("Generating reports...\n");

    let districts = reports::by_district(&data);
    let file1 = "laporan_kecamatan.csv";
    if let Err(e) = output::write_csv(file1, &districts) {
        eprintln!("Write error: {}", e);
    }
    println!("Report 1: Aduan per Kecamatan");
    output::preview_table_rows(&districts, 5);
    println!("(Full table exported to {})\n", file1);

    let categories = reports::by_category(&data, TOP_CATEGORIES);
    let file2 = "laporan_kategori.csv";
    if let Err(e) = output::write_csv(file2, &categories) {
        eprintln!("Write error: {}", e);
    }
    println!("Report 2: Kategori Teratas (top {} + Lainnya)", TOP_CATEGORIES);
    output::preview_table_rows(&categories, TOP_CATEGORIES + 1);
    println!("(Full table exported to {})\n", file2);

    let trend = reports::trend_by_month(&data);
    let file3 = "laporan_tren_bulanan.csv";
    if let Err(e) = output::write_csv(file3, &trend) {
        eprintln!("Write error: {}", e);
    }
    println!("Report 3: Tren Laporan Masuk per Bulan");
    output::preview_table_rows(&trend, 6);
    println!("(Full table exported to {})\n", file3);

    let performance = reports::agency_performance(&data);
    let file4 = "laporan_kinerja_dinas.csv";
    if let Err(e) = output::write_csv(file4, &performance) {
        eprintln!("Write error: {}", e);
    }
    println!("Report 4: Analisis Kinerja Dinas");
    output::preview_table_rows(&performance, 5);
    println!("(Full table exported to {})\n", file4);

    let summary = reports::summary(&data);
    if let Err(e) = output::write_json("summary.json", &summary) {
        eprintln!("Write error: {}", e);
    }
    println!(
        "Summary (summary.json): {} aduan, {} selesai ({}%), {} kecamatan, {} kritis terbuka\n",
        format_int(summary.total_complaints as i64),
        format_int(summary.resolved as i64),
        summary.resolution_rate_pct,
        format_int(summary.distinct_districts as i64),
        format_int(summary.critical_open as i64)
    );
}

/// Handle option [3]: the kanban-style priority board over open complaints.
fn handle_board() {
    let Some(data) = cached_data() else {
        println!("Error: No data loaded. Please load the export first (option 1).\n");
        return;
    };
    println!("Prioritas Penanganan (laporan belum selesai)\n");
    for tier in Tier::ALL {
        let cards = reports::board_column(&data, tier, BOARD_LIMIT);
        println!("[{}]", tier.label());
        output::preview_table_rows(&cards, BOARD_LIMIT);
    }
}

/// Handle option [4]: mark a complaint resolved and invalidate the cache so
/// the next load re-reads the rewritten file.
fn handle_mark_resolved(input: &str) {
    let id = read_line("Complaint id: ");
    if id.is_empty() {
        println!("No id given.\n");
        return;
    }
    let note = read_line("Resolution note: ");
    let session = Session::admin("console");
    match writeback::mark_resolved(input, &id, &note, &session) {
        Ok(()) => {
            let mut state = APP_STATE.lock().unwrap();
            state.data = None;
            state.cached_mtime = None;
            println!("Complaint {} marked resolved. Reload to see the update.\n", id);
        }
        Err(e) => eprintln!("Write-back failed: {}\n", e),
    }
}

fn main() -> Result<()> {
    let cfg = AppConfig::load_or_default(DEFAULT_CONFIG_PATH)?;
    let input = cfg
        .input
        .clone()
        .unwrap_or_else(|| DEFAULT_INPUT.to_string());
    if !Path::new(&input).exists() {
        eprintln!("Note: input file '{}' does not exist yet.", input);
    }

    loop {
        println!("SP4N-LAPOR Triage");
        println!("[1] Load complaint export");
        println!("[2] Generate reports");
        println!("[3] Priority board");
        println!("[4] Mark complaint resolved");
        println!("[5] Exit\n");
        match read_line("Enter choice: ").as_str() {
            "1" => handle_load(&cfg, &input),
            "2" => {
                println!();
                handle_generate_reports();
            }
            "3" => {
                println!();
                handle_board();
            }
            "4" => handle_mark_resolved(&input),
            "5" => {
                println!("Exiting.");
                break;
            }
            _ => println!("Invalid choice. Please enter 1-5.\n"),
        }
    }
    Ok(())
}
