use thiserror::Error;

/// Failure modes of the triage pipeline.
///
/// Per-record problems (unparseable dates, unmatched districts) and missing
/// columns during a load are *not* errors: they are recovered with sentinel
/// values and counted in `loader::LoadReport`. Only conditions that abort an
/// operation outright live here.
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("input file not found: {0}")]
    InputNotFound(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A status update referenced an id that is absent from the backing
    /// file. The file is left untouched.
    #[error("no complaint with id '{0}' in the backing file")]
    WriteBackTargetNotFound(String),

    /// The backing file lacks a column the write-back needs to locate rows.
    #[error("required column '{0}' not present in the backing file")]
    MissingColumn(String),

    #[error("admin session required for this action")]
    NotAuthorized,

    #[error("invalid configuration: {0}")]
    Config(String),
}
