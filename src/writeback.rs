//! Status write-back: the one mutation the pipeline performs.
//!
//! Marking a complaint resolved rewrites the backing CSV in full and the
//! next load re-derives everything. Columns are located through the
//! declared schema (never by positional guessing), and the rewrite goes
//! through a temporary file plus rename so a concurrent reader never sees a
//! half-written table.

use crate::error::TriageError;
use crate::schema::{ColumnMap, Field};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs;
use std::path::Path;

/// Status text written into the backing file for a resolved complaint.
pub const RESOLVED_SENTINEL: &str = "Selesai";

/// Header appended for the free-text resolution note when the export lacks
/// one.
const RESOLUTION_COLUMN: &str = "resolusi";

/// Explicit authorization context for mutating actions, passed by the
/// caller instead of a process-wide login flag.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: String,
    pub is_admin: bool,
}

impl Session {
    pub fn admin(user: &str) -> Session {
        Session {
            user: user.to_string(),
            is_admin: true,
        }
    }

    pub fn viewer(user: &str) -> Session {
        Session {
            user: user.to_string(),
            is_admin: false,
        }
    }
}

/// Mark one complaint resolved in the backing file.
///
/// Fails without touching the file when the session is not an admin one,
/// when the id or status column cannot be resolved, or when no row carries
/// the given id.
pub fn mark_resolved(
    path: &str,
    id: &str,
    resolution_note: &str,
    session: &Session,
) -> Result<(), TriageError> {
    if !session.is_admin {
        return Err(TriageError::NotAuthorized);
    }
    if !Path::new(path).exists() {
        return Err(TriageError::InputNotFound(path.to_string()));
    }

    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut headers: StringRecord = rdr.headers()?.clone();
    let columns = ColumnMap::resolve(&headers);
    let id_col = columns
        .column_of(Field::Id)
        .ok_or_else(|| TriageError::MissingColumn(Field::Id.aliases()[0].to_string()))?;
    let status_col = columns
        .column_of(Field::Status)
        .ok_or_else(|| TriageError::MissingColumn(Field::Status.aliases()[0].to_string()))?;

    let resolution_col = match headers
        .iter()
        .position(|h| h.trim().to_lowercase() == RESOLUTION_COLUMN)
    {
        Some(i) => i,
        None => {
            headers.push_field(RESOLUTION_COLUMN);
            headers.len() - 1
        }
    };

    let mut rows: Vec<StringRecord> = Vec::new();
    let mut found = false;
    for result in rdr.records() {
        let record = result?;
        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        // Pad short rows so every cell index below is valid.
        while cells.len() < headers.len() {
            cells.push(String::new());
        }
        if cells[id_col].trim() == id.trim() {
            cells[status_col] = RESOLVED_SENTINEL.to_string();
            cells[resolution_col] = resolution_note.to_string();
            found = true;
        }
        rows.push(StringRecord::from(cells));
    }

    if !found {
        return Err(TriageError::WriteBackTargetNotFound(id.to_string()));
    }

    // Full rewrite through a sibling temp file, then atomic rename.
    let tmp_path = format!("{}.tmp", path);
    {
        let mut wtr = WriterBuilder::new().flexible(true).from_path(&tmp_path)?;
        wtr.write_record(&headers)?;
        for row in &rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}
