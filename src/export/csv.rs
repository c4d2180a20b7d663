//! CSV export and import of workout records.

use std::io::Write;

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::metrics::format_hhmm;
use crate::training::types::WorkoutRecord;

/// Fixed column header. The column set and order are part of the export
/// format and must not change.
pub const CSV_HEADER: &str = "Data,Inicio,Fim,Exercicio,Series,Repeticoes,Carga (kg),Volume,Descanso (s),Duracao,RPE,Observacoes";

const COLUMNS: usize = 12;

/// Export records to CSV format.
pub fn export_csv(records: &[WorkoutRecord]) -> Result<String, CsvError> {
    let mut output = Vec::new();

    writeln!(output, "{}", CSV_HEADER).map_err(|e| CsvError::WriteFailed(e.to_string()))?;

    for record in records {
        writeln!(
            output,
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            record.date.format("%Y-%m-%d"),
            record.start.format("%H:%M"),
            record.end.format("%H:%M"),
            escape_field(&record.exercise),
            record.sets,
            record.reps,
            record.weight_kg,
            record.volume_kg,
            record.rest_secs.map_or(String::new(), |v| v.to_string()),
            format_hhmm(record.duration_min),
            record.rpe.map_or(String::new(), |v| v.to_string()),
            escape_field(&record.notes),
        )
        .map_err(|e| CsvError::WriteFailed(e.to_string()))?;
    }

    String::from_utf8(output).map_err(|e| CsvError::WriteFailed(e.to_string()))
}

/// Export records to CSV and write to a file.
pub fn export_csv_to_file(
    records: &[WorkoutRecord],
    path: &std::path::Path,
) -> Result<(), CsvError> {
    let content = export_csv(records)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Generate the export filename for a given date.
pub fn generate_csv_filename(date: NaiveDate) -> String {
    format!("treinos_{}.csv", date.format("%Y-%m-%d"))
}

/// Parse a CSV export back into records.
///
/// The Volume and Duracao columns are derived; the record constructor
/// recomputes them, so inconsistent hand-edited values are normalized.
pub fn import_csv(content: &str) -> Result<Vec<WorkoutRecord>, CsvError> {
    let mut rows = split_rows(content).into_iter();

    match rows.next() {
        Some(header) if header.fields.join(",") == CSV_HEADER => {}
        Some(header) => return Err(CsvError::BadHeader(header.fields.join(","))),
        None => return Err(CsvError::BadHeader(String::new())),
    }

    let mut records = Vec::new();
    for row in rows {
        if row.fields.len() == 1 && row.fields[0].trim().is_empty() {
            continue;
        }
        let line_no = row.line;
        let fields = row.fields;
        if fields.len() != COLUMNS {
            return Err(CsvError::ColumnCount {
                line: line_no,
                found: fields.len(),
            });
        }

        let date = NaiveDate::parse_from_str(fields[0].trim(), "%Y-%m-%d").map_err(|_| {
            CsvError::InvalidField {
                line: line_no,
                column: "Data",
                value: fields[0].clone(),
            }
        })?;
        let start = parse_time(&fields[1], line_no, "Inicio")?;
        let end = parse_time(&fields[2], line_no, "Fim")?;
        let sets = parse_number(&fields[4], line_no, "Series")?;
        let reps = parse_number(&fields[5], line_no, "Repeticoes")?;
        let weight_kg = parse_number(&fields[6], line_no, "Carga (kg)")?;
        let rest_secs = parse_optional(&fields[8], line_no, "Descanso (s)")?;
        let rpe = parse_optional(&fields[10], line_no, "RPE")?;

        records.push(WorkoutRecord::new(
            date,
            start,
            end,
            fields[3].clone(),
            sets,
            reps,
            weight_kg,
            rest_secs,
            rpe,
            fields[11].clone(),
        ));
    }

    Ok(records)
}

/// Quote a field when it would break the comma-joined row.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// One logical CSV row with the physical line it starts on.
struct RawRow {
    line: usize,
    fields: Vec<String>,
}

/// Split a document into logical rows, honoring quoted fields.
///
/// Quoting carries across line breaks, so a quoted note containing
/// newlines stays one field instead of splitting the row.
fn split_rows(content: &str) -> Vec<RawRow> {
    let mut rows = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut row_line = 1;
    let mut row_started = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if !row_started && c != '\n' && c != '\r' {
            row_line = line;
            row_started = true;
        }
        match c {
            '"' if in_quotes => {
                // Doubled quote is an escaped quote, otherwise the field closes
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            '\n' if !in_quotes => {
                line += 1;
                if row_started {
                    fields.push(std::mem::take(&mut current));
                    rows.push(RawRow {
                        line: row_line,
                        fields: std::mem::take(&mut fields),
                    });
                    row_started = false;
                }
            }
            '\n' => {
                line += 1;
                current.push('\n');
            }
            // Part of a CRLF terminator, dropped
            '\r' if !in_quotes => {}
            _ => current.push(c),
        }
    }
    if row_started {
        fields.push(current);
        rows.push(RawRow {
            line: row_line,
            fields,
        });
    }
    rows
}

fn parse_time(value: &str, line: usize, column: &'static str) -> Result<NaiveTime, CsvError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| CsvError::InvalidField {
        line,
        column,
        value: value.to_string(),
    })
}

fn parse_number<T: std::str::FromStr>(
    value: &str,
    line: usize,
    column: &'static str,
) -> Result<T, CsvError> {
    value.trim().parse().map_err(|_| CsvError::InvalidField {
        line,
        column,
        value: value.to_string(),
    })
}

fn parse_optional<T: std::str::FromStr>(
    value: &str,
    line: usize,
    column: &'static str,
) -> Result<Option<T>, CsvError> {
    match value.trim() {
        "" => Ok(None),
        s => parse_number(s, line, column).map(Some),
    }
}

/// Errors during CSV export or import.
#[derive(Debug, Error)]
pub enum CsvError {
    /// First line did not match the fixed header
    #[error("Unrecognized header: {0}")]
    BadHeader(String),

    /// Row with the wrong number of columns
    #[error("Line {line}: expected 12 columns, found {found}")]
    ColumnCount { line: usize, found: usize },

    /// Unparseable cell value
    #[error("Line {line}: invalid {column}: {value}")]
    InvalidField {
        line: usize,
        column: &'static str,
        value: String,
    },

    /// Failed to write export data
    #[error("Failed to write data: {0}")]
    WriteFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
