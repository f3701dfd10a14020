//! Print documents.
//!
//! The original tooling rendered the visible table (or one record's detail)
//! into a print window; here the same content becomes a fixed-width text
//! document spooled next to the store, ready for the platform print queue.

use crate::fields::{self, FieldSpec};
use crate::models::{PatientRecord, PatientType};
use anyhow::{Context, Result};
use std::path::Path;
use time::format_description::well_known::Rfc2822;
use time::OffsetDateTime;

/// File name for a printed table document.
pub const TABLE_PRINT_FILE: &str = "patient_records_print.txt";

/// File name for a printed single-record history document.
pub fn history_print_file(id: u64) -> String {
    format!("patient_history_{}.txt", id)
}

fn generated_at() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(&Rfc2822).unwrap_or_default()
}

/// Renders a record table as an aligned fixed-width text document.
pub fn table_document(title: &str, fields: &[FieldSpec], records: &[PatientRecord]) -> String {
    let headers = fields::header_labels(fields);
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| fields::row_values(fields, r))
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut doc = String::new();
    doc.push_str(title);
    doc.push('\n');
    doc.push_str(&format!("Generated: {}\n\n", generated_at()));

    let format_line = |cells: &[String]| {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    doc.push_str(&format_line(&header_cells));
    doc.push('\n');
    doc.push_str(&"-".repeat(
        widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1),
    ));
    doc.push('\n');
    for row in &rows {
        doc.push_str(&format_line(row));
        doc.push('\n');
    }
    doc
}

/// Renders one record's history detail as label/value lines. Employee
/// records carry the civil status and department rows.
pub fn record_document(record: &PatientRecord) -> String {
    let mut rows: Vec<(&str, String)> = vec![
        ("Patient ID", record.id.to_string()),
        ("Name", record.display_name()),
        ("Walk-in Date", record.walk_in_date.clone()),
        ("Medication 1", record.resolved_medication().to_string()),
        ("Medication 2", record.medication2.clone()),
        ("Chief Complaint", record.resolved_complaint().to_string()),
        ("History of Past Illness", record.history.clone()),
    ];
    if record.record_type == PatientType::Employee {
        rows.push(("Civil Status", record.civil_status.clone()));
        rows.push(("Department", record.department.clone()));
    }

    let label_width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    let mut doc = format!("Patient History: {}\n", record.display_name());
    doc.push_str(&format!("Generated: {}\n\n", generated_at()));
    for (label, value) in rows {
        doc.push_str(&format!("{:<width$}  {}\n", label, value, width = label_width));
    }
    doc
}

/// Writes a table print document to `path`.
pub fn print_table(
    title: &str,
    fields: &[FieldSpec],
    records: &[PatientRecord],
    path: &Path,
) -> Result<()> {
    std::fs::write(path, table_document(title, fields, records))
        .with_context(|| format!("Failed to write print document {}", path.display()))
}

/// Writes a single-record history print document to `path`.
pub fn print_record(record: &PatientRecord, path: &Path) -> Result<()> {
    std::fs::write(path, record_document(record))
        .with_context(|| format!("Failed to write print document {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::all_record_fields;
    use crate::models::Sex;

    fn employee() -> PatientRecord {
        PatientRecord {
            id: 5,
            record_type: PatientType::Employee,
            saved_by: "u1".into(),
            first_name: "Jose".into(),
            middle_name: String::new(),
            last_name: "Lim".into(),
            patient_age: "29".into(),
            sex: Some(Sex::M),
            patient_address: String::new(),
            civil_status: "Single".into(),
            department: "Radiology".into(),
            walk_in_date: "2025-02-02".into(),
            chief_complaint: "Fever".into(),
            other_chief_complaint: String::new(),
            history: String::new(),
            medication1: "Paracetamol".into(),
            other_medication: String::new(),
            medication2: String::new(),
            timestamp: String::new(),
        }
    }

    #[test]
    fn table_document_aligns_headers_and_rows() {
        let fields = all_record_fields(None);
        let doc = table_document("All Patient Records", &fields, &[employee()]);
        assert!(doc.starts_with("All Patient Records\n"));
        assert!(doc.contains("Patient ID"));
        assert!(doc.contains("Lim, Jose"));
        assert!(doc.contains("Male"));
    }

    #[test]
    fn record_document_includes_employee_rows() {
        let doc = record_document(&employee());
        assert!(doc.contains("Patient History: Lim, Jose"));
        assert!(doc.contains("Civil Status"));
        assert!(doc.contains("Radiology"));

        let mut guest = employee();
        guest.record_type = PatientType::Guest;
        let doc = record_document(&guest);
        assert!(!doc.contains("Civil Status"));
    }
}
