//! CSV export of record tables and complaint/medication stats.
//!
//! Every value is quoted and embedded quotes are doubled, matching the
//! download format of the original clinic tooling.

use crate::fields::FieldSpec;
use crate::models::{PatientRecord, PatientType};
use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};
use std::path::Path;

/// File name for a single-type records export: `{type}_records_{user}.csv`.
pub fn records_file_name(record_type: PatientType, username: &str) -> String {
    format!("{}_records_{}.csv", record_type.as_str(), username)
}

/// File name for a single-type stats export: `{type}_stats_{user}.csv`.
pub fn stats_file_name(record_type: PatientType, username: &str) -> String {
    format!("{}_stats_{}.csv", record_type.as_str(), username)
}

/// File name for the all-records export.
pub const ALL_RECORDS_FILE_NAME: &str = "patient_records.csv";

fn writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))
}

/// Writes the given records as CSV: one header row from the field labels
/// plus "Timestamp", then one row per record in storage order.
pub fn export_records(
    fields: &[FieldSpec],
    records: &[PatientRecord],
    path: &Path,
) -> Result<()> {
    let mut wtr = writer(path)?;

    let mut header: Vec<&str> = fields.iter().map(|f| f.label).collect();
    header.push("Timestamp");
    wtr.write_record(&header)?;

    for record in records {
        let mut row: Vec<String> = fields.iter().map(|f| (f.extract)(record)).collect();
        row.push(record.timestamp.clone());
        wtr.write_record(&row)?;
    }

    wtr.flush()
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Counts occurrences of non-empty values, first-seen order.
fn tally<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        if value.is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(v, _)| v.as_str() == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value.to_string(), 1)),
        }
    }
    counts
}

/// Writes the complaint/medication stats CSV (`Category,Item,Count`) over
/// the given record set. Chief complaints and medications are counted on
/// their resolved values; empty resolved values are skipped.
pub fn export_stats(records: &[PatientRecord], path: &Path) -> Result<()> {
    let mut wtr = writer(path)?;
    wtr.write_record(["Category", "Item", "Count"])?;

    for (complaint, count) in tally(records.iter().map(|r| r.resolved_complaint())) {
        wtr.write_record(["Chief Complaint", &complaint, &count.to_string()])?;
    }
    for (medication, count) in tally(records.iter().map(|r| r.resolved_medication())) {
        wtr.write_record(["Medication", &medication, &count.to_string()])?;
    }

    wtr.flush()
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::my_record_fields;
    use crate::models::{Sex, OTHER_SENTINEL};
    use std::path::PathBuf;

    fn temp_csv(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "mediview_export_{}_{}.csv",
            name,
            std::process::id()
        ))
    }

    fn record(id: u64, complaint: &str, medication: &str) -> PatientRecord {
        PatientRecord {
            id,
            record_type: PatientType::Guest,
            saved_by: "u1".into(),
            first_name: "Ana".into(),
            middle_name: String::new(),
            last_name: "Cruz".into(),
            patient_age: "34".into(),
            sex: Some(Sex::F),
            patient_address: "12 \"Quoted\" Ave".into(),
            civil_status: String::new(),
            department: String::new(),
            walk_in_date: "2025-01-15".into(),
            chief_complaint: complaint.into(),
            other_chief_complaint: String::new(),
            history: String::new(),
            medication1: medication.into(),
            other_medication: String::new(),
            medication2: String::new(),
            timestamp: "2025-01-15 08:00".into(),
        }
    }

    #[test]
    fn records_csv_round_trips() {
        let path = temp_csv("round_trip");
        let fields = my_record_fields(PatientType::Guest);
        let records = vec![record(1, "Headache", "Paracetamol")];

        export_records(&fields, &records, &path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.get(0), Some("Patient Name"));
        assert_eq!(headers.iter().last(), Some("Timestamp"));

        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.get(0), Some("Cruz, Ana"));
        assert_eq!(row.get(2), Some("Female"));
        // Embedded quotes survive the quote-escaping round trip.
        assert_eq!(row.get(3), Some("12 \"Quoted\" Ave"));
        assert_eq!(row.iter().last(), Some("2025-01-15 08:00"));

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"12 \"\"Quoted\"\" Ave\""));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn stats_counts_resolved_values_and_skip_empties() {
        let path = temp_csv("stats");
        let mut with_other = record(1, OTHER_SENTINEL, "");
        with_other.other_chief_complaint = "Dizziness".into();
        let records = vec![
            with_other,
            record(2, "Headache", "Paracetamol"),
            record(3, "Headache", "Paracetamol"),
            record(4, "", ""),
        ];

        export_stats(&records, &path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();

        let complaints: Vec<_> = rows
            .iter()
            .filter(|r| r.get(0) == Some("Chief Complaint"))
            .collect();
        let medications: Vec<_> = rows
            .iter()
            .filter(|r| r.get(0) == Some("Medication"))
            .collect();

        // Counts sum to the number of non-empty resolved values per category.
        assert_eq!(complaints.len(), 2);
        assert_eq!(complaints[0].get(1), Some("Dizziness"));
        assert_eq!(complaints[1].get(1), Some("Headache"));
        assert_eq!(complaints[1].get(2), Some("2"));

        assert_eq!(medications.len(), 1);
        assert_eq!(medications[0].get(1), Some("Paracetamol"));
        assert_eq!(medications[0].get(2), Some("2"));
        let _ = std::fs::remove_file(&path);
    }
}
