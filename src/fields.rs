//! Table column definitions shared by the viewers, CSV export, and print
//! documents.
//!
//! Each column is a label plus an extractor; cells are either raw field
//! values, humanized enums (Sex), derived composites (full name, combined
//! medication), or resolved values where the "Other" sentinel substitutes a
//! free-text companion. Missing values render as empty strings.

use crate::models::{PatientRecord, PatientType};

/// One table column: a header label and a cell extractor.
pub struct FieldSpec {
    pub label: &'static str,
    pub extract: fn(&PatientRecord) -> String,
}

impl FieldSpec {
    const fn new(label: &'static str, extract: fn(&PatientRecord) -> String) -> Self {
        Self { label, extract }
    }
}

fn patient_id(r: &PatientRecord) -> String {
    r.id.to_string()
}

fn patient_name(r: &PatientRecord) -> String {
    r.display_name()
}

fn age(r: &PatientRecord) -> String {
    r.patient_age.clone()
}

fn sex(r: &PatientRecord) -> String {
    r.sex_label().to_string()
}

fn address(r: &PatientRecord) -> String {
    r.patient_address.clone()
}

fn civil_status(r: &PatientRecord) -> String {
    r.civil_status.clone()
}

fn department(r: &PatientRecord) -> String {
    r.department.clone()
}

fn walk_in_date(r: &PatientRecord) -> String {
    r.walk_in_date.clone()
}

fn chief_complaint(r: &PatientRecord) -> String {
    r.resolved_complaint().to_string()
}

fn history(r: &PatientRecord) -> String {
    r.history.clone()
}

fn medication(r: &PatientRecord) -> String {
    r.combined_medication()
}

/// Columns for the single-type viewer. Employees carry the Patient ID,
/// Civil Status, and Department columns; guests do not.
pub fn my_record_fields(record_type: PatientType) -> Vec<FieldSpec> {
    let mut fields = Vec::new();
    if record_type == PatientType::Employee {
        fields.push(FieldSpec::new("Patient ID", patient_id));
    }
    fields.push(FieldSpec::new("Patient Name", patient_name));
    fields.push(FieldSpec::new("Age", age));
    fields.push(FieldSpec::new("Sex", sex));
    fields.push(FieldSpec::new("Address", address));
    if record_type == PatientType::Employee {
        fields.push(FieldSpec::new("Civil Status", civil_status));
        fields.push(FieldSpec::new("Department", department));
    }
    fields.push(FieldSpec::new("Walk-in Date", walk_in_date));
    fields.push(FieldSpec::new("Chief Complaint", chief_complaint));
    fields.push(FieldSpec::new("History of Past Illness", history));
    fields.push(FieldSpec::new("Medication", medication));
    fields
}

/// Columns for the all-records viewer. The employee-only columns are shown
/// for every filter except guest-only.
pub fn all_record_fields(filter: Option<PatientType>) -> Vec<FieldSpec> {
    let mut fields = vec![
        FieldSpec::new("Patient ID", patient_id),
        FieldSpec::new("Patient Name", patient_name),
        FieldSpec::new("Age", age),
        FieldSpec::new("Sex", sex),
        FieldSpec::new("Address", address),
        FieldSpec::new("Walk-in Date", walk_in_date),
        FieldSpec::new("Chief Complaint", chief_complaint),
        FieldSpec::new("History of Past Illness", history),
        FieldSpec::new("Medication", medication),
    ];
    if filter != Some(PatientType::Guest) {
        fields.push(FieldSpec::new("Civil Status", civil_status));
        fields.push(FieldSpec::new("Department", department));
    }
    fields
}

/// Columns for the history-search results table.
pub fn history_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("Patient Name", patient_name),
        FieldSpec::new("Walk-in Date", walk_in_date),
        FieldSpec::new("Medication", medication),
    ]
}

/// Header labels for a field list.
pub fn header_labels(fields: &[FieldSpec]) -> Vec<&'static str> {
    fields.iter().map(|f| f.label).collect()
}

/// Cell values of one record for a field list.
pub fn row_values(fields: &[FieldSpec], record: &PatientRecord) -> Vec<String> {
    fields.iter().map(|f| (f.extract)(record)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sex;

    fn guest() -> PatientRecord {
        PatientRecord {
            id: 1,
            record_type: PatientType::Guest,
            saved_by: "u1".into(),
            first_name: "Ana".into(),
            middle_name: String::new(),
            last_name: "Cruz".into(),
            patient_age: "34".into(),
            sex: Some(Sex::M),
            patient_address: "Somewhere St.".into(),
            civil_status: String::new(),
            department: String::new(),
            walk_in_date: "2025-01-15".into(),
            chief_complaint: "Other".into(),
            other_chief_complaint: "Dizziness".into(),
            history: String::new(),
            medication1: "Paracetamol".into(),
            other_medication: String::new(),
            medication2: "Ibuprofen".into(),
            timestamp: "2025-01-15 08:00".into(),
        }
    }

    #[test]
    fn guest_columns_exclude_employee_fields() {
        let labels = header_labels(&my_record_fields(PatientType::Guest));
        assert!(!labels.contains(&"Patient ID"));
        assert!(!labels.contains(&"Civil Status"));
        assert!(!labels.contains(&"Department"));
        assert_eq!(labels[0], "Patient Name");

        let labels = header_labels(&my_record_fields(PatientType::Employee));
        assert_eq!(labels[0], "Patient ID");
        assert!(labels.contains(&"Civil Status"));
    }

    #[test]
    fn all_records_guest_filter_drops_employee_columns() {
        let labels = header_labels(&all_record_fields(Some(PatientType::Guest)));
        assert!(!labels.contains(&"Civil Status"));

        let labels = header_labels(&all_record_fields(None));
        assert!(labels.contains(&"Civil Status"));
        assert!(labels.contains(&"Department"));
    }

    #[test]
    fn cells_render_humanized_and_resolved_values() {
        let fields = my_record_fields(PatientType::Guest);
        let values = row_values(&fields, &guest());
        let labels = header_labels(&fields);

        let cell = |label: &str| {
            let idx = labels.iter().position(|l| *l == label).unwrap();
            values[idx].clone()
        };
        assert_eq!(cell("Sex"), "Male");
        assert_eq!(cell("Chief Complaint"), "Dizziness");
        assert_eq!(cell("Medication"), "Paracetamol, Ibuprofen");
        assert_eq!(cell("History of Past Illness"), "");
    }
}
