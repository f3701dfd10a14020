//! Data models for MediView.
//!
//! A single canonical [`PatientRecord`] schema is shared by every screen,
//! export, and print document. On disk the fields keep the camelCase layout
//! produced by the record-entry form (`savedBy`, `walkInDate`, ...), with the
//! patient classification stored under the key `type`.

use serde::{Deserialize, Serialize};

/// Sentinel value for the chief-complaint and medication dropdowns; when a
/// field holds it, the companion free-text field carries the real value.
pub const OTHER_SENTINEL: &str = "Other";

/// Classification of a patient record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientType {
    Guest,
    Employee,
}

impl PatientType {
    /// The lowercase storage form, also used in export file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientType::Guest => "guest",
            PatientType::Employee => "employee",
        }
    }

    /// Capitalized form for titles ("View My Guest Records").
    pub fn label(&self) -> &'static str {
        match self {
            PatientType::Guest => "Guest",
            PatientType::Employee => "Employee",
        }
    }
}

/// Patient sex as recorded by the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    M,
    F,
}

impl Sex {
    pub fn humanize(&self) -> &'static str {
        match self {
            Sex::M => "Male",
            Sex::F => "Female",
        }
    }
}

/// One patient visit entry in the shared record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    /// Unique within the store.
    pub id: u64,
    #[serde(rename = "type")]
    pub record_type: PatientType,
    /// Username of the user who saved the record.
    pub saved_by: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub patient_age: String,
    #[serde(default)]
    pub sex: Option<Sex>,
    #[serde(default)]
    pub patient_address: String,
    /// Employee-only; empty for guests.
    #[serde(default)]
    pub civil_status: String,
    /// Employee-only; empty for guests.
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub walk_in_date: String,
    /// May hold the sentinel "Other"; see [`PatientRecord::resolved_complaint`].
    #[serde(default)]
    pub chief_complaint: String,
    #[serde(default)]
    pub other_chief_complaint: String,
    #[serde(default)]
    pub history: String,
    /// Primary medication slot; may hold the sentinel "Other".
    #[serde(default)]
    pub medication1: String,
    #[serde(default)]
    pub other_medication: String,
    /// Secondary medication slot.
    #[serde(default)]
    pub medication2: String,
    /// Free-form creation time, set by the entry form.
    #[serde(default)]
    pub timestamp: String,
}

impl PatientRecord {
    /// Formatted full name for display: "Last, First Middle".
    pub fn display_name(&self) -> String {
        let mut given = self.first_name.trim().to_string();
        let middle = self.middle_name.trim();
        if !middle.is_empty() {
            if !given.is_empty() {
                given.push(' ');
            }
            given.push_str(middle);
        }
        let last = self.last_name.trim();
        match (last.is_empty(), given.is_empty()) {
            (false, false) => format!("{}, {}", last, given),
            (false, true) => last.to_string(),
            (true, _) => given,
        }
    }

    /// Concatenated "first middle last" used for history search matching.
    pub fn search_name(&self) -> String {
        [
            self.first_name.trim(),
            self.middle_name.trim(),
            self.last_name.trim(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }

    pub fn sex_label(&self) -> &'static str {
        self.sex.map(|s| s.humanize()).unwrap_or("")
    }

    /// Chief complaint with the "Other" sentinel substituted by its
    /// free-text companion, when present.
    pub fn resolved_complaint(&self) -> &str {
        if self.chief_complaint == OTHER_SENTINEL && !self.other_chief_complaint.is_empty() {
            &self.other_chief_complaint
        } else {
            &self.chief_complaint
        }
    }

    /// Primary medication with the "Other" sentinel substituted.
    pub fn resolved_medication(&self) -> &str {
        if self.medication1 == OTHER_SENTINEL && !self.other_medication.is_empty() {
            &self.other_medication
        } else {
            &self.medication1
        }
    }

    /// Both medication slots joined with ", ", skipping empty values.
    pub fn combined_medication(&self) -> String {
        [self.resolved_medication(), self.medication2.as_str()]
            .iter()
            .filter(|m| !m.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PatientRecord {
        PatientRecord {
            id: 1,
            record_type: PatientType::Guest,
            saved_by: "u1".into(),
            first_name: "Ana".into(),
            middle_name: "B.".into(),
            last_name: "Cruz".into(),
            patient_age: "34".into(),
            sex: Some(Sex::M),
            patient_address: String::new(),
            civil_status: String::new(),
            department: String::new(),
            walk_in_date: "2025-01-15".into(),
            chief_complaint: "Headache".into(),
            other_chief_complaint: String::new(),
            history: String::new(),
            medication1: "Paracetamol".into(),
            other_medication: String::new(),
            medication2: String::new(),
            timestamp: "2025-01-15 08:00".into(),
        }
    }

    #[test]
    fn display_name_skips_empty_parts() {
        let mut r = record();
        assert_eq!(r.display_name(), "Cruz, Ana B.");
        r.middle_name.clear();
        assert_eq!(r.display_name(), "Cruz, Ana");
        r.first_name.clear();
        assert_eq!(r.display_name(), "Cruz");
        r.last_name.clear();
        assert_eq!(r.display_name(), "");
    }

    #[test]
    fn resolved_complaint_substitutes_other() {
        let mut r = record();
        r.chief_complaint = OTHER_SENTINEL.into();
        r.other_chief_complaint = "Dizziness".into();
        assert_eq!(r.resolved_complaint(), "Dizziness");

        // Sentinel with an empty companion stays as-is.
        r.other_chief_complaint.clear();
        assert_eq!(r.resolved_complaint(), "Other");
    }

    #[test]
    fn combined_medication_joins_non_empty_slots() {
        let mut r = record();
        assert_eq!(r.combined_medication(), "Paracetamol");
        r.medication2 = "Ibuprofen".into();
        assert_eq!(r.combined_medication(), "Paracetamol, Ibuprofen");
        r.medication1 = OTHER_SENTINEL.into();
        r.other_medication = "Loratadine".into();
        assert_eq!(r.combined_medication(), "Loratadine, Ibuprofen");
    }

    #[test]
    fn camel_case_storage_layout() {
        let json = serde_json::to_string(&record()).unwrap();
        assert!(json.contains("\"type\":\"guest\""));
        assert!(json.contains("\"savedBy\":\"u1\""));
        assert!(json.contains("\"walkInDate\":\"2025-01-15\""));
        assert!(json.contains("\"sex\":\"M\""));
    }

    #[test]
    fn missing_fields_deserialize_empty() {
        let r: PatientRecord =
            serde_json::from_str(r#"{"id":7,"type":"employee","savedBy":"u2"}"#).unwrap();
        assert_eq!(r.record_type, PatientType::Employee);
        assert_eq!(r.sex_label(), "");
        assert_eq!(r.patient_age, "");
        assert_eq!(r.combined_medication(), "");
    }
}
