//! The structured résumé decoded from the model's response.
//!
//! Every field is optional: models routinely omit keys they could not find,
//! and the record must mirror what was actually decoded. Defaults (`"N/A"`)
//! are substituted only when a report is rendered, never here.

use serde::{Deserialize, Serialize};

/// Placeholder shown for any field the model did not return.
pub const NOT_AVAILABLE: &str = "N/A";

/// Canonical structured representation of a résumé.
///
/// Absent fields are skipped when serialising, so decoding the display JSON
/// yields an equal record. Top-level keys outside the schema are kept in
/// [`CandidateRecord::extra`] instead of being dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_details: Option<ContactDetails>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<EducationEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_experience: Option<Vec<WorkEntry>>,

    /// Keys the model returned that are not part of the schema.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// One education item, in the order the résumé lists them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
}

/// One work-experience item, in the order the résumé lists them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
}

/// Return the field value, or [`NOT_AVAILABLE`] when it is absent.
pub fn or_na(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or(NOT_AVAILABLE)
}

impl CandidateRecord {
    pub fn email(&self) -> &str {
        self.contact_details
            .as_ref()
            .map(|c| or_na(&c.email))
            .unwrap_or(NOT_AVAILABLE)
    }

    pub fn phone(&self) -> &str {
        self.contact_details
            .as_ref()
            .map(|c| or_na(&c.phone))
            .unwrap_or(NOT_AVAILABLE)
    }

    /// Education entries, empty when the key was absent.
    pub fn education_entries(&self) -> &[EducationEntry] {
        self.education.as_deref().unwrap_or(&[])
    }

    pub fn work_entries(&self) -> &[WorkEntry] {
        self.work_experience.as_deref().unwrap_or(&[])
    }

    pub fn skill_list(&self) -> &[String] {
        self.skills.as_deref().unwrap_or(&[])
    }
}
