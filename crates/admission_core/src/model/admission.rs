//! Admission domain model.
//!
//! # Responsibility
//! - Define the flat admission record and its raw form input.
//! - Provide the closed choice sets for gender and stream.
//!
//! # Invariants
//! - `DocumentId` is assigned by the store and never user-supplied.
//! - An `AdmissionRecord` written to storage must pass `validate()`.
//! - Field values round-trip through storage without transformation.

use crate::validation::{self, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Opaque identifier assigned by the document store on creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wraps a store-issued identifier.
    ///
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(value: impl AsRef<str>) -> Option<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// Wraps an id read from or issued by the store as-is.
    pub(crate) fn from_store(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Applicant gender as recorded on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    /// Parses the exact, case-sensitive label.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Male" => Some(Self::Male),
            "Female" => Some(Self::Female),
            _ => None,
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Academic stream the student applies for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stream {
    Science,
    Arts,
    Commerce,
}

impl Stream {
    pub const ALL: [Stream; 3] = [Stream::Science, Stream::Arts, Stream::Commerce];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Science => "Science",
            Self::Arts => "Arts",
            Self::Commerce => "Commerce",
        }
    }

    /// Parses the exact, case-sensitive label.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Science" => Some(Self::Science),
            "Arts" => Some(Self::Arts),
            "Commerce" => Some(Self::Commerce),
            _ => None,
        }
    }
}

impl Display for Stream {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated admission record without store identity.
///
/// Built from an `AdmissionForm` through `validation::validate_form`, or
/// read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionRecord {
    pub name: String,
    pub email: String,
    pub contact: String,
    pub gender: Gender,
    pub stream: Stream,
}

impl AdmissionRecord {
    /// Re-checks text field rules.
    ///
    /// Choice fields are guaranteed by their types.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !validation::is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if !validation::is_valid_phone(&self.contact) {
            return Err(ValidationError::InvalidPhone);
        }
        if self.name.is_empty() {
            return Err(ValidationError::MissingField(FormField::Name));
        }
        Ok(())
    }
}

/// A stored record paired with its store-assigned identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionEntry {
    pub id: DocumentId,
    pub record: AdmissionRecord,
}

/// Names of the five form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Contact,
    Gender,
    Stream,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Email,
        FormField::Contact,
        FormField::Gender,
        FormField::Stream,
    ];

    /// Column label, which is also the stored document key.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Contact => "Contact",
            Self::Gender => "Gender",
            Self::Stream => "Stream",
        }
    }
}

impl Display for FormField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw, unvalidated form input. Empty strings mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdmissionForm {
    pub name: String,
    pub email: String,
    pub contact: String,
    pub gender: String,
    pub stream: String,
}

impl AdmissionForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Contact => &self.contact,
            FormField::Gender => &self.gender,
            FormField::Stream => &self.stream,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Contact => self.contact = value,
            FormField::Gender => self.gender = value,
            FormField::Stream => self.stream = value,
        }
    }

    /// Resets every field to unset.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl From<&AdmissionRecord> for AdmissionForm {
    fn from(record: &AdmissionRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            contact: record.contact.clone(),
            gender: record.gender.as_str().to_string(),
            stream: record.stream.as_str().to_string(),
        }
    }
}
