//! Field validation for admission input.
//!
//! # Responsibility
//! - Provide total, side-effect-free predicates over raw field strings.
//! - Convert a raw `AdmissionForm` into a typed `AdmissionRecord`.
//!
//! # Invariants
//! - Checks never panic and never touch storage.
//! - Email suffix matching is case-sensitive against `EMAIL_SUFFIXES`.
//! - Check order is email, phone, completeness, then choice parsing.

use crate::model::admission::{AdmissionForm, AdmissionRecord, FormField, Gender, Stream};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Accepted top-level suffixes after the final `.` of an email.
pub const EMAIL_SUFFIXES: &[&str] = &["com", "in"];

/// Required dialing prefix for contact numbers.
pub const PHONE_PREFIX: &str = "+91";

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+91[0-9]{10}$").expect("valid phone regex"));

/// Recoverable input error. Aborts the operation with no side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidEmail,
    InvalidPhone,
    MissingField(FormField),
    InvalidChoice { field: FormField, value: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail => {
                write!(f, "Please enter a valid email address ending with .com or .in")
            }
            Self::InvalidPhone => {
                write!(f, "Please enter a valid phone number starting with +91")
            }
            Self::MissingField(_) => write!(f, "All fields are required!"),
            Self::InvalidChoice { field, value } => {
                write!(f, "`{value}` is not a valid {}", field.label().to_lowercase())
            }
        }
    }
}

impl Error for ValidationError {}

/// Returns whether `email` has an `@`, a `.`, and an allowed final suffix.
pub fn is_valid_email(email: &str) -> bool {
    if !email.contains('@') || !email.contains('.') {
        return false;
    }
    email
        .rsplit('.')
        .next()
        .is_some_and(|suffix| EMAIL_SUFFIXES.contains(&suffix))
}

/// Returns whether `contact` is `+91` followed by exactly ten digits.
pub fn is_valid_phone(contact: &str) -> bool {
    PHONE_RE.is_match(contact)
}

/// Returns whether every one of the five form fields is non-empty.
pub fn is_complete(form: &AdmissionForm) -> bool {
    first_missing_field(form).is_none()
}

/// Validates raw form input and builds a typed record.
///
/// # Errors
/// - `InvalidEmail` / `InvalidPhone` when the text predicates fail.
/// - `MissingField` for the first empty field in display order.
/// - `InvalidChoice` when gender or stream is not a known label.
pub fn validate_form(form: &AdmissionForm) -> Result<AdmissionRecord, ValidationError> {
    if !is_valid_email(&form.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !is_valid_phone(&form.contact) {
        return Err(ValidationError::InvalidPhone);
    }
    if let Some(field) = first_missing_field(form) {
        return Err(ValidationError::MissingField(field));
    }

    let gender = Gender::parse(&form.gender).ok_or_else(|| ValidationError::InvalidChoice {
        field: FormField::Gender,
        value: form.gender.clone(),
    })?;
    let stream = Stream::parse(&form.stream).ok_or_else(|| ValidationError::InvalidChoice {
        field: FormField::Stream,
        value: form.stream.clone(),
    })?;

    Ok(AdmissionRecord {
        name: form.name.clone(),
        email: form.email.clone(),
        contact: form.contact.clone(),
        gender,
        stream,
    })
}

fn first_missing_field(form: &AdmissionForm) -> Option<FormField> {
    FormField::ALL
        .into_iter()
        .find(|field| form.field(*field).is_empty())
}
