//! Presentation controller for the admission screen.
//!
//! # Responsibility
//! - Own the screen state: the entry form and the current display view.
//! - Map user actions onto service calls and report outcomes as notices.
//!
//! # Invariants
//! - A failed action leaves the state unchanged, except that a failed
//!   listing switches the view to `View::Unavailable`.
//! - The controller never panics on store or validation failures.
//! - Business rules live in the service and validator, not here.

use crate::model::admission::{AdmissionEntry, AdmissionForm, DocumentId};
use crate::repo::admission_repo::AdmissionRepository;
use crate::service::admission_service::{AdmissionService, ServiceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// User-facing outcome message, one per dialog the screen would show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: &'static str,
    pub message: String,
}

impl Notice {
    fn info(title: &'static str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title,
            message: message.into(),
        }
    }

    fn error(title: &'static str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// What the display area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Nothing loaded yet.
    Placeholder,
    Records(Vec<AdmissionEntry>),
    /// Listing failed; there is no data to show, which is not the same as
    /// an empty list.
    Unavailable,
    Editing { id: DocumentId, draft: AdmissionForm },
}

pub const PLACEHOLDER_TEXT: &str = "Select 'View All Records' to load data.";

/// Process-lifetime screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub form: AdmissionForm,
    pub view: View,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            form: AdmissionForm::default(),
            view: View::Placeholder,
        }
    }
}

pub struct AdmissionController<R: AdmissionRepository> {
    service: AdmissionService<R>,
    state: AppState,
}

impl<R: AdmissionRepository> AdmissionController<R> {
    pub fn new(service: AdmissionService<R>) -> Self {
        Self {
            service,
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn form_mut(&mut self) -> &mut AdmissionForm {
        &mut self.state.form
    }

    /// Returns the staged draft while in edit mode.
    pub fn draft_mut(&mut self) -> Option<&mut AdmissionForm> {
        match &mut self.state.view {
            View::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Submits the entry form.
    ///
    /// On success the form is cleared and the list refreshed.
    pub fn submit(&mut self) -> Vec<Notice> {
        match self.service.submit(&self.state.form) {
            Ok(_) => {
                self.state.form.clear();
                let mut notices = vec![Notice::info(
                    "Success",
                    "Student Registered Successfully!",
                )];
                notices.extend(self.view_records());
                notices
            }
            Err(ServiceError::Validation(err)) => vec![Notice::error("Error", err.to_string())],
            Err(ServiceError::Repo(err)) => vec![Notice::error(
                "Database Error",
                format!("Could not upload: {err}"),
            )],
        }
    }

    /// Re-queries the store and shows every record.
    pub fn view_records(&mut self) -> Vec<Notice> {
        match self.service.list_all() {
            Ok(entries) => {
                self.state.view = View::Records(entries);
                Vec::new()
            }
            Err(err) => {
                self.state.view = View::Unavailable;
                vec![Notice::error(
                    "Connection Error",
                    format!("Could not fetch data: {err}"),
                )]
            }
        }
    }

    /// Switches to edit mode for a record in the current list.
    pub fn begin_edit(&mut self, id: &DocumentId) -> Vec<Notice> {
        let staged = match &self.state.view {
            View::Records(entries) => entries
                .iter()
                .find(|entry| &entry.id == id)
                .map(|entry| AdmissionForm::from(&entry.record)),
            _ => None,
        };

        match staged {
            Some(draft) => {
                self.state.view = View::Editing {
                    id: id.clone(),
                    draft,
                };
                Vec::new()
            }
            None => vec![Notice::error(
                "Error",
                format!("Record {id} is not in the current list"),
            )],
        }
    }

    /// Saves the staged draft over its record, then refreshes the list.
    ///
    /// Validation or store failures keep edit mode so the draft survives.
    pub fn save_edit(&mut self) -> Vec<Notice> {
        let View::Editing { id, draft } = &self.state.view else {
            return vec![Notice::error("Error", "No record is being edited")];
        };

        match self.service.update(id, draft) {
            Ok(()) => {
                let mut notices = vec![Notice::info("Success", "Record Updated!")];
                notices.extend(self.view_records());
                notices
            }
            Err(ServiceError::Validation(err)) => vec![Notice::error("Error", err.to_string())],
            Err(ServiceError::Repo(err)) => vec![Notice::error(
                "Update Error",
                format!("Could not update: {err}"),
            )],
        }
    }

    /// Leaves edit mode without saving.
    pub fn cancel_edit(&mut self) -> Vec<Notice> {
        self.view_records()
    }

    /// Deletes a record once the user has confirmed, then refreshes.
    pub fn delete(&mut self, id: &DocumentId, confirmed: bool) -> Vec<Notice> {
        if !confirmed {
            return Vec::new();
        }

        match self.service.delete(id) {
            Ok(()) => self.view_records(),
            Err(err) => vec![Notice::error("Error", format!("Could not delete: {err}"))],
        }
    }
}
