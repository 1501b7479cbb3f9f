//! Session controller — owns the live application record and drives its
//! lifecycle: draft restore on startup, save on demand, the resume-import
//! slot, and the one-way Editing → Submitted transition.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{self, ExtractError, ResumeExtractor};
use crate::form::catalog::{COMPANY_NAME, JOB_TITLE};
use crate::form::models::{AckKey, ApplicationState, Field, ParsedResumeData, UploadStatus};
use crate::form::reconcile::apply_parsed_resume;
use crate::form::validation::eligibility;
use crate::store::{drafts, KvStore};

/// Shown after a successful save; the surface displays it transiently.
pub const SAVE_MESSAGE: &str =
    "Progress saved! You can close this tab and resume your application later.";

const INELIGIBLE_MESSAGE: &str = "Please complete all required fields, select \"Full-Time\", \
     and check all acknowledgments to proceed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Editing,
    Submitted,
}

/// Returned once on the Editing → Submitted transition.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub application_id: Uuid,
    pub received_at: DateTime<Utc>,
    pub message: String,
}

pub struct Session {
    pub form: ApplicationState,
    pub phase: Phase,
    pub upload: UploadStatus,
}

impl Session {
    /// Starts a session from defaults overlaid with any stored draft.
    pub fn start(store: &dyn KvStore) -> Self {
        Self {
            form: drafts::load_draft(store),
            phase: Phase::Editing,
            upload: UploadStatus::Idle,
        }
    }

    fn ensure_editing(&self) -> Result<(), AppError> {
        match self.phase {
            Phase::Editing => Ok(()),
            Phase::Submitted => Err(AppError::Conflict(
                "This application has already been submitted.".to_string(),
            )),
        }
    }

    pub fn update_field(&mut self, field: Field, value: String) -> Result<(), AppError> {
        self.ensure_editing()?;
        self.form
            .update_field(field, value)
            .map_err(|e| AppError::Validation(e.to_string()))
    }

    pub fn update_flag(&mut self, key: AckKey, confirmed: bool) -> Result<(), AppError> {
        self.ensure_editing()?;
        self.form.update_flag(key, confirmed);
        Ok(())
    }

    /// Persists the current snapshot. Not a phase transition — saving is
    /// available at any point while editing.
    pub fn save(&self, store: &dyn KvStore) -> Result<&'static str, AppError> {
        self.ensure_editing()?;
        drafts::save_draft(store, &self.form)?;
        Ok(SAVE_MESSAGE)
    }

    /// Gated submit. An ineligible attempt is a rejected no-op; an eligible
    /// one clears the stored draft so a completed application cannot
    /// resurrect, then moves the session to its terminal phase.
    pub fn submit(&mut self, store: &dyn KvStore) -> Result<SubmissionReceipt, AppError> {
        self.ensure_editing()?;
        if !eligibility(&self.form).can_submit {
            return Err(AppError::Validation(INELIGIBLE_MESSAGE.to_string()));
        }
        drafts::clear_draft(store)?;
        self.phase = Phase::Submitted;
        let receipt = SubmissionReceipt {
            application_id: Uuid::new_v4(),
            received_at: Utc::now(),
            message: format!(
                "Your application for the {JOB_TITLE} position at {COMPANY_NAME} has been \
                 received. We appreciate the time you took to complete the transparency \
                 acknowledgments."
            ),
        };
        info!(application_id = %receipt.application_id, "application submitted");
        Ok(receipt)
    }

    /// Admits a file into the upload lifecycle. A type or size problem is
    /// reported immediately and leaves the lifecycle state untouched; a second
    /// file while one is being read is rejected outright.
    pub fn begin_import(&mut self, mime: &str, len: usize) -> Result<(), AppError> {
        self.ensure_editing()?;
        if self.upload == UploadStatus::Parsing {
            return Err(AppError::Conflict(
                "A resume is already being read. Please wait for it to finish.".to_string(),
            ));
        }
        extract::check_upload(mime, len)?;
        self.upload = UploadStatus::Uploading;
        Ok(())
    }

    /// The file's bytes are in hand and on their way to the extractor.
    pub fn mark_parsing(&mut self) {
        self.upload = UploadStatus::Parsing;
    }

    /// Applies a finished import. Success reconciles the overlay into the
    /// form; failure leaves the form exactly as it was.
    pub fn complete_import(
        &mut self,
        outcome: Result<ParsedResumeData, ExtractError>,
    ) -> Result<ParsedResumeData, AppError> {
        match outcome {
            Ok(parsed) => {
                apply_parsed_resume(&mut self.form, &parsed);
                self.upload = UploadStatus::Success;
                Ok(parsed)
            }
            Err(e) => {
                self.upload = UploadStatus::Error;
                Err(AppError::Extraction(e))
            }
        }
    }
}

/// Runs the full upload lifecycle for one file: admit, extract, reconcile.
///
/// The session lock is released around the extraction call — the only
/// suspension point in the system — so the form stays editable and savable
/// while the document is read.
pub async fn import_resume(
    session: &Mutex<Session>,
    extractor: &dyn ResumeExtractor,
    bytes: &[u8],
    mime: &str,
) -> Result<ParsedResumeData, AppError> {
    {
        let mut session = session.lock().await;
        session.begin_import(mime, bytes.len())?;
        session.mark_parsing();
    }

    let outcome = extractor.extract(bytes, mime).await;

    session.lock().await.complete_import(outcome)
}
