use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::form::catalog::{ACKNOWLEDGMENTS, COMPANY_NAME, INTRO_TEXT, JOB_TITLE};
use crate::form::models::{AckKey, ApplicationState, Field, ParsedResumeData, UploadStatus};
use crate::form::session::{import_resume, Phase, SubmissionReceipt};
use crate::form::validation::{eligibility, Eligibility};
use crate::state::AppState;

/// Full view of the session, returned by every state-changing endpoint so the
/// surface can re-render without a second round trip.
#[derive(Debug, Serialize)]
pub struct ApplicationView {
    pub phase: Phase,
    pub upload_status: UploadStatus,
    pub form: ApplicationState,
    pub eligibility: Eligibility,
}

#[derive(Debug, Serialize)]
pub struct PostingView {
    pub job_title: &'static str,
    pub company_name: &'static str,
    pub intro_text: &'static str,
    pub acknowledgments: Vec<AcknowledgmentView>,
}

#[derive(Debug, Serialize)]
pub struct AcknowledgmentView {
    pub key: AckKey,
    pub text: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct FieldUpdate {
    pub field: Field,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct AcknowledgmentUpdate {
    pub key: AckKey,
    pub confirmed: bool,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ResumeImportResponse {
    pub upload_status: UploadStatus,
    pub message: &'static str,
    pub parsed: ParsedResumeData,
    pub form: ApplicationState,
    pub eligibility: Eligibility,
}

/// GET /api/v1/posting
pub async fn handle_get_posting() -> Json<PostingView> {
    Json(PostingView {
        job_title: JOB_TITLE,
        company_name: COMPANY_NAME,
        intro_text: INTRO_TEXT,
        acknowledgments: ACKNOWLEDGMENTS
            .iter()
            .map(|ack| AcknowledgmentView {
                key: ack.key,
                text: ack.text,
            })
            .collect(),
    })
}

/// GET /api/v1/application
pub async fn handle_get_application(State(state): State<AppState>) -> Json<ApplicationView> {
    let session = state.session.lock().await;
    Json(view_of(&session))
}

/// PATCH /api/v1/application/fields
pub async fn handle_update_field(
    State(state): State<AppState>,
    Json(req): Json<FieldUpdate>,
) -> Result<Json<ApplicationView>, AppError> {
    let mut session = state.session.lock().await;
    session.update_field(req.field, req.value)?;
    Ok(Json(view_of(&session)))
}

/// PATCH /api/v1/application/acknowledgments
pub async fn handle_update_acknowledgment(
    State(state): State<AppState>,
    Json(req): Json<AcknowledgmentUpdate>,
) -> Result<Json<ApplicationView>, AppError> {
    let mut session = state.session.lock().await;
    session.update_flag(req.key, req.confirmed)?;
    Ok(Json(view_of(&session)))
}

/// POST /api/v1/application/save
pub async fn handle_save(
    State(state): State<AppState>,
) -> Result<Json<SaveResponse>, AppError> {
    let session = state.session.lock().await;
    let message = session.save(state.store.as_ref())?;
    Ok(Json(SaveResponse { message }))
}

/// POST /api/v1/application/submit
pub async fn handle_submit(
    State(state): State<AppState>,
) -> Result<Json<SubmissionReceipt>, AppError> {
    let mut session = state.session.lock().await;
    let receipt = session.submit(state.store.as_ref())?;
    Ok(Json(receipt))
}

/// POST /api/v1/application/resume
///
/// Multipart upload with a single `file` part. Runs the upload lifecycle end
/// to end: type/size gate, extraction, reconciliation.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeImportResponse>, AppError> {
    let mut file: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() == Some("file") {
            let mime = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Could not read the file: {e}")))?;
            file = Some((mime, data));
        }
    }
    let (mime, data) =
        file.ok_or_else(|| AppError::Validation("A \"file\" part is required.".to_string()))?;

    let parsed = import_resume(&state.session, state.extractor.as_ref(), &data, &mime).await?;

    let session = state.session.lock().await;
    Ok(Json(ResumeImportResponse {
        upload_status: session.upload,
        message: "Auto-filled! Please review fields below.",
        parsed,
        form: session.form.clone(),
        eligibility: eligibility(&session.form),
    }))
}

fn view_of(session: &crate::form::session::Session) -> ApplicationView {
    ApplicationView {
        phase: session.phase,
        upload_status: session.upload,
        form: session.form.clone(),
        eligibility: eligibility(&session.form),
    }
}
