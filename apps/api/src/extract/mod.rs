//! Resume extraction — the single point of entry for the document-understanding
//! call. No other module talks to the Gemini API.
//!
//! The adapter turns raw file bytes into a candidate `ParsedResumeData`
//! overlay and nothing else; merging the overlay into the form is the
//! reconciler's job.

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::form::models::ParsedResumeData;

pub mod prompts;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for resume extraction. Hardcoded to prevent drift.
pub const MODEL: &str = "gemini-2.5-flash";

/// Formats the remote service accepts. Word documents are deliberately absent;
/// applicants are asked to convert them to PDF.
pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "image/jpeg",
    "image/png",
    "image/webp",
];

pub const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("file is too large: {0} bytes (max {max})", max = MAX_FILE_BYTES)]
    TooLarge(usize),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("extraction returned empty content")]
    EmptyContent,
}

impl ExtractError {
    /// Inline advisory text shown next to the upload control. The form stays
    /// fully usable on every one of these paths.
    pub fn advisory(&self) -> &'static str {
        match self {
            ExtractError::UnsupportedFormat(_) => {
                "Please upload a PDF or Image file. Convert Word docs to PDF first."
            }
            ExtractError::TooLarge(_) => "File size is too large (Max 5MB).",
            _ => "We couldn't automatically read your resume. Please fill in the details manually.",
        }
    }
}

/// Type and size gate, checked before a file is allowed to start the upload
/// lifecycle and again by the adapter itself.
pub fn check_upload(mime: &str, len: usize) -> Result<(), ExtractError> {
    if !ACCEPTED_MIME_TYPES.contains(&mime) {
        return Err(ExtractError::UnsupportedFormat(mime.to_string()));
    }
    if len > MAX_FILE_BYTES {
        return Err(ExtractError::TooLarge(len));
    }
    Ok(())
}

/// The document-understanding boundary: bytes + declared MIME type in, a
/// best-effort partial overlay out. Carried in `AppState` as
/// `Arc<dyn ResumeExtractor>` so tests can swap in a stub.
#[async_trait]
pub trait ResumeExtractor: Send + Sync {
    async fn extract(&self, bytes: &[u8], mime: &str) -> Result<ParsedResumeData, ExtractError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Extracts the text of the first candidate's first text part.
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .parts
            .iter()
            .find_map(|p| p.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Gemini-backed extractor. Exactly one round trip per invocation: there is no
/// retry and no partial-result streaming, and a failed call never mutates any
/// form state.
pub struct GeminiExtractor {
    client: Client,
    api_key: String,
}

impl GeminiExtractor {
    pub fn new(api_key: String) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;
        Ok(Self { client, api_key })
    }
}

#[async_trait]
impl ResumeExtractor for GeminiExtractor {
    async fn extract(&self, bytes: &[u8], mime: &str) -> Result<ParsedResumeData, ExtractError> {
        check_upload(mime, bytes.len())?;

        let data = base64::engine::general_purpose::STANDARD.encode(bytes);
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        inline_data: Some(InlineData {
                            mime_type: mime,
                            data,
                        }),
                        text: None,
                    },
                    Part {
                        inline_data: None,
                        text: Some(prompts::RESUME_PARSE_PROMPT),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: prompts::response_schema(),
            },
        };

        let response = self
            .client
            .post(format!("{GEMINI_API_URL}/{MODEL}:generateContent"))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ExtractError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed.text().ok_or(ExtractError::EmptyContent)?;
        let overlay: ParsedResumeData = serde_json::from_str(text)?;

        debug!(
            "resume extraction succeeded: {} of 6 fields populated",
            [
                &overlay.first_name,
                &overlay.last_name,
                &overlay.email,
                &overlay.phone,
                &overlay.address,
                &overlay.experience_summary,
            ]
            .iter()
            .filter(|f| f.as_deref().is_some_and(|v| !v.trim().is_empty()))
            .count()
        );

        Ok(overlay)
    }
}
