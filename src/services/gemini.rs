use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::error::ServiceError;

const MODEL_NAME: &str = "gemini-1.5-flash";

/// Instruction sent alongside every receipt image.
const EXTRACTION_PROMPT: &str = "Create a valid JSON containing each item from the receipt \
    with its respective information (name, quantity as a number, unit_price as a number, \
    total_price as a number), the total amount of the purchase as a number, and the \
    purchase_date.";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file: FileRef,
}

#[derive(Debug, Deserialize)]
struct FileRef {
    uri: String,
    #[serde(rename = "mimeType")]
    mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
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
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Client for the Gemini file upload + generateContent endpoints.
///
/// Built once at startup and shared across requests. The base URL is
/// configurable so tests can stand in a mock server.
#[derive(Clone)]
pub struct GeminiClient {
    http: ReqwestClient,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(http: ReqwestClient, api_key: String, base_url: String) -> Self {
        Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Runs the full extraction flow for one receipt image: upload the bytes,
    /// ask the model for a structured description, strip markdown fences from
    /// the reply and parse it as JSON.
    ///
    /// The parsed value is returned as-is; no schema validation is applied,
    /// callers must tolerate incomplete extractions.
    pub async fn extract_receipt(
        &self,
        image_bytes: Vec<u8>,
        filename: Option<&str>,
    ) -> Result<Value, ServiceError> {
        let file = self.upload_image(image_bytes, filename).await?;
        let raw_text = self.generate_content(&file).await?;

        let cleaned = strip_code_fences(&raw_text);
        serde_json::from_str::<Value>(&cleaned).map_err(|e| {
            error!("Model reply is not valid JSON: {}", e);
            ServiceError::upstream("Failed to parse JSON", e)
        })
    }

    /// Uploads the raw image bytes to the Files API. The bytes travel directly
    /// from the request buffer; no temporary file is written.
    async fn upload_image(
        &self,
        image_bytes: Vec<u8>,
        filename: Option<&str>,
    ) -> Result<FileRef, ServiceError> {
        let url = format!(
            "{}/upload/v1beta/files?key={}",
            self.base_url, self.api_key
        );

        info!(
            "Uploading receipt image ({} bytes, name: {})",
            image_bytes.len(),
            filename.unwrap_or("unknown")
        );

        let response = self
            .http
            .post(&url)
            .header("X-Goog-Upload-Protocol", "raw")
            .header("Content-Type", mime_for(filename))
            .body(image_bytes)
            .send()
            .await
            .map_err(|e| ServiceError::upstream("Failed to upload image", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Image upload rejected ({}): {}", status, body);
            return Err(ServiceError::upstream(
                "Failed to upload image",
                format!("{}: {}", status, body),
            ));
        }

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::upstream("Failed to upload image", e))?;
        Ok(upload.file)
    }

    async fn generate_content(&self, file: &FileRef) -> Result<String, ServiceError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, MODEL_NAME, self.api_key
        );

        let request_body = json!({
            "contents": [{
                "parts": [
                    {
                        "file_data": {
                            "mime_type": file.mime_type.as_deref().unwrap_or("image/jpeg"),
                            "file_uri": file.uri,
                        }
                    },
                    { "text": EXTRACTION_PROMPT }
                ]
            }]
        });

        let response = self
            .http
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ServiceError::upstream("Failed to generate content", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("generateContent rejected ({}): {}", status, body);
            return Err(ServiceError::upstream(
                "Failed to generate content",
                format!("{}: {}", status, body),
            ));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::upstream("Failed to generate content", e))?;

        generated
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| {
                ServiceError::upstream("Failed to generate content", "empty model response")
            })
    }
}

/// Removes the markdown code fences the model wraps its JSON in: a literal
/// ```` ```json ```` opener and any remaining ```` ``` ```` markers.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json\n", "").replace("```", "")
}

fn mime_for(filename: Option<&str>) -> &'static str {
    match filename.and_then(|f| f.rsplit('.').next()) {
        Some("png") | Some("PNG") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}
