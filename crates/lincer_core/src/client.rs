//! Model service client.
//!
//! One blocking `generateContent` call per analysis: prompt text plus the
//! video bytes inlined as base64. The service is treated as unreliable in
//! format, never in availability: it returns text or the call errors.

use std::path::Path;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value;

use crate::config::ModelConfig;

/// Video extensions the tool accepts
pub const SUPPORTED_VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "mov", "avi", "webm"];

/// Model call errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read video file: {0}")]
    Io(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("request timeout after {0} seconds")]
    Timeout(u64),

    #[error("model API error: {0}")]
    Api(String),

    #[error("model returned empty response")]
    EmptyResponse,
}

/// Client for the external multimodal model service
pub trait ModelClient: Send + Sync {
    /// Analyze a video with the given prompt, returning the raw text output
    fn analyze_video(&self, prompt: &str, video_path: &Path) -> Result<String, ModelError>;
}

/// Gemini `generateContent` client over blocking HTTP
pub struct GeminiClient {
    config: ModelConfig,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl GeminiClient {
    pub fn new(config: ModelConfig, api_key: String) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    fn endpoint_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

/// Mime type from the video file extension
pub fn video_mime_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        Some("webm") => "video/webm",
        _ => "video/mp4",
    }
}

impl ModelClient for GeminiClient {
    fn analyze_video(&self, prompt: &str, video_path: &Path) -> Result<String, ModelError> {
        let video_bytes = std::fs::read(video_path).map_err(|e| ModelError::Io(e.to_string()))?;
        tracing::info!(
            "sending {} byte video to {} for analysis",
            video_bytes.len(),
            self.config.model
        );

        let request_body = serde_json::json!({
            "contents": [{
                "parts": [
                    {
                        "inline_data": {
                            "mime_type": video_mime_type(video_path),
                            "data": BASE64.encode(&video_bytes),
                        }
                    },
                    { "text": prompt },
                ]
            }]
        });

        let response = self
            .client
            .post(self.endpoint_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout(self.config.timeout_secs)
                } else {
                    ModelError::Http(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ModelError::Api(format!(
                "HTTP {} from model service: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let response_json: Value = response
            .json()
            .map_err(|e| ModelError::Api(format!("Failed to parse response envelope: {}", e)))?;

        extract_candidate_text(&response_json).ok_or(ModelError::EmptyResponse)
    }
}

/// Concatenate all text parts of the first candidate
fn extract_candidate_text(response: &Value) -> Option<String> {
    let parts = response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Fake model client for tests: canned responses plus call counting
pub struct FakeModelClient {
    responses: std::sync::Mutex<Vec<Result<String, ModelError>>>,
    call_count: std::sync::Mutex<usize>,
}

impl FakeModelClient {
    pub fn new(responses: Vec<Result<String, ModelError>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses),
            call_count: std::sync::Mutex::new(0),
        }
    }

    /// Always return the same text
    pub fn always(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    /// Always return the same error
    pub fn always_error(error: ModelError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl ModelClient for FakeModelClient {
    fn analyze_video(&self, _prompt: &str, _video_path: &Path) -> Result<String, ModelError> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(ModelError::EmptyResponse);
        }

        if responses.len() == 1 {
            responses[0].clone()
        } else {
            responses.remove(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_video_mime_types() {
        assert_eq!(video_mime_type(Path::new("a.mp4")), "video/mp4");
        assert_eq!(video_mime_type(Path::new("a.MOV")), "video/quicktime");
        assert_eq!(video_mime_type(Path::new("a.avi")), "video/x-msvideo");
        assert_eq!(video_mime_type(Path::new("a.webm")), "video/webm");
        // Staged copies may lose the extension; default to mp4
        assert_eq!(video_mime_type(Path::new("noext")), "video/mp4");
    }

    #[test]
    fn test_extract_candidate_text() {
        let response = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "part one "},
                        {"text": "part two"},
                    ]
                }
            }]
        });
        assert_eq!(
            extract_candidate_text(&response).as_deref(),
            Some("part one part two")
        );
    }

    #[test]
    fn test_extract_candidate_text_empty() {
        let response = serde_json::json!({"candidates": []});
        assert_eq!(extract_candidate_text(&response), None);

        let response = serde_json::json!({
            "candidates": [{"content": {"parts": []}}]
        });
        assert_eq!(extract_candidate_text(&response), None);
    }

    #[test]
    fn test_fake_client_sequence() {
        let client = FakeModelClient::new(vec![
            Ok("first".to_string()),
            Err(ModelError::Timeout(30)),
        ]);
        let path = PathBuf::from("video.mp4");

        assert_eq!(client.analyze_video("p", &path).unwrap(), "first");
        assert!(client.analyze_video("p", &path).is_err());
        assert_eq!(client.call_count(), 2);
    }

    #[test]
    fn test_fake_client_repeats_last_response() {
        let client = FakeModelClient::always("same");
        let path = PathBuf::from("video.mp4");

        assert_eq!(client.analyze_video("p", &path).unwrap(), "same");
        assert_eq!(client.analyze_video("p", &path).unwrap(), "same");
        assert_eq!(client.call_count(), 2);
    }
}
