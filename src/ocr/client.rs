use crate::config::Config;
use crate::ocr::loc;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("file not found: {0}")]
    FileNotFound(String),
    #[error("IO error reading image: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Api(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for the remote chat-completions OCR endpoint. One blocking-style
/// (awaited) request per image, no retries.
#[derive(Debug, Clone)]
pub struct OcrClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
    prompt: String,
    max_tokens: u32,
}

impl OcrClient {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            prompt: config.prompt.clone(),
            max_tokens: config.max_tokens,
        }
    }

    /// Recognizes the text in one image file: read, base64-encode, send a
    /// single chat-completion request, extract the first choice's content.
    pub async fn recognize<P: AsRef<Path>>(&self, image_path: P) -> Result<String, OcrError> {
        let path = image_path.as_ref();
        let data_uri = self.read_as_data_uri(path)?;

        debug!(
            "Sending OCR request for {} ({} chars encoded)",
            path.display(),
            data_uri.len()
        );

        let content = self.call_endpoint(&data_uri).await?;

        // PaddleOCR-VL interleaves recognized text with <|LOC_n|>
        // coordinate tags; reduce to plain text.
        Ok(loc::extract_text(&content))
    }

    fn read_as_data_uri(&self, path: &Path) -> Result<String, OcrError> {
        if !path.exists() {
            return Err(OcrError::FileNotFound(path.display().to_string()));
        }

        let image_bytes = fs::read(path)?;
        let base64_data = general_purpose::STANDARD.encode(&image_bytes);

        Ok(format!("data:{};base64,{}", mime_type(path), base64_data))
    }

    async fn call_endpoint(&self, data_uri: &str) -> Result<String, OcrError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: self.prompt.clone(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: data_uri.to_string(),
                        },
                    },
                ],
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(OcrError::Api(format!("HTTP {status}: {error_text}")));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| OcrError::MalformedResponse(e.to_string()))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| OcrError::MalformedResponse("response has no choices".into()))?;

        // An empty content field is a valid answer for a blank image.
        Ok(choice.message.content.unwrap_or_default())
    }
}

/// MIME type from the file extension. Unrecognized extensions fall back
/// to a generic octet type rather than being rejected.
pub fn mime_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}
