//! Vertex AI Gemini client
//!
//! Raw REST implementation of `AnalysisService` against the regional
//! `generateContent` endpoint. The video travels inline as base64; the
//! credential snapshot supplies the bearer token, project and region.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::auth::Credentials;
use crate::config::GenerationConfig;
use crate::error::ServiceError;
use crate::prompts::SYSTEM_INSTRUCTION;
use crate::request::AnalysisRequest;

use super::invoker::AnalysisService;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: WireGenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Serialize)]
struct InlineData<'a> {
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
    data: String,
}

#[derive(Serialize)]
struct WireGenerationConfig {
    temperature: f32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

impl From<GenerationConfig> for WireGenerationConfig {
    fn from(config: GenerationConfig) -> Self {
        Self {
            temperature: config.temperature,
            top_p: config.top_p,
            top_k: config.top_k,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Vertex AI client for one model.
pub struct VertexClient {
    http: reqwest::Client,
    model: String,
}

impl VertexClient {
    pub fn new(model: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            model: model.to_string(),
        }
    }

    fn endpoint(&self, credentials: &Credentials) -> String {
        format!(
            "https://{region}-aiplatform.googleapis.com/v1/projects/{project}/locations/{region}/publishers/google/models/{model}:generateContent",
            region = credentials.region,
            project = credentials.project_id,
            model = self.model,
        )
    }
}

impl AnalysisService for VertexClient {
    async fn generate(
        &self,
        request: &AnalysisRequest,
        credentials: &Credentials,
    ) -> std::result::Result<String, ServiceError> {
        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part::Text {
                    text: SYSTEM_INSTRUCTION,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![
                    Part::Text {
                        text: &request.prompt,
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: request.mime_type,
                            data: BASE64.encode(&request.video),
                        },
                    },
                ],
            }],
            generation_config: request.generation.into(),
        };

        let response = self
            .http
            .post(self.endpoint(credentials))
            .bearer_auth(&credentials.token)
            .json(&body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), text));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Io(format!("reading response body: {}", e)))?;

        let text: String = payload
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ServiceError::BadRequest(
                "response contained no candidates".into(),
            ));
        }

        Ok(text)
    }
}

fn classify_transport_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Io(format!("timed out: {}", err))
    } else if err.is_connect() {
        ServiceError::Connection(err.to_string())
    } else {
        ServiceError::Io(err.to_string())
    }
}

fn classify_status(status: u16, body: String) -> ServiceError {
    match status {
        401 => ServiceError::Auth("invalid workspace credentials".into()),
        403 => ServiceError::Workspace("workspace does not have access to this model".into()),
        429 => ServiceError::RateLimit(body),
        500..=599 => ServiceError::Connection(format!("server error {}: {}", status, body)),
        _ => ServiceError::BadRequest(format!("status {}: {}", status, body)),
    }
}
