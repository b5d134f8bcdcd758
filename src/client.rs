//! HTTP client for the remote analysis service.
//!
//! `analyze` posts the image as multipart form data and turns the JSON reply
//! into an [`AnalysisResult`]. Parsing lives in `parse_response` so it can be
//! exercised without a server.

use crate::config::Config;
use crate::error::{AnalysisError, OverlayError};
use crate::model::{AdditionalInfo, AnalysisResult, ImageFile, DEFAULT_DISEASE_NAME};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;

/// Multipart field the service reads the image from.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl From<&ImageFile> for AnalysisRequest {
    fn from(file: &ImageFile) -> Self {
        Self {
            file_name: file.file_name.clone(),
            mime: file.mime.clone(),
            bytes: file.bytes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    /// Encoded overlay image, when the reference could be resolved.
    pub overlay: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    endpoint: String,
}

impl AnalysisClient {
    pub fn new(config: &Config) -> Result<Self, AnalysisError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AnalysisError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        log::info!(
            "Submitting {} ({}, {} bytes) to {}",
            request.file_name,
            request.mime,
            request.bytes.len(),
            self.endpoint
        );

        let part = Part::bytes(request.bytes)
            .file_name(request.file_name)
            .mime_str(&request.mime)
            .map_err(|e| AnalysisError::Request(e.to_string()))?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AnalysisError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AnalysisError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(AnalysisError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let result = parse_response(&text)?;
        let overlay = match result.segmented_image.as_deref() {
            Some(reference) => match self.resolve_overlay(reference).await {
                Ok(bytes) => Some(bytes),
                Err(err) => {
                    log::warn!("Unable to load segmentation overlay: {err}");
                    None
                }
            },
            None => None,
        };

        Ok(AnalysisReport { result, overlay })
    }

    async fn resolve_overlay(&self, reference: &str) -> Result<Vec<u8>, OverlayError> {
        if reference.starts_with("data:") {
            return decode_data_uri(reference);
        }
        if !(reference.starts_with("http://") || reference.starts_with("https://")) {
            return Err(OverlayError::Unsupported(truncate(reference)));
        }

        let response = self
            .http
            .get(reference)
            .send()
            .await
            .map_err(|e| OverlayError::Fetch(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(OverlayError::Fetch(format!("status {}", status.as_u16())));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| OverlayError::Fetch(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// The service's reply as it arrives on the wire. Every field is kept as a raw
/// value so that one malformed entry cannot fail the whole body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawResponse {
    disease_name: Option<Value>,
    probability: Option<Value>,
    confidence: Option<Value>,
    segmented_image: Option<Value>,
    severity: Option<Value>,
    recommendations: Option<Value>,
    affected_areas: Option<Value>,
    additional_info: Option<Value>,
}

impl RawResponse {
    /// Top-level value, or the one nested under `additional_info`.
    fn field<'a>(&'a self, top: &'a Option<Value>, key: &str) -> Option<&'a Value> {
        top.as_ref().or_else(|| {
            self.additional_info
                .as_ref()
                .and_then(Value::as_object)
                .and_then(|nested| nested.get(key))
                .filter(|value| !value.is_null())
        })
    }
}

/// Builds a result from the service's JSON reply. Each field falls back to
/// its default on its own; only a body that is not a JSON object fails.
pub fn parse_response(body: &str) -> Result<AnalysisResult, AnalysisError> {
    let raw: RawResponse =
        serde_json::from_str(body).map_err(|e| AnalysisError::Parse(e.to_string()))?;

    let additional_info = AdditionalInfo {
        severity: raw
            .field(&raw.severity, "severity")
            .and_then(non_empty_str),
        recommendations: raw
            .field(&raw.recommendations, "recommendations")
            .and_then(string_list),
        affected_areas: raw
            .field(&raw.affected_areas, "affected_areas")
            .and_then(string_list),
    };

    Ok(AnalysisResult {
        disease_name: raw
            .field(&raw.disease_name, "disease_name")
            .and_then(non_empty_str)
            .unwrap_or_else(|| DEFAULT_DISEASE_NAME.to_string()),
        probability: raw
            .field(&raw.probability, "probability")
            .and_then(unit_score)
            .unwrap_or(0.0),
        confidence: raw
            .field(&raw.confidence, "confidence")
            .and_then(unit_score)
            .unwrap_or(0.0),
        segmented_image: raw
            .field(&raw.segmented_image, "segmented_image")
            .and_then(non_empty_str),
        additional_info: (!additional_info.is_empty()).then_some(additional_info),
    })
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn unit_score(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .filter(|score| score.is_finite())
        .map(|score| score.clamp(0.0, 1.0))
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    let items: Vec<String> = value.as_array()?.iter().filter_map(non_empty_str).collect();
    (!items.is_empty()).then_some(items)
}

pub fn decode_data_uri(reference: &str) -> Result<Vec<u8>, OverlayError> {
    let rest = reference
        .strip_prefix("data:")
        .ok_or_else(|| OverlayError::InvalidDataUri("missing `data:` prefix".to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| OverlayError::InvalidDataUri("missing payload separator".to_string()))?;
    if !meta.ends_with(";base64") {
        return Err(OverlayError::InvalidDataUri(format!(
            "unsupported encoding `{meta}`"
        )));
    }

    STANDARD
        .decode(payload.trim())
        .map_err(|e| OverlayError::InvalidDataUri(e.to_string()))
}

fn truncate(reference: &str) -> String {
    const MAX_LEN: usize = 48;
    if reference.chars().count() > MAX_LEN {
        let mut shortened = reference.chars().take(MAX_LEN).collect::<String>();
        shortened.push('…');
        shortened
    } else {
        reference.to_string()
    }
}
