use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use songscape_core::{CoreError, GeneratedImage, ImageProvider, ImageRequest};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Base URL of the Generative Language API.
const IMAGEN_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Provider name reported to the core.
pub const PROVIDER_NAME: &str = "imagen";

/// Google Imagen image-generation provider.
///
/// One `:predict` call per prompt, one image per call. Failures surface the
/// provider's error message text verbatim so the core can recognize a
/// credential rejection in it.
pub struct ImagenProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl ImagenProvider {
    /// Create a provider for `model` authenticated with `api_key`.
    ///
    /// `timeout` bounds each request; `None` preserves the unbounded behavior.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, CoreError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .user_agent("Songscape/0.1 (https://github.com/songscape/songscape)");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: IMAGEN_API_URL.to_string(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Override the API base URL (used by tests against a local server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn predict_url(&self) -> String {
        format!("{}/models/{}:predict", self.base_url, self.model)
    }
}

/// `:predict` request body.
#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    instances: Vec<Instance<'a>>,
    parameters: Parameters<'a>,
}

#[derive(Debug, Serialize)]
struct Instance<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Parameters<'a> {
    sample_count: u32,
    aspect_ratio: &'a str,
    output_options: OutputOptions<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputOptions<'a> {
    mime_type: &'a str,
}

/// `:predict` response body.
/// The API returns additional fields we don't use; serde ignores unknown
/// fields by default.
#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: String,
    #[serde(default)]
    mime_type: Option<String>,
}

/// Error envelope returned on non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Pull the most specific failure text out of an error body, falling back to
/// the raw body when it is not the documented envelope.
fn failure_reason(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => {
            if envelope.error.status.is_empty() {
                envelope.error.message
            } else {
                format!("{} ({})", envelope.error.message, envelope.error.status)
            }
        }
        _ => format!("{status}: {}", body.trim()),
    }
}

fn data_url(prediction: &Prediction, requested_mime: &str) -> String {
    let mime = prediction
        .mime_type
        .as_deref()
        .filter(|m| !m.is_empty())
        .unwrap_or(requested_mime);
    format!("data:{mime};base64,{}", prediction.bytes_base64_encoded)
}

#[async_trait]
impl ImageProvider for ImagenProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn generate(&self, request: &ImageRequest) -> Result<GeneratedImage, CoreError> {
        let body = PredictRequest {
            instances: vec![Instance {
                prompt: &request.prompt,
            }],
            parameters: Parameters {
                sample_count: request.number_of_images,
                aspect_ratio: &request.aspect_ratio,
                output_options: OutputOptions {
                    mime_type: &request.output_mime_type,
                },
            },
        };

        debug!("Imagen POST {} for prompt: {}", self.predict_url(), request.prompt);

        let response = self
            .client
            .post(self.predict_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = failure_reason(status, &body);
            warn!("Imagen returned {status} for prompt \"{}\": {reason}", request.prompt);
            return Err(CoreError::ImageProviderFailed {
                provider: PROVIDER_NAME.to_string(),
                reason,
            });
        }

        let predict: PredictResponse = response.json().await?;
        let Some(prediction) = predict.predictions.first() else {
            return Err(CoreError::ImageProviderFailed {
                provider: PROVIDER_NAME.to_string(),
                reason: "response contained no predictions".to_string(),
            });
        };

        info!(
            "Imagen produced {} image bytes (base64) for prompt: {}",
            prediction.bytes_base64_encoded.len(),
            request.prompt
        );

        Ok(GeneratedImage {
            url: data_url(prediction, &request.output_mime_type),
            alt: request.prompt.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_url_includes_model() {
        let provider = ImagenProvider::new("imagen-4.0-generate-001", "key", None)
            .map(|p| p.with_base_url("http://localhost:9999/v1beta"));
        let Ok(provider) = provider else {
            return;
        };
        assert_eq!(
            provider.predict_url(),
            "http://localhost:9999/v1beta/models/imagen-4.0-generate-001:predict"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = PredictRequest {
            instances: vec![Instance { prompt: "a scene" }],
            parameters: Parameters {
                sample_count: 1,
                aspect_ratio: "16:9",
                output_options: OutputOptions {
                    mime_type: "image/jpeg",
                },
            },
        };
        let json = serde_json::to_value(&body).unwrap_or_default();
        assert_eq!(json["instances"][0]["prompt"], "a scene");
        assert_eq!(json["parameters"]["sampleCount"], 1);
        assert_eq!(json["parameters"]["aspectRatio"], "16:9");
        assert_eq!(json["parameters"]["outputOptions"]["mimeType"], "image/jpeg");
    }

    #[test]
    fn test_response_parses_predictions() {
        let json = r#"{"predictions":[{"bytesBase64Encoded":"QUJD","mimeType":"image/jpeg"}]}"#;
        let parsed = serde_json::from_str::<PredictResponse>(json);
        assert!(parsed.is_ok(), "response must parse: {parsed:?}");
        let response = parsed.ok().filter(|r| !r.predictions.is_empty());
        let Some(response) = response else {
            return;
        };
        assert_eq!(response.predictions[0].bytes_base64_encoded, "QUJD");
        assert_eq!(
            data_url(&response.predictions[0], "image/jpeg"),
            "data:image/jpeg;base64,QUJD"
        );
    }

    #[test]
    fn test_data_url_falls_back_to_requested_mime() {
        let prediction = Prediction {
            bytes_base64_encoded: "QUJD".to_string(),
            mime_type: None,
        };
        assert_eq!(data_url(&prediction, "image/jpeg"), "data:image/jpeg;base64,QUJD");
    }

    #[test]
    fn test_failure_reason_extracts_error_envelope() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        let reason = failure_reason(reqwest::StatusCode::BAD_REQUEST, body);
        assert_eq!(
            reason,
            "API key not valid. Please pass a valid API key. (INVALID_ARGUMENT)"
        );
    }

    #[test]
    fn test_failure_reason_falls_back_to_raw_body() {
        let reason = failure_reason(reqwest::StatusCode::BAD_GATEWAY, "upstream unavailable");
        assert_eq!(reason, "502 Bad Gateway: upstream unavailable");
    }

    #[test]
    fn test_rejection_text_is_classified_by_the_core() {
        let body = r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#;
        let err = CoreError::ImageProviderFailed {
            provider: PROVIDER_NAME.to_string(),
            reason: failure_reason(reqwest::StatusCode::NOT_FOUND, body),
        };
        assert!(err.is_credential_rejection());
    }
}
