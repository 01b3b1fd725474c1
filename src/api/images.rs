use reqwest::multipart;
use serde::Deserialize;

use crate::canvas::transport;
use crate::error::GenerationError;
use crate::state::options::GenerationOptions;

/// Default base URL of the generation API
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Generation model identifier
const MODEL: &str = "gpt-image-1";

/// Client for the image generation API.
///
/// Requests are not retried and no extra timeout is layered on top of the
/// HTTP client: a failed call surfaces its upstream message and the action
/// is abandoned.
#[derive(Debug, Clone)]
pub struct ImagesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    b64_json: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl ImagesClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the client somewhere else (compatible gateways, test servers)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        ImagesClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Edit one or more canonical PNG images according to a prompt.
    ///
    /// Returns the decoded PNG bytes of every generated result.
    pub async fn edit(
        &self,
        images: Vec<Vec<u8>>,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<Vec<Vec<u8>>, GenerationError> {
        let mut form = multipart::Form::new()
            .text("model", MODEL)
            .text("prompt", prompt.to_string())
            .text("background", options.background.as_str())
            .text("quality", options.quality.as_str())
            .text("n", options.count.to_string())
            .text("size", options.size.as_str());

        if let Some(user) = options.effective_user() {
            form = form.text("user", user.to_string());
        }

        for (index, png) in images.into_iter().enumerate() {
            let part = multipart::Part::bytes(png)
                .file_name(format!("image_{}.png", index + 1))
                .mime_str("image/png")
                .map_err(|e| GenerationError::Transport(e.to_string()))?;
            form = form.part("image[]", part);
        }

        log::debug!("POST {}/images/edits (n={})", self.base_url, options.count);

        let response = self
            .http
            .post(format!("{}/images/edits", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        Self::decode_response(response).await
    }

    /// Generate images from a text prompt alone
    pub async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<Vec<Vec<u8>>, GenerationError> {
        let body = serde_json::json!({
            "model": MODEL,
            "prompt": prompt,
            "n": options.count,
            "size": options.size.as_str(),
        });

        log::debug!("POST {}/images/generations", self.base_url);

        let response = self
            .http
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        Self::decode_response(response).await
    }

    async fn decode_response(response: reqwest::Response) -> Result<Vec<Vec<u8>>, GenerationError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(GenerationError::Upstream(upstream_message(&status, &body)));
        }

        images_from_json(&body)
    }
}

/// Pull the upstream error message out of a failure body, verbatim when the
/// documented `{"error":{"message"}}` shape is present
fn upstream_message(status: &reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| format!("HTTP {}: {}", status, body.trim()))
}

/// Decode a success body into raw PNG bytes, one entry per generated image
fn images_from_json(body: &str) -> Result<Vec<Vec<u8>>, GenerationError> {
    let parsed: ImagesResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::Malformed(e.to_string()))?;

    if parsed.data.is_empty() {
        return Err(GenerationError::Malformed(
            "response contained no images".into(),
        ));
    }

    parsed
        .data
        .into_iter()
        .map(|datum| {
            let encoded = datum
                .b64_json
                .ok_or_else(|| GenerationError::Malformed("result without b64_json".into()))?;
            transport::decode_base64(&encoded)
                .map_err(|e| GenerationError::Malformed(e.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::transport::encode_base64;

    #[test]
    fn test_success_body_decodes_every_image() {
        let body = format!(
            r#"{{"created": 1, "data": [{{"b64_json": "{}"}}, {{"b64_json": "{}"}}]}}"#,
            encode_base64(b"first png"),
            encode_base64(b"second png"),
        );

        let images = images_from_json(&body).unwrap();
        assert_eq!(images, vec![b"first png".to_vec(), b"second png".to_vec()]);
    }

    #[test]
    fn test_empty_data_is_malformed() {
        let result = images_from_json(r#"{"data": []}"#);
        assert!(matches!(result, Err(GenerationError::Malformed(_))));
    }

    #[test]
    fn test_result_without_payload_is_malformed() {
        let result = images_from_json(r#"{"data": [{"url": "https://elsewhere"}]}"#);
        assert!(matches!(result, Err(GenerationError::Malformed(_))));
    }

    #[test]
    fn test_upstream_message_is_surfaced_verbatim() {
        let body = r#"{"error": {"message": "Your prompt was rejected.", "type": "invalid_request_error"}}"#;
        let message = upstream_message(&reqwest::StatusCode::BAD_REQUEST, body);
        assert_eq!(message, "Your prompt was rejected.");
    }

    #[test]
    fn test_unparseable_failure_body_keeps_the_status() {
        let message = upstream_message(&reqwest::StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert!(message.contains("502"));
        assert!(message.contains("<html>oops</html>"));
    }
}
