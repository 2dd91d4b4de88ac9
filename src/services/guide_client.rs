//! Client for the generative-language API that writes crop care guides.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};
use url::Url;

use super::ClientError;
use crate::domain::CareGuide;

#[derive(Clone)]
pub struct GuideClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate, if non-empty.
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|text| !text.is_empty())
    }
}

impl GuideClient {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: &str,
        timeout_seconds: Option<u64>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        tracing::info!(base_url = base_url, model = model, "Guide client initialized");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self) -> Result<Url, ClientError> {
        let mut url = Url::parse(&format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        ))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    /// Send a prompt and return the generated text.
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    pub async fn generate(&self, prompt: &str) -> Result<String, ClientError> {
        let url = self.endpoint()?;
        debug!(prompt_len = prompt.len(), "Guide request");

        let body = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        // Error bodies are JSON too; they simply carry no candidates.
        let value: serde_json::Value = serde_json::from_str(&text)?;
        let guide = serde_json::from_value::<GenerateResponse>(value)
            .ok()
            .and_then(GenerateResponse::into_text);

        match guide {
            Some(guide) => Ok(guide),
            None if !status.is_success() => {
                error!(status = %status, "Guide API error");
                Err(ClientError::Status { status, body: text })
            }
            None => Err(ClientError::MissingContent("candidates[0].content.parts[0].text")),
        }
    }

    /// Generate a guide, substituting the fixed fallback text on failure.
    pub async fn care_guide(&self, prompt: &str) -> CareGuide {
        guide_or_fallback(self.generate(prompt).await)
    }
}

/// The single place where a failed generation turns into visible text.
pub fn guide_or_fallback(outcome: Result<String, ClientError>) -> CareGuide {
    match outcome {
        Ok(text) => CareGuide::new(text),
        Err(e) if e.is_connection() => {
            error!(error = %e, "Could not reach guide API");
            CareGuide::connection_fallback()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Guide API returned no guide");
            CareGuide::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::guide::{GUIDE_CONNECTION_FALLBACK, GUIDE_FALLBACK};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL: &str = "gemini-test";

    fn client(server: &MockServer) -> GuideClient {
        GuideClient::new(&server.uri(), MODEL, "secret", None).unwrap()
    }

    #[test]
    fn endpoint_carries_model_and_key() {
        let client = GuideClient::new("https://api.example.com/v1beta/", MODEL, "k y", None).unwrap();
        let url = client.endpoint().unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v1beta/models/gemini-test:generateContent?key=k+y"
        );
    }

    #[tokio::test]
    async fn returns_first_candidate_text() {
        let server = MockServer::start().await;
        let guide = "1. 💧 Irrigation Strategy\nWater weekly.\n\n2. 🐛 Pest Control\nScout often.";
        Mock::given(method("POST"))
            .and(path(format!("/models/{MODEL}:generateContent")))
            .and(query_param("key", "secret"))
            .and(body_json(json!({"contents": [{"parts": [{"text": "hello"}]}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [
                    {"content": {"parts": [{"text": guide}, {"text": "ignored"}]}},
                    {"content": {"parts": [{"text": "second"}]}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server).generate("hello").await.unwrap();
        assert_eq!(text, guide);
    }

    #[tokio::test]
    async fn empty_response_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let guide = client(&server).care_guide("hello").await;
        assert_eq!(guide.text, GUIDE_FALLBACK);
    }

    #[tokio::test]
    async fn api_error_body_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"code": 400, "message": "API key not valid."}
            })))
            .mount(&server)
            .await;

        let outcome = client(&server).generate("hello").await;
        assert!(matches!(outcome, Err(ClientError::Status { .. })));
        assert_eq!(guide_or_fallback(outcome).text, GUIDE_FALLBACK);
    }

    #[tokio::test]
    async fn non_json_body_uses_connection_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let guide = client(&server).care_guide("hello").await;
        assert_eq!(guide.text, GUIDE_CONNECTION_FALLBACK);
    }

    #[tokio::test]
    async fn unreachable_api_uses_connection_fallback() {
        // Nothing listens on port 1.
        let client = GuideClient::new("http://127.0.0.1:1", MODEL, "secret", None).unwrap();
        let guide = client.care_guide("hello").await;
        assert_eq!(guide.text, GUIDE_CONNECTION_FALLBACK);
    }

    #[test]
    fn malformed_shapes_have_no_text() {
        for body in [
            json!({}),
            json!({"candidates": [{}]}),
            json!({"candidates": [{"content": {"parts": []}}]}),
            json!({"candidates": [{"content": {"parts": [{"text": ""}]}}]}),
        ] {
            let parsed: GenerateResponse = serde_json::from_value(body).unwrap();
            assert!(parsed.into_text().is_none());
        }
    }
}
