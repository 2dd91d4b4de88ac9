//! Client for the crop prediction service.

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use super::ClientError;
use crate::domain::{Prediction, SoilSample};
use crate::middleware::request_id::X_REQUEST_ID;

/// Client for the prediction service.
#[derive(Clone)]
pub struct PredictionClient {
    client: Client,
    base_url: String,
}

impl PredictionClient {
    /// Create a new prediction service client. Without a timeout the
    /// underlying HTTP client default applies.
    pub fn new(base_url: &str, timeout_seconds: Option<u64>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        tracing::info!(base_url = base_url, "Prediction client initialized");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submit a sample and return the predicted crop.
    #[instrument(skip(self, sample))]
    pub async fn predict(
        &self,
        sample: &SoilSample,
        request_id: Option<&str>,
    ) -> Result<Prediction, ClientError> {
        let url = format!("{}/predict", self.base_url);

        let mut req = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");

        if let Some(rid) = request_id {
            req = req.header(X_REQUEST_ID, rid);
        }

        debug!(url = %url, "Prediction request");

        let response = req.json(sample).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(status = %status, "Prediction service error");
            return Err(ClientError::Status { status, body });
        }

        let data: Value = serde_json::from_str(&body)?;
        Ok(read_prediction(&data))
    }

    /// Check that the prediction service answers HTTP at all.
    pub async fn health_check(&self) -> Result<()> {
        self.client
            .get(format!("{}/", self.base_url))
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .context("Prediction service unreachable")?;

        Ok(())
    }
}

/// Extract the crop label. A missing label is not an error; it renders empty.
fn read_prediction(data: &Value) -> Prediction {
    let crop = match data.get("crop") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => {
            warn!("Prediction response has no crop field");
            String::new()
        }
        Some(other) => other.to_string(),
    };

    let description = data
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string);

    Prediction { crop, description }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SoilForm;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample() -> SoilSample {
        SoilForm {
            nitrogen: "90".into(),
            phosphorus: "42".into(),
            potassium: "43".into(),
            ph: "6.5".into(),
            temperature: "25".into(),
            humidity: "80".into(),
            rainfall: "200".into(),
        }
        .to_sample()
        .unwrap()
    }

    #[test]
    fn missing_crop_reads_as_empty_label() {
        let prediction = read_prediction(&json!({"error": "nope"}));
        assert_eq!(prediction.crop, "");
        assert!(prediction.description.is_none());
    }

    #[test]
    fn non_string_crop_is_stringified() {
        assert_eq!(read_prediction(&json!({"crop": 7})).crop, "7");
    }

    #[tokio::test]
    async fn posts_sample_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(header("content-type", "application/json"))
            .and(header("x-request-id", "req-1"))
            .and(body_json(json!({
                "nitrogen": 90,
                "phosphorus": 42,
                "potassium": 43,
                "temperature": 25,
                "humidity": 80,
                "ph": 6.5,
                "rainfall": 200
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "crop": "rice",
                "confidence": 95,
                "description": "Based on your soil, rice is the optimal crop."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = PredictionClient::new(&server.uri(), None).unwrap();
        let prediction = client.predict(&sample(), Some("req-1")).await.unwrap();

        assert_eq!(prediction.crop, "rice");
        assert_eq!(
            prediction.description.as_deref(),
            Some("Based on your soil, rice is the optimal crop.")
        );
    }

    #[tokio::test]
    async fn server_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "Model not loaded"})),
            )
            .mount(&server)
            .await;

        let client = PredictionClient::new(&server.uri(), None).unwrap();
        let err = client.predict(&sample(), None).await.unwrap_err();

        assert!(matches!(err, ClientError::Status { status, .. } if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = PredictionClient::new(&server.uri(), None).unwrap();
        let err = client.predict(&sample(), None).await.unwrap_err();

        assert!(matches!(err, ClientError::Decode(_)));
    }
}
