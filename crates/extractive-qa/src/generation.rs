//! Text generation seam and its Vertex AI implementation.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Decoding parameters for a single prediction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Controls the randomness of predictions.
    pub temperature: f32,
    /// Number of tokens to generate.
    pub max_output_tokens: usize,
    /// Cumulative probability of the highest-probability vocabulary tokens.
    pub top_p: f32,
    /// Number of highest-probability vocabulary tokens kept for filtering.
    pub top_k: usize,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_output_tokens: 1024,
            top_p: 0.8,
            top_k: 40,
        }
    }
}

/// Capability seam for text generation so question extraction can run
/// against a fake model in tests.
#[async_trait]
pub trait TextGenerator {
    /// Generate text for a prompt with the given decoding parameters.
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String>;
}

/// Client for one Vertex AI text model's `:predict` endpoint.
pub struct VertexTextModel {
    endpoint: String,
    access_token: String,
    client: Client,
}

impl VertexTextModel {
    pub fn new(
        project_id: &str,
        location: &str,
        model_name: &str,
        access_token: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            endpoint: format!(
                "https://{location}-aiplatform.googleapis.com/v1/projects/{project_id}/locations/{location}/publishers/google/models/{model_name}:predict"
            ),
            access_token: access_token.into(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    content: String,
}

#[async_trait]
impl TextGenerator for VertexTextModel {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let request = json!({
            "instances": [{"prompt": prompt}],
            "parameters": {
                "temperature": params.temperature,
                "maxOutputTokens": params.max_output_tokens,
                "topP": params.top_p,
                "topK": params.top_k,
            }
        });

        tracing::debug!(endpoint = %self.endpoint, "Requesting prediction");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error = response.text().await?;
            return Err(anyhow!("Vertex AI error: {}", error));
        }

        let result: PredictResponse = response.json().await?;
        result
            .predictions
            .first()
            .map(|p| p.content.clone())
            .ok_or_else(|| anyhow!("Vertex AI returned no predictions"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_match_model_defaults() {
        let params = GenerationParams::default();
        assert_eq!(params.temperature, 0.2);
        assert_eq!(params.max_output_tokens, 1024);
        assert_eq!(params.top_p, 0.8);
        assert_eq!(params.top_k, 40);
    }

    #[test]
    fn test_endpoint_is_regional() {
        let model =
            VertexTextModel::new("fake-project-id", "us-central1", "text-bison@001", "token")
                .unwrap();
        assert_eq!(
            model.endpoint,
            "https://us-central1-aiplatform.googleapis.com/v1/projects/fake-project-id/locations/us-central1/publishers/google/models/text-bison@001:predict"
        );
    }
}
