//! Document AI OCR pass-through.
//!
//! One POST per call against the regional `:process` endpoint. Whatever the
//! service returns for a bad URI, an unsupported type, or an auth failure
//! propagates to the caller untranslated; there are no retries and no timeout
//! beyond the client defaults.

use std::path::Path;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::WebhookConfig;

/// Capability seam for OCR so callers can substitute a fake in tests.
#[async_trait]
pub trait DocumentProcessor {
    /// Extract the plain text of a document stored in Cloud Storage.
    async fn process_document(&self, gcs_uri: &str, mime_type: &str) -> Result<String>;
}

/// Client for the Document AI `process` method of one processor.
pub struct DocAiClient {
    processor_path: String,
    endpoint: String,
    access_token: String,
    client: Client,
}

impl DocAiClient {
    pub fn new(
        project_id: &str,
        access_token: impl Into<String>,
        config: &WebhookConfig,
    ) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            processor_path: format!(
                "projects/{}/locations/{}/processors/{}",
                project_id, config.location, config.docai_processor
            ),
            endpoint: format!("https://{}-documentai.googleapis.com/v1", config.location),
            access_token: access_token.into(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ProcessResponse {
    document: ProcessedDocument,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProcessedDocument {
    text: String,
}

#[async_trait]
impl DocumentProcessor for DocAiClient {
    async fn process_document(&self, gcs_uri: &str, mime_type: &str) -> Result<String> {
        let request = json!({
            "gcsDocument": {
                "gcsUri": gcs_uri,
                "mimeType": mime_type,
            },
            "skipHumanReview": true,
        });

        let url = format!("{}/{}:process", self.endpoint, self.processor_path);
        tracing::debug!(uri = gcs_uri, mime_type, "Processing document with Document AI");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error = response.text().await?;
            return Err(anyhow!("Document AI error: {}", error));
        }

        let result: ProcessResponse = response.json().await?;
        Ok(result.document.text)
    }
}

/// Perform OCR on a Cloud Storage file and return the document text.
pub async fn get_document_text(
    processor: &impl DocumentProcessor,
    gcs_uri: &str,
    mime_type: &str,
) -> Result<String> {
    processor.process_document(gcs_uri, mime_type).await
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("file format {extension:?} is not supported by the OCR processor")]
pub struct UnsupportedFileType {
    pub extension: String,
}

// https://cloud.google.com/document-ai/docs/file-types
pub fn infer_mime_type(filename: &str) -> Result<&'static str, UnsupportedFileType> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();
    match extension.as_str() {
        "pdf" => Ok("application/pdf"),
        "gif" => Ok("image/gif"),
        "tiff" | "tif" => Ok("image/tiff"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "png" => Ok("image/png"),
        "bmp" => Ok("image/bmp"),
        "webp" => Ok("image/webp"),
        _ => Err(UnsupportedFileType { extension }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeProcessor {
        text: String,
    }

    #[async_trait]
    impl DocumentProcessor for FakeProcessor {
        async fn process_document(&self, _gcs_uri: &str, _mime_type: &str) -> Result<String> {
            Ok(self.text.clone())
        }
    }

    #[tokio::test]
    async fn test_get_document_text_passes_through() {
        let fake = FakeProcessor {
            text: "Hello world".to_string(),
        };
        let got = get_document_text(&fake, "gs://fake-bucket/doc.pdf", "application/pdf")
            .await
            .unwrap();
        assert_eq!(got, "Hello world");
    }

    #[test]
    fn test_infer_mime_type_known_extensions() {
        assert_eq!(infer_mime_type("report.pdf").unwrap(), "application/pdf");
        assert_eq!(infer_mime_type("scan.tif").unwrap(), "image/tiff");
        assert_eq!(infer_mime_type("scan.tiff").unwrap(), "image/tiff");
        assert_eq!(infer_mime_type("photo.JPG").unwrap(), "image/jpeg");
        assert_eq!(infer_mime_type("photo.jpeg").unwrap(), "image/jpeg");
        assert_eq!(infer_mime_type("img.png").unwrap(), "image/png");
        assert_eq!(infer_mime_type("img.gif").unwrap(), "image/gif");
        assert_eq!(infer_mime_type("img.bmp").unwrap(), "image/bmp");
        assert_eq!(infer_mime_type("img.webp").unwrap(), "image/webp");
    }

    #[test]
    fn test_infer_mime_type_unsupported_extension() {
        let err = infer_mime_type("notes.docx").unwrap_err();
        assert_eq!(err.extension, "docx");

        let err = infer_mime_type("no_extension").unwrap_err();
        assert_eq!(err.extension, "");
    }

    #[test]
    fn test_client_builds_processor_path() {
        let config = WebhookConfig {
            docai_processor: "proc-123".to_string(),
            location: "us".to_string(),
        };
        let client = DocAiClient::new("fake-project-id", "token", &config).unwrap();
        assert_eq!(
            client.processor_path,
            "projects/fake-project-id/locations/us/processors/proc-123"
        );
        assert_eq!(client.endpoint, "https://us-documentai.googleapis.com/v1");
    }
}
