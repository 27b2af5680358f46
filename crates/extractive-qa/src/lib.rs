//! Webhook helpers for extractive Q&A over uploaded documents.
//!
//! Two stateless helpers: Document AI OCR text extraction, and Vertex AI
//! question/answer generation whose freeform response is paired up by a
//! bounded line-pairing parser. Both remote services sit behind narrow
//! traits so the helpers can be exercised with fakes.

pub mod config;
pub mod docai;
pub mod generation;
pub mod qa;

// Re-export primary types for convenience
pub use config::WebhookConfig;
pub use docai::{get_document_text, infer_mime_type, DocAiClient, DocumentProcessor, UnsupportedFileType};
pub use generation::{GenerationParams, TextGenerator, VertexTextModel};
pub use qa::{extract_questions, pair_question_answers, PairingError, QaPair, QUESTION_COUNT};

// Re-export common types
pub use anyhow::{Error, Result};
