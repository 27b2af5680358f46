use anyhow::{bail, Context, Result};

/// Values identifying the Document AI resource, read once at process start
/// and passed to the clients that need them.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Document AI processor identifier.
    pub docai_processor: String,
    /// Processing location, e.g. "us" or "us-central1".
    pub location: String,
}

impl WebhookConfig {
    /// Read the required variables from the environment. A missing variable
    /// is fatal: the webhook has no processor to call without them.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            docai_processor: std::env::var("DOCAI_PROCESSOR")
                .context("DOCAI_PROCESSOR environment variable is not set")?,
            location: std::env::var("LOCATION")
                .context("LOCATION environment variable is not set")?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would produce unusable resource paths.
    pub fn validate(&self) -> Result<()> {
        if self.docai_processor.is_empty() {
            bail!("DOCAI_PROCESSOR must not be empty");
        }
        if self.location.is_empty() {
            bail!("LOCATION must not be empty");
        }
        Ok(())
    }
}
