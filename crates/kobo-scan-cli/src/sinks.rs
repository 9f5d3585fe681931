//! Companion sinks: where a delivered payload ends up.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use kobo_scan_core::{Companion, CompanionError, DeliveryPayload};

/// Pick a sink from a `--companion` target: URLs post over HTTP, anything else is a directory.
///
/// With `require_fields`, payloads missing a document number, name or birth
/// date are refused before anything is sent.
pub fn companion_for(target: &str, require_fields: bool) -> Box<dyn Companion> {
    if target.starts_with("http://") || target.starts_with("https://") {
        Box::new(HttpCompanion::new(target).with_required_fields(require_fields))
    } else {
        Box::new(DirectoryCompanion::new(target).with_required_fields(require_fields))
    }
}

/// Writes the handoff into a directory.
///
/// Produces `payload.json`, `extras.json` and, when present, decoded
/// `frontImage.jpg` / `backImage.jpg`. Images are decoded before anything
/// is written, so a bad image leaves no partial handoff behind.
pub struct DirectoryCompanion {
    dir: PathBuf,
    require_fields: bool,
}

impl DirectoryCompanion {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            require_fields: false,
        }
    }

    /// Refuse payloads with an empty document number, name or birth date.
    pub fn with_required_fields(mut self, require: bool) -> Self {
        self.require_fields = require;
        self
    }

    async fn write(&self, name: &str, contents: &[u8]) -> Result<(), CompanionError> {
        let path = self.dir.join(name);
        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| io_error(&path, e))?;
        debug!("Wrote {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl Companion for DirectoryCompanion {
    async fn send_data(&self, payload: &DeliveryPayload) -> Result<(), CompanionError> {
        if self.require_fields {
            payload.validate_required()?;
        }

        let json = serde_json::to_vec_pretty(payload).map_err(|e| CompanionError::Io(e.to_string()))?;
        let extras = serde_json::to_vec_pretty(&payload.to_extras())
            .map_err(|e| CompanionError::Io(e.to_string()))?;

        let mut images = Vec::new();
        for (name, uri) in [
            ("frontImage.jpg", &payload.front_image),
            ("backImage.jpg", &payload.back_image),
        ] {
            if let Some(bytes) = decode_data_uri(uri)? {
                images.push((name, bytes));
            }
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_error(&self.dir, e))?;

        self.write("payload.json", &json).await?;
        self.write("extras.json", &extras).await?;
        for (name, bytes) in &images {
            self.write(name, bytes).await?;
        }

        Ok(())
    }
}

/// Posts the payload as JSON to a companion endpoint.
pub struct HttpCompanion {
    client: reqwest::Client,
    url: String,
    require_fields: bool,
}

impl HttpCompanion {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            require_fields: false,
        }
    }

    pub fn with_required_fields(mut self, require: bool) -> Self {
        self.require_fields = require;
        self
    }
}

#[async_trait]
impl Companion for HttpCompanion {
    async fn send_data(&self, payload: &DeliveryPayload) -> Result<(), CompanionError> {
        if self.require_fields {
            payload.validate_required()?;
        }

        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| CompanionError::Unavailable(e.to_string()))?;

        let status = response.status();
        debug!("Companion responded with {}", status);

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let detail = format!("HTTP {}: {}", status, body.trim());
        if status.is_client_error() {
            Err(CompanionError::Rejected(detail))
        } else {
            Err(CompanionError::Unavailable(detail))
        }
    }
}

/// Decode a `data:<mime>;base64,<data>` URI (or bare base64). Empty input gives `None`.
pub fn decode_data_uri(uri: &str) -> Result<Option<Vec<u8>>, CompanionError> {
    let uri = uri.trim();
    if uri.is_empty() {
        return Ok(None);
    }

    let data = match uri.strip_prefix("data:") {
        Some(rest) => match rest.split_once(";base64,") {
            Some((_, data)) => data,
            None => {
                return Err(CompanionError::Io(
                    "image data URI is not base64-encoded".to_string(),
                ));
            }
        },
        None => uri,
    };

    STANDARD
        .decode(data)
        .map(Some)
        .map_err(|e| CompanionError::Io(format!("invalid image data: {}", e)))
}

fn io_error(path: &Path, e: std::io::Error) -> CompanionError {
    CompanionError::Io(format!("{}: {}", path.display(), e))
}
