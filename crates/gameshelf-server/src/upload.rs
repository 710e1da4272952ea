use std::path::PathBuf;

use uuid::Uuid;

/// Error raised when writing an uploaded file fails.
#[derive(Debug)]
pub enum UploadError {
    Io(std::io::Error),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "upload write failed: {e}"),
        }
    }
}

impl std::error::Error for UploadError {}

/// Validates, names, and persists uploaded image files.
///
/// The extension allow-list is the only gate: there is no size limit and no
/// content sniffing of the bytes themselves.
pub struct ImageStore {
    dir: PathBuf,
    allowed_extensions: Vec<String>,
    sentinel: String,
}

impl ImageStore {
    pub fn new(
        dir: impl Into<PathBuf>,
        allowed_extensions: Vec<String>,
        sentinel: String,
    ) -> Self {
        Self {
            dir: dir.into(),
            allowed_extensions,
            sentinel,
        }
    }

    /// The fallback name recorded when no usable image was uploaded.
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// A name passes when it contains a dot and its lowercased final suffix
    /// is on the allow-list.
    fn is_allowed(&self, name: &str) -> bool {
        match name.rsplit_once('.') {
            Some((_, suffix)) => {
                let suffix = suffix.to_ascii_lowercase();
                self.allowed_extensions.iter().any(|ext| *ext == suffix)
            },
            None => false,
        }
    }

    /// Persist the uploaded bytes and return the name to record. A name that
    /// fails the extension check, or an empty name, yields the sentinel and
    /// writes nothing; that is the normal fallback, not an error.
    ///
    /// Stored names are the sanitized original prefixed with a fresh UUID
    /// token, so two uploads of identically named files never collide.
    pub async fn store(&self, original_name: &str, data: &[u8]) -> Result<String, UploadError> {
        if original_name.is_empty() || !self.is_allowed(original_name) {
            tracing::debug!(name = original_name, "upload skipped, recording sentinel image");
            return Ok(self.sentinel.clone());
        }

        let stored = format!(
            "{}_{}",
            Uuid::new_v4().simple(),
            sanitize_file_name(original_name)
        );
        let path = self.dir.join(&stored);
        tokio::fs::write(&path, data).await.map_err(UploadError::Io)?;

        tracing::debug!(name = original_name, stored = %stored, "stored uploaded image");
        Ok(stored)
    }
}

/// Reduce an untrusted file name to a safe flat name: take the final path
/// component, map whitespace to `_`, drop everything outside
/// `[A-Za-z0-9._-]`, and trim leading dots.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    cleaned.trim_start_matches('.').to_string()
}
