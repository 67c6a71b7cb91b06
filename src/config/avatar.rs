use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate};

/// Avatar upload limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarConfig {
    /// Maximum accepted file size in bytes
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    /// Accepted file name extensions, lower case, without the dot
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_max_size() -> usize {
    1_000_000
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()]
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

impl AvatarConfig {
    /// Returns the content type to store for `filename`, or `None` when its
    /// extension is not accepted.
    pub fn content_type(&self, filename: &str) -> Option<&'static str> {
        let extension = Path::new(filename)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();

        if !self.allowed_extensions.iter().any(|allowed| *allowed == extension) {
            return None;
        }

        match extension.as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "gif" => Some("image/gif"),
            "webp" => Some("image/webp"),
            _ => Some("application/octet-stream"),
        }
    }
}

impl Validate for AvatarConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_size == 0 {
            return Err(ConfigError::ValidationError("avatar.max_size must be > 0".to_string()));
        }
        if self.allowed_extensions.is_empty() {
            return Err(ConfigError::ValidationError(
                "avatar.allowed_extensions cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
