//! Shapes shared across Atlas responses.

use serde::Deserialize;

/// Error document returned by the Atlas Administration API on failure.
///
/// Every field is optional so a partially-filled body still parses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AtlasErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub error: Option<u16>,
    #[serde(rename = "errorCode", default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl AtlasErrorBody {
    /// Human-readable message: `detail`, falling back to `reason`.
    pub fn message(&self) -> Option<String> {
        self.detail.clone().or_else(|| self.reason.clone())
    }
}
