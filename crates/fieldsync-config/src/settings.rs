//! Settings structures.

use fieldsync_core::{FieldSyncError, PageLimits, SyncOptions, TelemetryConfig};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Root settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    /// Field synchronization defaults.
    #[serde(default)]
    #[validate(nested)]
    pub sync: SyncSettings,

    /// Paging defaults.
    #[serde(default)]
    #[validate(nested)]
    pub paging: PagingSettings,

    /// Logging configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl Settings {
    /// Renders the settings as a TOML document, e.g. to seed `default.toml`.
    pub fn to_toml_string(&self) -> Result<String, FieldSyncError> {
        toml::to_string_pretty(self)
            .map_err(|e| FieldSyncError::Configuration(format!("TOML serialization error: {}", e)))
    }
}

/// Synchronizer defaults. The allow-list is per call and never configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SyncSettings {
    /// Flatten composite fields into prefixed destination fields.
    #[serde(default = "default_allow_flatten")]
    pub allow_flatten: bool,

    /// Separator between flattened path segments.
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Flattening depth limit.
    #[serde(default = "default_max_depth")]
    #[validate(range(min = 1, max = 1024, message = "must be between 1 and 1024"))]
    pub max_depth: usize,
}

fn default_allow_flatten() -> bool {
    true
}

fn default_separator() -> String {
    "_".to_string()
}

fn default_max_depth() -> usize {
    SyncOptions::DEFAULT_MAX_DEPTH
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            allow_flatten: default_allow_flatten(),
            separator: default_separator(),
            max_depth: default_max_depth(),
        }
    }
}

impl SyncSettings {
    /// Builds synchronizer options without an allow-list.
    #[must_use]
    pub fn to_options(&self) -> SyncOptions {
        SyncOptions::default()
            .with_flatten(self.allow_flatten)
            .with_separator(self.separator.clone())
            .with_max_depth(self.max_depth)
    }
}

impl From<&SyncSettings> for SyncOptions {
    fn from(settings: &SyncSettings) -> Self {
        settings.to_options()
    }
}

/// Paging defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_page_sizes"))]
pub struct PagingSettings {
    /// Page size used when a request has none.
    #[serde(default)]
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub default_page_size: Option<usize>,

    /// Upper bound for requested page sizes.
    #[serde(default)]
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub max_page_size: Option<usize>,
}

fn validate_page_sizes(settings: &PagingSettings) -> Result<(), ValidationError> {
    if let (Some(default), Some(max)) = (settings.default_page_size, settings.max_page_size) {
        if max < default {
            let mut error = ValidationError::new("max_below_default");
            error.message = Some("max_page_size must not be below default_page_size".into());
            return Err(error);
        }
    }
    Ok(())
}

impl PagingSettings {
    #[must_use]
    pub const fn to_limits(&self) -> PageLimits {
        PageLimits::new(self.default_page_size, self.max_page_size)
    }
}

impl From<&PagingSettings> for PageLimits {
    fn from(settings: &PagingSettings) -> Self {
        settings.to_limits()
    }
}
