//! Service config: YAML on disk, parsed strictly and validated before use.

pub mod schema;

use std::path::Path;

use tally_core::error::{Result, TallyError};

pub use schema::{ServiceConfig, ServiceSection};

/// Env var that overrides [`DEFAULT_PATH`].
pub const PATH_ENV: &str = "TALLY_CONFIG";
pub const DEFAULT_PATH: &str = "tally.yaml";

/// Config path for this process: `$TALLY_CONFIG`, else `tally.yaml`.
pub fn resolve_path() -> String {
    std::env::var(PATH_ENV).unwrap_or_else(|_| DEFAULT_PATH.to_string())
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<ServiceConfig> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| {
        TallyError::Internal(format!("cannot read config {}: {e}", path.display()))
    })?;
    load_from_str(&raw)
}

/// Unknown keys and unsupported versions are rejected.
pub fn load_from_str(raw: &str) -> Result<ServiceConfig> {
    let cfg = serde_yaml::from_str::<ServiceConfig>(raw)
        .map_err(|e| TallyError::BadRequest(format!("config is not valid: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
