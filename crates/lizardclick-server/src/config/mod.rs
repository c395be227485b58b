//! Service config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use lizardclick_core::error::{ClickError, Result};

pub use schema::{ClickConfig, CounterSection, ServerSection, StoreKind, StoreSection};

/// Env var naming the config file.
pub const CONFIG_ENV: &str = "LIZARDCLICK_CONFIG";
/// Config file used when `CONFIG_ENV` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "lizardclick.yaml";

pub fn load_from_file(path: &str) -> Result<ClickConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ClickError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ClickConfig> {
    let cfg: ClickConfig = serde_yaml::from_str(s)
        .map_err(|e| ClickError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Like `load_from_file`, but a missing file yields the built-in defaults.
pub fn load_or_default(path: &str) -> Result<ClickConfig> {
    match fs::read_to_string(path) {
        Ok(s) => load_from_str(&s),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(%path, "config file not found, using defaults");
            let cfg = ClickConfig::default();
            cfg.validate()?;
            Ok(cfg)
        }
        Err(e) => Err(ClickError::Internal(format!("read config failed: {e}"))),
    }
}
