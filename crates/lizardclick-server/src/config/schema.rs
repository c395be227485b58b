use std::net::SocketAddr;

use serde::Deserialize;
use lizardclick_core::error::{ClickError, Result};
use lizardclick_core::{FLUSH_THRESHOLD, GLOBAL_KEY};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClickConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub counter: CounterSection,

    #[serde(default)]
    pub store: StoreSection,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            counter: CounterSection::default(),
            store: StoreSection::default(),
        }
    }
}

impl ClickConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ClickError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.counter.validate()?;
        self.store.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            ClickError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CounterSection {
    #[serde(default = "default_key")]
    pub key: String,

    #[serde(default = "default_flush_threshold")]
    pub flush_threshold: u64,
}

impl Default for CounterSection {
    fn default() -> Self {
        Self {
            key: default_key(),
            flush_threshold: default_flush_threshold(),
        }
    }
}

impl CounterSection {
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(ClickError::BadRequest("counter.key must not be empty".into()));
        }
        if !(1..=1_000_000).contains(&self.flush_threshold) {
            return Err(ClickError::BadRequest(
                "counter.flush_threshold must be between 1 and 1000000".into(),
            ));
        }
        Ok(())
    }
}

fn default_key() -> String {
    GLOBAL_KEY.into()
}
fn default_flush_threshold() -> u64 {
    FLUSH_THRESHOLD
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Memory,
    #[default]
    File,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default)]
    pub kind: StoreKind,

    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            kind: StoreKind::default(),
            path: default_store_path(),
        }
    }
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if self.kind == StoreKind::File && self.path.trim().is_empty() {
            return Err(ClickError::BadRequest(
                "store.path must not be empty when store.kind is file".into(),
            ));
        }
        Ok(())
    }
}

fn default_store_path() -> String {
    "lizardclick-data.json".into()
}
