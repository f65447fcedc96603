use std::net::SocketAddr;

use serde::Deserialize;
use tally_core::error::{Result, TallyError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub service: ServiceSection,
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TallyError::UnsupportedVersion);
        }
        self.service.validate()
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: 1,
            service: ServiceSection::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Reported as `application` / `service` in info, health and echo bodies.
    #[serde(default = "default_name")]
    pub name: String,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            name: default_name(),
        }
    }
}

impl ServiceSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if self.name.trim().is_empty() {
            return Err(TallyError::BadRequest("service.name must not be empty".into()));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            TallyError::BadRequest(format!("service.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_name() -> String {
    "tally".into()
}
