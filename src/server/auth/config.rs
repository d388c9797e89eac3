use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::{expandenv, CommonConfig, PathSet};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    /// Identity provider domain, tokens must be issued by `https://<domain>/`.
    #[serde(default = "AuthConfig::default_domain")]
    pub domain: String,

    #[serde(default = "AuthConfig::default_audience")]
    pub audience: String,

    /// Read signing keys from this JSON Web Key Set file instead of fetching
    /// them from the domain.
    #[serde(default = "AuthConfig::default_jwks_path")]
    pub jwks_path: String,

    /// How long fetched signing keys are reused, 0 fetches them for every
    /// request.
    #[serde(default = "AuthConfig::default_jwks_cache_secs")]
    pub jwks_cache_secs: u64,
}

impl CommonConfig for AuthConfig {
    fn default() -> Self {
        Self {
            domain: Self::default_domain(),
            audience: Self::default_audience(),
            jwks_path: Self::default_jwks_path(),
            jwks_cache_secs: Self::default_jwks_cache_secs(),
        }
    }

    fn complete(&mut self, _ps: &PathSet) -> Result<()> {
        self.domain = expandenv("domain", &self.domain)?;
        self.domain = self.domain.trim_end_matches('/').to_string();
        self.audience = expandenv("audience", &self.audience)?;
        self.jwks_path = expandenv("jwks_path", &self.jwks_path)?;
        Ok(())
    }
}

impl AuthConfig {
    pub fn default_domain() -> String {
        String::new()
    }

    pub fn default_audience() -> String {
        String::new()
    }

    pub fn default_jwks_path() -> String {
        String::new()
    }

    pub fn default_jwks_cache_secs() -> u64 {
        600
    }
}
