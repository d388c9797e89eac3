use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Result};
use log::{info, warn};

use super::config::AuthConfig;
use super::jwks::{CachedKeySource, KeySource, RemoteKeySource, StaticKeySource};
use super::validator::TokenValidator;
use super::Authorizer;

pub struct AuthFactory;

impl AuthFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn build_authorizer(&self, cfg: &AuthConfig) -> Result<Authorizer> {
        if cfg.domain.is_empty() {
            bail!("auth domain is required");
        }
        if cfg.audience.is_empty() {
            bail!("auth audience is required");
        }

        let keys = self.build_key_source(cfg)?;
        let validator = TokenValidator::new(&cfg.domain, &cfg.audience, keys);
        Ok(Authorizer::new(validator))
    }

    fn build_key_source(&self, cfg: &AuthConfig) -> Result<Box<dyn KeySource>> {
        if !cfg.jwks_path.is_empty() {
            let source = StaticKeySource::from_file(Path::new(&cfg.jwks_path))?;
            return Ok(Box::new(source));
        }

        let remote = RemoteKeySource::new(&cfg.domain)?;
        if cfg.jwks_cache_secs == 0 {
            warn!("Signing key cache disabled, keys will be fetched for every request");
            return Ok(Box::new(remote));
        }

        info!(
            "Signing keys of {} are cached for {}s",
            cfg.domain, cfg.jwks_cache_secs
        );
        let ttl = Duration::from_secs(cfg.jwks_cache_secs);
        Ok(Box::new(CachedKeySource::new(remote, ttl)))
    }
}
