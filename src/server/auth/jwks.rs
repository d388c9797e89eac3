use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use log::{debug, info};

/// Where the token validator gets its signing keys from.
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn key_set(&self) -> Result<Arc<JwkSet>>;

    /// A key set that skips any cache. Called when a token names a key the
    /// last set does not have, as happens after the provider rotates keys.
    async fn refresh(&self) -> Result<Arc<JwkSet>> {
        self.key_set().await
    }
}

/// Fetches `https://<domain>/.well-known/jwks.json` on every call.
pub struct RemoteKeySource {
    client: reqwest::Client,
    url: String,
}

impl RemoteKeySource {
    const TIMEOUT_SECS: u64 = 10;

    pub fn new(domain: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECS))
            .build()
            .context("build http client")?;
        let url = format!("https://{domain}/.well-known/jwks.json");
        Ok(Self { client, url })
    }
}

#[async_trait]
impl KeySource for RemoteKeySource {
    async fn key_set(&self) -> Result<Arc<JwkSet>> {
        debug!("Fetching signing keys from {}", self.url);
        let set: JwkSet = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("request '{}'", self.url))?
            .error_for_status()
            .context("signing keys response")?
            .json()
            .await
            .context("decode signing keys")?;
        Ok(Arc::new(set))
    }
}

/// A fixed key set, read once from a JSON file or given directly.
pub struct StaticKeySource {
    set: Arc<JwkSet>,
}

impl StaticKeySource {
    pub fn new(set: Arc<JwkSet>) -> Self {
        Self { set }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("read key set file '{}'", path.display()))?;
        let set: JwkSet = serde_json::from_str(&data)
            .with_context(|| format!("parse key set file '{}'", path.display()))?;
        info!(
            "Loaded {} signing key(s) from {}",
            set.keys.len(),
            path.display()
        );
        Ok(Self::new(Arc::new(set)))
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    async fn key_set(&self) -> Result<Arc<JwkSet>> {
        Ok(self.set.clone())
    }
}

/// Keeps the last key set of `inner` for `ttl`. The slot lock is never held
/// while fetching, so concurrent misses may fetch twice.
pub struct CachedKeySource<S: KeySource> {
    inner: S,
    ttl: Duration,
    slot: Mutex<Option<(Instant, Arc<JwkSet>)>>,
}

impl<S: KeySource> CachedKeySource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            slot: Mutex::new(None),
        }
    }

    fn cached(&self) -> Option<Arc<JwkSet>> {
        let slot = self.slot.lock().ok()?;
        match slot.as_ref() {
            Some((fetched_at, set)) if fetched_at.elapsed() < self.ttl => Some(set.clone()),
            _ => None,
        }
    }

    fn store(&self, set: Arc<JwkSet>) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some((Instant::now(), set));
        }
    }
}

#[async_trait]
impl<S: KeySource> KeySource for CachedKeySource<S> {
    async fn key_set(&self) -> Result<Arc<JwkSet>> {
        if let Some(set) = self.cached() {
            return Ok(set);
        }

        self.refresh().await
    }

    async fn refresh(&self) -> Result<Arc<JwkSet>> {
        let set = self.inner.key_set().await?;
        self.store(set.clone());
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::bail;

    use super::*;

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl KeySource for CountingSource {
        async fn key_set(&self) -> Result<Arc<JwkSet>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                bail!("network down");
            }
            Ok(Arc::new(JwkSet { keys: vec![] }))
        }
    }

    #[actix_web::test]
    async fn test_cached_key_source() {
        let source = CachedKeySource::new(
            CountingSource {
                calls: AtomicUsize::new(0),
                fail: false,
            },
            Duration::from_secs(600),
        );
        for _ in 0..3 {
            source.key_set().await.unwrap();
        }
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 1);

        let source = CachedKeySource::new(
            CountingSource {
                calls: AtomicUsize::new(0),
                fail: false,
            },
            Duration::ZERO,
        );
        for _ in 0..3 {
            source.key_set().await.unwrap();
        }
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 3);

        // Failures are not cached
        let source = CachedKeySource::new(
            CountingSource {
                calls: AtomicUsize::new(0),
                fail: true,
            },
            Duration::from_secs(600),
        );
        assert!(source.key_set().await.is_err());
        assert!(source.key_set().await.is_err());
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[actix_web::test]
    async fn test_cached_key_source_refresh() {
        let source = CachedKeySource::new(
            CountingSource {
                calls: AtomicUsize::new(0),
                fail: false,
            },
            Duration::from_secs(600),
        );
        source.key_set().await.unwrap();
        source.refresh().await.unwrap();
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 2);

        // The refreshed set is cached again
        source.key_set().await.unwrap();
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[actix_web::test]
    async fn test_static_key_source() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/testdata/jwks.json");
        let source = StaticKeySource::from_file(&path).unwrap();
        let set = source.key_set().await.unwrap();
        assert!(set.find("encore-test-key").is_some());

        assert!(StaticKeySource::from_file(Path::new("/no/such/jwks.json")).is_err());
    }
}
