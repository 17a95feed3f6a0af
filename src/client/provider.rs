//! Provides a key provider that fetches KEM public keys from the server.

use crate::asymmetric::registry::Registry;
use crate::common::errors::Error;
use crate::common::utils::expect_len;
use crate::contract::{KeyRequest, KeyResponse};
use dashmap::DashMap;
use std::sync::Arc;

/// Performs the key-exchange request against a server.
pub trait KeyFetcher: Send + Sync {
    fn fetch(&self, request: &KeyRequest) -> Result<KeyResponse, Error>;
}

/// A key provider that retrieves server KEM public keys on demand.
///
/// Keys are cached per algorithm for the lifetime of the provider; server keys
/// are never rotated. A fetched key is checked against the declared size before
/// it is cached.
pub struct RemoteKeyProvider<F: KeyFetcher> {
    fetcher: F,
    registry: Arc<Registry>,
    cache: DashMap<String, Arc<Vec<u8>>>,
}

impl<F: KeyFetcher> RemoteKeyProvider<F> {
    pub fn new(fetcher: F, registry: Arc<Registry>) -> Self {
        Self {
            fetcher,
            registry,
            cache: DashMap::new(),
        }
    }

    /// Returns the server's public key for `kem_id`, fetching it on first use.
    pub fn public_key(&self, kem_id: &str) -> Result<Arc<Vec<u8>>, Error> {
        if let Some(key) = self.cache.get(kem_id) {
            log::debug!("using cached {} server key", kem_id);
            return Ok(Arc::clone(key.value()));
        }

        let kem = self.registry.lookup_kem(kem_id)?;
        log::debug!("fetching {} server key", kem_id);
        let response = self.fetcher.fetch(&KeyRequest {
            kem_name: kem_id.to_string(),
        })?;
        let key = response.public_key()?;
        expect_len("server_public_key", kem.sizes().public_key_bytes, key.len())?;

        let key = Arc::new(key);
        self.cache.insert(kem_id.to_string(), Arc::clone(&key));
        Ok(key)
    }

    /// Drops the cached key for `kem_id` so the next call fetches again.
    pub fn invalidate(&self, kem_id: &str) {
        self.cache.remove(kem_id);
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedFetcher {
        key: Vec<u8>,
        calls: AtomicUsize,
    }

    impl KeyFetcher for FixedFetcher {
        fn fetch(&self, _request: &KeyRequest) -> Result<KeyResponse, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(KeyResponse {
                server_public_key: hex::encode(&self.key),
            })
        }
    }

    fn fetcher(len: usize) -> FixedFetcher {
        FixedFetcher {
            key: vec![0x5a; len],
            calls: AtomicUsize::new(0),
        }
    }

    #[test]
    fn test_key_is_fetched_once() {
        let provider = RemoteKeyProvider::new(fetcher(1184), Registry::shared());

        let first = provider.public_key("kyber768").unwrap();
        let second = provider.public_key("kyber768").unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.cached(), 1);

        provider.invalidate("kyber768");
        provider.public_key("kyber768").unwrap();
        assert_eq!(provider.fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_wrong_size_key_is_not_cached() {
        let provider = RemoteKeyProvider::new(fetcher(100), Registry::shared());

        let err = provider.public_key("kyber768").unwrap_err();
        assert!(matches!(err, Error::InvalidLength { expected: 1184, actual: 100, .. }));
        assert_eq!(provider.cached(), 0);
    }

    #[test]
    fn test_unknown_kem_is_not_fetched() {
        let provider = RemoteKeyProvider::new(fetcher(1184), Registry::shared());

        assert!(matches!(
            provider.public_key("kyber9000"),
            Err(Error::UnknownAlgorithm(_))
        ));
        assert_eq!(provider.fetcher.calls.load(Ordering::SeqCst), 0);
    }
}
