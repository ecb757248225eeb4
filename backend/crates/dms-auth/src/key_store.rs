//! Shared cache for the currently trusted verification key.
//!
//! The store is the only state shared across concurrent requests.
//! It is owned explicitly and injected into the verifier at
//! construction, so tests can substitute their own instance.

use std::sync::RwLock;
use std::time::{Duration, Instant};

use jsonwebtoken::DecodingKey;

/// The verification key currently accepted for signature checks,
/// plus the timestamp of its last successful fetch.
#[derive(Clone)]
pub struct TrustedKey {
    pub decoding_key: DecodingKey,
    pub fetched_at: Instant,
}

/// Reader/writer cell around the trusted key. Reads may be concurrent;
/// a writer holds exclusive access only for the duration of the
/// replacement.
#[derive(Default)]
pub struct KeyStore {
    inner: RwLock<Option<TrustedKey>>,
}

impl KeyStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// Current trusted key, if any fetch has ever succeeded.
    ///
    /// A poisoned lock is treated as "no key"; the verifier then falls
    /// back to its key-unavailable path instead of panicking.
    pub fn get(&self) -> Option<TrustedKey> {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(_) => None,
        }
    }

    /// Atomically replace the trusted key and its fetch timestamp.
    pub fn set(&self, decoding_key: DecodingKey, fetched_at: Instant) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = Some(TrustedKey {
                decoding_key,
                fetched_at,
            });
        }
    }

    /// True when no key is present or the cached key is older than
    /// `threshold` relative to `now`.
    pub fn is_stale(&self, threshold: Duration, now: Instant) -> bool {
        match self.get() {
            Some(key) => now.duration_since(key.fetched_at) > threshold,
            None => true,
        }
    }
}
