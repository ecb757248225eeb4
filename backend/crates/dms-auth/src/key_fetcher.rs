//! Retrieval of signing key material from the identity provider.
//!
//! The fetcher is the sole network-calling component of the auth
//! pipeline. It reads the realm's published key set, selects the first
//! usable RSA signature key, and installs it in the injected
//! [`KeyStore`].

use crate::{FetchError, KeyStore};

use std::panic::Location;
use std::sync::Arc;
use std::time::{Duration, Instant};

use error_location::ErrorLocation;
use jsonwebtoken::DecodingKey;
use log::{debug, info};
use serde::Deserialize;

/// Upper bound on a single key-endpoint request. The transport default
/// is no timeout, which would let one slow fetch stall a request.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Published key set, as served by the realm's certs endpoint.
#[derive(Debug, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

/// A single published key candidate. All fields default so a
/// malformed candidate deserializes (and is then skipped) instead of
/// failing the whole response.
#[derive(Debug, Default, Deserialize)]
pub struct Jwk {
    #[serde(default)]
    pub kid: String,
    #[serde(default)]
    pub kty: String,
    #[serde(default)]
    pub alg: String,
    #[serde(rename = "use", default)]
    pub key_use: String,
    #[serde(default)]
    pub n: String,
    #[serde(default)]
    pub e: String,
    #[serde(default)]
    pub x5c: Option<Vec<String>>,
}

/// Fetches the realm's key set and refreshes the key store.
#[derive(Clone)]
pub struct KeyFetcher {
    client: reqwest::Client,
    certs_url: String,
    store: Arc<KeyStore>,
}

impl KeyFetcher {
    #[track_caller]
    pub fn new(base_url: &str, realm: &str, store: Arc<KeyStore>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Http {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            client,
            certs_url: Self::certs_url(base_url, realm),
            store,
        })
    }

    /// The realm's published-keys endpoint.
    pub fn certs_url(base_url: &str, realm: &str) -> String {
        format!(
            "{}/realms/{}/protocol/openid_connect/certs",
            base_url.trim_end_matches('/'),
            realm
        )
    }

    /// Fetch the key set and install the selected key in the store.
    ///
    /// Selection policy: first candidate with `kty == "RSA"` and
    /// `use == "sig"` whose modulus/exponent parse into a decoding
    /// key. Candidates that fail to parse are skipped.
    pub async fn fetch(&self) -> Result<(), FetchError> {
        debug!("Fetching verification keys from {}", self.certs_url);

        let response = self
            .client
            .get(&self.certs_url)
            .send()
            .await
            .map_err(|e| FetchError::Http {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let jwks: Jwks = response.json().await.map_err(|e| FetchError::Decode {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        if jwks.keys.is_empty() {
            return Err(FetchError::NoKeys {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        for key in &jwks.keys {
            if key.kty != "RSA" || key.key_use != "sig" {
                continue;
            }

            match DecodingKey::from_rsa_components(&key.n, &key.e) {
                Ok(decoding_key) => {
                    self.store.set(decoding_key, Instant::now());
                    info!("Refreshed verification key (kid: {})", key.kid);
                    return Ok(());
                }
                Err(e) => {
                    debug!("Skipping unparseable key candidate {}: {}", key.kid, e);
                }
            }
        }

        Err(FetchError::NoSuitableKey {
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
