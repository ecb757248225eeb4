//! Bearer token verification.
//!
//! The verifier comes in two variants selected at construction time:
//! [`TokenVerifier::Strict`] performs full RS256 signature
//! verification against the key store (refreshing on staleness), and
//! [`TokenVerifier::Trusting`] decodes claims without checking the
//! signature. The trusting variant exists for local development only
//! and is a separate code path so the bypass cannot leak into the
//! strict one.

use crate::{Claims, FetchError, KeyFetcher, KeyStore, VerifyError};

use std::panic::Location;
use std::sync::Arc;
use std::time::{Duration, Instant};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, Validation, decode};
use log::warn;
use serde::Deserialize;

/// Maximum age of a cached key before a refresh is attempted on next
/// use.
pub const DEFAULT_KEY_EXPIRY: Duration = Duration::from_secs(5 * 60);

/// Clock skew tolerance for expiry checks, seconds.
const LEEWAY_SECS: u64 = 30;

/// Token header fields we inspect before any signature work.
#[derive(Debug, Deserialize)]
struct RawHeader {
    alg: String,
}

pub enum TokenVerifier {
    /// Full signature verification against the shared key store.
    Strict {
        key_store: Arc<KeyStore>,
        fetcher: KeyFetcher,
        key_expiry: Duration,
    },
    /// Development-only: claims are decoded and expiry-checked, the
    /// signature is ignored.
    Trusting,
}

impl TokenVerifier {
    pub fn strict(key_store: Arc<KeyStore>, fetcher: KeyFetcher, key_expiry: Duration) -> Self {
        Self::Strict {
            key_store,
            fetcher,
            key_expiry,
        }
    }

    pub fn is_trusting(&self) -> bool {
        matches!(self, Self::Trusting)
    }

    /// Verify a presented token and return its validated claims.
    pub async fn verify(&self, token: &str) -> Result<Claims, VerifyError> {
        match self {
            Self::Strict {
                key_store,
                fetcher,
                key_expiry,
            } => verify_strict(token, key_store, fetcher, *key_expiry).await,
            Self::Trusting => verify_trusting(token),
        }
    }
}

async fn verify_strict(
    token: &str,
    key_store: &Arc<KeyStore>,
    fetcher: &KeyFetcher,
    key_expiry: Duration,
) -> Result<Claims, VerifyError> {
    // Algorithm check comes first so algorithm-substitution ("none",
    // HS256-with-public-key) is rejected before any signature work.
    let alg = declared_algorithm(token)?;
    if alg != "RS256" {
        return Err(VerifyError::UnsupportedAlgorithm {
            alg,
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let trusted = ensure_key(key_store, fetcher, key_expiry).await?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.validate_exp = true;
    validation.validate_aud = false;
    validation.leeway = LEEWAY_SECS;

    let token_data =
        decode::<Claims>(token, &trusted.decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => VerifyError::Expired {
                    location: ErrorLocation::from(Location::caller()),
                },
                ErrorKind::InvalidSignature => VerifyError::BadSignature {
                    location: ErrorLocation::from(Location::caller()),
                },
                ErrorKind::MissingRequiredClaim(claim) => VerifyError::MissingClaim {
                    claim: claim.clone(),
                    location: ErrorLocation::from(Location::caller()),
                },
                _ => VerifyError::malformed(e.to_string()),
            }
        })?;

    token_data.claims.validate()?;

    Ok(token_data.claims)
}

/// Make sure a fresh trusted key is available, refetching when stale.
///
/// A fetch failure is fatal only when no key has ever been cached;
/// otherwise the stale key is used as a fallback, preferring
/// availability over absolute freshness.
async fn ensure_key(
    key_store: &Arc<KeyStore>,
    fetcher: &KeyFetcher,
    key_expiry: Duration,
) -> Result<crate::TrustedKey, VerifyError> {
    if key_store.is_stale(key_expiry, Instant::now()) {
        if let Err(e) = fetcher.fetch().await {
            match key_store.get() {
                Some(stale) => {
                    warn!("Key refresh failed, continuing with stale key: {}", e);
                    return Ok(stale);
                }
                None => {
                    return Err(VerifyError::KeyUnavailable {
                        source: e,
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
            }
        }
    }

    key_store.get().ok_or_else(|| VerifyError::KeyUnavailable {
        source: FetchError::NoSuitableKey {
            location: ErrorLocation::from(Location::caller()),
        },
        location: ErrorLocation::from(Location::caller()),
    })
}

fn verify_trusting(token: &str) -> Result<Claims, VerifyError> {
    let payload = token_segment(token, 1)?;
    let claims: Claims =
        serde_json::from_slice(&payload).map_err(|e| VerifyError::malformed(e.to_string()))?;

    claims.validate()?;

    if claims.exp + LEEWAY_SECS as i64 <= chrono::Utc::now().timestamp() {
        return Err(VerifyError::Expired {
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(claims)
}

/// Decode one of the three base64url segments of a compact token.
fn token_segment(token: &str, index: usize) -> Result<Vec<u8>, VerifyError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(VerifyError::malformed(
            "expected three dot-separated segments",
        ));
    }

    URL_SAFE_NO_PAD
        .decode(parts[index])
        .map_err(|e| VerifyError::malformed(e.to_string()))
}

/// The algorithm declared in the token header.
fn declared_algorithm(token: &str) -> Result<String, VerifyError> {
    let header = token_segment(token, 0)?;
    let header: RawHeader =
        serde_json::from_slice(&header).map_err(|e| VerifyError::malformed(e.to_string()))?;
    Ok(header.alg)
}
