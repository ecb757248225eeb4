use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failures fetching key material from the identity provider.
///
/// A fetch failure is recovered locally when a previously cached key
/// exists; otherwise it escalates to [`VerifyError::KeyUnavailable`].
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Key endpoint request failed: {source} {location}")]
    Http {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("Key endpoint returned status {status} {location}")]
    Status { status: u16, location: ErrorLocation },

    #[error("Key endpoint response could not be decoded: {source} {location}")]
    Decode {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("Key endpoint returned an empty key list {location}")]
    NoKeys { location: ErrorLocation },

    #[error("No suitable RSA signing key in key endpoint response {location}")]
    NoSuitableKey { location: ErrorLocation },
}

/// Failures verifying a presented bearer token.
///
/// Internal variants are logged by the caller but never surfaced
/// verbatim to clients; the HTTP layer collapses them into a generic
/// unauthorized response.
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Malformed token: {message} {location}")]
    Malformed {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unsupported signing algorithm: {alg} {location}")]
    UnsupportedAlgorithm {
        alg: String,
        location: ErrorLocation,
    },

    #[error("No verification key available: {source} {location}")]
    KeyUnavailable {
        #[source]
        source: FetchError,
        location: ErrorLocation,
    },

    #[error("Token signature verification failed {location}")]
    BadSignature { location: ErrorLocation },

    #[error("Token expired {location}")]
    Expired { location: ErrorLocation },

    #[error("Missing required claim '{claim}' {location}")]
    MissingClaim {
        claim: String,
        location: ErrorLocation,
    },
}

impl VerifyError {
    #[track_caller]
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::Malformed {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Failure deriving a tenant scope from validated claims.
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("No tenant scope derivable from token claims {location}")]
    NoTenant { location: ErrorLocation },
}
