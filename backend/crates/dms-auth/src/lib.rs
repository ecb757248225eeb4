pub mod claims;
pub mod error;
pub mod identity;
pub mod key_fetcher;
pub mod key_store;
pub mod tenant_resolver;
pub mod token_verifier;

pub use claims::{Claims, RealmAccess, ResourceAccess};
pub use error::{FetchError, ResolutionError, VerifyError};
pub use identity::IdentityContext;
pub use key_fetcher::{Jwk, Jwks, KeyFetcher};
pub use key_store::{KeyStore, TrustedKey};
pub use tenant_resolver::{TENANT_PREFIX, TenantResolver};
pub use token_verifier::{DEFAULT_KEY_EXPIRY, TokenVerifier};

#[cfg(test)]
mod tests;
