use crate::tests::{
    OTHER_KEY_PEM, RSA_EXPONENT, SIGNING_KEY_N, SIGNING_KEY_PEM, sign_rs256, unsigned_token,
    valid_claims,
};
use crate::{DEFAULT_KEY_EXPIRY, KeyFetcher, KeyStore, TokenVerifier, VerifyError};

use std::sync::Arc;
use std::time::Instant;

use jsonwebtoken::DecodingKey;

/// A strict verifier with a freshly-cached trusted key and a fetcher
/// pointing at a dead endpoint: any refresh attempt would fail, so the
/// tests below exercise only the cached-key path.
fn strict_with_cached_key(modulus: &str) -> TokenVerifier {
    let store = Arc::new(KeyStore::new());
    store.set(
        DecodingKey::from_rsa_components(modulus, RSA_EXPONENT).unwrap(),
        Instant::now(),
    );
    let fetcher = KeyFetcher::new("http://127.0.0.1:1", "dms", Arc::clone(&store)).unwrap();
    TokenVerifier::strict(store, fetcher, DEFAULT_KEY_EXPIRY)
}

fn strict_with_empty_store() -> TokenVerifier {
    let store = Arc::new(KeyStore::new());
    let fetcher = KeyFetcher::new("http://127.0.0.1:1", "dms", Arc::clone(&store)).unwrap();
    TokenVerifier::strict(store, fetcher, DEFAULT_KEY_EXPIRY)
}

#[tokio::test]
async fn given_valid_token_when_verified_then_returns_claims() {
    let verifier = strict_with_cached_key(SIGNING_KEY_N);
    let token = sign_rs256(&valid_claims(), SIGNING_KEY_PEM);

    let claims = verifier.verify(&token).await.unwrap();

    assert_eq!(claims.username(), "alice");
}

#[tokio::test]
async fn given_token_signed_with_untrusted_key_then_bad_signature() {
    let verifier = strict_with_cached_key(SIGNING_KEY_N);
    let token = sign_rs256(&valid_claims(), OTHER_KEY_PEM);

    let result = verifier.verify(&token).await;

    assert!(matches!(result, Err(VerifyError::BadSignature { .. })));
}

#[tokio::test]
async fn given_expired_token_then_expired_even_though_signature_valid() {
    let verifier = strict_with_cached_key(SIGNING_KEY_N);
    let mut claims = valid_claims();
    claims.exp = chrono::Utc::now().timestamp() - 3600;
    let token = sign_rs256(&claims, SIGNING_KEY_PEM);

    let result = verifier.verify(&token).await;

    assert!(matches!(result, Err(VerifyError::Expired { .. })));
}

#[tokio::test]
async fn given_hs256_token_then_unsupported_algorithm_before_any_key_use() {
    // No key cached and a dead fetch endpoint: if the algorithm check
    // didn't come first this would fail with KeyUnavailable instead.
    let verifier = strict_with_empty_store();
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &valid_claims(),
        &jsonwebtoken::EncodingKey::from_secret(b"shared-secret"),
    )
    .unwrap();

    let result = verifier.verify(&token).await;

    assert!(matches!(
        result,
        Err(VerifyError::UnsupportedAlgorithm { alg, .. }) if alg == "HS256"
    ));
}

#[tokio::test]
async fn given_none_algorithm_then_unsupported_algorithm() {
    let verifier = strict_with_empty_store();
    let token = unsigned_token(&serde_json::json!({"alg": "none"}), &valid_claims());

    let result = verifier.verify(&token).await;

    assert!(matches!(
        result,
        Err(VerifyError::UnsupportedAlgorithm { alg, .. }) if alg == "none"
    ));
}

#[tokio::test]
async fn given_garbage_then_malformed() {
    let verifier = strict_with_cached_key(SIGNING_KEY_N);

    for garbage in ["", "not-a-token", "a.b", "!!!.$$$.%%%"] {
        let result = verifier.verify(garbage).await;
        assert!(
            matches!(result, Err(VerifyError::Malformed { .. })),
            "expected Malformed for {:?}",
            garbage
        );
    }
}

#[tokio::test]
async fn given_no_key_and_unreachable_endpoint_then_key_unavailable() {
    let verifier = strict_with_empty_store();
    let token = sign_rs256(&valid_claims(), SIGNING_KEY_PEM);

    let result = verifier.verify(&token).await;

    assert!(matches!(result, Err(VerifyError::KeyUnavailable { .. })));
}

#[tokio::test]
async fn given_same_token_and_key_state_then_repeated_verify_is_idempotent() {
    let verifier = strict_with_cached_key(SIGNING_KEY_N);
    let token = sign_rs256(&valid_claims(), SIGNING_KEY_PEM);

    let first = verifier.verify(&token).await.unwrap();
    let second = verifier.verify(&token).await.unwrap();

    assert_eq!(first.sub, second.sub);
    assert_eq!(first.exp, second.exp);
    assert_eq!(first.preferred_username, second.preferred_username);
}

#[tokio::test]
async fn given_trusting_verifier_then_unsigned_token_accepted() {
    let verifier = TokenVerifier::Trusting;
    let token = unsigned_token(&serde_json::json!({"alg": "RS256"}), &valid_claims());

    let claims = verifier.verify(&token).await.unwrap();

    assert_eq!(claims.username(), "alice");
}

#[tokio::test]
async fn given_trusting_verifier_then_expired_token_still_rejected() {
    let verifier = TokenVerifier::Trusting;
    let mut claims = valid_claims();
    claims.exp = chrono::Utc::now().timestamp() - 3600;
    let token = unsigned_token(&serde_json::json!({"alg": "RS256"}), &claims);

    let result = verifier.verify(&token).await;

    assert!(matches!(result, Err(VerifyError::Expired { .. })));
}

#[tokio::test]
async fn given_trusting_verifier_then_garbage_still_rejected() {
    let verifier = TokenVerifier::Trusting;

    let result = verifier.verify("definitely-not-a-token").await;

    assert!(matches!(result, Err(VerifyError::Malformed { .. })));
}
