mod tenant;
mod verifier;

use crate::Claims;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// PKCS#8 private key whose public components appear in
/// `signing_key_n()` below.
pub const SIGNING_KEY_PEM: &str = include_str!("../../tests/fixtures/rsa_signing_key.pem");

/// A second keypair, used to produce signatures the trusted key must
/// reject.
pub const OTHER_KEY_PEM: &str = include_str!("../../tests/fixtures/rsa_other_key.pem");

/// Base64url modulus of the signing key (exponent is the usual AQAB).
pub const SIGNING_KEY_N: &str = "sPTaugrVSkt8736Dio9S0-CuYypKpYLdDJ-RaAYBNUAurdunoNQA8DoGKU-tljN0m0VoaBI7tVxWMpwjED-cdfVa4hWaMFla3PPyuDs14u73Al_n9XaJuAlODqaH1AKeOIg-qKZ3V7DvFCV35qFcIxoJr2zAeWNjxQXIWhtOlDTzjSgV0QOYvvkOv09ZIwU0aaSXk8y8Fo_HVPDMJrUvsHnzrdsfYOGGX3OHrWNoJgZTwZWq9MdP8JddwM_24CWDXQAUX5dVlv0Nnpq9vvx77RD4EBx5buhU4Tkzyym28RtPpGXHLNbMsLzfrFR1SxX1GlwvYw4oL0S8yhPyViKRtQ";

pub const OTHER_KEY_N: &str = "t5FpzFmmt3EklworQoOLUQBuI5MWIYyFYNwxqOHIhhrrbz1pQNNhI5jKlrRRo3qQ8ph9rRjPlR8OcnqO_oEofsQBfmnYTkhQMIb1zUgtVBtXem5_ljKstLd4P7BMWIl36w8BKn5sjxX7VfKDnAwoE2PINfeeH9cTOBO2lED_6WzyFGAooocxP3s3E3xxu2fPZpTkA8wiwxY-DpvFxl3wFfFyDPQKtaujuSVXdFDI73ZN3hxsSS3OPpLxE-qUfyXros8zyif2aW25dYAq5xiP1BxbKZmCIvJgCpSTft-jP8uc8oerso28IV8l30XLZc7AgU9FNas4leAwgrC6cVgl2w";

pub const RSA_EXPONENT: &str = "AQAB";

/// Minimal valid claims: one hour to live, a username, no tenant
/// grants.
pub fn valid_claims() -> Claims {
    serde_json::from_value(serde_json::json!({
        "sub": "user-123",
        "preferred_username": "alice",
        "exp": chrono::Utc::now().timestamp() + 3600,
        "iat": chrono::Utc::now().timestamp(),
    }))
    .unwrap()
}

/// Sign claims as an RS256 token using a fixture private key.
pub fn sign_rs256(claims: &Claims, private_key_pem: &str) -> String {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::RS256),
        claims,
        &jsonwebtoken::EncodingKey::from_rsa_pem(private_key_pem.as_bytes()).unwrap(),
    )
    .unwrap()
}

/// Assemble a compact token with an arbitrary header and a junk
/// signature. Only usable with the trusting verifier or for
/// pre-signature rejection tests.
pub fn unsigned_token(header: &serde_json::Value, claims: &Claims) -> String {
    let header = URL_SAFE_NO_PAD.encode(serde_json::to_vec(header).unwrap());
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap());
    format!("{}.{}.{}", header, payload, URL_SAFE_NO_PAD.encode(b"sig"))
}
