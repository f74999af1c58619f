use actix_web::http::header;
use actix_web::HttpRequest;
use hmac::{Hmac, Mac};
use jwt::{AlgorithmType, Header, SignWithKey, Token, VerifyWithKey};
use jwt::token::{Signed, Unverified, Verified};
use sha2::{Sha256, Sha384, Sha512};
use thiserror::Error;

use crate::data_structs::token_payload::TokenPayload;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization header is missing or is not a bearer token")]
    MissingBearer,

    #[error("token could not be verified: {0}")]
    Unverified(#[from] jwt::Error),

    #[error("token algorithm {0:?} is not an HMAC algorithm")]
    UnsupportedAlgorithm(AlgorithmType),

    #[error("token is expired or not yet valid")]
    OutsideValidityWindow,

    #[error("signing key could not be created")]
    InvalidKey,
}

/// Shared HMAC secret used to sign and verify bearer tokens.
///
/// Tokens are issued as HS256. Verification follows the token's `alg` header and
/// accepts HS256, HS384 and HS512 under the same secret.
#[derive(Clone)]
pub struct JwtSecretKey {
    secret_key: String,
}

impl JwtSecretKey {

    pub fn new(secret_key: impl Into<String>) -> JwtSecretKey {
        return JwtSecretKey {
            secret_key: secret_key.into()
        };
    }

    fn hs256_key(&self) -> Result<Hmac<Sha256>, AuthError> {
        Hmac::new_from_slice(self.secret_key.as_bytes()).map_err(|_| AuthError::InvalidKey)
    }

    fn hs384_key(&self) -> Result<Hmac<Sha384>, AuthError> {
        Hmac::new_from_slice(self.secret_key.as_bytes()).map_err(|_| AuthError::InvalidKey)
    }

    fn hs512_key(&self) -> Result<Hmac<Sha512>, AuthError> {
        Hmac::new_from_slice(self.secret_key.as_bytes()).map_err(|_| AuthError::InvalidKey)
    }

    pub fn sign_token(&self, payload: &TokenPayload) -> Result<String, AuthError> {
        self.sign_token_with_algorithm(payload, AlgorithmType::Hs256)
    }

    pub fn sign_token_with_algorithm(&self, payload: &TokenPayload, algorithm: AlgorithmType) -> Result<String, AuthError> {
        let header = Header {
            algorithm,
            ..Default::default()
        };
        let token = Token::new(header, payload);
        let signed: Token<Header, &TokenPayload, Signed> = match algorithm {
            AlgorithmType::Hs256 => token.sign_with_key(&self.hs256_key()?)?,
            AlgorithmType::Hs384 => token.sign_with_key(&self.hs384_key()?)?,
            AlgorithmType::Hs512 => token.sign_with_key(&self.hs512_key()?)?,
            other => return Err(AuthError::UnsupportedAlgorithm(other))
        };
        Ok(signed.as_str().to_string())
    }

    /// Checks the signature, decodes the payload and checks `exp`/`nbf` against `now`.
    pub fn verify_token_at(&self, token: &str, now: i64) -> Result<TokenPayload, AuthError> {
        let unverified: Token<Header, TokenPayload, Unverified> = Token::parse_unverified(token)?;
        let algorithm = unverified.header().algorithm;
        let verified: Token<Header, TokenPayload, Verified> = match algorithm {
            AlgorithmType::Hs256 => unverified.verify_with_key(&self.hs256_key()?)?,
            AlgorithmType::Hs384 => unverified.verify_with_key(&self.hs384_key()?)?,
            AlgorithmType::Hs512 => unverified.verify_with_key(&self.hs512_key()?)?,
            other => return Err(AuthError::UnsupportedAlgorithm(other))
        };

        let payload = verified.claims().clone();
        if !payload.is_valid_at(now) {
            return Err(AuthError::OutsideValidityWindow);
        }
        Ok(payload)
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenPayload, AuthError> {
        self.verify_token_at(token, chrono::Utc::now().timestamp())
    }

    /// Authenticates a request from its `Authorization: Bearer <token>` header.
    pub fn authenticate(&self, req: &HttpRequest) -> Result<TokenPayload, AuthError> {
        let raw_header = req.headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let token = bearer_token(raw_header)?;
        self.verify_token(token)
    }
}

impl std::fmt::Debug for JwtSecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("JwtSecretKey(..)")
    }
}

/// Extracts the token from a raw `Authorization` header value. Anything after a
/// second space is ignored.
pub fn bearer_token(raw_header: Option<&str>) -> Result<&str, AuthError> {
    match raw_header {
        Some(value) if value.starts_with(BEARER_PREFIX) => {
            Ok(value.split(' ').nth(1).unwrap_or_default())
        },
        _ => Err(AuthError::MissingBearer)
    }
}
