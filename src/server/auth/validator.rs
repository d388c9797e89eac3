use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use log::{debug, error};

use super::jwks::KeySource;
use super::{AuthError, Claims};

/// Verifies RS256 bearer tokens issued by `https://<domain>/` for one API
/// audience, against keys looked up by `kid`.
pub struct TokenValidator {
    keys: Box<dyn KeySource>,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(domain: &str, audience: &str, keys: Box<dyn KeySource>) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = 0;
        validation.set_audience(&[audience]);
        validation.set_issuer(&[format!("https://{domain}/")]);

        Self { keys, validation }
    }

    pub async fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::MALFORMED)?;
        let kid = header.kid.ok_or(AuthError::MALFORMED)?;

        let mut set = match self.keys.key_set().await {
            Ok(set) => set,
            Err(e) => {
                error!("Fetch signing keys failed: {e:#}");
                return Err(AuthError::KEYS_UNAVAILABLE);
            }
        };
        if set.find(&kid).is_none() {
            debug!("Signing key '{kid}' not in key set, refreshing");
            set = match self.keys.refresh().await {
                Ok(set) => set,
                Err(e) => {
                    error!("Refresh signing keys failed: {e:#}");
                    return Err(AuthError::KEY_NOT_FOUND);
                }
            };
        }
        let jwk = set.find(&kid).ok_or(AuthError::KEY_NOT_FOUND)?;
        let key = DecodingKey::from_jwk(jwk).map_err(|e| {
            debug!("Signing key '{kid}' is unusable: {e}");
            AuthError::KEY_NOT_FOUND
        })?;

        match decode::<Claims>(token, &key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => {
                debug!("Reject token: {e}");
                Err(match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => {
                        AuthError::INCORRECT_CLAIMS
                    }
                    _ => AuthError::UNPARSABLE,
                })
            }
        }
    }
}
