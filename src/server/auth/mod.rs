mod bearer;
mod jwks;
mod validator;

pub mod config;
pub mod factory;

use std::fmt;
use std::str::FromStr;

use actix_web::http::StatusCode;
use actix_web::HttpRequest;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use jwks::{CachedKeySource, KeySource, RemoteKeySource, StaticKeySource};
pub use validator::TokenValidator;

/// Why a request was refused by the permission gate. `Display` gives the
/// human description, [`AuthError::code`] the machine-readable code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    HeaderMissing,

    #[error("{0}")]
    InvalidHeader(&'static str),

    #[error("Token expired.")]
    TokenExpired,

    #[error("{0}")]
    InvalidClaims(&'static str),

    #[error("Permission not found.")]
    Unauthorized,
}

impl AuthError {
    pub const MALFORMED: Self = Self::InvalidHeader("Authorization malformed.");
    pub const KEY_NOT_FOUND: Self = Self::InvalidHeader("Unable to find the appropriate key.");
    pub const KEYS_UNAVAILABLE: Self = Self::InvalidHeader("Unable to fetch signing keys.");
    pub const UNPARSABLE: Self = Self::InvalidHeader("Unable to parse authentication token.");
    pub const INCORRECT_CLAIMS: Self =
        Self::InvalidClaims("Incorrect claims. Please, check the audience and issuer.");
    pub const PERMISSIONS_MISSING: Self = Self::InvalidClaims("Permissions not included in JWT.");

    pub fn code(&self) -> &'static str {
        match self {
            Self::HeaderMissing => "authorization_header_missing",
            Self::InvalidHeader(_) => "invalid_header",
            Self::TokenExpired => "token_expired",
            Self::InvalidClaims(_) => "invalid_claims",
            Self::Unauthorized => "unauthorized",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

/// Operations of the drink API that need a grant in the token's
/// `permissions` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    GetDrinksDetail,
    PostDrinks,
    PatchDrinks,
    DeleteDrinks,
}

impl Permission {
    pub const ALL: [Permission; 4] = [
        Permission::GetDrinksDetail,
        Permission::PostDrinks,
        Permission::PatchDrinks,
        Permission::DeleteDrinks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::GetDrinksDetail => "get:drinks-detail",
            Permission::PostDrinks => "post:drinks",
            Permission::PatchDrinks => "patch:drinks",
            Permission::DeleteDrinks => "delete:drinks",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown permission '{s}'"))
    }
}

/// Decoded token payload. Only the claims the gate reads are typed, the
/// registered ones are checked by the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    pub exp: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

/// Confirms the decoded claims grant `permission`.
pub fn check_permissions(permission: Permission, claims: &Claims) -> Result<(), AuthError> {
    let granted = match claims.permissions.as_ref() {
        Some(granted) => granted,
        None => return Err(AuthError::PERMISSIONS_MISSING),
    };

    if !granted.iter().any(|p| p == permission.as_str()) {
        return Err(AuthError::Unauthorized);
    }

    Ok(())
}

/// The permission gate in front of every protected drink operation.
pub struct Authorizer {
    validator: TokenValidator,
}

impl Authorizer {
    pub fn new(validator: TokenValidator) -> Self {
        Self { validator }
    }

    /// Extracts the bearer token from `req`, validates it and checks that it
    /// grants `permission`. The decoded claims are returned on success.
    pub async fn require(
        &self,
        req: &HttpRequest,
        permission: Permission,
    ) -> Result<Claims, AuthError> {
        let token = bearer::extract_token(req)?;
        let claims = self.validator.validate(token).await?;
        check_permissions(permission, &claims)?;
        Ok(claims)
    }
}
