use actix_web::http::header::AUTHORIZATION;
use actix_web::HttpRequest;

use super::AuthError;

/// Pulls the token out of an `Authorization: Bearer <token>` header.
pub fn extract_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let auth = match req.headers().get(AUTHORIZATION) {
        Some(auth) => match auth.to_str() {
            Ok(auth) => auth,
            Err(_) => return Err(AuthError::MALFORMED),
        },
        None => return Err(AuthError::HeaderMissing),
    };

    let parts: Vec<&str> = auth.split_whitespace().collect();
    match parts.as_slice() {
        [] => Err(AuthError::HeaderMissing),
        [scheme, ..] if !scheme.eq_ignore_ascii_case("bearer") => Err(AuthError::InvalidHeader(
            "Authorization header must start with \"Bearer\".",
        )),
        [_] => Err(AuthError::InvalidHeader("Token not found.")),
        [_, token] => Ok(*token),
        _ => Err(AuthError::InvalidHeader(
            "Authorization header must be bearer token.",
        )),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    fn extract(header: Option<&str>) -> Result<String, AuthError> {
        let mut req = TestRequest::default();
        if let Some(header) = header {
            req = req.insert_header(("Authorization", header));
        }
        let req = req.to_http_request();
        extract_token(&req).map(String::from)
    }

    #[test]
    fn test_extract_token() {
        assert_eq!(extract(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(extract(Some("bearer abc")).unwrap(), "abc");
        assert_eq!(extract(Some("  BEARER   abc  ")).unwrap(), "abc");

        assert_eq!(extract(None), Err(AuthError::HeaderMissing));
        assert_eq!(extract(Some("")), Err(AuthError::HeaderMissing));

        let err = extract(Some("Basic dXNlcjpwYXNz")).unwrap_err();
        assert_eq!(err.code(), "invalid_header");
        assert_eq!(
            err.to_string(),
            "Authorization header must start with \"Bearer\"."
        );

        let err = extract(Some("Bearer")).unwrap_err();
        assert_eq!(err.to_string(), "Token not found.");

        let err = extract(Some("Bearer abc def")).unwrap_err();
        assert_eq!(err.to_string(), "Authorization header must be bearer token.");
    }
}
