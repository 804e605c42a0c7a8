use axum::http::HeaderMap;

/// Extract the bearer token from an `Authorization` header, if any.
///
/// Returns `None` for a missing header, a non-Bearer scheme, or an empty
/// token; the access gate turns `None` into `Unauthenticated`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(axum::http::header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn extracts_the_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn missing_header_is_none() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn non_bearer_scheme_is_none() {
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwdw==")), None);
    }

    #[test]
    fn empty_token_is_none() {
        assert_eq!(bearer_token(&headers("Bearer   ")), None);
    }
}
