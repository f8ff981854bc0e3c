//! The `cartId` session cookie.
//!
//! The cookie is the sole session identifier: it holds the backend cart id
//! and there is no server-side session store. The cart lives until the
//! cookie expires or checkout completes.

use axum::http::{HeaderMap, header};

/// Name of the session cookie holding the backend cart id.
pub const CART_COOKIE: &str = "cartId";

/// Read the cart id from the request's `Cookie` header.
#[must_use]
pub fn cart_id(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name != CART_COOKIE || value.is_empty() {
            return None;
        }
        Some(urlencoding::decode(value).ok()?.into_owned())
    })
}

/// Build the `Set-Cookie` value persisting a cart id.
#[must_use]
pub fn set_cart_cookie(cart_id: &str) -> String {
    format!(
        "{CART_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
        urlencoding::encode(cart_id)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_cart_id_parsed_from_cookie_header() {
        let headers = headers_with_cookie("theme=dark; cartId=cart_01HX; other=1");
        assert_eq!(cart_id(&headers).unwrap(), "cart_01HX");
    }

    #[test]
    fn test_cart_id_absent() {
        assert!(cart_id(&HeaderMap::new()).is_none());
        assert!(cart_id(&headers_with_cookie("theme=dark")).is_none());
        assert!(cart_id(&headers_with_cookie("cartId=")).is_none());
    }

    #[test]
    fn test_set_cookie_is_http_only() {
        let value = set_cart_cookie("cart_01HX");
        assert_eq!(value, "cartId=cart_01HX; Path=/; HttpOnly; SameSite=Lax");
    }

    #[test]
    fn test_cookie_value_round_trips() {
        let set = set_cart_cookie("cart 01");
        let cookie_pair = set.split(';').next().unwrap();
        let headers = headers_with_cookie(cookie_pair);
        assert_eq!(cart_id(&headers).unwrap(), "cart 01");
    }
}
