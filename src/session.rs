use axum::http::{HeaderMap, header::COOKIE};

pub const COOKIE_NAME: &str = "quattor_session";
const MAX_AGE_SECS: u64 = 60 * 60 * 24 * 7;

/// Membership number stored in the session cookie, if any.
pub fn session_registration(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == COOKIE_NAME).then_some(value)
        })
        .and_then(|raw| urlencoding::decode(raw.trim()).ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn create_session_cookie(registration: &str) -> String {
    format!(
        "{COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={MAX_AGE_SECS}",
        urlencoding::encode(registration)
    )
}

pub fn destroy_session_cookie() -> String {
    format!("{COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn reads_registration_among_other_cookies() {
        let headers = headers("theme=dark; quattor_session=17841; lang=pt");
        assert_eq!(session_registration(&headers).as_deref(), Some("17841"));
    }

    #[test]
    fn missing_or_empty_cookie_is_no_session() {
        assert_eq!(session_registration(&HeaderMap::new()), None);
        assert_eq!(session_registration(&headers("theme=dark")), None);
        assert_eq!(session_registration(&headers("quattor_session=")), None);
        assert_eq!(session_registration(&headers("other_quattor_session=1")), None);
    }

    #[test]
    fn cookie_value_round_trips_through_encoding() {
        let cookie = create_session_cookie("12 34");
        assert!(cookie.starts_with("quattor_session=12%2034;"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(cookie.contains("HttpOnly"));

        let value = cookie.split(';').next().unwrap();
        assert_eq!(session_registration(&headers(value)).as_deref(), Some("12 34"));
    }

    #[test]
    fn destroyed_cookie_expires_immediately() {
        assert_eq!(
            destroy_session_cookie(),
            "quattor_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
        );
    }
}
