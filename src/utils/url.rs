//! Endpoint URL helpers for the classification service.
//!
//! Base URLs come from the command line or the config file and frequently
//! carry a trailing slash; endpoints are joined without producing `//`.

/// Strip trailing slashes from a configured base URL.
///
/// ```
/// use moodbot::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("https://mood.example.com/"), "https://mood.example.com");
/// assert_eq!(normalize_base_url("https://mood.example.com/api//"), "https://mood.example.com/api");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path such as `health` or `/predict`.
///
/// ```
/// use moodbot::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://mood.example.com/", "/predict"),
///     "https://mood.example.com/predict"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

/// Returns true when the value looks like an absolute http(s) URL.
pub fn is_http_url(value: &str) -> bool {
    let value = value.trim();
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_slashes_and_whitespace() {
        assert_eq!(
            normalize_base_url("https://mood.example.com"),
            "https://mood.example.com"
        );
        assert_eq!(
            normalize_base_url(" https://mood.example.com/// "),
            "https://mood.example.com"
        );
        assert_eq!(normalize_base_url("///"), "");
    }

    #[test]
    fn construct_joins_service_endpoints() {
        assert_eq!(
            construct_api_url("https://mood.example.com", "health"),
            "https://mood.example.com/health"
        );
        assert_eq!(
            construct_api_url("http://127.0.0.1:8000/", "/predict"),
            "http://127.0.0.1:8000/predict"
        );
        assert_eq!(
            construct_api_url("https://mood.example.com/v2//", "///predict"),
            "https://mood.example.com/v2/predict"
        );
    }

    #[test]
    fn http_url_detection() {
        assert!(is_http_url("https://mood.example.com"));
        assert!(is_http_url("http://localhost:8000"));
        assert!(!is_http_url("ftp://mood.example.com"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("mood.example.com"));
    }
}
