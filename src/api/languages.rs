use log::{debug, warn};
use serde_json::Value;

use super::endpoint;
use crate::Error;

/// `GET {base_url}/languages`
///
/// Returns the parsed body untouched. A non-success status fails with
/// [`Error::LanguagesUnavailable`] whatever the server said.
pub fn fetch_languages(base_url: &str) -> Result<Value, Error> {
    let api_url = endpoint(base_url, "languages");
    debug!("GET {api_url}");

    let mut response = ureq::get(&api_url)
        .config()
        .http_status_as_error(false)
        .build()
        .call()?;

    let status = response.status();
    debug!("{api_url} answered {status}");

    if !status.is_success() {
        warn!("Fetching languages failed with {status}");
        return Err(Error::LanguagesUnavailable {
            status: status.as_u16(),
        });
    }

    response
        .body_mut()
        .read_json::<Value>()
        .map_err(Error::from_body_read)
}

#[test]
fn test_fetch_passthrough() {
    use crate::utils::test_server::serve_once;

    let (base_url, server) = serve_once(200, r#"[{"code":"en","label":"English"}]"#);
    let value = fetch_languages(&base_url).unwrap();
    assert_eq!(value, serde_json::json!([{"code": "en", "label": "English"}]));

    let recorded = server.join().unwrap();
    assert_eq!(recorded.method, "GET");
    assert_eq!(recorded.path, "/api/languages");
    assert!(recorded.body.is_empty());
}

#[test]
fn test_fetch_failure_ignores_body() {
    use crate::utils::test_server::serve_once;

    let (base_url, server) = serve_once(429, r#"{"detail":"Too Many Requests"}"#);
    let err = fetch_languages(&base_url).unwrap_err();
    assert!(matches!(err, Error::LanguagesUnavailable { status: 429 }));
    assert_eq!(err.to_string(), "Failed to fetch languages");
    server.join().unwrap();
}
