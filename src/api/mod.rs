pub mod languages;
pub mod translate;

/// Join an endpoint path onto the base URL
fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

#[test]
fn test_endpoint_join() {
    assert_eq!(
        endpoint("http://localhost:8000/api", "translate"),
        "http://localhost:8000/api/translate"
    );
    assert_eq!(
        endpoint("https://example.com/api/", "languages"),
        "https://example.com/api/languages"
    );
}
