use log::{debug, warn};

use super::endpoint;
use crate::{
    Error,
    types::{TranslateRequest, TranslateResponse},
};

/// `POST {base_url}/translate`
///
/// One request, no retries. A non-success status fails with the body text as sent by the server.
pub fn translate(base_url: &str, request: &TranslateRequest) -> Result<TranslateResponse, Error> {
    let api_url = endpoint(base_url, "translate");
    debug!(
        "POST {api_url} ({} -> {})",
        request.source_language, request.target_language
    );

    let mut response = ureq::post(&api_url)
        .config()
        .http_status_as_error(false)
        .build()
        .header("Accept", "application/json")
        .content_type("application/json")
        .send_json(request)?;

    let status = response.status();
    debug!("{api_url} answered {status}");

    if !status.is_success() {
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(Error::from_body_read)?;
        let body = String::from_utf8_lossy(&bytes).into_owned();
        warn!("Translation failed with {status}");
        return Err(Error::Api {
            status: status.as_u16(),
            body,
        });
    }

    response
        .body_mut()
        .read_json::<TranslateResponse>()
        .map_err(Error::from_body_read)
}

#[test]
fn test_request_construction() {
    use crate::utils::test_server::serve_once;

    let (base_url, server) = serve_once(200, r#"{"language":"en","text":"hello"}"#);
    let request = TranslateRequest::new("salam", "ary", "en");

    let res = translate(&base_url, &request).unwrap();
    assert_eq!(
        res,
        TranslateResponse::Text {
            text: "hello".to_string(),
            language: Some("en".to_string()),
        }
    );

    let recorded = server.join().unwrap();
    assert_eq!(recorded.method, "POST");
    assert_eq!(recorded.path, "/api/translate");
    assert!(
        recorded.headers["content-type"].starts_with("application/json"),
        "content-type was {}",
        recorded.headers["content-type"]
    );
    assert_eq!(recorded.headers["accept"], "application/json");

    let body: serde_json::Value = serde_json::from_str(&recorded.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"text": "salam", "source_language": "ary", "target_language": "en"})
    );
}

#[test]
fn test_empty_text_is_sent_as_is() {
    use crate::utils::test_server::serve_once;

    let (base_url, server) = serve_once(200, r#"{"text":""}"#);
    let res = translate(&base_url, &TranslateRequest::new("", "xx", "yy")).unwrap();
    assert_eq!(res.into_text(), "");

    let recorded = server.join().unwrap();
    let body: serde_json::Value = serde_json::from_str(&recorded.body).unwrap();
    assert_eq!(body["text"], "");
    assert_eq!(body["source_language"], "xx");
    assert_eq!(body["target_language"], "yy");
}

#[test]
fn test_error_status_keeps_body() {
    use crate::utils::test_server::serve_once;

    let body = r#"{"detail":"One of the languages must be Darija (ary)."}"#;
    let (base_url, server) = serve_once(400, body);

    let err = translate(&base_url, &TranslateRequest::new("hello", "en", "fra")).unwrap_err();
    match &err {
        Error::Api { status, body: text } => {
            assert_eq!(*status, 400);
            assert_eq!(text, body);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(err.to_string(), body);
    server.join().unwrap();
}

#[test]
fn test_error_status_with_invalid_utf8_body() {
    use crate::utils::test_server::serve_bytes_once;

    let (base_url, server) = serve_bytes_once(500, b"\xffab");

    let err = translate(&base_url, &TranslateRequest::new("salam", "ary", "en")).unwrap_err();
    match &err {
        Error::Api { status, body } => {
            assert_eq!(*status, 500);
            assert_eq!(body, "\u{FFFD}ab");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(err.status(), Some(500));
    server.join().unwrap();
}

#[test]
fn test_malformed_success_body() {
    use crate::utils::test_server::serve_once;

    let (base_url, server) = serve_once(200, "not json");
    let err = translate(&base_url, &TranslateRequest::new("salam", "ary", "en")).unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "unexpected error {err:?}");
    server.join().unwrap();
}

#[test]
fn test_unreachable_backend() {
    use std::net::TcpListener;

    // Bind then drop to get a port nothing listens on
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let base_url = format!("http://127.0.0.1:{port}/api");

    let err = translate(&base_url, &TranslateRequest::new("salam", "ary", "en")).unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "unexpected error {err:?}");
}
