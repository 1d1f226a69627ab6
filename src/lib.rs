#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(test, deny(warnings))]

//! # darija-translate
//!
//! The `darija-translate` crate is a small blocking client for the Darija translation backend.
//!
//! It covers the two calls the web interface makes:
//!
//! - `POST /translate` renders the result as plain text, joining script variants with newlines
//! - `GET /languages` returns the supported languages, either raw or decoded into [`Language`]
//!
//! It also carries the data shapes the interface works with ([`Direction`], [`HistoryItem`], ...).
//!
//! # Usage
//!
//! The base URL is resolved once and handed to the client.
//!
//! In development builds the client talks to `http://localhost:8000/api`.
//! Production builds read the base URL from the environment (a `.env` file is loaded if present):
//!
//!- **PUBLIC_API_BASE_URL = "https://example.com/api"**
//!- **APP_ENV = "production"** to force a mode regardless of the build profile
//!
//! ```rust,no_run
//!use darija_translate::{TranslationClient, config::Config};
//!
//!fn main() {
//!    env_logger::init();
//!
//!    let cfg = Config::new().base_url("http://localhost:8000/api").build();
//!    let client = TranslationClient::new(cfg);
//!
//!    let text = client.translate_text("salam", "ary", "en").unwrap();
//!    println!("{text}");
//!}
//! ```
//!
//! Requests are sent once. There is no retry, caching or timeout beyond the transport defaults.

use serde_json::Value;

use crate::config::{Config, ConfigError};

mod api;
pub mod config;
mod error;
pub mod types;
mod utils;

pub use error::Error;
pub use types::{
    DARIJA_CODE, Direction, HistoryItem, Language, Script, TranslateRequest, TranslateResponse,
    TranslationVariant,
};
pub use utils::languages::{DisplayLanguage, decode_languages};

/// The translation api
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationClient {
    config: Config,
}

impl TranslationClient {
    /// Client for the backend under `config.base_url`
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Client configured with [`Config::from_env`]
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(Config::from_env()?))
    }

    /// Base URL requests are sent under
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Send a translation request and return the decoded response.
    ///
    /// A non-success status fails with [`Error::Api`], which displays as the raw response body.
    pub fn translate(&self, request: &TranslateRequest) -> Result<TranslateResponse, Error> {
        api::translate::translate(self.base_url(), request)
    }

    /// Translate `text` and return it ready for display.
    ///
    /// Script variants are joined with `\n` in the order the server sent them.
    ///
    /// Example:
    /// ```rust,no_run
    ///use darija_translate::{Direction, TranslationClient, config::Config};
    ///
    ///let client = TranslationClient::new(Config::new());
    ///let (source, target) = Direction::LangToDarija.language_pair("en");
    ///let text = client.translate_text("good morning", &source, &target).unwrap();
    /// ```
    pub fn translate_text(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, Error> {
        let request = TranslateRequest::new(text, source_lang, target_lang);
        Ok(self.translate(&request)?.into_text())
    }

    /// Fetch the supported languages as sent, without checking their shape.
    ///
    /// A non-success status fails with [`Error::LanguagesUnavailable`]
    /// ("Failed to fetch languages"), the response body is not reported.
    pub fn get_supported_languages(&self) -> Result<Value, Error> {
        api::languages::fetch_languages(self.base_url())
    }

    /// Fetch the supported languages and decode them, labels taken in `display`
    pub fn supported_languages(&self, display: DisplayLanguage) -> Result<Vec<Language>, Error> {
        decode_languages(self.get_supported_languages()?, display)
    }
}

#[cfg(test)]
fn test_client(base_url: &str) -> TranslationClient {
    TranslationClient::new(Config::new().base_url(base_url).build())
}

#[test]
fn test_translate_text_single() {
    use crate::utils::test_server::serve_once;

    let (base_url, server) = serve_once(200, r#"{"text":"hello"}"#);
    let client = test_client(&base_url);

    assert_eq!(client.translate_text("salam", "ar-ma", "en").unwrap(), "hello");

    let recorded = server.join().unwrap();
    let body: Value = serde_json::from_str(&recorded.body).unwrap();
    assert_eq!(body["source_language"], "ar-ma");
}

#[test]
fn test_translate_text_variants() {
    use crate::utils::test_server::serve_once;

    let (base_url, server) = serve_once(
        200,
        r#"{"variants":[{"script":"latin","text":"salam"},{"script":"arabic","text":"سلام"}]}"#,
    );
    let client = test_client(&base_url);

    assert_eq!(
        client.translate_text("salam", "ar-ma", "en").unwrap(),
        "salam\nسلام"
    );
    server.join().unwrap();
}

#[test]
fn test_translate_text_no_variants() {
    use crate::utils::test_server::serve_once;

    let (base_url, server) = serve_once(200, r#"{"language":"ary","variants":[]}"#);
    let client = test_client(&base_url);

    assert_eq!(client.translate_text("", "en", "ary").unwrap(), "");
    server.join().unwrap();
}

#[test]
fn test_translate_text_server_error() {
    use crate::utils::test_server::serve_once;

    let (base_url, server) = serve_once(500, "internal error");
    let client = test_client(&base_url);

    let err = client.translate_text("salam", "ar-ma", "en").unwrap_err();
    assert_eq!(err.to_string(), "internal error");
    assert_eq!(err.status(), Some(500));
    server.join().unwrap();
}

#[test]
fn test_translate_text_error_body_not_trimmed() {
    use crate::utils::test_server::serve_once;

    let (base_url, server) = serve_once(404, "  Not Found \n");
    let client = test_client(&base_url);

    let err = client.translate_text("salam", "ar-ma", "en").unwrap_err();
    assert_eq!(err.to_string(), "  Not Found \n");
    server.join().unwrap();
}

#[test]
fn test_get_supported_languages_passthrough() {
    use crate::utils::test_server::serve_once;

    let (base_url, server) = serve_once(200, r#"[{"code":"en","label":"English"}]"#);
    let client = test_client(&base_url);

    assert_eq!(
        client.get_supported_languages().unwrap(),
        serde_json::json!([{"code": "en", "label": "English"}])
    );
    server.join().unwrap();
}

#[test]
fn test_get_supported_languages_fixed_error() {
    use crate::utils::test_server::serve_once;

    let (base_url, server) = serve_once(500, "database is down");
    let client = test_client(&base_url);

    let err = client.get_supported_languages().unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch languages");
    server.join().unwrap();
}

#[test]
fn test_supported_languages_from_table() {
    use crate::utils::test_server::serve_once;

    let (base_url, server) = serve_once(
        200,
        r#"{"ary":{"en":"Darija","fr":"Darija","ar":"الدارجة"},"en":{"en":"English","fr":"Anglais","ar":"الإنجليزية"}}"#,
    );
    let client = test_client(&base_url);

    let languages = client.supported_languages(DisplayLanguage::Ar).unwrap();
    assert_eq!(
        languages,
        vec![
            Language {
                code: "ary".to_string(),
                label: "الدارجة".to_string()
            },
            Language {
                code: "en".to_string(),
                label: "الإنجليزية".to_string()
            },
        ]
    );
    server.join().unwrap();
}

#[test]
fn test_supported_languages_shape_mismatch() {
    use crate::utils::test_server::serve_once;

    let (base_url, server) = serve_once(200, r#""ary""#);
    let client = test_client(&base_url);

    let err = client.supported_languages(DisplayLanguage::En).unwrap_err();
    assert!(matches!(err, Error::UnexpectedShape(_)), "unexpected error {err:?}");
    server.join().unwrap();
}

#[test]
fn test_base_url_injected() {
    let client = test_client("http://10.0.0.1:8080/api/");
    assert_eq!(client.base_url(), "http://10.0.0.1:8080/api");
}
