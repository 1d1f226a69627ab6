//!
//! _Data shapes_
//!
//! Values exchanged with the translation backend and handed to the interface layer.
//!

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};

/// Language code the backend uses for Moroccan Darija
pub const DARIJA_CODE: &str = "ary";

/// Which side of a translation pair is Darija
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    ///Darija is the source language
    #[default]
    DarijaToLang,
    ///Darija is the target language
    LangToDarija,
}

impl Direction {
    /// Order `other` and Darija into a `(source, target)` pair.
    ///
    /// Nothing is validated here, the backend decides whether `other` is supported.
    pub fn language_pair(&self, other: &str) -> (String, String) {
        match self {
            Direction::DarijaToLang => (DARIJA_CODE.to_string(), other.to_string()),
            Direction::LangToDarija => (other.to_string(), DARIJA_CODE.to_string()),
        }
    }

    /// The opposite direction
    pub fn reversed(&self) -> Self {
        match self {
            Direction::DarijaToLang => Direction::LangToDarija,
            Direction::LangToDarija => Direction::DarijaToLang,
        }
    }
}

/// A supported language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    ///Identifier sent as `source_language` / `target_language`
    pub code: String,
    ///Display name
    pub label: String,
}

/// Script a variant is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    ///Latin letters (arabizi)
    Latin,
    ///Arabic letters
    Arabic,
}

/// One rendering of a translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationVariant {
    ///Script of `text`
    pub script: Script,
    ///Translated text
    pub text: String,
}

/// Body of `POST /translate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateRequest {
    ///Text to translate
    pub text: String,
    ///Source language code
    pub source_language: String,
    ///Target language code
    pub target_language: String,
}

impl TranslateRequest {
    /// Build a request body
    pub fn new<T, S, D>(text: T, source_language: S, target_language: D) -> Self
    where
        T: Into<String>,
        S: Into<String>,
        D: Into<String>,
    {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// Successful response of `POST /translate`.
///
/// A body carrying `variants` always decodes into [`TranslateResponse::Variants`],
/// whatever else it carries. If those variants are malformed the body is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TranslateResponse {
    /// Same translation in several scripts, in server order
    Variants {
        ///Script tagged renderings
        variants: Vec<TranslationVariant>,
        ///Target language reported by the backend
        #[serde(skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    /// Single canonical translation
    Text {
        ///Translated text
        text: String,
        ///Target language reported by the backend
        #[serde(skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
}

#[derive(Deserialize)]
struct VariantsBody {
    variants: Vec<TranslationVariant>,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Deserialize)]
struct TextBody {
    text: String,
    #[serde(default)]
    language: Option<String>,
}

impl<'de> Deserialize<'de> for TranslateResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let body = Map::<String, Value>::deserialize(deserializer)?;

        if body.contains_key("variants") {
            let VariantsBody { variants, language } =
                VariantsBody::deserialize(Value::Object(body))
                    .map_err(<D::Error as de::Error>::custom)?;
            Ok(TranslateResponse::Variants { variants, language })
        } else {
            let TextBody { text, language } =
                TextBody::deserialize(Value::Object(body))
                    .map_err(<D::Error as de::Error>::custom)?;
            Ok(TranslateResponse::Text { text, language })
        }
    }
}

impl TranslateResponse {
    /// Flatten into the string shown to the user.
    ///
    /// Variants are joined with `\n` in the order received, with nothing dropped or deduplicated.
    pub fn into_text(self) -> String {
        match self {
            TranslateResponse::Variants { variants, .. } => variants
                .into_iter()
                .map(|v| v.text)
                .collect::<Vec<_>>()
                .join("\n"),
            TranslateResponse::Text { text, .. } => text,
        }
    }

    /// Language the backend says it translated into, if it said
    pub fn language(&self) -> Option<&str> {
        match self {
            TranslateResponse::Variants { language, .. } | TranslateResponse::Text { language, .. } => {
                language.as_deref()
            }
        }
    }
}

/// An entry of the translation history kept by the interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    ///Submitted text
    pub input: String,
    ///Translation shown for it
    pub output: String,
}

impl HistoryItem {
    /// Pair an input with its output
    pub fn new<I: Into<String>, O: Into<String>>(input: I, output: O) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

#[test]
fn test_direction_wire_names() {
    assert_eq!(
        serde_json::to_string(&Direction::DarijaToLang).unwrap(),
        r#""darija-to-lang""#
    );
    assert_eq!(
        serde_json::from_str::<Direction>(r#""lang-to-darija""#).unwrap(),
        Direction::LangToDarija
    );
}

#[test]
fn test_direction_language_pair() {
    assert_eq!(
        Direction::DarijaToLang.language_pair("en"),
        ("ary".to_string(), "en".to_string())
    );
    assert_eq!(
        Direction::LangToDarija.language_pair("fra"),
        ("fra".to_string(), "ary".to_string())
    );
    assert_eq!(Direction::DarijaToLang.reversed(), Direction::LangToDarija);
    assert_eq!(Direction::LangToDarija.reversed().reversed(), Direction::LangToDarija);
}

#[test]
fn test_request_field_names() {
    let body = serde_json::to_value(TranslateRequest::new("salam", "ary", "en")).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"text": "salam", "source_language": "ary", "target_language": "en"})
    );
}

#[test]
fn test_response_text_arm() {
    let res: TranslateResponse =
        serde_json::from_str(r#"{"language":"en","text":"hello"}"#).unwrap();
    assert_eq!(res.language(), Some("en"));
    assert_eq!(res.into_text(), "hello");
}

#[test]
fn test_response_variants_arm_wins() {
    let res: TranslateResponse = serde_json::from_str(
        r#"{"text":"ignored","variants":[{"script":"latin","text":"salam"},{"script":"arabic","text":"سلام"}]}"#,
    )
    .unwrap();
    match &res {
        TranslateResponse::Variants { variants, language } => {
            assert_eq!(variants.len(), 2);
            assert_eq!(variants[1].script, Script::Arabic);
            assert_eq!(language, &None);
        }
        TranslateResponse::Text { .. } => panic!("variants should select the variants arm"),
    }
    assert_eq!(res.into_text(), "salam\nسلام");
}

#[test]
fn test_response_variants_keep_order_and_duplicates() {
    let res: TranslateResponse = serde_json::from_str(
        r#"{"variants":[{"script":"arabic","text":"b"},{"script":"latin","text":"a"},{"script":"latin","text":"a"}]}"#,
    )
    .unwrap();
    assert_eq!(res.into_text(), "b\na\na");
}

#[test]
fn test_response_empty_variants() {
    let res: TranslateResponse = serde_json::from_str(r#"{"variants":[]}"#).unwrap();
    assert_eq!(res.into_text(), "");
}

#[test]
fn test_response_unknown_script_rejected() {
    let res = serde_json::from_str::<TranslateResponse>(
        r#"{"variants":[{"script":"cyrillic","text":"x"}]}"#,
    );
    assert!(res.is_err());
}

#[test]
fn test_response_null_variants_rejected() {
    let res = serde_json::from_str::<TranslateResponse>(r#"{"text":"fallback","variants":null}"#);
    assert!(res.is_err(), "decoded as {res:?}");
}

#[test]
fn test_response_bad_variant_does_not_fall_back_to_text() {
    let res = serde_json::from_str::<TranslateResponse>(
        r#"{"text":"fallback","variants":[{"script":"cyrillic","text":"x"}]}"#,
    );
    assert!(res.is_err(), "decoded as {res:?}");
}

#[test]
fn test_response_missing_both_fields_rejected() {
    assert!(serde_json::from_str::<TranslateResponse>(r#"{"language":"en"}"#).is_err());
    assert!(serde_json::from_str::<TranslateResponse>(r#"["hello"]"#).is_err());
}

#[test]
fn test_history_item_shape() {
    let item = HistoryItem::new("salam", "hello");
    assert_eq!(
        serde_json::to_value(&item).unwrap(),
        serde_json::json!({"input": "salam", "output": "hello"})
    );
}
