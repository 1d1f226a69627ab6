use serde::{Deserialize, de::Error as _};
use serde_json::Value;

use crate::{Error, types::Language};

/// Locale a language name is displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayLanguage {
    ///English names
    #[default]
    En,
    ///French names
    Fr,
    ///Arabic names
    Ar,
}

impl DisplayLanguage {
    /// Key of this locale in the backend's language table
    pub fn key(&self) -> &'static str {
        match self {
            DisplayLanguage::En => "en",
            DisplayLanguage::Fr => "fr",
            DisplayLanguage::Ar => "ar",
        }
    }
}

/// Decode a `/languages` body into [`Language`] entries.
///
/// Accepts either a list of `{code, label}` objects or the backend's table keyed by code
/// (`{"ary": {"en": "Darija", "fr": "Darija", "ar": "..."}}`), taking labels in `display`.
/// Entry order is kept. A table entry without a `display` name fails with [`Error::Decode`].
pub fn decode_languages(value: Value, display: DisplayLanguage) -> Result<Vec<Language>, Error> {
    match value {
        Value::Array(_) => Ok(Vec::<Language>::deserialize(value)?),
        Value::Object(table) => {
            let mut languages = Vec::with_capacity(table.len());

            for (code, names) in table {
                let label = names
                    .get(display.key())
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        Error::Decode(serde_json::Error::custom(format!(
                            "language `{code}` has no `{}` name",
                            display.key()
                        )))
                    })?;

                languages.push(Language {
                    code,
                    label: label.to_string(),
                });
            }

            Ok(languages)
        }
        other => Err(Error::UnexpectedShape(format!(
            "expected a list or table of languages, got `{other}`"
        ))),
    }
}

#[test]
fn test_decode_list() {
    let value = serde_json::json!([{"code": "en", "label": "English"}, {"code": "ary", "label": "Darija"}]);
    let languages = decode_languages(value, DisplayLanguage::Fr).unwrap();
    assert_eq!(
        languages,
        vec![
            Language {
                code: "en".to_string(),
                label: "English".to_string()
            },
            Language {
                code: "ary".to_string(),
                label: "Darija".to_string()
            },
        ]
    );
}

#[test]
fn test_decode_table_keeps_order() {
    let value: Value = serde_json::from_str(
        r#"{"ary":{"en":"Darija","fr":"Darija","ar":"الدارجة"},"en":{"en":"English","fr":"Anglais","ar":"الإنجليزية"},"deu":{"en":"German","fr":"Allemand","ar":"الألمانية"}}"#,
    )
    .unwrap();
    let languages = decode_languages(value, DisplayLanguage::Fr).unwrap();
    let pairs: Vec<(&str, &str)> = languages
        .iter()
        .map(|l| (l.code.as_str(), l.label.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![("ary", "Darija"), ("en", "Anglais"), ("deu", "Allemand")]
    );
}

#[test]
fn test_decode_table_missing_display_name() {
    let value = serde_json::json!({"en": {"en": "English"}});
    let err = decode_languages(value, DisplayLanguage::Ar).unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "unexpected error {err:?}");
    assert!(err.to_string().contains("language `en` has no `ar` name"));
}

#[test]
fn test_decode_table_entry_not_an_object() {
    let value = serde_json::json!({"en": "English", "ary": {"en": 3}});
    let err = decode_languages(value, DisplayLanguage::En).unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "unexpected error {err:?}");
}

#[test]
fn test_decode_list_shape_mismatch() {
    let value = serde_json::json!([{"code": "en"}]);
    let err = decode_languages(value, DisplayLanguage::En).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn test_decode_scalar_rejected() {
    let err = decode_languages(Value::String("en".to_string()), DisplayLanguage::En).unwrap_err();
    assert!(matches!(err, Error::UnexpectedShape(_)));
}
