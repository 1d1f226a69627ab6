use thiserror::Error;

/// Errors returned by the translation client
#[derive(Error, Debug)]
pub enum Error {
    /// `/translate` answered with a non-success status. Displays as the raw response body.
    #[error("{body}")]
    Api {
        ///HTTP status code
        status: u16,
        ///Response body, untouched
        body: String,
    },

    /// `/languages` answered with a non-success status. The body is discarded.
    #[error("Failed to fetch languages")]
    LanguagesUnavailable {
        ///HTTP status code
        status: u16,
    },

    /// The request could not be sent or the response could not be read
    #[error("Network error: {0}")]
    Transport(#[from] ureq::Error),

    /// A success response did not hold the expected JSON
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A success response had a JSON shape that cannot hold the requested data
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
}

impl Error {
    /// Status code of a non-success response, if that is what failed
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } | Error::LanguagesUnavailable { status } => Some(*status),
            _ => None,
        }
    }

    /// Split the JSON failures ureq reports out of its transport errors
    pub(crate) fn from_body_read(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Json(e) => Error::Decode(e),
            other => Error::Transport(other),
        }
    }
}

#[test]
fn test_api_error_displays_raw_body() {
    let err = Error::Api {
        status: 400,
        body: " {\"detail\":\"One of the languages must be Darija (ary).\"}\n".to_string(),
    };
    assert_eq!(
        err.to_string(),
        " {\"detail\":\"One of the languages must be Darija (ary).\"}\n"
    );
    assert_eq!(err.status(), Some(400));
}

#[test]
fn test_languages_error_is_fixed() {
    let err = Error::LanguagesUnavailable { status: 503 };
    assert_eq!(err.to_string(), "Failed to fetch languages");
    assert_eq!(err.status(), Some(503));
}
