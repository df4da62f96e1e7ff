//! Error and Result module.

use actix_multipart::MultipartError;
use actix_web::{error::PayloadError, http::StatusCode, ResponseError};
use derive_more::{Display, Error, From};

/// A set of errors that can occur while reading or binding a form payload.
///
/// All variants are reported to the client the same way: the request is
/// finalized with a `400 Bad Request` response whose plain text body carries
/// the error's `Display` output. Use [`FormConfig::error_handler`] to replace
/// the error before it reaches the response.
///
/// [`FormConfig::error_handler`]: crate::FormConfig::error_handler
#[derive(Debug, Display, Error, From)]
#[non_exhaustive]
pub enum FormError {
    /// Content type was missing, malformed, or not a form media type.
    #[display("Content type error")]
    ContentType,

    /// Content-Length header was present but could not be parsed.
    #[display("Payload size cannot be determined")]
    UnknownLength,

    /// Buffered payload size exceeded the configured memory limit.
    #[display("Form payload is larger than allowed (limit: {limit} bytes)")]
    #[from(ignore)]
    Overflow {
        /// Maximum number of bytes the form is allowed to buffer.
        limit: usize,
    },

    /// Payload bytes were not valid in the declared character encoding.
    #[display("Character encoding error")]
    Encoding,

    /// Error while reading the multipart stream.
    #[display("{_0}")]
    Multipart(MultipartError),

    /// Error while reading the request payload.
    #[display("{_0}")]
    Payload(PayloadError),

    /// Deserialize error from the URL encoded field data.
    #[display("Form parse error: {_0}")]
    Parse(serde_urlencoded::de::Error),

    /// Serialize error while re-encoding field data for binding.
    #[display("Form serialize error: {_0}")]
    Serialize(serde_urlencoded::ser::Error),
}

impl ResponseError for FormError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_variants_map_to_bad_request() {
        let errors = [
            FormError::ContentType,
            FormError::UnknownLength,
            FormError::Overflow { limit: 1024 },
            FormError::Encoding,
            FormError::Payload(PayloadError::Overflow),
        ];

        for err in errors {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn overflow_reports_limit() {
        let err = FormError::Overflow { limit: 4096 };
        assert_eq!(
            err.to_string(),
            "Form payload is larger than allowed (limit: 4096 bytes)"
        );
    }

    #[test]
    fn error_response_is_plain_text() {
        let resp = FormError::ContentType.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let content_type = resp
            .headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("text/plain"));
    }
}
