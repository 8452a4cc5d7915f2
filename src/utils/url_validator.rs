//! Validation of destination URLs.
//!
//! Destinations are stored exactly as submitted (after trimming surrounding
//! whitespace) so that a lookup returns the same string the owner created.
//! This module only decides whether the input is acceptable.

use url::Url;

/// Errors returned when a destination URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL must not contain control characters")]
    ControlCharacter,
}

/// Checks that `input` is an absolute `http`/`https` URL with a host and
/// returns the trimmed value to store.
///
/// Rejects schemes like `javascript:`, `data:` and `file:`, and any control
/// character inside the URL. `Url::parse` drops embedded tabs and newlines,
/// so they have to be caught before parsing or the stored value could not be
/// sent back as a `Location` header.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_original_url(" https://example.com/a ").unwrap(), "https://example.com/a");
/// assert!(validate_original_url("www.google.com").is_err());
/// ```
pub fn validate_original_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }
    if trimmed.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacter);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(trimmed.to_string()),
        _ => Err(UrlValidationError::MissingHost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_https_with_path() {
        assert_eq!(
            validate_original_url("https://example.com/a").unwrap(),
            "https://example.com/a"
        );
    }

    #[test]
    fn test_keeps_input_verbatim() {
        // No normalization: host case, port and fragment survive.
        let input = "HTTPS://Example.COM:443/Path?q=1#frag";
        assert_eq!(validate_original_url(input).unwrap(), input);
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(
            validate_original_url("  http://example.com \n").unwrap(),
            "http://example.com"
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate_original_url("   "), Err(UrlValidationError::Empty));
    }

    #[test]
    fn test_rejects_relative() {
        assert!(matches!(
            validate_original_url("www.google.com"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_original_url("/just/a/path"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        for input in [
            "javascript:alert(1)",
            "data:text/html,hi",
            "file:///etc/passwd",
            "ftp://example.com/file",
        ] {
            assert_eq!(
                validate_original_url(input),
                Err(UrlValidationError::UnsupportedProtocol),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_embedded_control_characters() {
        for input in [
            "https://example.com/a\nb",
            "https://example.com/a\r\nSet-Cookie: x=1",
            "https://exa\tmple.com/",
            "https://example.com/\u{7f}",
        ] {
            assert_eq!(
                validate_original_url(input),
                Err(UrlValidationError::ControlCharacter),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_accepts_ip_host_and_custom_port() {
        assert!(validate_original_url("http://127.0.0.1:8080/health").is_ok());
    }
}
