/// HTTP Basic credential parsing
///
/// The API authenticates with the `Authorization: Basic <base64>` scheme,
/// where the payload decodes to `username:password`. Parsing is lenient in
/// one direction only: anything that is not a well-formed Basic header
/// yields `None`, which the middleware treats as an anonymous request. A
/// malformed header is never an error.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Credentials extracted from a Basic Authorization header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    /// Username (everything before the first colon)
    pub username: String,

    /// Plaintext password (may itself contain colons)
    pub password: String,
}

/// Parses an `Authorization` header value as Basic credentials.
///
/// Returns `None` if the scheme is not `Basic`, the payload is not valid
/// base64, the decoded bytes are not UTF-8, or there is no colon separator.
pub fn parse_basic(header_value: &str) -> Option<BasicCredentials> {
    let encoded = header_value.strip_prefix("Basic ")?;

    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;

    // Split on the first colon: usernames cannot contain colons, passwords can.
    let (username, password) = decoded.split_once(':')?;

    Some(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(payload: &str) -> String {
        format!("Basic {}", BASE64.encode(payload))
    }

    #[test]
    fn test_parse_valid_header() {
        let creds = parse_basic(&encode("alice:wonderland")).expect("should parse");

        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "wonderland");
    }

    #[test]
    fn test_password_may_contain_colons() {
        let creds = parse_basic(&encode("alice:a:b:c")).expect("should parse");

        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "a:b:c");
    }

    #[test]
    fn test_empty_password() {
        let creds = parse_basic(&encode("alice:")).expect("should parse");

        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "");
    }

    #[test]
    fn test_rejects_wrong_scheme() {
        assert_eq!(parse_basic("Bearer some-token"), None);
    }

    #[test]
    fn test_rejects_invalid_base64() {
        assert_eq!(parse_basic("Basic not!!base64"), None);
    }

    #[test]
    fn test_rejects_missing_colon() {
        assert_eq!(parse_basic(&encode("no-colon-here")), None);
    }

    #[test]
    fn test_rejects_non_utf8_payload() {
        let header = format!("Basic {}", BASE64.encode([0xff, 0xfe, b':', 0xfd]));
        assert_eq!(parse_basic(&header), None);
    }
}
