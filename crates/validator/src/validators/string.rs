//! String validators
//!
//! Emptiness, pattern and format checks. Every rule is generic over
//! `AsRef<str>` so it applies to `String`, `str` and borrowed variants.

use std::sync::LazyLock;

use regex::Regex;
use url::{ParseError, Url};

use crate::foundation::codes;
use crate::validators::quoted_list;
use crate::{RuleSet, SingleRule, new_rule_set, new_single_rule};

use super::length::string_length;

static DNS_SUBDOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("DNS subdomain regex is valid")
});

static UUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("UUID regex is valid")
});

static ASCII_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\x00-\x7F]*$").expect("ASCII regex is valid"));

const DESCRIPTION_MAX_LENGTH: usize = 1050;

const URL_DESCRIPTION: &str =
    "valid URL must have a scheme (e.g. https://) and contain either host, fragment or opaque data";

// ============================================================================
// NOT EMPTY
// ============================================================================

/// Fails for strings that are empty after trimming whitespace.
pub fn string_not_empty<T: AsRef<str> + ?Sized>() -> SingleRule<T> {
    const MESSAGE: &str = "string cannot be empty";
    new_single_rule(|v: &T| {
        if v.as_ref().trim().is_empty() {
            Err(MESSAGE)
        } else {
            Ok(())
        }
    })
    .with_error_code(codes::STRING_NOT_EMPTY)
    .with_description(MESSAGE)
}

// ============================================================================
// REGULAR EXPRESSIONS
// ============================================================================

fn regexp_message(verb: &str, re: &Regex, examples: &[&str]) -> String {
    let mut message = format!("string must {verb} regular expression: '{}'", re.as_str());
    if !examples.is_empty() {
        message.push_str(&format!(" (e.g. {})", quoted_list(examples)));
    }
    message
}

/// Passes when the string matches `re`; `examples` are quoted in the message.
///
/// ```rust
/// use manifest_validator::prelude::*;
/// use regex::Regex;
///
/// let rule = string_match_regexp(Regex::new("^[a-z]+$").unwrap(), &["abc"]);
/// assert_eq!(
///     rule.validate("ABC").unwrap_err().to_string(),
///     "string must match regular expression: '^[a-z]+$' (e.g. 'abc')"
/// );
/// ```
pub fn string_match_regexp<T: AsRef<str> + ?Sized>(re: Regex, examples: &[&str]) -> SingleRule<T> {
    let message = regexp_message("match", &re, examples);
    let description = message.clone();
    new_single_rule(move |v: &T| {
        if re.is_match(v.as_ref()) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
    .with_error_code(codes::STRING_MATCH_REGEXP)
    .with_description(description)
}

/// Fails when the string matches `re`.
pub fn string_deny_regexp<T: AsRef<str> + ?Sized>(re: Regex, examples: &[&str]) -> SingleRule<T> {
    let message = regexp_message("not match", &re, examples);
    let description = message.clone();
    new_single_rule(move |v: &T| {
        if re.is_match(v.as_ref()) {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
    .with_error_code(codes::STRING_DENY_REGEXP)
    .with_description(description)
}

// ============================================================================
// FORMATS
// ============================================================================

/// A DNS-1123 subdomain: 1 to 63 lower case alphanumerics or `-`, starting
/// and ending with an alphanumeric.
pub fn string_is_dns_subdomain<T: AsRef<str> + ?Sized + 'static>() -> RuleSet<T> {
    new_rule_set()
        .with_rule(string_length(1, 63))
        .with_rule(
            string_match_regexp(DNS_SUBDOMAIN_REGEX.clone(), &["my-name", "123-abc"])
                .with_details(
                    "a DNS-1123 compliant name must consist of lower case alphanumeric characters \
                     or '-', and must start and end with an alphanumeric character",
                ),
        )
        .with_error_code(codes::STRING_IS_DNS_SUBDOMAIN)
}

pub fn string_uuid<T: AsRef<str> + ?Sized>() -> SingleRule<T> {
    string_match_regexp(
        UUID_REGEX.clone(),
        &[
            "00000000-0000-0000-0000-000000000000",
            "e190c630-8873-11ee-b9d1-0242ac120002",
            "79258D24-01A7-47E5-ACBB-7E762DE52298",
        ],
    )
    .with_details("expected RFC-4122 compliant UUID string")
    .with_error_code(codes::STRING_UUID)
}

pub fn string_ascii<T: AsRef<str> + ?Sized>() -> SingleRule<T> {
    string_match_regexp(ASCII_REGEX.clone(), &[]).with_error_code(codes::STRING_ASCII)
}

/// Free-form descriptions: at most 1050 chars.
pub fn string_description<T: AsRef<str> + ?Sized>() -> SingleRule<T> {
    string_length(0, DESCRIPTION_MAX_LENGTH).with_error_code(codes::STRING_DESCRIPTION)
}

/// An absolute URL with either a host, a fragment or opaque data.
///
/// ```rust
/// use manifest_validator::prelude::*;
///
/// let rule = string_url();
/// assert!(rule.validate("https://example.com/path").is_ok());
/// assert_eq!(
///     rule.validate("example.com").unwrap_err().to_string(),
///     "valid URL must have a scheme (e.g. https://)"
/// );
/// ```
pub fn string_url<T: AsRef<str> + ?Sized>() -> SingleRule<T> {
    new_single_rule(|v: &T| validate_url(v.as_ref()))
        .with_error_code(codes::STRING_URL)
        .with_description(URL_DESCRIPTION)
}

fn validate_url(raw: &str) -> Result<(), String> {
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(ParseError::RelativeUrlWithoutBase) => {
            return Err("valid URL must have a scheme (e.g. https://)".to_owned());
        }
        Err(err) => return Err(format!("failed to parse URL: {err}")),
    };
    let has_host = url.host_str().is_some_and(|host| !host.is_empty());
    let has_fragment = url.fragment().is_some_and(|fragment| !fragment.is_empty());
    if !has_host && !has_fragment && !url.cannot_be_a_base() {
        return Err("valid URL must contain either host, fragment or opaque data".to_owned());
    }
    Ok(())
}

pub fn string_json<T: AsRef<str> + ?Sized>() -> SingleRule<T> {
    const MESSAGE: &str = "string must be a valid JSON";
    new_single_rule(|v: &T| {
        serde_json::from_str::<serde::de::IgnoredAny>(v.as_ref())
            .map(|_| ())
            .map_err(|_| MESSAGE)
    })
    .with_error_code(codes::STRING_JSON)
    .with_description(MESSAGE)
}

// ============================================================================
// SUBSTRINGS
// ============================================================================

/// Passes when the string contains every one of `substrings`.
pub fn string_contains<T: AsRef<str> + ?Sized>(substrings: &[&str]) -> SingleRule<T> {
    let message = format!(
        "string must contain the following substrings: {}",
        quoted_list(substrings)
    );
    let description = message.clone();
    let substrings: Vec<String> = substrings.iter().map(|s| (*s).to_owned()).collect();
    new_single_rule(move |v: &T| {
        let v = v.as_ref();
        if substrings.iter().all(|s| v.contains(s.as_str())) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
    .with_error_code(codes::STRING_CONTAINS)
    .with_description(description)
}

/// Passes when the string starts with any of `prefixes`.
pub fn string_starts_with<T: AsRef<str> + ?Sized>(prefixes: &[&str]) -> SingleRule<T> {
    let message = match prefixes {
        [prefix] => format!("string must start with '{prefix}' prefix"),
        _ => format!(
            "string must start with one of the following prefixes: {}",
            quoted_list(prefixes)
        ),
    };
    let description = message.clone();
    let prefixes: Vec<String> = prefixes.iter().map(|s| (*s).to_owned()).collect();
    new_single_rule(move |v: &T| {
        let v = v.as_ref();
        if prefixes.iter().any(|p| v.starts_with(p.as_str())) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
    .with_error_code(codes::STRING_STARTS_WITH)
    .with_description(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{HasErrorCode, Rule};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("", false)]
    #[case("   ", false)]
    #[case(" a ", true)]
    fn test_string_not_empty(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(string_not_empty::<str>().validate(input).is_ok(), ok);
    }

    #[test]
    fn test_deny_regexp() {
        let rule = string_deny_regexp::<str>(Regex::new("^_").unwrap(), &[]);
        assert!(rule.validate("name").is_ok());
        let err = rule.validate("_name").unwrap_err();
        assert_eq!(
            err.to_string(),
            "string must not match regular expression: '^_'"
        );
        assert!(err.has_error_code(codes::STRING_DENY_REGEXP));
    }

    #[rstest]
    #[case("my-name", true)]
    #[case("123-abc", true)]
    #[case("a", true)]
    #[case("-name", false)]
    #[case("name-", false)]
    #[case("My-Name", false)]
    #[case("", false)]
    fn test_dns_subdomain(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(string_is_dns_subdomain::<str>().validate(input).is_ok(), ok);
    }

    #[test]
    fn test_dns_subdomain_error_codes() {
        let rule = string_is_dns_subdomain::<str>();
        let too_long = "a".repeat(64);
        let err = rule.validate(too_long.as_str()).unwrap_err();
        assert!(err.has_error_code(codes::STRING_IS_DNS_SUBDOMAIN));
        assert!(err.has_error_code(codes::STRING_LENGTH));

        let err = rule.validate("UPPER").unwrap_err();
        assert_eq!(
            err.to_string(),
            "- string must match regular expression: '^[a-z0-9]([-a-z0-9]*[a-z0-9])?$' \
             (e.g. 'my-name', '123-abc'); a DNS-1123 compliant name must consist of lower case \
             alphanumeric characters or '-', and must start and end with an alphanumeric character"
        );
        assert!(err.has_error_code(codes::STRING_MATCH_REGEXP));
    }

    #[rstest]
    #[case("00000000-0000-0000-0000-000000000000", true)]
    #[case("79258D24-01A7-47E5-ACBB-7E762DE52298", true)]
    #[case("79258D24-01A7-47E5-ACBB", false)]
    #[case("not-a-uuid", false)]
    fn test_uuid(#[case] input: &str, #[case] ok: bool) {
        let result = string_uuid::<str>().validate(input);
        assert_eq!(result.is_ok(), ok);
        if let Err(err) = result {
            assert!(err.has_error_code(codes::STRING_UUID));
            assert!(err.to_string().ends_with("; expected RFC-4122 compliant UUID string"));
        }
    }

    #[test]
    fn test_ascii() {
        assert!(string_ascii::<str>().validate("plain text").is_ok());
        let err = string_ascii::<str>().validate("zażółć").unwrap_err();
        assert!(err.has_error_code(codes::STRING_ASCII));
    }

    #[test]
    fn test_description() {
        let rule = string_description::<String>();
        assert!(rule.validate(&"x".repeat(1050)).is_ok());
        let err = rule.validate(&"x".repeat(1051)).unwrap_err();
        assert_eq!(err.to_string(), "length must be between 0 and 1050");
        assert!(err.has_error_code(codes::STRING_DESCRIPTION));
    }

    #[rstest]
    #[case("https://example.com", None)]
    #[case("mailto:someone@example.com", None)]
    #[case("http://localhost:8080/path?q=1", None)]
    #[case("/relative/path", Some("valid URL must have a scheme (e.g. https://)"))]
    #[case("", Some("valid URL must have a scheme (e.g. https://)"))]
    #[case("file:///etc/hosts", Some("valid URL must contain either host, fragment or opaque data"))]
    fn test_url(#[case] input: &str, #[case] expected: Option<&str>) {
        let result = string_url::<str>().validate(input);
        match expected {
            None => assert!(result.is_ok(), "{input}: {result:?}"),
            Some(message) => assert_eq!(result.unwrap_err().to_string(), message),
        }
    }

    #[test]
    fn test_url_parse_failure() {
        let err = string_url::<str>().validate("https://exa mple.com").unwrap_err();
        assert!(err.to_string().starts_with("failed to parse URL: "));
        assert!(err.has_error_code(codes::STRING_URL));
    }

    #[test]
    fn test_json() {
        let rule = string_json::<str>();
        assert!(rule.validate(r#"{"a": [1, 2]}"#).is_ok());
        assert!(rule.validate("null").is_ok());
        assert_eq!(
            rule.validate("{").unwrap_err().to_string(),
            "string must be a valid JSON"
        );
    }

    #[test]
    fn test_contains() {
        let rule = string_contains::<str>(&["foo", "bar"]);
        assert!(rule.validate("foo and bar").is_ok());
        assert_eq!(
            rule.validate("foo").unwrap_err().to_string(),
            "string must contain the following substrings: 'foo', 'bar'"
        );
    }

    #[test]
    fn test_starts_with() {
        let single = string_starts_with::<str>(&["api/"]);
        assert!(single.validate("api/v1").is_ok());
        assert_eq!(
            single.validate("v1").unwrap_err().to_string(),
            "string must start with 'api/' prefix"
        );

        let many = string_starts_with::<str>(&["http://", "https://"]);
        assert!(many.validate("https://x").is_ok());
        assert_eq!(
            many.validate("ftp://x").unwrap_err().to_string(),
            "string must start with one of the following prefixes: 'http://', 'https://'"
        );
    }
}
