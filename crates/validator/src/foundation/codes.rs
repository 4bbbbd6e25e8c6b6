//! Well-known error codes.
//!
//! Every built-in rule stamps one of these onto the [`RuleError`](super::RuleError)
//! it produces. Consumers match on them with
//! [`has_error_code`](super::has_error_code).

/// Type alias for error codes. Codes chain with [`ERROR_CODE_SEPARATOR`].
pub type ErrorCode = String;

/// Separator placed between chained error codes (`"outer:inner"`).
pub const ERROR_CODE_SEPARATOR: &str = ":";

pub const REQUIRED: &str = "required";
pub const TRANSFORM: &str = "transform";
pub const FORBIDDEN: &str = "forbidden";

// Comparison
pub const EQUAL_TO: &str = "equal_to";
pub const NOT_EQUAL_TO: &str = "not_equal_to";
pub const GREATER_THAN: &str = "greater_than";
pub const GREATER_THAN_OR_EQUAL_TO: &str = "greater_than_or_equal_to";
pub const LESS_THAN: &str = "less_than";
pub const LESS_THAN_OR_EQUAL_TO: &str = "less_than_or_equal_to";

// Length
pub const STRING_LENGTH: &str = "string_length";
pub const STRING_MIN_LENGTH: &str = "string_min_length";
pub const STRING_MAX_LENGTH: &str = "string_max_length";
pub const SLICE_LENGTH: &str = "slice_length";
pub const SLICE_MIN_LENGTH: &str = "slice_min_length";
pub const SLICE_MAX_LENGTH: &str = "slice_max_length";
pub const MAP_LENGTH: &str = "map_length";
pub const MAP_MIN_LENGTH: &str = "map_min_length";
pub const MAP_MAX_LENGTH: &str = "map_max_length";

// Strings
pub const STRING_NOT_EMPTY: &str = "string_not_empty";
pub const STRING_MATCH_REGEXP: &str = "string_match_regexp";
pub const STRING_DENY_REGEXP: &str = "string_deny_regexp";
pub const STRING_IS_DNS_SUBDOMAIN: &str = "string_is_dns_subdomain";
pub const STRING_UUID: &str = "string_uuid";
pub const STRING_ASCII: &str = "string_ascii";
pub const STRING_DESCRIPTION: &str = "string_description";
pub const STRING_URL: &str = "string_url";
pub const STRING_JSON: &str = "string_json";
pub const STRING_CONTAINS: &str = "string_contains";
pub const STRING_STARTS_WITH: &str = "string_starts_with";

// Membership
pub const ONE_OF: &str = "one_of";
pub const MUTUALLY_EXCLUSIVE: &str = "mutually_exclusive";
pub const SLICE_UNIQUE: &str = "slice_unique";
