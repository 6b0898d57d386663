//! Maps raw provider failures to a short message a student can act on.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Authorization,
    RateLimited,
    Unavailable,
    Unknown,
}

const AUTH_MARKERS: &[&str] = &[
    "api key",
    "api_key",
    "permission_denied",
    "unauthenticated",
    "invalid_argument",
];
const AUTH_CODES: &[&str] = &["400", "401", "403"];

const RATE_MARKERS: &[&str] = &["quota", "resource_exhausted", "rate limit", "too many requests"];
const RATE_CODES: &[&str] = &["429"];

const UNAVAILABLE_MARKERS: &[&str] = &["unavailable", "overloaded", "deadline_exceeded"];
const UNAVAILABLE_CODES: &[&str] = &["500", "502", "503", "504"];

impl FailureKind {
    /// Checked in order: credentials, rate limits, unavailability.
    pub fn classify(description: &str) -> Self {
        let lower = description.to_lowercase();
        let matches = |markers: &[&str], codes: &[&str]| {
            markers.iter().any(|m| lower.contains(m))
                || codes.iter().any(|c| contains_code(&lower, c))
        };

        if matches(AUTH_MARKERS, AUTH_CODES) {
            FailureKind::Authorization
        } else if matches(RATE_MARKERS, RATE_CODES) {
            FailureKind::RateLimited
        } else if matches(UNAVAILABLE_MARKERS, UNAVAILABLE_CODES) {
            FailureKind::Unavailable
        } else {
            FailureKind::Unknown
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            FailureKind::Authorization => {
                "API Key missing ya invalid hai. Please apni deployment settings check karein aur API Key add karein."
            }
            FailureKind::RateLimited => {
                "Abhi bahut saari requests aa gayi hain. Please ek minute ruk kar phir try karo."
            }
            FailureKind::Unavailable => "Server abhi busy hai. Please thodi der baad try karo.",
            FailureKind::Unknown => "Connection mein thodi problem hai. Please wapis try karo.",
        }
    }
}

/// `code` as a standalone number, so "400" does not match "14000 tokens".
fn contains_code(haystack: &str, code: &str) -> bool {
    haystack.match_indices(code).any(|(idx, _)| {
        let before = haystack[..idx].chars().next_back();
        let after = haystack[idx + code.len()..].chars().next();
        !before.is_some_and(|c| c.is_ascii_digit()) && !after.is_some_and(|c| c.is_ascii_digit())
    })
}

/// A classified failure plus the raw description it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl TurnFailure {
    pub fn from_raw(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self {
            kind: FailureKind::classify(&detail),
            detail,
        }
    }

    pub fn user_message(&self) -> &'static str {
        self.kind.user_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization() {
        for raw in [
            "missing API key for provider: gemini",
            "provider error 403: Permission denied",
            "provider error 400: API key not valid. (INVALID_ARGUMENT)",
            "UNAUTHENTICATED",
        ] {
            assert_eq!(FailureKind::classify(raw), FailureKind::Authorization, "{raw}");
        }
    }

    #[test]
    fn test_rate_limited() {
        assert_eq!(
            FailureKind::classify("provider error 429: Resource has been exhausted (RESOURCE_EXHAUSTED)"),
            FailureKind::RateLimited
        );
        assert_eq!(FailureKind::classify("daily quota reached"), FailureKind::RateLimited);
    }

    #[test]
    fn test_unavailable() {
        assert_eq!(
            FailureKind::classify("provider error 503: The model is overloaded."),
            FailureKind::Unavailable
        );
        assert_eq!(FailureKind::classify("HTTP 502 Bad Gateway"), FailureKind::Unavailable);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            FailureKind::classify("stream error: connection reset by peer"),
            FailureKind::Unknown
        );
    }

    #[test]
    fn test_code_must_stand_alone() {
        assert_eq!(
            FailureKind::classify("stream error: budget 14000 exceeded"),
            FailureKind::Unknown
        );
    }

    #[test]
    fn test_user_messages() {
        assert!(FailureKind::Authorization.user_message().starts_with("API Key missing"));
        assert!(FailureKind::Unavailable.user_message().starts_with("Server abhi busy"));
        assert!(FailureKind::Unknown.user_message().starts_with("Connection mein"));
    }

    #[test]
    fn test_turn_failure_keeps_detail() {
        let failure = TurnFailure::from_raw("provider error 503: overloaded");
        assert_eq!(failure.kind, FailureKind::Unavailable);
        assert_eq!(failure.detail, "provider error 503: overloaded");
    }
}
