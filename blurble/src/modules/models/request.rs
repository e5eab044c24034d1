use serde::{Deserialize, Serialize};
use validator::Validate;

/// A claimed score. WPM and accuracy are client-derived and trusted within
/// these ranges; the server never recomputes them from keystrokes. A typing
/// speed above 300 WPM is rejected as invalid rather than capped.
#[derive(Debug, Serialize, Deserialize, Validate, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    #[validate(range(min = 0.0, max = 300.0))]
    pub wpm: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub accuracy: f64,
    /// Stored as-is, not checked against the quote table. A dangling
    /// reference simply yields a null join later.
    #[serde(default)]
    pub quote_id: Option<i64>,
}

/// Both fields are optional at the serde layer so that a missing one can be
/// reported with the credential-specific message rather than a generic
/// deserialization failure.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}
