use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder candidate id sent with every new application
pub const NEW_CANDIDATE_ID: i64 = 1;

// ==================================================================================================
// Identifiers
// ==================================================================================================

/// Backend record identifier.
///
/// The backend may hand out either numbers or strings. The JSON kind is kept so
/// that `42` and `"42"` compare unequal, both in memory and in the stored hidden set.
/// Numbers outside `i64` (floats, large unsigned values) land in `Decimal`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Decimal(serde_json::Number),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Decimal(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

// ==================================================================================================
// Application state
// ==================================================================================================

/// Lifecycle state reported by the backend.
///
/// Only `Rejected` drives dashboard behaviour; unknown states are carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationState {
    New,
    Rejected,
    Other(String),
}

impl ApplicationState {
    pub fn as_str(&self) -> &str {
        match self {
            ApplicationState::New => "New",
            ApplicationState::Rejected => "Rejected",
            ApplicationState::Other(s) => s,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ApplicationState::Rejected)
    }
}

impl Default for ApplicationState {
    fn default() -> Self {
        ApplicationState::Other(String::new())
    }
}

impl From<String> for ApplicationState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "New" => ApplicationState::New,
            "Rejected" => ApplicationState::Rejected,
            _ => ApplicationState::Other(s),
        }
    }
}

impl From<ApplicationState> for String {
    fn from(state: ApplicationState) -> Self {
        match state {
            ApplicationState::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ApplicationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==================================================================================================
// Records
// ==================================================================================================

/// Person attached to an application. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl Candidate {
    /// First and last name joined by a single space, blanks for missing parts
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
    }
}

/// Job application as returned by the backend, plus the client-only visibility flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: RecordId,

    #[serde(default)]
    pub application_state: ApplicationState,

    /// `null` and missing both decode to an empty candidate
    #[serde(default, deserialize_with = "null_as_default")]
    pub candidate: Candidate,

    #[serde(default)]
    pub updated_on: Option<String>,

    /// Presentation only, never part of the wire format
    #[serde(skip)]
    pub is_visible: bool,
}

impl Application {
    pub fn is_rejected(&self) -> bool {
        self.application_state.is_rejected()
    }
}

/// Creation payload for `POST /applications`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub id: RecordId,
    pub application_state: ApplicationState,
    pub candidate: Candidate,
    pub updated_on: String,
}

impl NewApplication {
    pub fn new(id: &str, first_name: &str, last_name: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::Text(id.to_string()),
            application_state: ApplicationState::New,
            candidate: Candidate {
                id: Some(RecordId::Number(NEW_CANDIDATE_ID)),
                first_name: Some(first_name.to_string()),
                last_name: Some(last_name.to_string()),
            },
            updated_on: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
