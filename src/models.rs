// Core data structures for the stopfake coordinator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for one analysis session
///
/// A session corresponds to one browsing context (tab, window, or any other
/// caller-defined scope). It is the sole key into coordinator state and is
/// stable for the lifetime of that context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Create a session ID from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh random session ID for callers that do not supply one
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Classification label returned by the analysis backend
///
/// Unknown label strings fold into `Uncertain` instead of failing the
/// response parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Label {
    /// The text is most likely fabricated
    Fake,
    /// The text is most likely genuine
    Real,
    /// The backend could not decide (also covers unknown labels)
    Uncertain,
}

impl Label {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fake => "fake",
            Self::Real => "real",
            Self::Uncertain => "uncertain",
        }
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        match s.as_str() {
            "fake" => Self::Fake,
            "real" => Self::Real,
            _ => Self::Uncertain,
        }
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.as_str().to_string()
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Emotional tone of the analyzed text
///
/// Unknown tone strings fold into `Mixed` instead of failing the response
/// parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tone {
    /// Neutral, fact-driven presentation
    Factual,
    /// Emotionally loaded or manipulative presentation
    Emotional,
    /// Both factual and emotional elements (also covers unknown tones)
    Mixed,
}

impl Tone {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Factual => "factual",
            Self::Emotional => "emotional",
            Self::Mixed => "mixed",
        }
    }
}

impl From<String> for Tone {
    fn from(s: String) -> Self {
        match s.as_str() {
            "factual" => Self::Factual,
            "emotional" => Self::Emotional,
            _ => Self::Mixed,
        }
    }
}

impl From<Tone> for String {
    fn from(tone: Tone) -> Self {
        tone.as_str().to_string()
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Analysis verdict returned by the backend
///
/// The minimum contract is `result`, `confidence`, `emotion` and `reasons`;
/// `sources` is optional and defaults to empty. Any other response shape is
/// treated as a malformed response by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Classification outcome
    pub result: Label,

    /// Confidence in the classification, in [0.0, 1.0]
    pub confidence: f64,

    /// Emotional tone of the text
    pub emotion: Tone,

    /// Short human-readable justifications
    pub reasons: Vec<String>,

    /// Supporting source references, when the backend provides them
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Current analysis state of one session
///
/// Exactly one value exists per session at any instant. Transitions are
/// total replacements applied by the coordinator, never partial merges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisState {
    /// No analysis has ever been requested for this session
    #[default]
    Idle,

    /// A request is in flight
    Loading,

    /// The last request succeeded
    Done {
        /// Verdict of the most recently settled attempt
        result: Verdict,
    },

    /// The last request failed
    Error {
        /// Human-readable failure description
        message: String,
    },
}

impl AnalysisState {
    /// Get the wire status tag
    pub fn status_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Done { .. } => "done",
            Self::Error { .. } => "error",
        }
    }

    /// Whether this state is a settled outcome (done or error)
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Error { .. })
    }
}

impl std::fmt::Display for AnalysisState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.status_str())
    }
}

/// State-transition notification broadcast to subscribers
///
/// Emitted on every transition, including the one into `Loading`. Delivery
/// is best-effort; a viewer that missed a notification recovers current
/// state by polling the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateChange {
    /// Session the transition belongs to
    pub session_id: SessionId,

    /// The new state, flattened into the notification body
    #[serde(flatten)]
    pub state: AnalysisState,

    /// When the transition was applied
    pub at: DateTime<Utc>,
}

impl StateChange {
    /// Create a notification for a transition happening now
    pub fn new(session_id: SessionId, state: AnalysisState) -> Self {
        Self {
            session_id,
            state,
            at: Utc::now(),
        }
    }
}
