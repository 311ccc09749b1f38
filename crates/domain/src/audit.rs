use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use vigia_core::{AppError, AppResult};

/// Data-mutating actions recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// A new row was created.
    Insert,
    /// An existing row was changed.
    Update,
    /// An existing row was removed.
    Delete,
}

impl AuditAction {
    /// Returns the stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl FromStr for AuditAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "INSERT" => Ok(Self::Insert),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            _ => Err(AppError::Validation(format!(
                "unknown audit action '{value}'"
            ))),
        }
    }
}

/// Opaque key-value snapshot of an entity's fields at one point in time.
///
/// Keys are unique; values are JSON-representable scalars or null. The
/// stored form is compact JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot(Map<String, Value>);

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Adds one field value, replacing any previous value for the key.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Returns true when the snapshot carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encodes the snapshot to its stored JSON text form.
    pub fn encode(&self) -> AppResult<String> {
        serde_json::to_string(&self.0)
            .map_err(|error| AppError::Internal(format!("failed to encode snapshot: {error}")))
    }

    /// Decodes stored JSON text back into a snapshot.
    ///
    /// Fails when the text is not a JSON object; callers inspecting
    /// historical records should fall back to the raw text instead of
    /// propagating this error.
    pub fn decode(text: &str) -> AppResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|error| AppError::Validation(format!("malformed snapshot text: {error}")))?;

        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(AppError::Validation(format!(
                "snapshot text must be a JSON object, got {other}"
            ))),
        }
    }

    /// Renders the snapshot as indented JSON for display.
    #[must_use]
    pub fn display_text(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| format!("{:?}", self.0))
    }
}

impl From<Map<String, Value>> for Snapshot {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Outcome of decoding one stored snapshot blob.
///
/// A corrupt blob degrades to [`SnapshotView::Raw`] so that one bad
/// historical record never blocks inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotView {
    /// The stored text decoded into a structured snapshot.
    Structured(Snapshot),
    /// The stored text did not decode; presented unchanged.
    Raw(String),
}

impl SnapshotView {
    /// Decodes stored text, keeping the raw form on failure.
    #[must_use]
    pub fn from_stored(text: &str) -> Self {
        match Snapshot::decode(text) {
            Ok(snapshot) => Self::Structured(snapshot),
            Err(_) => Self::Raw(text.to_owned()),
        }
    }

    /// Returns the human-readable text for this view.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Structured(snapshot) => snapshot.display_text(),
            Self::Raw(text) => text.clone(),
        }
    }
}

/// One immutable audit trail entry.
///
/// Records are append-only: no update or delete surface exists anywhere
/// in the system. `action` is kept as stored text because historical rows
/// predate the fixed [`AuditAction`] vocabulary enforced on writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    /// Surrogate identity assigned by the store.
    pub id: i64,
    /// Acting principal; absent only for unauthenticated registration.
    pub actor_id: Option<i64>,
    /// Actor display name captured at write time.
    pub actor_name: Option<String>,
    /// Action vocabulary value as stored.
    pub action: String,
    /// Logical entity affected, e.g. `POSITION`.
    pub entity_type: String,
    /// Identity of the affected row within `entity_type`.
    pub entity_id: i64,
    /// Snapshot text prior to the change; absent for INSERT.
    pub before_state: Option<String>,
    /// Snapshot text after the change; absent for DELETE.
    pub after_state: Option<String>,
    /// Server-assigned UTC creation instant.
    pub recorded_at: DateTime<Utc>,
}

impl AuditRecord {
    /// Decodes the before-state, falling back to raw text.
    #[must_use]
    pub fn before_view(&self) -> Option<SnapshotView> {
        self.before_state.as_deref().map(SnapshotView::from_stored)
    }

    /// Decodes the after-state, falling back to raw text.
    #[must_use]
    pub fn after_view(&self) -> Option<SnapshotView> {
        self.after_state.as_deref().map(SnapshotView::from_stored)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::{AuditAction, Snapshot, SnapshotView};

    #[test]
    fn action_roundtrip_storage_value() {
        let action = AuditAction::Update;
        let restored = AuditAction::from_str(action.as_str());
        assert_eq!(restored.unwrap_or(AuditAction::Insert), action);
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(AuditAction::from_str("TRUNCATE").is_err());
    }

    #[test]
    fn snapshot_roundtrips_through_stored_text() {
        let mut snapshot = Snapshot::new();
        snapshot.set("name", json!("Clerk"));
        snapshot.set("description", json!(null));
        snapshot.set("grade", json!(3));

        let encoded = snapshot.encode().unwrap_or_default();
        let decoded = Snapshot::decode(encoded.as_str());
        assert_eq!(decoded.unwrap_or_default(), snapshot);
    }

    #[test]
    fn empty_snapshot_roundtrips() {
        let snapshot = Snapshot::new();
        let encoded = snapshot.encode().unwrap_or_default();
        assert_eq!(encoded, "{}");
        assert_eq!(Snapshot::decode("{}").unwrap_or_default(), snapshot);
    }

    #[test]
    fn corrupt_text_decodes_to_raw_view() {
        let view = SnapshotView::from_stored("{not json");
        assert_eq!(view, SnapshotView::Raw("{not json".to_owned()));
        assert_eq!(view.display_text(), "{not json");
    }

    #[test]
    fn non_object_json_decodes_to_raw_view() {
        let view = SnapshotView::from_stored("[1, 2, 3]");
        assert!(matches!(view, SnapshotView::Raw(_)));
    }

    #[test]
    fn structured_view_renders_indented_json() {
        let view = SnapshotView::from_stored(r#"{"name":"Clerk"}"#);
        let text = view.display_text();
        assert!(text.contains("\"name\": \"Clerk\""));
    }
}
