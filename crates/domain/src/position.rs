use serde_json::json;

use crate::Snapshot;

/// A position (cargo) managed by the admin application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Surrogate identity assigned by the store.
    pub id: i64,
    /// Unique position name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
}

impl Position {
    /// Builds the audit snapshot for this position's current field values.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.set("name", json!(self.name));
        snapshot.set("description", json!(self.description));
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::Position;

    #[test]
    fn snapshot_carries_all_fields() {
        let position = Position {
            id: 7,
            name: "Clerk".to_owned(),
            description: None,
        };

        let encoded = position.snapshot().encode().unwrap_or_default();
        assert!(encoded.contains("\"name\":\"Clerk\""));
        assert!(encoded.contains("\"description\":null"));
    }
}
