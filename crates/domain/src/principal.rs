/// Projection of one principal from the user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Stable principal identifier.
    pub id: i64,
    /// Unique login name.
    pub login: String,
    /// Name shown in audit views.
    pub display_name: String,
    /// Whether the account may act on the system.
    pub is_active: bool,
}
