//! Domain types for the Vigia admin backend.

#![forbid(unsafe_code)]

/// Audit trail records, actions, and state snapshots.
pub mod audit;
/// Position business entity.
pub mod position;
/// Principal projections from the user directory.
pub mod principal;

pub use audit::{AuditAction, AuditRecord, Snapshot, SnapshotView};
pub use position::Position;
pub use principal::Principal;
