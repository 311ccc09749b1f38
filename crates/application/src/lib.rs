//! Application services and ports for the Vigia admin backend.

#![forbid(unsafe_code)]

/// Ports consumed by the audit core.
pub mod audit_ports;
/// The audit subsystem: writer, query engine, detail formatter, exporter.
pub mod audit_service;
/// Port for position persistence.
pub mod position_ports;
/// Position CRUD use-cases emitting audit records.
pub mod position_service;

pub use audit_ports::{AuditFilter, AuditRecordStore, Clock, NewAuditRecord, PrincipalDirectory};
pub use audit_service::export::{ExportFile, ExportFormat};
pub use audit_service::{AuditDetail, AuditService, SELF_REGISTERED_ACTOR, UNKNOWN_ACTOR};
pub use position_ports::PositionRepository;
pub use position_service::{PositionInput, PositionService};
