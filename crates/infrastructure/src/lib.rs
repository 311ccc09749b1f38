//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_audit_record_store;
mod postgres_audit_record_store;
mod postgres_position_repository;
mod postgres_principal_directory;
mod system_clock;

pub use in_memory_audit_record_store::InMemoryAuditRecordStore;
pub use postgres_audit_record_store::PostgresAuditRecordStore;
pub use postgres_position_repository::PostgresPositionRepository;
pub use postgres_principal_directory::PostgresPrincipalDirectory;
pub use system_clock::SystemClock;
