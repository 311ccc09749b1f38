use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use vigia_core::{AppError, AppResult};
use vigia_domain::{AuditRecord, Principal};

/// Payload for one audit record about to be persisted.
///
/// `recorded_at` is assigned by the audit writer from the [`Clock`] port;
/// outer callers never supply it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditRecord {
    /// Acting principal; absent only for unauthenticated registration.
    pub actor_id: Option<i64>,
    /// Actor display name captured at write time.
    pub actor_name: Option<String>,
    /// Stable action vocabulary value.
    pub action: String,
    /// Logical entity affected.
    pub entity_type: String,
    /// Identity of the affected row.
    pub entity_id: i64,
    /// Encoded before-state; absent for INSERT.
    pub before_state: Option<String>,
    /// Encoded after-state; absent for DELETE.
    pub after_state: Option<String>,
    /// UTC instant of persistence.
    pub recorded_at: DateTime<Utc>,
}

/// Criteria for browsing the audit trail; fields are AND-combined and all
/// optional. An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFilter {
    /// Exact actor match.
    pub actor_id: Option<i64>,
    /// Case-insensitive substring match against the stored action.
    pub action: Option<String>,
    /// Inclusive lower bound on `recorded_at`.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `recorded_at`.
    pub to: Option<DateTime<Utc>>,
}

impl AuditFilter {
    /// Builds a filter from transport values.
    ///
    /// Date bounds arrive as `YYYY-MM-DD` strings and expand to day
    /// granularity: `date_from` means the start of that day and `date_to`
    /// the end of it (23:59:59.999), so same-day events captured late in
    /// the day are never silently excluded. Malformed dates fail with
    /// [`AppError::InvalidFilter`]. The action value is trimmed; a blank
    /// value means no action filter.
    pub fn from_transport(
        actor_id: Option<i64>,
        action: Option<String>,
        date_from: Option<&str>,
        date_to: Option<&str>,
    ) -> AppResult<Self> {
        let from = date_from
            .filter(|value| !value.trim().is_empty())
            .map(|value| parse_day(value, "date_from").and_then(day_start))
            .transpose()?;
        let to = date_to
            .filter(|value| !value.trim().is_empty())
            .map(|value| parse_day(value, "date_to").and_then(day_end))
            .transpose()?;

        Ok(Self {
            actor_id,
            action: action
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty()),
            from,
            to,
        })
    }
}

fn parse_day(value: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::InvalidFilter(format!("{field} '{value}' is not a YYYY-MM-DD date"))
    })
}

fn day_start(date: NaiveDate) -> AppResult<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::Internal(format!("no day start for '{date}'")))
}

fn day_end(date: NaiveDate) -> AppResult<DateTime<Utc>> {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::Internal(format!("no day end for '{date}'")))
}

/// Port for the durable, append-only audit record store.
#[async_trait]
pub trait AuditRecordStore: Send + Sync {
    /// Persists one record and returns it with its assigned identity.
    async fn append(&self, record: NewAuditRecord) -> AppResult<AuditRecord>;

    /// Returns records satisfying every supplied predicate, ordered by
    /// `recorded_at` descending with ties broken by `id` descending.
    async fn query(&self, filter: AuditFilter) -> AppResult<Vec<AuditRecord>>;

    /// Fetches one record by identity.
    async fn find(&self, id: i64) -> AppResult<Option<AuditRecord>>;
}

/// Port resolving principal identifiers to directory entries.
#[async_trait]
pub trait PrincipalDirectory: Send + Sync {
    /// Looks up one principal; `Ok(None)` when it no longer exists.
    async fn find_principal(&self, id: i64) -> AppResult<Option<Principal>>;
}

/// Port supplying the current time for timestamp assignment.
pub trait Clock: Send + Sync {
    /// Returns the current UTC instant.
    fn now(&self) -> DateTime<Utc>;
}
