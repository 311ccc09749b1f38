use chrono::{DateTime, Utc};

use vigia_application::Clock;

/// Wall-clock time source for timestamp assignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
