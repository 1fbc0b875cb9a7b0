use chrono::{DateTime, SubsecRound, Utc};
use tyre_shared_contracts::time::TimeService;
use tyre_utils::trace_instrument;

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeServiceImpl;

impl TimeService for TimeServiceImpl {
    #[trace_instrument(skip(self))]
    fn now(&self) -> DateTime<Utc> {
        // timestamps are persisted with millisecond precision
        Utc::now().trunc_subsecs(3)
    }
}
