pub mod ledger;
pub mod page;
pub mod product;

pub use ledger::*;
pub use page::*;
pub use product::*;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Current time at the precision timestamps are stored with.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339 text, so stored timestamps sort lexically.
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
