pub mod day;
pub mod entry;
pub mod event;
pub mod export;
pub mod store;

pub use day::{events_for_day, matches_query, status_for_day, DayStatus};
pub use entry::{date_key, CalendarStorage, DayEntry};
pub use event::{Dataset, Event, EventKind, Scope};
pub use store::Store;
