mod query_window;
mod tag_record;

pub use query_window::{EpochDate, InvalidDate, QueryWindow};
pub use tag_record::{TagRecord, tag_link};
