pub mod assignment;
pub mod cursor;
pub mod types;

pub use assignment::balanced_assignment;
pub use cursor::TimeCursor;
pub use types::{Schedule, ScheduledSlot, TimeWindow};
