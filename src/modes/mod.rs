pub mod human;
pub mod schedule;

pub use human::{HumanMode, SessionOptions};
pub use schedule::TickSchedule;
