//! Timeline construction and event classification

pub mod classifier;
pub mod timeline;

pub use classifier::{classify, classify_timeline, Event, EventKind, SameDayPolicy};
pub use timeline::{days_between, Timeline};
