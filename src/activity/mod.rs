//! Activity lifecycle interface and example activities.

pub mod lifecycle;

pub use lifecycle::{Activity, AnnouncerActivity};
