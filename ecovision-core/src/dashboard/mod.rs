//! Dashboard requests: select a city, category and window, then run to get a
//! snapshot of freshly generated series with their assessments.

pub mod builder;
pub mod engine;
pub mod snapshot;

pub use builder::DashboardBuilder;
pub use engine::Dashboard;
pub use snapshot::{DashboardSnapshot, FamilyPanel};
