pub mod analytics;
pub mod api;
pub mod assistant;
pub mod bulk;
pub mod calendar;
pub mod deadlines;
pub mod error;
pub mod labels;
pub mod store;

// Convenience re-exports
pub use api::client::PlannerClient;
pub use api::types;
pub use error::{PlannerError, Result};
