pub mod database;
pub mod metrics;
pub mod reference;

pub use database::Database;
pub use metrics::{get_metrics, init_metrics};
pub use reference::generate_reference;
