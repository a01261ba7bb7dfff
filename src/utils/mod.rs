pub mod query;
pub mod trend;
