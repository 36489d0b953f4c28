pub mod loader;
pub mod runner;
pub mod schema;

pub use loader::{load_from_path, load_from_str, ConfigError};
pub use runner::{run_queries, QueryOutcome, Resolution};
pub use schema::{
    Expect, Metadata, QueryConfig, QueryDefinition, Target, ValidationError, ValidationIssue,
};
