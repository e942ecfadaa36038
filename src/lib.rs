// Public modules
pub mod types;
pub mod config;
pub mod errors;
pub mod parsing;
pub mod kubernetes;
pub mod collector;
pub mod metrics;
pub mod publisher;
pub mod scheduler;
pub mod server;

// Re-export commonly used items
pub use types::*;
pub use config::{load_config, load_config_with_env, EnvironmentProvider, SystemEnvironment, MockEnvironment};
pub use errors::{CycleError, ParseWarning};
pub use parsing::{parse_constraint, ParsedConstraint};
pub use kubernetes::{create_client, list_constraint_instances, resolve_constraint_kinds, CONSTRAINTS_GROUP, CONSTRAINTS_VERSION};
pub use collector::ConstraintCollector;
pub use metrics::{information_samples, render, synthesize, violation_samples};
pub use publisher::SnapshotPublisher;
