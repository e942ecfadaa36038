// Metric synthesis and exposition modules
pub mod exposition;
pub mod samples;

// Re-export commonly used items
pub use exposition::render;
pub use samples::{information_samples, synthesize, violation_samples};
