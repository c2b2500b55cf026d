//! Rule file synthesis (deterministic text generation)

pub mod generator;
pub mod options;

pub use generator::{render_rules, INPUT_SUBSYSTEM_RULE};
pub use options::{AccessMode, GeneratorOptions, DEFAULT_GROUP};
