/// Command execution: wires configuration, logging and the helper around the
/// retrieval orchestrator.
pub mod retrieve;

pub use retrieve::run;
