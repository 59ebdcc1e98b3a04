/// Retrieval domain layer: validation, fetching, normalization, file naming.
pub mod errors;
pub mod fetch;
pub mod host;
pub mod naming;
pub mod normalize;
pub mod orchestrator;
pub mod request;

pub use errors::RetrieveError;
pub use fetch::{ObjectFetcher, OutputStream, RetrievalResult, reconcile_streams};
pub use host::{AdminShareValidator, HostValidator};
pub use orchestrator::{Orchestrator, Reporter, RunSummary, TargetOutcome, not_found_message};
pub use request::{RetrievalRequest, RetrievalTarget, WellKnownFlag};
