/// The external remote-execution helper: its on-disk lifecycle and invocation.
pub mod binary;
pub mod errors;
pub mod invoke;

pub use binary::HelperBinary;
pub use errors::HelperError;
pub use invoke::HelperFetcher;
