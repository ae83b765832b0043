pub mod discovery;
pub mod processing;

pub use discovery::{discover_run, RecordFile};
pub use processing::{ProcessingService, ProcessingSummary, RunSummary};
